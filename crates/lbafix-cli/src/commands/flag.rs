//! Flag command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lbafix::{BootSectorFlagPatcher, FlagStatus};

/// Run the flag command
pub fn run(boot_sector: &Path) -> Result<FlagStatus> {
    let mut data = fs::read(boot_sector)
        .with_context(|| format!("Failed to read {}", boot_sector.display()))?;

    let status = BootSectorFlagPatcher::patch(&mut data)
        .with_context(|| format!("Failed to patch {}", boot_sector.display()))?;

    match status {
        FlagStatus::Cleared { previous } => {
            fs::write(boot_sector, &data)
                .with_context(|| format!("Failed to write {}", boot_sector.display()))?;
            println!(
                "Removed flag from {} (0x{:02X} -> 0x30 at offset 0x3E)",
                boot_sector.display(),
                previous
            );
        }
        FlagStatus::AlreadyCleared => {
            println!("Flag already removed from {}", boot_sector.display());
        }
    }

    Ok(status)
}
