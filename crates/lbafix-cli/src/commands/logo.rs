//! Logo command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lbafix::{LogoReport, inject_logo};
use owo_colors::OwoColorize;

/// Run the logo command
pub fn run(image: &Path, boot_sector: &Path) -> Result<LogoReport> {
    let logo =
        fs::read(image).with_context(|| format!("Failed to read logo {}", image.display()))?;
    let mut data = fs::read(boot_sector)
        .with_context(|| format!("Failed to read {}", boot_sector.display()))?;

    let report = inject_logo(&mut data, &logo);
    if report.oversize {
        println!(
            "{}",
            "Warning: this image is larger than 8192 bytes and will corrupt a normal boot sector, inserting anyway!"
                .yellow()
        );
    }

    fs::write(boot_sector, &data)
        .with_context(|| format!("Failed to write {}", boot_sector.display()))?;
    println!(
        "Inserted {} byte logo into {} at 0x{:X}",
        report.len,
        boot_sector.display(),
        report.offset
    );

    Ok(report)
}
