use serde::Serialize;
use tracing::{info, warn};

use super::boot::{FLAG_CLEARED, FLAG_OFFSET, LOGO_MAX_LEN, LOGO_OFFSET, SIZE};
use crate::error::{Error, Result};

/// Outcome of clearing the boot sector mode flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlagStatus {
    /// The flag byte was rewritten; holds its previous value
    Cleared { previous: u8 },
    /// The flag byte already held the cleared value
    AlreadyCleared,
}

impl FlagStatus {
    pub fn changed(&self) -> bool {
        matches!(self, Self::Cleared { .. })
    }
}

/// Clears the platform mode flag at `0x3E` of a boot sector
#[derive(Debug, Clone, Copy, Default)]
pub struct BootSectorFlagPatcher;

impl BootSectorFlagPatcher {
    pub fn patch(boot_sector: &mut [u8]) -> Result<FlagStatus> {
        if boot_sector.len() != SIZE {
            warn!(
                "Boot sector is {:#x} bytes, expected {:#x}",
                boot_sector.len(),
                SIZE
            );
        }

        let len = boot_sector.len();
        let flag = boot_sector
            .get_mut(FLAG_OFFSET)
            .ok_or(Error::MalformedInput {
                what: "boot sector",
                len,
                min: FLAG_OFFSET + 1,
            })?;

        if *flag == FLAG_CLEARED {
            info!("Boot sector flag already cleared");
            return Ok(FlagStatus::AlreadyCleared);
        }

        let previous = *flag;
        *flag = FLAG_CLEARED;
        info!(
            "Cleared boot sector flag (0x{:02X} -> 0x{:02X} at 0x{:X})",
            previous, FLAG_CLEARED, FLAG_OFFSET
        );
        Ok(FlagStatus::Cleared { previous })
    }
}

/// Where a logo image was written into a boot sector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogoReport {
    pub offset: usize,
    pub len: usize,
    /// The image is larger than the logo area and overwrites what follows it
    pub oversize: bool,
}

/// Write a boot logo image into the boot sector at `0x3820`.
///
/// Oversize images are written anyway; the buffer grows if the image runs
/// past its end.
pub fn inject_logo(boot_sector: &mut Vec<u8>, logo: &[u8]) -> LogoReport {
    let oversize = logo.len() > LOGO_MAX_LEN;
    if oversize {
        warn!(
            "Logo is {} bytes, larger than {} bytes; it will overwrite the rest of the boot sector",
            logo.len(),
            LOGO_MAX_LEN
        );
    }

    let end = LOGO_OFFSET + logo.len();
    if boot_sector.len() < end {
        boot_sector.resize(end, 0);
    }
    boot_sector[LOGO_OFFSET..end].copy_from_slice(logo);
    info!("Inserted {} byte logo at 0x{:X}", logo.len(), LOGO_OFFSET);

    LogoReport {
        offset: LOGO_OFFSET,
        len: logo.len(),
        oversize,
    }
}
