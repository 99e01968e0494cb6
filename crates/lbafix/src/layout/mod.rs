//! Binary layout conversion and boot sector helpers.
//!
//! This module centralizes the fixed offsets of both formats.

mod boot_sector;
mod convert;

pub use boot_sector::{BootSectorFlagPatcher, FlagStatus, LogoReport, inject_logo};
pub use convert::{LayoutConverter, LayoutStatus};

/// Offsets of the platform-specific binary layout
pub mod binary {
    /// Size of the leading header and of each trailing block (2 KiB)
    pub const BLOCK: usize = 0x800;

    /// The two trailing blocks compared by the "already converted" check
    pub const TRAILER: usize = BLOCK * 2;

    /// Smallest input the trailer check can be run on
    pub const MIN_CHECK_LEN: usize = TRAILER;

    /// Smallest input that can be converted: header + two trailing blocks of
    /// body, so the duplicated block is a full 2 KiB
    pub const MIN_CONVERT_LEN: usize = BLOCK + TRAILER;
}

/// Offsets inside the boot sector
pub mod boot {
    /// Size of a complete boot sector
    pub const SIZE: usize = 0x8000;

    /// Mode flag byte
    pub const FLAG_OFFSET: usize = 0x3E;

    /// Flag value for "generic binary" (mode flag cleared)
    pub const FLAG_CLEARED: u8 = 0x30;

    /// Start of the boot logo image
    pub const LOGO_OFFSET: usize = 0x3820;

    /// Space reserved for the logo image
    pub const LOGO_MAX_LEN: usize = 8192;
}
