//! # lbafix
//!
//! Binary patch-and-convert engine for boot binaries on optical-disc images
//! authored with a non-default start LBA.
//!
//! This crate provides:
//! - Byte pattern scanning with overlapping matches
//! - Relocation patches that retarget a 32-bit LBA reference
//! - The copy-protection (`CD E4 43 6A`) bypass patch
//! - Conversion of the platform-specific binary layout into the generic one,
//!   plus the boot sector flag and logo helpers that go with it
//! - A job driver that applies the patches to a set of files
//!
//! Every engine works on an in-memory buffer; only the [`job`] module knows
//! about files.

pub mod config;
pub mod error;
pub mod job;
pub mod layout;
pub mod patch;
pub mod scan;

pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use job::{
    ConversionReport, ConversionRequest, FileReport, FileResult, JobReport, PatchJobDriver,
    resolve_targets, run_conversion,
};
pub use layout::{
    BootSectorFlagPatcher, FlagStatus, LayoutConverter, LayoutStatus, LogoReport, inject_logo,
};
pub use patch::{PatchHit, PatchKind, PatchOutcome, PositionPatchEngine, UnprotectPatcher};
pub use scan::{Matches, PatternScanner, decode_u32, encode_u32, find_all};
