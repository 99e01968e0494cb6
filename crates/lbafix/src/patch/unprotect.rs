//! Copy-protection bypass.
//!
//! `CD E4 43 6A` is the interrupt call used by the protection check; it is
//! replaced with two `09 00` no-ops.

use tracing::debug;

use super::{PatchKind, PatchOutcome, apply_at};
use crate::scan::PatternScanner;

pub const UNPROTECT_PATTERN: [u8; 4] = [0xCD, 0xE4, 0x43, 0x6A];
pub const UNPROTECT_REPLACEMENT: [u8; 4] = [0x09, 0x00, 0x09, 0x00];

#[derive(Debug, Clone, Copy, Default)]
pub struct UnprotectPatcher;

impl UnprotectPatcher {
    pub fn apply(buffer: &mut [u8], write_enabled: bool) -> PatchOutcome {
        let offsets: Vec<usize> = PatternScanner::new(&UNPROTECT_PATTERN)
            .scan(buffer)
            .collect();
        debug!("Unprotect: {} occurrence(s)", offsets.len());

        let mut outcome = PatchOutcome::default();
        apply_at(
            buffer,
            PatchKind::Unprotect,
            &offsets,
            &UNPROTECT_REPLACEMENT,
            write_enabled,
            &mut outcome,
        );
        outcome
    }
}
