//! Relocation patches (HACK0..HACK3).
//!
//! The target binaries store the disc LBA at three fixed displacements:
//! the value itself, `+166` and `+150`. HACK3 is shorthand for HACK1 and
//! HACK2 together.

use tracing::{debug, warn};

use super::{PatchKind, PatchOutcome, apply_at};
use crate::config::Config;
use crate::scan::{PatternScanner, encode_u32};

/// One relocation sub-patch: a fixed addend and the flags that enable it
#[derive(Debug, Clone, Copy)]
pub struct RelocationMode {
    pub kind: PatchKind,
    pub addend: u32,
    enabled_if: fn(&Config) -> bool,
}

impl RelocationMode {
    pub fn is_enabled(&self, config: &Config) -> bool {
        (self.enabled_if)(config)
    }

    /// `(search, replace)` values, or `None` if either overflows 32 bits
    pub fn values(&self, config: &Config) -> Option<(u32, u32)> {
        Some((
            config.old_value.checked_add(self.addend)?,
            config.new_value.checked_add(self.addend)?,
        ))
    }
}

pub const RELOCATION_MODES: [RelocationMode; 3] = [
    RelocationMode {
        kind: PatchKind::Direct,
        addend: 0,
        enabled_if: |c| c.mode0,
    },
    RelocationMode {
        kind: PatchKind::Offset166,
        addend: 166,
        enabled_if: |c| c.mode1 || c.mode3,
    },
    RelocationMode {
        kind: PatchKind::Offset150,
        addend: 150,
        enabled_if: |c| c.mode2 || c.mode3,
    },
];

/// Applies the enabled relocation modes to a buffer
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionPatchEngine;

impl PositionPatchEngine {
    pub fn apply(buffer: &mut [u8], config: &Config) -> PatchOutcome {
        // Scan everything first: a replacement written by one mode must not
        // create or hide a hit for another.
        let mut pending = Vec::new();
        for mode in RELOCATION_MODES.iter().filter(|m| m.is_enabled(config)) {
            let Some((old, new)) = mode.values(config) else {
                warn!(
                    "Skipping {}: {:#x}/{:#x} + {} does not fit in 32 bits",
                    mode.kind, config.old_value, config.new_value, mode.addend
                );
                continue;
            };
            let offsets: Vec<usize> = PatternScanner::for_u32(old).scan(buffer).collect();
            debug!(
                "{}: {} occurrence(s) of {:#x} -> {:#x}",
                mode.kind,
                offsets.len(),
                old,
                new
            );
            pending.push((mode.kind, offsets, encode_u32(new)));
        }

        let mut outcome = PatchOutcome::default();
        for (kind, offsets, replacement) in pending {
            apply_at(
                buffer,
                kind,
                &offsets,
                &replacement,
                config.write_enabled,
                &mut outcome,
            );
        }
        outcome
    }
}
