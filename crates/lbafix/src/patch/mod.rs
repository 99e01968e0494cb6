//! In-memory patch engines.
//!
//! Each engine scans a buffer, reports every hit, and rewrites the hit only
//! when writing is enabled. An outcome is `changed` only if at least one
//! hit was actually applied.

mod position;
mod unprotect;

use std::fmt;

use serde::Serialize;
use strum::{Display, IntoStaticStr};
use tracing::debug;

pub use position::{PositionPatchEngine, RELOCATION_MODES, RelocationMode};
pub use unprotect::{UNPROTECT_PATTERN, UNPROTECT_REPLACEMENT, UnprotectPatcher};

/// Patch family a hit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IntoStaticStr)]
pub enum PatchKind {
    #[strum(serialize = "UNPROTECT")]
    #[serde(rename = "UNPROTECT")]
    Unprotect,
    #[strum(serialize = "HACK0")]
    #[serde(rename = "HACK0")]
    Direct,
    #[strum(serialize = "HACK1")]
    #[serde(rename = "HACK1")]
    Offset166,
    #[strum(serialize = "HACK2")]
    #[serde(rename = "HACK2")]
    Offset150,
}

impl PatchKind {
    /// What the pattern of this kind represents, for log output
    pub fn description(&self) -> &'static str {
        match self {
            Self::Unprotect => "unprotect pattern",
            Self::Direct => "old position (HACK0)",
            Self::Offset166 => "old position + 166 (HACK1)",
            Self::Offset150 => "old position + 150 (HACK2)",
        }
    }
}

/// One pattern occurrence found by an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatchHit {
    pub kind: PatchKind,
    pub offset: usize,
    /// Whether the replacement was written into the buffer
    pub applied: bool,
}

impl fmt::Display for PatchHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Found {} at offset: 0x{:x}",
            self.kind.description(),
            self.offset
        )
    }
}

/// Result of running one or more engines over a buffer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchOutcome {
    pub changed: bool,
    pub hits: Vec<PatchHit>,
}

impl PatchOutcome {
    /// Combine the outcome of a later engine into this one
    pub fn merge(&mut self, other: PatchOutcome) {
        self.changed |= other.changed;
        self.hits.extend(other.hits);
    }

    pub fn hit_count(&self, kind: PatchKind) -> usize {
        self.hits.iter().filter(|hit| hit.kind == kind).count()
    }

    /// Human-readable log of what was found and changed
    pub fn log(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.hits.len() * 2);
        for hit in &self.hits {
            lines.push(hit.to_string());
            if hit.applied {
                lines.push(format!("Applied {} patch", hit.kind));
            } else {
                lines.push(format!("Would apply {} patch (use -w to write)", hit.kind));
            }
        }
        lines
    }
}

/// Overwrite every offset with `replacement` (when writing) and record hits.
///
/// `offsets` must have been collected before any write so that hits of one
/// pass never feed another.
fn apply_at(
    buffer: &mut [u8],
    kind: PatchKind,
    offsets: &[usize],
    replacement: &[u8],
    write_enabled: bool,
    outcome: &mut PatchOutcome,
) {
    for &offset in offsets {
        debug!("{} at offset 0x{:x}", kind.description(), offset);
        let applied = write_enabled
            && match buffer.get_mut(offset..offset + replacement.len()) {
                Some(slot) => {
                    slot.copy_from_slice(replacement);
                    true
                }
                None => false,
            };
        if applied {
            debug!("Applied {} patch at 0x{:x}", kind, offset);
            outcome.changed = true;
        }
        outcome.hits.push(PatchHit {
            kind,
            offset,
            applied,
        });
    }
}
