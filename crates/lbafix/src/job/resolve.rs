//! Target path resolution.

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{debug, warn};

fn has_wildcard(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Expand glob patterns into a deduplicated list of target paths.
///
/// Wildcard matches that are not regular files are dropped. A pattern
/// that matches nothing (or is not a valid glob) is kept as a literal path
/// so that a mistyped name surfaces as a not-found error instead of
/// disappearing from the job. Plain paths are always kept literally.
pub fn resolve_targets<S: AsRef<str>>(patterns: &[S]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let mut candidates = Vec::new();

        if has_wildcard(pattern) {
            match glob::glob(pattern) {
                Ok(paths) => {
                    let mut matched_any = false;
                    for entry in paths {
                        matched_any = true;
                        match entry {
                            Ok(path) if path.is_file() => candidates.push(path),
                            Ok(path) => debug!("Skipping non-file match {}", path.display()),
                            Err(e) => warn!("Unreadable match for {}: {}", pattern, e),
                        }
                    }
                    if !matched_any {
                        debug!("No match for {}, keeping it as a path", pattern);
                        candidates.push(PathBuf::from(pattern));
                    }
                }
                Err(e) => {
                    warn!("Invalid pattern {}: {}", pattern, e);
                    candidates.push(PathBuf::from(pattern));
                }
            }
        } else {
            candidates.push(PathBuf::from(pattern));
        }

        for path in candidates {
            if seen.insert(path.clone()) {
                targets.push(path);
            }
        }
    }

    targets
}
