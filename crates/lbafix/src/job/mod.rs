//! File-level jobs.
//!
//! [`PatchJobDriver`] applies the patch engines to a set of files and
//! [`run_conversion`] runs the layout conversion together with the boot
//! sector flag patch. These are the only parts of the crate that touch the
//! filesystem.

mod conversion;
mod resolve;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::patch::{PatchOutcome, PositionPatchEngine, UnprotectPatcher};

pub use conversion::{ConversionReport, ConversionRequest, run_conversion};
pub use resolve::resolve_targets;

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    #[serde(flatten)]
    pub outcome: PatchOutcome,
    /// The patched buffer was written back
    pub written: bool,
}

pub type FileResult = Result<FileReport>;

/// Per-file results of a job, keyed by path
#[derive(Debug, Default)]
pub struct JobReport {
    pub files: BTreeMap<PathBuf, FileResult>,
}

impl JobReport {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&FileResult> {
        self.files.get(path.as_ref())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&PathBuf, &Error)> {
        self.files
            .iter()
            .filter_map(|(path, result)| result.as_ref().err().map(|e| (path, e)))
    }

    /// Paths that were written back
    pub fn written(&self) -> impl Iterator<Item = &PathBuf> {
        self.files
            .iter()
            .filter(|(_, result)| matches!(result, Ok(report) if report.written))
            .map(|(path, _)| path)
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Runs the configured patch engines over a set of files
#[derive(Debug, Clone, Copy)]
pub struct PatchJobDriver<'a> {
    config: &'a Config,
}

impl<'a> PatchJobDriver<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Resolve `patterns` and patch every target.
    ///
    /// A failing file is recorded in the report and the job moves on.
    pub fn run<S: AsRef<str>>(&self, patterns: &[S]) -> JobReport {
        let targets = resolve_targets(patterns);
        self.run_paths(targets)
    }

    /// Patch an already resolved list of paths
    pub fn run_paths<I>(&self, paths: I) -> JobReport
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut report = JobReport::default();
        for path in paths {
            let result = self.process_file(&path);
            if let Err(ref e) = result {
                error!("Error processing {}: {}", path.display(), e);
            }
            report.files.insert(path, result);
        }
        report
    }

    pub fn process_file(&self, path: &Path) -> FileResult {
        debug!("Processing: {}", path.display());

        let metadata = fs::metadata(path).map_err(|e| Error::io(path, e))?;
        if !metadata.is_file() {
            return Err(Error::NotFound {
                path: path.to_path_buf(),
            });
        }

        let mut buffer = fs::read(path).map_err(|e| Error::io(path, e))?;
        let outcome = self.patch_buffer(&mut buffer);

        let written = self.config.write_enabled && outcome.changed;
        if written {
            fs::write(path, &buffer).map_err(|e| Error::io(path, e))?;
            info!("Successfully patched: {}", path.display());
        }

        debug!("Finished: {}", path.display());
        Ok(FileReport { outcome, written })
    }

    /// Run the enabled engines over one buffer: unprotect first, then the
    /// relocation modes.
    pub fn patch_buffer(&self, buffer: &mut [u8]) -> PatchOutcome {
        let mut outcome = PatchOutcome::default();
        if self.config.unprotect {
            outcome.merge(UnprotectPatcher::apply(buffer, self.config.write_enabled));
        }
        if self.config.any_relocation() {
            outcome.merge(PositionPatchEngine::apply(buffer, self.config));
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::{PatchKind, UNPROTECT_PATTERN};
    use crate::scan::encode_u32;

    fn sample_binary() -> Vec<u8> {
        let mut data = vec![0u8; 64];
        data[4..8].copy_from_slice(&encode_u32(0xAFC8));
        data[16..20].copy_from_slice(&UNPROTECT_PATTERN);
        data[32..36].copy_from_slice(&encode_u32(0xAFC8 + 150));
        data
    }

    fn config(write: bool) -> Config {
        Config {
            mode0: true,
            mode2: true,
            unprotect: true,
            write_enabled: write,
            ..Config::default()
        }
    }

    #[test]
    fn test_write_mode_patches_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1ST_READ.BIN");
        fs::write(&path, sample_binary()).unwrap();

        let config = config(true);
        let report = PatchJobDriver::new(&config).run(&[path.display().to_string()]);

        let file = report.get(&path).unwrap().as_ref().unwrap();
        assert!(file.written);
        assert_eq!(file.outcome.hit_count(PatchKind::Unprotect), 1);
        assert_eq!(file.outcome.hit_count(PatchKind::Direct), 1);
        assert_eq!(file.outcome.hit_count(PatchKind::Offset150), 1);

        let data = fs::read(&path).unwrap();
        assert_eq!(data[4..8], encode_u32(0x2DB6));
        assert_eq!(data[16..20], [0x09, 0x00, 0x09, 0x00]);
        assert_eq!(data[32..36], encode_u32(0x2DB6 + 150));
        assert_eq!(report.written().count(), 1);
    }

    #[test]
    fn test_dry_run_leaves_files_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1ST_READ.BIN");
        fs::write(&path, sample_binary()).unwrap();

        let config = config(false);
        let report = PatchJobDriver::new(&config).run(&[path.display().to_string()]);

        let file = report.get(&path).unwrap().as_ref().unwrap();
        assert!(!file.written);
        assert!(!file.outcome.changed);
        assert_eq!(file.outcome.hits.len(), 3);
        assert_eq!(fs::read(&path).unwrap(), sample_binary());
    }

    #[test]
    fn test_unchanged_file_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("IP.BIN");
        fs::write(&path, vec![0u8; 64]).unwrap();

        let config = config(true);
        let report = PatchJobDriver::new(&config).run(&[path.display().to_string()]);

        let file = report.get(&path).unwrap().as_ref().unwrap();
        assert!(!file.written);
        assert!(file.outcome.hits.is_empty());
        assert!(report.is_success());
    }

    #[test]
    fn test_file_report_serializes_flat() {
        let config = Config {
            mode0: true,
            ..Config::default()
        };
        let mut buffer = sample_binary();
        let report = FileReport {
            outcome: PatchJobDriver::new(&config).patch_buffer(&mut buffer),
            written: false,
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["written"], false);
        assert_eq!(value["changed"], false);
        assert_eq!(value["hits"][0]["kind"], "HACK0");
        assert_eq!(value["hits"][0]["offset"], 4);
        assert!(value.get("outcome").is_none());
    }

    #[test]
    fn test_missing_file_does_not_abort_job() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("1ST_READ.BIN");
        let missing = dir.path().join("0WINCEOS.BIN");
        fs::write(&present, sample_binary()).unwrap();

        let config = config(true);
        let report = PatchJobDriver::new(&config).run(&[
            missing.display().to_string(),
            present.display().to_string(),
        ]);

        assert_eq!(report.len(), 2);
        assert!(report.get(&missing).unwrap().as_ref().unwrap_err().is_not_found());
        assert!(report.get(&present).unwrap().is_ok());
        assert!(!report.is_success());
        assert_eq!(report.failures().count(), 1);
        assert_eq!(fs::read(&present).unwrap()[4..8], encode_u32(0x2DB6));
    }

    #[test]
    fn test_directory_is_reported_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(true);
        let report = PatchJobDriver::new(&config).run(&[dir.path().display().to_string()]);

        let result = report.get(dir.path()).unwrap();
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_glob_job_patches_each_file() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["A.BIN", "B.BIN"] {
            fs::write(dir.path().join(name), sample_binary()).unwrap();
        }

        let config = Config {
            unprotect: true,
            write_enabled: true,
            ..Config::default()
        };
        let pattern = format!("{}/*.BIN", dir.path().display());
        let report = PatchJobDriver::new(&config).run(&[pattern]);

        assert_eq!(report.len(), 2);
        assert_eq!(report.written().count(), 2);
        for name in ["A.BIN", "B.BIN"] {
            let data = fs::read(dir.path().join(name)).unwrap();
            assert_eq!(data[16..20], [0x09, 0x00, 0x09, 0x00]);
            // Relocation modes were off
            assert_eq!(data[4..8], encode_u32(0xAFC8));
        }
    }
}
