//! Layout conversion of a binary on disk, together with the boot sector
//! flag it depends on.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::layout::{BootSectorFlagPatcher, FlagStatus, LayoutConverter, LayoutStatus};

/// Default name of the converted binary
pub const DEFAULT_OUTPUT_NAME: &str = "1ST_READ.BIN";

/// Inputs of one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub binary: PathBuf,
    pub boot_sector: PathBuf,
    /// Where to write the converted binary; defaults to `1ST_READ.BIN` next
    /// to the input
    pub output: Option<PathBuf>,
    /// Move the converted binary over the input afterwards
    pub replace: bool,
}

impl ConversionRequest {
    pub fn new(binary: impl Into<PathBuf>, boot_sector: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            boot_sector: boot_sector.into(),
            output: None,
            replace: false,
        }
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => self
                .binary
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(DEFAULT_OUTPUT_NAME),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// False when the binary was already in the generic layout
    pub converted: bool,
    pub flag: FlagStatus,
    /// Final location of the converted binary
    pub written_to: Option<PathBuf>,
    /// The converted binary replaced the input
    pub replaced: bool,
}

/// Convert a binary and clear the boot sector flag.
///
/// Both files are read and both transforms computed before anything is
/// written, so a malformed input leaves every file untouched.
pub fn run_conversion(request: &ConversionRequest) -> Result<ConversionReport> {
    let binary = fs::read(&request.binary).map_err(|e| Error::io(&request.binary, e))?;
    let mut boot_sector =
        fs::read(&request.boot_sector).map_err(|e| Error::io(&request.boot_sector, e))?;

    let layout = LayoutConverter::convert(&binary)?;
    let flag = BootSectorFlagPatcher::patch(&mut boot_sector)?;

    let mut report = ConversionReport {
        converted: layout.is_converted(),
        flag,
        written_to: None,
        replaced: false,
    };

    if let LayoutStatus::Converted(output) = layout {
        let output_path = request.output_path();
        fs::write(&output_path, &output).map_err(|e| Error::io(&output_path, e))?;
        info!(
            "Converted {} to {}",
            request.binary.display(),
            output_path.display()
        );
        report.written_to = Some(output_path);
    } else {
        info!(
            "{} seems to be already converted, nothing to do",
            request.binary.display()
        );
    }

    if flag.changed() {
        fs::write(&request.boot_sector, &boot_sector)
            .map_err(|e| Error::io(&request.boot_sector, e))?;
        info!("Updated {}", request.boot_sector.display());
    }

    if request.replace {
        if let Some(output_path) = report.written_to.take() {
            if output_path != request.binary {
                fs::rename(&output_path, &request.binary)
                    .map_err(|e| Error::io(&request.binary, e))?;
                info!(
                    "Replaced original {} with converted version",
                    request.binary.display()
                );
                report.replaced = true;
            }
            report.written_to = Some(request.binary.clone());
        }
    }

    Ok(report)
}
