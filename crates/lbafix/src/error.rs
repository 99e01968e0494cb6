use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {what}: {len:#x} bytes, need at least {min:#x}")]
    MalformedInput {
        what: &'static str,
        len: usize,
        min: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an IO error with the path it happened on.
    ///
    /// `NotFound` IO errors are mapped to [`Error::NotFound`] so callers can
    /// tell a missing file from a failing disk.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound { path }
        } else {
            Error::Io { path, source }
        }
    }

    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::io("data/1ST_READ.BIN", io_err);
        assert!(err.is_not_found());
        assert!(matches!(err, Error::NotFound { .. }));

        let other_io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err2 = Error::io("data/IP.BIN", other_io_err);
        assert!(!err2.is_not_found());
        assert!(matches!(err2, Error::Io { .. }));
    }

    #[test]
    fn test_malformed_input_message() {
        let err = Error::MalformedInput {
            what: "binary",
            len: 0x800,
            min: 0x1000,
        };
        assert_eq!(
            err.to_string(),
            "Malformed binary: 0x800 bytes, need at least 0x1000"
        );
    }
}
