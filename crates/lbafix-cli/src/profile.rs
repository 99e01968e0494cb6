//! Patch profile loading.
//!
//! A profile is a TOML file holding any subset of the [`Config`] fields:
//!
//! ```toml
//! old_value = 45000
//! new_value = 11702
//! mode3 = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lbafix::Config;
use tracing::{debug, info};

/// Profile file name inside the user config directory
const PROFILE_FILE: &str = "profile.toml";

fn default_profile_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lbafix").join(PROFILE_FILE))
}

/// Parse a profile from TOML text
pub fn parse_profile(content: &str) -> Result<Config> {
    toml::from_str(content).context("Failed to parse profile")
}

/// Load the base configuration.
///
/// An explicit path must exist. Without one, the default profile in the
/// user config directory is used if present, otherwise built-in defaults.
pub fn load_profile(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_profile_path() {
            Some(path) if path.is_file() => path,
            _ => {
                debug!("No profile found, using defaults");
                return Ok(Config::default());
            }
        },
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    let config = parse_profile(&content)
        .with_context(|| format!("Invalid profile {}", path.display()))?;
    info!("Loaded profile from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile() {
        let config = parse_profile("new_value = 5167\nmode3 = true\n").unwrap();
        assert_eq!(config.old_value, 0xAFC8);
        assert_eq!(config.new_value, 5167);
        assert!(config.mode3);
        assert!(!config.write_enabled);
    }

    #[test]
    fn test_parse_profile_rejects_out_of_range() {
        assert!(parse_profile("old_value = -1\n").is_err());
        assert!(parse_profile("old_value = \"0xafc8\"\n").is_err());
    }

    #[test]
    fn test_load_explicit_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.toml");
        fs::write(&path, "old_value = 0xAFC8\nunprotect = true\n").unwrap();

        let config = load_profile(Some(path.as_path())).unwrap();
        assert_eq!(config.old_value, 45000);
        assert!(config.unprotect);
    }

    #[test]
    fn test_missing_explicit_profile_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_profile(Some(missing.as_path())).is_err());
    }
}
