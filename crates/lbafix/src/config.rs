//! Patch configuration.
//!
//! A [`Config`] is built once per run and borrowed by every engine. The
//! defaults relocate a boot binary authored for LBA 45000 (`0xAFC8`) onto
//! LBA 11702 (`0x2DB6`).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::patch::RELOCATION_MODES;

/// Default LBA the binary was authored for (45000)
pub const DEFAULT_OLD_VALUE: u32 = 0xAFC8;

/// Default LBA the binary is relocated to (11702)
pub const DEFAULT_NEW_VALUE: u32 = 0x2DB6;

/// Configuration for one patch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Value searched for by the relocation patches
    pub old_value: u32,
    /// Replacement value written by the relocation patches
    pub new_value: u32,
    /// HACK0: `old_value -> new_value`
    pub mode0: bool,
    /// HACK1: `old_value + 166 -> new_value + 166`
    pub mode1: bool,
    /// HACK2: `old_value + 150 -> new_value + 150`
    pub mode2: bool,
    /// HACK3: HACK1 and HACK2 together
    pub mode3: bool,
    /// Apply the copy-protection bypass
    pub unprotect: bool,
    /// Persist changes; when false every engine only reports
    pub write_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            old_value: DEFAULT_OLD_VALUE,
            new_value: DEFAULT_NEW_VALUE,
            mode0: false,
            mode1: false,
            mode2: false,
            mode3: false,
            unprotect: false,
            write_enabled: false,
        }
    }
}

impl Config {
    /// Create a new configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Whether any relocation mode is selected
    pub fn any_relocation(&self) -> bool {
        self.mode0 || self.mode1 || self.mode2 || self.mode3
    }

    /// Check that every enabled relocation fits in 32 bits.
    pub fn validate(&self) -> Result<()> {
        for mode in RELOCATION_MODES.iter().filter(|m| m.is_enabled(self)) {
            if mode.values(self).is_none() {
                return Err(Error::InvalidConfig(format!(
                    "{} overflows: {:#x}/{:#x} + {}",
                    mode.kind, self.old_value, self.new_value, mode.addend
                )));
            }
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    old_value: Option<u32>,
    new_value: Option<u32>,
    mode0: Option<bool>,
    mode1: Option<bool>,
    mode2: Option<bool>,
    mode3: Option<bool>,
    unprotect: Option<bool>,
    write_enabled: Option<bool>,
}

impl ConfigBuilder {
    /// Start from an existing configuration (e.g. one loaded from a profile)
    pub fn from_config(config: &Config) -> Self {
        Self {
            old_value: Some(config.old_value),
            new_value: Some(config.new_value),
            mode0: Some(config.mode0),
            mode1: Some(config.mode1),
            mode2: Some(config.mode2),
            mode3: Some(config.mode3),
            unprotect: Some(config.unprotect),
            write_enabled: Some(config.write_enabled),
        }
    }

    pub fn old_value(mut self, value: u32) -> Self {
        self.old_value = Some(value);
        self
    }

    pub fn new_value(mut self, value: u32) -> Self {
        self.new_value = Some(value);
        self
    }

    pub fn mode0(mut self, enabled: bool) -> Self {
        self.mode0 = Some(enabled);
        self
    }

    pub fn mode1(mut self, enabled: bool) -> Self {
        self.mode1 = Some(enabled);
        self
    }

    pub fn mode2(mut self, enabled: bool) -> Self {
        self.mode2 = Some(enabled);
        self
    }

    pub fn mode3(mut self, enabled: bool) -> Self {
        self.mode3 = Some(enabled);
        self
    }

    pub fn unprotect(mut self, enabled: bool) -> Self {
        self.unprotect = Some(enabled);
        self
    }

    /// Enable writing (off means dry run)
    pub fn write_enabled(mut self, enabled: bool) -> Self {
        self.write_enabled = Some(enabled);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<Config> {
        let default = Config::default();
        let config = Config {
            old_value: self.old_value.unwrap_or(default.old_value),
            new_value: self.new_value.unwrap_or(default.new_value),
            mode0: self.mode0.unwrap_or(default.mode0),
            mode1: self.mode1.unwrap_or(default.mode1),
            mode2: self.mode2.unwrap_or(default.mode2),
            mode3: self.mode3.unwrap_or(default.mode3),
            unprotect: self.unprotect.unwrap_or(default.unprotect),
            write_enabled: self.write_enabled.unwrap_or(default.write_enabled),
        };
        config.validate()?;
        Ok(config)
    }
}
