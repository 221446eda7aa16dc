//! Configuration types and loading for the pcf8574 command

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::expander::{DEFAULT_ADDRESS, INITIAL_VALUE};

/// Default configuration file location
pub const DEFAULT_CONFIG_FILE: &str = "/etc/pcf8574/pcf8574.conf";

/// Default I2C bus number (Raspberry Pi I2C bus 1)
pub const DEFAULT_I2C_BUS: u8 = 1;

/// Default button mask (every line treated as an input)
pub const DEFAULT_BUTTON_MASK: u8 = 0xFF;

/// Address window of the PCF8574
pub const PCF8574_ADDRESSES: std::ops::RangeInclusive<u8> = 0x20..=0x27;

/// Address window of the PCF8574A
pub const PCF8574A_ADDRESSES: std::ops::RangeInclusive<u8> = 0x38..=0x3F;

/// Configuration for one expander
///
/// Field names with underscores map to dash-separated keys in YAML
/// (e.g., `i2c_addr` <-> `i2c-addr`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// I2C bus number
    #[serde(default = "default_i2c_bus")]
    pub i2c_bus: u8,

    /// I2C device address (in hex, e.g., 0x20)
    #[serde(default = "default_i2c_addr")]
    pub i2c_addr: u8,

    /// Value written by `begin` before any command runs
    ///
    /// If None, the output shadow is seeded from the current pin levels
    /// instead and the device is left untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<u8>,

    /// Lines sampled by the button commands
    #[serde(default = "default_button_mask")]
    pub button_mask: u8,
}

fn default_i2c_bus() -> u8 {
    DEFAULT_I2C_BUS
}

fn default_i2c_addr() -> u8 {
    DEFAULT_ADDRESS
}

fn default_button_mask() -> u8 {
    DEFAULT_BUTTON_MASK
}

impl Default for Config {
    fn default() -> Self {
        Self {
            i2c_bus: DEFAULT_I2C_BUS,
            i2c_addr: DEFAULT_ADDRESS,
            initial_value: None,
            button_mask: DEFAULT_BUTTON_MASK,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead(path.into(), e))?;

        serde_yaml::from_str(&contents)
            .map_err(|e| ConfigError::YamlParse(path.into(), e.to_string()))
    }

    /// Load configuration from a file if it exists, otherwise return defaults
    pub fn from_file_or_default(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.i2c_bus > 10 {
            return Err(ConfigError::InvalidValue(format!(
                "i2c-bus {} is unusually high (expected 0-10)",
                self.i2c_bus
            )));
        }

        // 0x00-0x07 and 0x78-0x7F are reserved by the I2C specification
        if !(0x08..=0x77).contains(&self.i2c_addr) {
            return Err(ConfigError::InvalidValue(format!(
                "i2c-addr 0x{:02X} is not a usable 7-bit address (expected 0x08-0x77)",
                self.i2c_addr
            )));
        }

        Ok(())
    }

    /// Value for `begin`, falling back to all lines high
    pub fn initial_value_or_default(&self) -> u8 {
        self.initial_value.unwrap_or(INITIAL_VALUE)
    }
}

/// Whether `address` lies in the PCF8574 or PCF8574A address window
pub fn is_expander_address(address: u8) -> bool {
    PCF8574_ADDRESSES.contains(&address) || PCF8574A_ADDRESSES.contains(&address)
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse YAML config file {0}: {1}")]
    YamlParse(PathBuf, String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}
