//! Command implementations and shared argument helpers

pub mod port;
pub mod status;

use anyhow::Result;
use pcf8574::config::Config;
use pcf8574::{Bus, Pcf8574};
use tracing::{debug, info};

/// Open the configured bus and create the driver
#[cfg(target_os = "linux")]
pub fn open(config: &Config) -> Result<Pcf8574<pcf8574::LinuxBus>> {
    let bus = pcf8574::LinuxBus::open(config.i2c_bus)?;
    let mut expander = Pcf8574::new(bus, config.i2c_addr);
    expander.set_button_mask(config.button_mask);
    Ok(expander)
}

/// How a command needs the output shadow prepared
///
/// Each run starts with a fresh driver whose shadow knows nothing about the
/// latches, and the chip cannot report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seed {
    /// The command reads only, or writes a whole byte
    None,
    /// The command modifies the current outputs
    Outputs,
    /// The command samples the lines in the mask as inputs
    Inputs(u8),
}

/// Bring the output shadow in line with the device
///
/// Writes `initial-value` through `begin` when configured. Otherwise the
/// shadow is seeded from the pin levels as `seed` asks, without writing.
/// Lines sampled as inputs are seeded high so a pressed button is never
/// written back as a low output.
pub fn prepare<B: Bus>(expander: &mut Pcf8574<B>, config: &Config, seed: Seed) -> Result<()> {
    if let Some(value) = config.initial_value {
        expander.begin(value)?;
        info!("Initialised outputs to {}", format_byte(value));
        return Ok(());
    }

    let inputs = match seed {
        Seed::None => return Ok(()),
        Seed::Outputs => 0x00,
        Seed::Inputs(mask) => mask,
    };
    let value = expander.sync_from_device(inputs)?;
    debug!("Adopted {} as outputs", format_byte(value));
    Ok(())
}

/// Format a port value as hex and binary
pub fn format_byte(value: u8) -> String {
    format!("0x{:02X} (0b{:08b})", value, value)
}

/// Parse a byte given as decimal, `0x` hex or `0b` binary
pub fn parse_byte(s: &str) -> Result<u8, String> {
    let s = s.trim();
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        u8::from_str_radix(&bin.replace('_', ""), 2)
    } else {
        s.parse::<u8>()
    };
    parsed.map_err(|e| format!("invalid byte value '{}': {}", s, e))
}

/// Parse a pin level: 1/0, high/low, on/off
pub fn parse_level(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "high" | "on" => Ok(true),
        "0" | "low" | "off" => Ok(false),
        _ => Err(format!("invalid level '{}' (expected 1, 0, high or low)", s)),
    }
}
