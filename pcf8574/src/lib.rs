//! Driver for the PCF8574 and PCF8574A 8-bit I2C I/O expanders

pub mod bits;
pub mod bus;
pub mod config;
pub mod error;
pub mod expander;
pub mod linux;

pub use bus::Bus;
pub use error::{BusOpenError, ExpanderError};
pub use expander::{DEFAULT_ADDRESS, INITIAL_VALUE, Pcf8574, PortState};
#[cfg(target_os = "linux")]
pub use linux::LinuxBus;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
