//! Error types for the PCF8574 driver
//!
//! Two kinds of failure exist: a pin argument outside 0-7, and a bus
//! transfer that did not complete. `ExpanderError::code()` maps both onto
//! a one-byte status code for callers that log or forward numeric status.

use std::io;

/// Numeric code for a pin argument outside 0-7
pub const PIN_ERROR: u8 = 0x81;

/// Numeric code for any I2C transfer failure
pub const I2C_ERROR: u8 = 0x82;

/// Errors returned by expander operations
///
/// `E` is the fault type of the injected [`Bus`](crate::bus::Bus) and is
/// carried through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ExpanderError<E> {
    /// Pin argument outside 0-7
    #[error("Pin {0} is out of range (expected 0-7)")]
    PinOutOfRange(u8),

    /// Device did not acknowledge the probe
    #[error("No PCF8574 responding at address 0x{address:02X}")]
    NotConnected { address: u8 },

    /// Transport delivered a different number of bytes than requested
    #[error("Short read from 0x{address:02X}: expected {expected} bytes, got {got}")]
    ShortRead {
        address: u8,
        expected: usize,
        got: usize,
    },

    /// Transport fault
    #[error("I2C transfer with 0x{address:02X} failed")]
    Bus {
        address: u8,
        #[source]
        source: E,
    },
}

impl<E> ExpanderError<E> {
    /// Numeric error code (`PIN_ERROR` or `I2C_ERROR`)
    pub fn code(&self) -> u8 {
        match self {
            ExpanderError::PinOutOfRange(_) => PIN_ERROR,
            ExpanderError::NotConnected { .. }
            | ExpanderError::ShortRead { .. }
            | ExpanderError::Bus { .. } => I2C_ERROR,
        }
    }

    /// True for failures caused by the bus rather than by the caller
    pub fn is_bus_error(&self) -> bool {
        self.code() == I2C_ERROR
    }
}

/// Failure to open an I2C bus
#[derive(Debug, thiserror::Error)]
pub enum BusOpenError {
    /// The requested bus does not exist or cannot be opened
    #[error("I2C interface {bus} is not available")]
    InterfaceUnavailable {
        bus: u8,
        #[source]
        source: io::Error,
    },
}
