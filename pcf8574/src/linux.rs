//! Linux i2c-dev transport
//!
//! Uses `I2C_RDWR` message transfers on `/dev/i2c-N`, so a single open bus
//! can address any number of expanders.
//!
//! This module is only available on Linux targets.

#![cfg(target_os = "linux")]

use i2cdev::core::{I2CMessage, I2CTransfer};
use i2cdev::linux::{LinuxI2CBus, LinuxI2CError, LinuxI2CMessage};
use tracing::{debug, trace};

use crate::bus::Bus;
use crate::error::BusOpenError;

/// I2C bus opened through the Linux i2c-dev interface
pub struct LinuxBus {
    bus: LinuxI2CBus,
    number: u8,
}

impl LinuxBus {
    /// Open `/dev/i2c-<number>`
    ///
    /// # Errors
    /// Returns `BusOpenError::InterfaceUnavailable` if the device node does
    /// not exist or cannot be opened (missing kernel module, permissions).
    ///
    /// # Example
    /// ```ignore
    /// use pcf8574::{LinuxBus, Pcf8574};
    ///
    /// let bus = LinuxBus::open(1)?;
    /// let mut expander = Pcf8574::new(bus, 0x20);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(number: u8) -> Result<Self, BusOpenError> {
        let path = format!("/dev/i2c-{}", number);
        let bus = LinuxI2CBus::new(&path).map_err(|e| BusOpenError::InterfaceUnavailable {
            bus: number,
            source: e.into(),
        })?;
        debug!("Opened {}", path);

        Ok(Self { bus, number })
    }

    /// Bus number this handle was opened with
    pub fn number(&self) -> u8 {
        self.number
    }
}

impl Bus for LinuxBus {
    type Error = LinuxI2CError;

    fn probe(&mut self, address: u8) -> Result<(), LinuxI2CError> {
        trace!("i2c-{}: probe 0x{:02X}", self.number, address);
        let mut messages = [LinuxI2CMessage::write(&[]).with_address(address as u16)];
        self.bus.transfer(&mut messages)?;
        Ok(())
    }

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), LinuxI2CError> {
        trace!("i2c-{}: write 0x{:02X} {:02X?}", self.number, address, bytes);
        let mut messages = [LinuxI2CMessage::write(bytes).with_address(address as u16)];
        self.bus.transfer(&mut messages)?;
        Ok(())
    }

    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<usize, LinuxI2CError> {
        let len = buffer.len();
        let mut messages = [LinuxI2CMessage::read(buffer).with_address(address as u16)];
        let completed = self.bus.transfer(&mut messages)?;
        trace!("i2c-{}: read 0x{:02X}, {} message(s)", self.number, address, completed);

        // The kernel either completes the whole message or fails it.
        Ok(if completed == 1 { len } else { 0 })
    }
}

// Note: no unit tests here. Exercising this adapter needs a real
// /dev/i2c-N node; driver behavior is covered against the mock bus.
