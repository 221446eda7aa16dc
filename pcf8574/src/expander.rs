//! PCF8574 / PCF8574A driver
//!
//! The chip has no registers: a one-byte write sets the eight output
//! latches, a one-byte read returns the eight pin levels. Lines are
//! quasi-bidirectional. A latch written low drives its pin low, a latch
//! written high lets the pin float high through a weak pull-up so an
//! external source can pull it down. Reading a line as an input therefore
//! only works while its latch is high.
//!
//! The driver keeps two bytes of state:
//! - `output`: the last value written (or attempted), used as the base for
//!   every read-modify-write operation so single-pin writes never disturb
//!   the other lines
//! - `input`: the last value successfully read, left untouched when a read fails
//!
//! Operations take `&mut self` and issue one to three bus transactions.
//! Multi-step operations are not atomic; callers sharing one expander
//! between threads must serialize access themselves.

use serde::Serialize;
use tracing::{debug, warn};

use crate::bits::{self, PIN_COUNT};
use crate::bus::Bus;
use crate::error::ExpanderError;

/// Address of a PCF8574 with A0-A2 tied low
pub const DEFAULT_ADDRESS: u8 = 0x20;

/// Value written by `begin_default`: all lines released high
pub const INITIAL_VALUE: u8 = 0xFF;

/// Serializable view of the driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortState {
    pub address: u8,
    /// Last value read from the pins
    pub input: u8,
    /// Last value written to the latches
    pub output: u8,
    pub button_mask: u8,
}

/// Driver for one PCF8574 on bus `B`
#[derive(Debug)]
pub struct Pcf8574<B> {
    bus: B,
    address: u8,
    output: u8,
    input: u8,
    button_mask: u8,
}

impl<B: Bus> Pcf8574<B> {
    /// Create a driver for the device at `address`
    ///
    /// No bus traffic happens until the first operation. Call
    /// [`begin`](Self::begin) to put the device into a known state.
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            output: 0xFF,
            input: 0x00,
            button_mask: 0xFF,
        }
    }

    /// Create a driver for the device at [`DEFAULT_ADDRESS`]
    pub fn new_default(bus: B) -> Self {
        Self::new(bus, DEFAULT_ADDRESS)
    }

    /// Release the bus handle
    pub fn into_inner(self) -> B {
        self.bus
    }

    /// Check the device is present and write `value` to every latch
    ///
    /// The chip keeps its latch state across a host reset while this
    /// driver starts with a fresh shadow, so the initial write brings both
    /// back in line.
    ///
    /// # Errors
    /// `NotConnected` if the probe is not acknowledged (nothing is written),
    /// `Bus` if the initial write fails.
    pub fn begin(&mut self, value: u8) -> Result<(), ExpanderError<B::Error>> {
        if !self.is_connected() {
            warn!("No PCF8574 at 0x{:02X}", self.address);
            return Err(ExpanderError::NotConnected {
                address: self.address,
            });
        }
        debug!("PCF8574 at 0x{:02X} initialised to 0x{:02X}", self.address, value);
        self.write8(value)
    }

    /// [`begin`](Self::begin) with all lines high
    pub fn begin_default(&mut self) -> Result<(), ExpanderError<B::Error>> {
        self.begin(INITIAL_VALUE)
    }

    /// Probe the device without touching the cached state
    pub fn is_connected(&mut self) -> bool {
        self.bus.probe(self.address).is_ok()
    }

    /// Point the driver at another device and probe it
    ///
    /// The cached input and output bytes still describe the previous
    /// device. Issue a `read8`, `write8` or `sync_from_device` to
    /// resynchronize.
    pub fn set_address(&mut self, address: u8) -> bool {
        debug!("Address changed 0x{:02X} -> 0x{:02X}", self.address, address);
        self.address = address;
        self.is_connected()
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Read all eight pin levels
    ///
    /// On failure the input cache keeps its last good value, which
    /// [`value`](Self::value) still returns.
    pub fn read8(&mut self) -> Result<u8, ExpanderError<B::Error>> {
        let mut buffer = [0u8; 1];
        let got = self
            .bus
            .read(self.address, &mut buffer)
            .map_err(|source| ExpanderError::Bus {
                address: self.address,
                source,
            })?;
        if got != buffer.len() {
            warn!("Short read from 0x{:02X}: got {} bytes", self.address, got);
            return Err(ExpanderError::ShortRead {
                address: self.address,
                expected: buffer.len(),
                got,
            });
        }
        self.input = buffer[0];
        Ok(self.input)
    }

    /// Write all eight latches
    ///
    /// The output shadow takes `value` before the transfer and keeps it if
    /// the transfer fails.
    pub fn write8(&mut self, value: u8) -> Result<(), ExpanderError<B::Error>> {
        self.output = value;
        self.bus
            .write(self.address, &[value])
            .map_err(|source| {
                warn!("Write of 0x{:02X} to 0x{:02X} failed", value, self.address);
                ExpanderError::Bus {
                    address: self.address,
                    source,
                }
            })
    }

    /// Read the level of a single pin
    ///
    /// Refreshes the whole input cache.
    pub fn read(&mut self, pin: u8) -> Result<bool, ExpanderError<B::Error>> {
        check_pin(pin)?;
        let value = self.read8()?;
        Ok(bits::bit(value, pin))
    }

    /// Drive a single pin, leaving the other latches as last written
    pub fn write(&mut self, pin: u8, high: bool) -> Result<(), ExpanderError<B::Error>> {
        check_pin(pin)?;
        self.write8(bits::set_bit(self.output, pin, high))
    }

    /// Invert a single output
    pub fn toggle(&mut self, pin: u8) -> Result<(), ExpanderError<B::Error>> {
        check_pin(pin)?;
        self.toggle_mask(1 << pin)
    }

    /// Invert the outputs selected by `mask`
    pub fn toggle_mask(&mut self, mask: u8) -> Result<(), ExpanderError<B::Error>> {
        self.write8(self.output ^ mask)
    }

    /// Invert every output
    pub fn invert_all(&mut self) -> Result<(), ExpanderError<B::Error>> {
        self.toggle_mask(0xFF)
    }

    /// Shift the outputs `n` lines towards pin 0
    ///
    /// Nothing is written when `n` is zero or all outputs are already low.
    /// Shifting eight or more lines clears every output.
    pub fn shift_right(&mut self, n: u8) -> Result<(), ExpanderError<B::Error>> {
        if n == 0 || self.output == 0 {
            return Ok(());
        }
        self.write8(bits::shift_right(self.output, n))
    }

    /// Shift the outputs `n` lines towards pin 7
    ///
    /// Nothing is written when `n` is zero or all outputs are already low.
    /// Shifting eight or more lines clears every output.
    pub fn shift_left(&mut self, n: u8) -> Result<(), ExpanderError<B::Error>> {
        if n == 0 || self.output == 0 {
            return Ok(());
        }
        self.write8(bits::shift_left(self.output, n))
    }

    /// Rotate the outputs `n` lines towards pin 0, pin 0 wrapping to pin 7
    ///
    /// Nothing is written when `n` is a multiple of eight.
    pub fn rotate_right(&mut self, n: u8) -> Result<(), ExpanderError<B::Error>> {
        if n % PIN_COUNT == 0 {
            return Ok(());
        }
        self.write8(bits::rotate_right(self.output, n))
    }

    /// Rotate the outputs `n` lines towards pin 7, pin 7 wrapping to pin 0
    ///
    /// Nothing is written when `n` is a multiple of eight.
    pub fn rotate_left(&mut self, n: u8) -> Result<(), ExpanderError<B::Error>> {
        self.rotate_right(PIN_COUNT - (n % PIN_COUNT))
    }

    /// Mirror the outputs: pin 0 swaps with pin 7, pin 1 with pin 6, ...
    pub fn reverse(&mut self) -> Result<(), ExpanderError<B::Error>> {
        self.write8(bits::reverse(self.output))
    }

    /// Drive `pin` high and every other line low
    ///
    /// Out-of-range pins drive every line low.
    pub fn select(&mut self, pin: u8) -> Result<(), ExpanderError<B::Error>> {
        self.write8(bits::select_mask(pin))
    }

    /// Drive pins `0..=pin` high and the rest low
    ///
    /// Out-of-range pins drive every line high.
    pub fn select_n(&mut self, pin: u8) -> Result<(), ExpanderError<B::Error>> {
        self.write8(bits::select_n_mask(pin))
    }

    pub fn select_none(&mut self) -> Result<(), ExpanderError<B::Error>> {
        self.write8(0x00)
    }

    pub fn select_all(&mut self) -> Result<(), ExpanderError<B::Error>> {
        self.write8(0xFF)
    }

    /// Sample the lines in `mask` as inputs
    ///
    /// Releases the masked latches high, reads the port, then writes the
    /// previous outputs back. The restore write is issued even if an earlier
    /// step failed, so `value_out()` is unchanged on return. The first
    /// error encountered is reported.
    pub fn read_button8(&mut self, mask: u8) -> Result<u8, ExpanderError<B::Error>> {
        let saved = self.output;
        let sampled = self.write8(saved | mask).and_then(|_| self.read8());
        let restored = self.write8(saved);

        let value = sampled?;
        restored?;
        Ok(value)
    }

    /// [`read_button8`](Self::read_button8) with the stored button mask
    pub fn read_buttons(&mut self) -> Result<u8, ExpanderError<B::Error>> {
        self.read_button8(self.button_mask)
    }

    /// Sample a single line as an input
    ///
    /// Same sequence as [`read_button8`](Self::read_button8) for one pin.
    pub fn read_button(&mut self, pin: u8) -> Result<bool, ExpanderError<B::Error>> {
        check_pin(pin)?;
        let value = self.read_button8(1 << pin)?;
        Ok(bits::bit(value, pin))
    }

    /// Read the port and adopt the levels as the output shadow
    ///
    /// Nothing is written. Lines in `inputs` are adopted as released (high)
    /// whatever they read, so a pressed button is not latched low by a later
    /// write. Other lines held low externally are adopted as low outputs.
    pub fn sync_from_device(&mut self, inputs: u8) -> Result<u8, ExpanderError<B::Error>> {
        let value = self.read8()?;
        self.output = value | inputs;
        Ok(self.output)
    }

    /// Last value successfully read
    pub fn value(&self) -> u8 {
        self.input
    }

    /// Last value written, or attempted
    pub fn value_out(&self) -> u8 {
        self.output
    }

    pub fn button_mask(&self) -> u8 {
        self.button_mask
    }

    /// Set the lines sampled by [`read_buttons`](Self::read_buttons)
    pub fn set_button_mask(&mut self, mask: u8) {
        self.button_mask = mask;
    }

    pub fn snapshot(&self) -> PortState {
        PortState {
            address: self.address,
            input: self.input,
            output: self.output,
            button_mask: self.button_mask,
        }
    }
}

fn check_pin<E>(pin: u8) -> Result<(), ExpanderError<E>> {
    if pin < PIN_COUNT {
        Ok(())
    } else {
        Err(ExpanderError::PinOutOfRange(pin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::mock::{MockBus, MockError, Transfer};
    use crate::error::{I2C_ERROR, PIN_ERROR};

    const ADDR: u8 = 0x20;

    fn expander() -> Pcf8574<MockBus> {
        Pcf8574::new(MockBus::new(ADDR), ADDR)
    }

    fn with_output(value: u8) -> Pcf8574<MockBus> {
        let mut pcf = expander();
        pcf.write8(value).unwrap();
        pcf.bus.clear_log();
        pcf
    }

    #[test]
    fn test_defaults() {
        let pcf = expander();
        assert_eq!(pcf.address(), 0x20);
        assert_eq!(pcf.value(), 0x00);
        assert_eq!(pcf.value_out(), 0xFF);
        assert_eq!(pcf.button_mask(), 0xFF);
        assert!(pcf.bus.log.is_empty());

        let pcf = Pcf8574::new_default(MockBus::new(DEFAULT_ADDRESS));
        assert_eq!(pcf.address(), DEFAULT_ADDRESS);
    }

    #[test]
    fn test_begin_writes_initial_value() {
        let mut pcf = expander();
        pcf.begin(0x0F).unwrap();
        assert_eq!(
            pcf.bus.log,
            vec![Transfer::Probe(ADDR), Transfer::Write(ADDR, vec![0x0F])]
        );
        assert_eq!(pcf.value_out(), 0x0F);
        assert_eq!(pcf.bus.latch, 0x0F);
    }

    #[test]
    fn test_begin_default_releases_all_lines() {
        let mut pcf = expander();
        pcf.bus.latch = 0x00;
        pcf.begin_default().unwrap();
        assert_eq!(pcf.bus.latch, 0xFF);
    }

    #[test]
    fn test_missing_device() {
        let mut pcf = Pcf8574::new(MockBus::empty(), 0x38);

        let err = pcf.begin_default().unwrap_err();
        assert!(matches!(err, ExpanderError::NotConnected { address: 0x38 }));
        assert_eq!(pcf.bus.writes(), Vec::<u8>::new());

        let err = pcf.read8().unwrap_err();
        assert_eq!(err.code(), I2C_ERROR);
        assert!(matches!(err, ExpanderError::ShortRead { got: 0, .. }));
        assert_eq!(pcf.value(), 0);

        // Errors are returned per call, a later success carries none
        pcf.bus.device = Some(0x38);
        assert_eq!(pcf.read8().unwrap(), 0xFF);
    }

    #[test]
    fn test_read_pins_on_missing_device() {
        let mut pcf = Pcf8574::new(MockBus::empty(), 0x38);
        for pin in 0..8 {
            let err = pcf.read(pin).unwrap_err();
            assert_eq!(err.code(), I2C_ERROR);
        }
        let err = pcf.read(8).unwrap_err();
        assert_eq!(err.code(), PIN_ERROR);
    }

    #[test]
    fn test_is_connected_has_no_side_effects() {
        let mut pcf = with_output(0x5A);
        assert!(pcf.is_connected());
        assert_eq!(pcf.bus.log, vec![Transfer::Probe(ADDR)]);
        assert_eq!(pcf.value_out(), 0x5A);
        assert_eq!(pcf.value(), 0x00);
    }

    #[test]
    fn test_set_address_checks_new_device() {
        let mut pcf = expander();
        assert!(!pcf.set_address(0x21));
        assert_eq!(pcf.address(), 0x21);
        assert!(pcf.set_address(ADDR));
    }

    #[test]
    fn test_read8_keeps_last_good_value() {
        let mut pcf = expander();
        pcf.bus.pulled_low = 0x0F;
        assert_eq!(pcf.read8().unwrap(), 0xF0);

        pcf.bus.short_reads = true;
        pcf.bus.pulled_low = 0xFF;
        assert!(pcf.read8().is_err());
        assert_eq!(pcf.value(), 0xF0);
    }

    #[test]
    fn test_write8_failure_keeps_attempted_value() {
        let mut pcf = with_output(0x11);
        pcf.bus.fail_writes = true;

        let err = pcf.write8(0x22).unwrap_err();
        assert!(matches!(
            err,
            ExpanderError::Bus {
                address: ADDR,
                source: MockError::Nack(ADDR)
            }
        ));
        assert_eq!(pcf.value_out(), 0x22);
        assert_eq!(pcf.bus.latch, 0x11);
    }

    #[test]
    fn test_write_then_read_every_pin() {
        let mut pcf = with_output(0xFF);
        for pin in 0..8 {
            pcf.write(pin, false).unwrap();
            assert!(!pcf.read(pin).unwrap());
            assert_eq!(pcf.value_out(), 0xFF & !(1 << pin));

            pcf.write(pin, true).unwrap();
            assert!(pcf.read(pin).unwrap());
            assert_eq!(pcf.value_out(), 0xFF);
        }
    }

    #[test]
    fn test_write_preserves_other_pins() {
        let mut pcf = with_output(0b1010_0101);
        pcf.write(1, true).unwrap();
        assert_eq!(pcf.value_out(), 0b1010_0111);
        pcf.write(7, false).unwrap();
        assert_eq!(pcf.value_out(), 0b0010_0111);
        assert_eq!(pcf.bus.writes(), vec![0b1010_0111, 0b0010_0111]);
    }

    #[test]
    fn test_pin_out_of_range() {
        let mut pcf = with_output(0x3C);
        for pin in [8, 9, 200, 255] {
            assert!(matches!(pcf.read(pin), Err(ExpanderError::PinOutOfRange(p)) if p == pin));
            assert!(matches!(pcf.write(pin, true), Err(ExpanderError::PinOutOfRange(_))));
            assert!(matches!(pcf.toggle(pin), Err(ExpanderError::PinOutOfRange(_))));
            assert!(matches!(pcf.read_button(pin), Err(ExpanderError::PinOutOfRange(_))));
        }
        assert!(pcf.bus.log.is_empty());
        assert_eq!(pcf.value_out(), 0x3C);
    }

    #[test]
    fn test_toggle() {
        let mut pcf = with_output(0x00);
        pcf.toggle(0).unwrap();
        pcf.toggle(7).unwrap();
        assert_eq!(pcf.value_out(), 0x81);
        pcf.toggle(0).unwrap();
        assert_eq!(pcf.value_out(), 0x80);
    }

    #[test]
    fn test_toggle_mask_twice_is_identity() {
        for value in 0..=u8::MAX {
            let mut pcf = with_output(value);
            pcf.invert_all().unwrap();
            assert_eq!(pcf.value_out(), !value);
            pcf.toggle_mask(0xFF).unwrap();
            assert_eq!(pcf.value_out(), value);
        }
    }

    #[test]
    fn test_shift() {
        let mut pcf = with_output(0b0000_0011);
        pcf.shift_left(1).unwrap();
        assert_eq!(pcf.value_out(), 0b0000_0110);
        pcf.shift_right(2).unwrap();
        assert_eq!(pcf.value_out(), 0b0000_0001);
        pcf.shift_right(1).unwrap();
        assert_eq!(pcf.value_out(), 0);
        assert_eq!(pcf.bus.writes(), vec![0b0000_0110, 0b0000_0001, 0]);
    }

    #[test]
    fn test_shift_by_eight_or_more_clears() {
        for n in [8, 9, 64, 255] {
            let mut pcf = with_output(0xA5);
            pcf.shift_left(n).unwrap();
            assert_eq!(pcf.value_out(), 0);
            assert_eq!(pcf.bus.writes(), vec![0]);

            let mut pcf = with_output(0xA5);
            pcf.shift_right(n).unwrap();
            assert_eq!(pcf.value_out(), 0);
        }
    }

    #[test]
    fn test_shift_skips_needless_writes() {
        let mut pcf = with_output(0x00);
        pcf.shift_left(3).unwrap();
        pcf.shift_right(9).unwrap();
        assert_eq!(pcf.value_out(), 0);

        let mut pcf2 = with_output(0x42);
        pcf2.shift_left(0).unwrap();
        pcf2.shift_right(0).unwrap();
        assert_eq!(pcf2.value_out(), 0x42);

        assert!(pcf.bus.log.is_empty());
        assert!(pcf2.bus.log.is_empty());
    }

    #[test]
    fn test_rotate() {
        let mut pcf = with_output(0b0000_0001);
        pcf.rotate_right(1).unwrap();
        assert_eq!(pcf.value_out(), 0b1000_0000);
        pcf.rotate_left(2).unwrap();
        assert_eq!(pcf.value_out(), 0b0000_0010);
        pcf.rotate_left(9).unwrap();
        assert_eq!(pcf.value_out(), 0b0000_0100);
    }

    #[test]
    fn test_rotate_by_multiple_of_eight_is_silent() {
        let mut pcf = with_output(0x96);
        for n in [0, 8, 16, 248] {
            pcf.rotate_right(n).unwrap();
            pcf.rotate_left(n).unwrap();
        }
        assert_eq!(pcf.value_out(), 0x96);
        assert!(pcf.bus.log.is_empty());
    }

    #[test]
    fn test_rotate_round_trip() {
        for value in 0..=u8::MAX {
            for n in 0..8 {
                let mut pcf = with_output(value);
                pcf.rotate_right(n).unwrap();
                pcf.rotate_left(n).unwrap();
                assert_eq!(pcf.value_out(), value);
            }
        }
    }

    #[test]
    fn test_reverse() {
        let mut pcf = with_output(0b1100_0001);
        pcf.reverse().unwrap();
        assert_eq!(pcf.value_out(), 0b1000_0011);
        assert_eq!(pcf.bus.latch, 0b1000_0011);

        for value in 0..=u8::MAX {
            let mut pcf = with_output(value);
            pcf.reverse().unwrap();
            pcf.reverse().unwrap();
            assert_eq!(pcf.value_out(), value);
        }
    }

    #[test]
    fn test_select_family() {
        let mut pcf = with_output(0xF0);
        pcf.select(3).unwrap();
        assert_eq!(pcf.value_out(), 0b0000_1000);
        pcf.select_n(3).unwrap();
        assert_eq!(pcf.value_out(), 0b0000_1111);
        pcf.select_all().unwrap();
        assert_eq!(pcf.value_out(), 0xFF);
        pcf.select_none().unwrap();
        assert_eq!(pcf.value_out(), 0x00);

        pcf.select(8).unwrap();
        assert_eq!(pcf.value_out(), 0x00);
        pcf.select_n(8).unwrap();
        assert_eq!(pcf.value_out(), 0xFF);
    }

    #[test]
    fn test_read_button8_restores_outputs() {
        let mut pcf = with_output(0b0000_0000);
        pcf.bus.pulled_low = 0b0000_0100;

        let value = pcf.read_button8(0b0000_1111).unwrap();
        assert_eq!(value, 0b0000_1011);
        assert_eq!(pcf.value(), 0b0000_1011);
        assert_eq!(pcf.value_out(), 0b0000_0000);
        assert_eq!(
            pcf.bus.log,
            vec![
                Transfer::Write(ADDR, vec![0b0000_1111]),
                Transfer::Read(ADDR, 1),
                Transfer::Write(ADDR, vec![0b0000_0000]),
            ]
        );
    }

    #[test]
    fn test_read_button8_keeps_lines_outside_mask() {
        let mut pcf = with_output(0b1010_0000);
        pcf.read_button8(0b0000_0011).unwrap();
        assert_eq!(pcf.bus.writes(), vec![0b1010_0011, 0b1010_0000]);
    }

    #[test]
    fn test_read_button8_restores_after_failures() {
        let mut pcf = with_output(0x30);
        pcf.bus.short_reads = true;
        let err = pcf.read_button8(0x0F).unwrap_err();
        assert!(matches!(err, ExpanderError::ShortRead { .. }));
        assert_eq!(pcf.value_out(), 0x30);
        assert_eq!(pcf.bus.writes(), vec![0x3F, 0x30]);

        let mut pcf = with_output(0x30);
        pcf.bus.fail_writes = true;
        let err = pcf.read_button8(0x0F).unwrap_err();
        assert_eq!(err.code(), I2C_ERROR);
        assert_eq!(pcf.value_out(), 0x30);
        // No read while the lines could not be released
        assert!(!pcf.bus.log.iter().any(|t| matches!(t, Transfer::Read(..))));
    }

    #[test]
    fn test_read_buttons_uses_stored_mask() {
        let mut pcf = with_output(0x00);
        pcf.set_button_mask(0xF0);
        assert_eq!(pcf.button_mask(), 0xF0);
        pcf.bus.pulled_low = 0x10;

        assert_eq!(pcf.read_buttons().unwrap(), 0xE0);
        assert_eq!(pcf.bus.writes(), vec![0xF0, 0x00]);
        assert_eq!(pcf.value_out(), 0x00);
    }

    #[test]
    fn test_read_button() {
        let mut pcf = with_output(0x00);
        pcf.bus.pulled_low = 0b0000_0010;
        assert!(pcf.read_button(0).unwrap());
        assert!(!pcf.read_button(1).unwrap());
        assert_eq!(pcf.value_out(), 0x00);
        assert_eq!(pcf.bus.latch, 0x00);
    }

    #[test]
    fn test_sync_from_device() {
        let mut pcf = expander();
        pcf.bus.latch = 0x3C;
        assert_eq!(pcf.sync_from_device(0x00).unwrap(), 0x3C);
        assert_eq!(pcf.value_out(), 0x3C);
        assert_eq!(pcf.bus.writes(), Vec::<u8>::new());

        pcf.toggle(0).unwrap();
        assert_eq!(pcf.bus.latch, 0x3D);
    }

    #[test]
    fn test_sync_from_device_keeps_inputs_released() {
        let mut pcf = expander();
        pcf.bus.pulled_low = 0x01;

        assert_eq!(pcf.sync_from_device(0xFF).unwrap(), 0xFF);
        assert_eq!(pcf.value(), 0xFE);
        assert_eq!(pcf.read_buttons().unwrap(), 0xFE);
        assert_eq!(pcf.bus.writes(), vec![0xFF, 0xFF]);
        assert_eq!(pcf.bus.latch, 0xFF);
    }

    #[test]
    fn test_shared_bus_borrow() {
        let mut bus = MockBus::new(ADDR);
        {
            let mut pcf = Pcf8574::new(&mut bus, ADDR);
            pcf.select(2).unwrap();
        }
        assert_eq!(bus.latch, 0b0000_0100);

        let pcf = Pcf8574::new(&mut bus, ADDR);
        let bus = pcf.into_inner();
        assert_eq!(bus.writes(), vec![0b0000_0100]);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut pcf = with_output(0x0F);
        pcf.bus.latch = 0xAA;
        pcf.read8().unwrap();
        let state = pcf.snapshot();
        assert_eq!(
            state,
            PortState {
                address: ADDR,
                input: 0xAA,
                output: 0x0F,
                button_mask: 0xFF,
            }
        );
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json["address"], 32);
        assert_eq!(json["output"], 15);
    }
}
