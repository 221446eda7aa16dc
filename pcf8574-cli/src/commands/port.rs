//! Pin and port commands

use anyhow::Result;
use pcf8574::{Bus, ExpanderError, Pcf8574};

use super::format_byte;

/// Read one pin, or the whole port
pub fn read<B: Bus>(expander: &mut Pcf8574<B>, pin: Option<u8>) -> Result<()> {
    match pin {
        Some(pin) => println!("{}", expander.read(pin)? as u8),
        None => println!("{}", format_byte(expander.read8()?)),
    }
    Ok(())
}

/// Sample inputs with the button sequence
///
/// A pin samples that line only; otherwise `mask` or the configured button
/// mask selects the lines.
pub fn button<B: Bus>(expander: &mut Pcf8574<B>, pin: Option<u8>, mask: Option<u8>) -> Result<()> {
    match (pin, mask) {
        (Some(pin), _) => println!("{}", expander.read_button(pin)? as u8),
        (None, Some(mask)) => println!("{}", format_byte(expander.read_button8(mask)?)),
        (None, None) => println!("{}", format_byte(expander.read_buttons()?)),
    }
    Ok(())
}

/// Toggle one pin, a mask of pins, or every pin
pub fn toggle<B: Bus>(expander: &mut Pcf8574<B>, pin: Option<u8>, mask: Option<u8>) -> Result<()> {
    update(expander, |e| match (pin, mask) {
        (Some(pin), _) => e.toggle(pin),
        (None, Some(mask)) => e.toggle_mask(mask),
        (None, None) => e.invert_all(),
    })
}

/// Apply an output operation and print the resulting outputs
pub fn update<B, F>(expander: &mut Pcf8574<B>, operation: F) -> Result<()>
where
    B: Bus,
    F: FnOnce(&mut Pcf8574<B>) -> Result<(), ExpanderError<B::Error>>,
{
    operation(expander)?;
    println!("{}", format_byte(expander.value_out()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_bus::TestBus;
    use crate::commands::{Seed, prepare};
    use pcf8574::config::Config;

    fn prepared(latch: u8, pulled_low: u8, seed: Seed) -> Pcf8574<TestBus> {
        let mut pcf = Pcf8574::new(TestBus::new(latch, pulled_low), 0x20);
        prepare(&mut pcf, &Config::default(), seed).unwrap();
        pcf
    }

    #[test]
    fn test_button_leaves_pressed_input_released() {
        let mut pcf = prepared(0xFF, 0x01, Seed::Inputs(0xFF));
        button(&mut pcf, None, None).unwrap();

        assert_eq!(pcf.value(), 0xFE);
        assert_eq!(pcf.value_out(), 0xFF);
        let bus = pcf.into_inner();
        assert_eq!(bus.writes, vec![0xFF, 0xFF]);
        assert_eq!(bus.latch, 0xFF);
    }

    #[test]
    fn test_button_keeps_outputs_outside_mask() {
        // Pin 7 drives an LED low, pin 0 is a pressed button
        let mut pcf = prepared(0x7F, 0x01, Seed::Inputs(0x01));
        button(&mut pcf, Some(0), None).unwrap();

        let bus = pcf.into_inner();
        assert_eq!(bus.writes, vec![0x7F, 0x7F]);
        assert_eq!(bus.latch, 0x7F);
    }

    #[test]
    fn test_button_rejects_bad_pin() {
        let mut pcf = prepared(0xFF, 0x00, Seed::Inputs(0x00));
        assert!(button(&mut pcf, Some(8), None).is_err());
        assert!(pcf.into_inner().writes.is_empty());
    }

    #[test]
    fn test_read_does_not_write() {
        let mut pcf = prepared(0xF0, 0x10, Seed::None);
        read(&mut pcf, None).unwrap();
        read(&mut pcf, Some(4)).unwrap();
        assert_eq!(pcf.value(), 0xE0);
        assert!(pcf.into_inner().writes.is_empty());
    }

    #[test]
    fn test_toggle_acts_on_current_outputs() {
        let mut pcf = prepared(0x0F, 0x00, Seed::Outputs);
        toggle(&mut pcf, Some(7), None).unwrap();
        assert_eq!(pcf.value_out(), 0x8F);
        toggle(&mut pcf, None, Some(0x03)).unwrap();
        assert_eq!(pcf.value_out(), 0x8C);
        toggle(&mut pcf, None, None).unwrap();
        assert_eq!(pcf.value_out(), 0x73);
        assert_eq!(pcf.into_inner().latch, 0x73);
    }

    #[test]
    fn test_update_applies_and_propagates_errors() {
        let mut pcf = prepared(0b0000_0011, 0x00, Seed::Outputs);
        update(&mut pcf, |e| e.shift_left(2)).unwrap();
        assert_eq!(pcf.value_out(), 0b0000_1100);

        assert!(update(&mut pcf, |e| e.write(9, true)).is_err());
        assert_eq!(pcf.into_inner().writes, vec![0b0000_1100]);
    }
}
