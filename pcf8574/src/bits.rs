//! Bit arithmetic on the 8-bit port value
//!
//! All functions are pure; the driver applies them to its output shadow
//! and writes the result to the device.

/// Number of I/O lines on the expander
pub const PIN_COUNT: u8 = 8;

/// Set or clear bit `pin` of `value`
///
/// `pin` must be below [`PIN_COUNT`]; the driver range-checks before calling.
pub fn set_bit(value: u8, pin: u8, high: bool) -> u8 {
    if high {
        value | (1 << pin)
    } else {
        value & !(1 << pin)
    }
}

/// Check bit `pin` of `value`
pub fn bit(value: u8, pin: u8) -> bool {
    value & (1 << pin) != 0
}

/// Logical shift towards pin 7, filling the low lines with zeros
///
/// Shifting by eight or more clears every line.
pub fn shift_left(value: u8, n: u8) -> u8 {
    if n >= PIN_COUNT { 0 } else { value << n }
}

/// Logical shift towards pin 0, filling the high lines with zeros
///
/// Shifting by eight or more clears every line.
pub fn shift_right(value: u8, n: u8) -> u8 {
    if n >= PIN_COUNT { 0 } else { value >> n }
}

/// Rotate towards pin 0, moving the lowest line to the highest
pub fn rotate_right(value: u8, n: u8) -> u8 {
    let r = n & 7;
    if r == 0 {
        return value;
    }
    (value >> r) | (value << (PIN_COUNT - r))
}

/// Rotate towards pin 7, moving the highest line to the lowest
///
/// Rotating left by `k` is rotating right by `(8 - k) mod 8`.
pub fn rotate_left(value: u8, n: u8) -> u8 {
    rotate_right(value, PIN_COUNT - (n & 7))
}

/// Mirror the byte: pin 7 swaps with 0, 6 with 1, 5 with 2, 4 with 3
pub fn reverse(value: u8) -> u8 {
    let mut x = value;
    x = ((x & 0xAA) >> 1) | ((x & 0x55) << 1);
    x = ((x & 0xCC) >> 2) | ((x & 0x33) << 2);
    (x >> 4) | (x << 4)
}

/// Byte with only line `pin` high, or all lines low when `pin` is out of range
pub fn select_mask(pin: u8) -> u8 {
    if pin < PIN_COUNT { 1 << pin } else { 0x00 }
}

/// Byte with lines `0..=pin` high, or all lines high when `pin` is out of range
pub fn select_n_mask(pin: u8) -> u8 {
    if pin < PIN_COUNT {
        ((2u16 << pin) - 1) as u8
    } else {
        0xFF
    }
}
