//! I2C transport used by the expander driver
//!
//! The driver does not open or own a specific bus. Callers pass anything
//! implementing [`Bus`], such as [`LinuxBus`](crate::linux::LinuxBus) or a
//! `&mut` borrow of one shared between several expanders.

/// Byte-level I2C master
///
/// Faults are reported through `Self::Error` and passed through by the
/// driver without interpretation.
pub trait Bus {
    /// Transport-specific fault
    type Error: std::error::Error + Send + Sync + 'static;

    /// Address the device with a zero-length write and check for an acknowledge
    fn probe(&mut self, address: u8) -> Result<(), Self::Error>;

    /// Write `bytes` to the device in a single transaction
    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Request `buffer.len()` bytes from the device
    ///
    /// Returns the number of bytes actually received.
    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<B: Bus + ?Sized> Bus for &mut B {
    type Error = B::Error;

    fn probe(&mut self, address: u8) -> Result<(), Self::Error> {
        (**self).probe(address)
    }

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, bytes)
    }

    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read(address, buffer)
    }
}
