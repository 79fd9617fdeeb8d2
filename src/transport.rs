//! The seam between the sensor protocol and whatever moves bytes on the bus.

use core::fmt;

/// An open handle to the bus, bound to the sensor's address.
///
/// Both methods report how many bytes were actually transferred. The driver treats anything
/// other than the full buffer as a failed transfer.
pub trait Transport {
    type Error: fmt::Debug;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error>;

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Something that can open a [`Transport`] and bind it to a peripheral address.
///
/// The `Display` impl names the device (for instance `/dev/i2c-1`) in diagnostics.
pub trait Bus: fmt::Display {
    type Transport: Transport;
    type Error: fmt::Debug;

    /// Opens the bus device.
    fn open_device(&mut self) -> Result<Self::Transport, Self::Error>;

    /// Directs all further traffic on `transport` to the 7-bit `address`.
    fn bind_address(&mut self, transport: &mut Self::Transport, address: u8) -> Result<(), Self::Error>;

    /// Takes back a transport the link no longer needs. Dropping it is enough for handles that
    /// close themselves.
    fn release(&mut self, transport: Self::Transport) {
        drop(transport);
    }
}

impl<B: Bus + ?Sized> Bus for &mut B {
    type Transport = B::Transport;
    type Error = B::Error;

    fn open_device(&mut self) -> Result<Self::Transport, Self::Error> {
        (**self).open_device()
    }

    fn bind_address(&mut self, transport: &mut Self::Transport, address: u8) -> Result<(), Self::Error> {
        (**self).bind_address(transport, address)
    }

    fn release(&mut self, transport: Self::Transport) {
        (**self).release(transport)
    }
}
