//! Linux `/dev/i2c-<n>` access through `rppal`.

use core::fmt;

use rppal::i2c::{self, I2c};

use crate::transport::{Bus, Transport};

/// The bus the ID809 sits on when wired to a Raspberry Pi's GPIO header.
pub const DEFAULT_BUS: u8 = 1;

/// A Linux I2C bus device, opened on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RppalBus {
    bus: u8,
}

impl RppalBus {
    /// `bus` selects `/dev/i2c-<bus>`.
    pub fn new(bus: u8) -> Self {
        Self { bus }
    }
}

impl Default for RppalBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUS)
    }
}

impl fmt::Display for RppalBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/dev/i2c-{}", self.bus)
    }
}

impl Bus for RppalBus {
    type Transport = I2c;
    type Error = i2c::Error;

    fn open_device(&mut self) -> Result<I2c, i2c::Error> {
        I2c::with_bus(self.bus)
    }

    fn bind_address(&mut self, transport: &mut I2c, address: u8) -> Result<(), i2c::Error> {
        transport.set_slave_address(u16::from(address))
    }
}

impl Transport for I2c {
    type Error = i2c::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, i2c::Error> {
        I2c::write(self, bytes)
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, i2c::Error> {
        I2c::read(self, buffer)
    }
}
