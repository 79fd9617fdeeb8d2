//! [`Bus`] for any blocking `embedded-hal` I2C peripheral.

use core::fmt;

use embedded_hal::blocking::i2c::{Read, Write};

use crate::transport::{Bus, Transport};

/// The peripheral is already held by an open link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("I2C peripheral already in use")]
pub struct PeripheralInUse;

/// Wraps an I2C peripheral so a `SensorLink` can open and close it.
///
/// Opening hands the peripheral to the link; closing hands it back, so the link can be reopened
/// and [`free`](Self::free) can recover the peripheral afterwards.
#[derive(Debug)]
pub struct HalBus<I2C> {
    i2c: Option<I2C>,
}

impl<I2C> HalBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c: Some(i2c) }
    }

    /// Gives the peripheral back. `None` while a link still holds it open.
    pub fn free(self) -> Option<I2C> {
        self.i2c
    }
}

/// An I2C peripheral bound to one 7-bit address.
#[derive(Debug)]
pub struct HalTransport<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> fmt::Display for HalBus<I2C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "embedded-hal I2C peripheral")
    }
}

impl<I2C, E> Bus for HalBus<I2C>
where
    I2C: Read<Error = E> + Write<Error = E>,
    E: fmt::Debug,
{
    type Transport = HalTransport<I2C>;
    type Error = PeripheralInUse;

    fn open_device(&mut self) -> Result<HalTransport<I2C>, PeripheralInUse> {
        let i2c = self.i2c.take().ok_or(PeripheralInUse)?;
        Ok(HalTransport { i2c, address: 0 })
    }

    fn bind_address(&mut self, transport: &mut HalTransport<I2C>, address: u8) -> Result<(), PeripheralInUse> {
        transport.address = address;
        Ok(())
    }

    fn release(&mut self, transport: HalTransport<I2C>) {
        self.i2c = Some(transport.i2c);
    }
}

// embedded-hal transfers are all-or-nothing, so success always means the full buffer.
impl<I2C, E> Transport for HalTransport<I2C>
where
    I2C: Read<Error = E> + Write<Error = E>,
    E: fmt::Debug,
{
    type Error = E;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, E> {
        Write::write(&mut self.i2c, self.address, bytes)?;
        Ok(bytes.len())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, E> {
        Read::read(&mut self.i2c, self.address, buffer)?;
        Ok(buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use embedded_hal::blocking::i2c::{Read, Write};

    use super::HalBus;
    use crate::{OpError, SensorLink, TransportError, UserId, DEFAULT_ADDRESS};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Nack;

    #[derive(Debug, Default)]
    struct FakeI2cPort {
        written: Vec<(u8, Vec<u8>)>,
        read_from: Vec<u8>,
        reply: Vec<u8>,
        nack: bool,
    }

    impl Write for FakeI2cPort {
        type Error = Nack;

        fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Nack> {
            if self.nack {
                return Err(Nack);
            }
            self.written.push((address, bytes.to_vec()));
            Ok(())
        }
    }

    impl Read for FakeI2cPort {
        type Error = Nack;

        fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Nack> {
            if self.nack {
                return Err(Nack);
            }
            self.read_from.push(address);
            buffer.copy_from_slice(&self.reply[..buffer.len()]);
            Ok(())
        }
    }

    #[test]
    fn transfers_go_to_the_bound_address() {
        let mut bus = HalBus::new(FakeI2cPort {
            reply: vec![0x00, 0x2A],
            ..FakeI2cPort::default()
        });
        {
            let mut link = SensorLink::new(&mut bus);
            link.open(DEFAULT_ADDRESS).unwrap();
            link.set_security_level(4).unwrap();
            assert_eq!(link.match_fingerprint(), Ok(UserId(42)));
        }

        let port = bus.free().unwrap();
        assert_eq!(
            port.written,
            [(0x1F, vec![0x01, 0x0A, 0x04]), (0x1F, vec![0x03, 0x01])]
        );
        assert_eq!(port.read_from, [0x1F]);
    }

    #[test]
    fn peripheral_survives_reopen() {
        let mut bus = HalBus::new(FakeI2cPort {
            reply: vec![0x07],
            ..FakeI2cPort::default()
        });
        let mut link = SensorLink::new(&mut bus);

        link.open(0x1F).unwrap();
        link.close();
        link.open(0x2F).unwrap();
        assert_eq!(link.read_device_status(), Ok(7));
        drop(link);

        assert_eq!(bus.free().unwrap().read_from, [0x2F]);
    }

    #[test]
    fn open_link_holds_the_peripheral() {
        let mut bus = HalBus::new(FakeI2cPort::default());
        let mut link = SensorLink::new(&mut bus);

        link.open(DEFAULT_ADDRESS).unwrap();
        assert!(link.bus().i2c.is_none());
        link.close();
        assert!(link.bus().i2c.is_some());
    }

    #[test]
    fn nack_is_a_transport_error() {
        let port = FakeI2cPort {
            nack: true,
            ..FakeI2cPort::default()
        };
        let mut link = SensorLink::new(HalBus::new(port));
        link.open(DEFAULT_ADDRESS).unwrap();

        assert_eq!(
            link.capture_fingerprint(),
            Err(OpError::Transport(TransportError::Io(Nack)))
        );
    }
}
