use core::fmt;

use log::{debug, error, trace};

use crate::commands::Command;
use crate::error::{ConnectError, OpError, TransportError};
use crate::responses::{Reply, UserId};
use crate::transport::{Bus, Transport};
use crate::utils::{FromPayload, MAX_RESPONSE_LEN};

/// Address the ID809 answers on unless it has been reconfigured.
pub const DEFAULT_ADDRESS: u8 = 0x1F;

const MAX_ADDRESS: u8 = 0x7F;

/// Error returned by sensor operations on a link over bus `B`.
pub type LinkError<B> = OpError<<<B as Bus>::Transport as Transport>::Error>;

struct Connection<T> {
    transport: T,
    address: u8,
}

/// Represents an ID809 fingerprint sensor reached over an I2C bus.
///
/// The link starts closed. [`open`](Self::open) acquires the bus and binds the sensor's
/// address; [`close`](Self::close) (or dropping the link) gives the bus back. Every operation
/// is one write, optionally followed by one read, and blocks until the bus is done with both.
pub struct SensorLink<B: Bus> {
    bus: B,
    connection: Option<Connection<B::Transport>>,
}

impl<B: Bus> SensorLink<B> {
    /// Creates a closed link. Nothing is opened until [`open`](Self::open).
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            connection: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    /// The bound peripheral address, or `None` while closed.
    pub fn address(&self) -> Option<u8> {
        self.connection.as_ref().map(|conn| conn.address)
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Opens the bus and binds `address` to it.
    ///
    /// On failure the link stays closed and a handle opened before the failure is released.
    pub fn open(&mut self, address: u8) -> Result<(), ConnectError> {
        if self.connection.is_some() {
            error!("I2C bus at {} is already open", self.bus);
            return Err(ConnectError::AlreadyOpen);
        }
        if address > MAX_ADDRESS {
            error!("Failed to set I2C address to 0x{:02x}: not a 7-bit address", address);
            return Err(ConnectError::AddressBindFailed { address });
        }

        let mut transport = match self.bus.open_device() {
            Ok(transport) => transport,
            Err(e) => {
                error!("Failed to open I2C bus at {}: {:?}", self.bus, e);
                return Err(ConnectError::DeviceUnavailable);
            }
        };

        if let Err(e) = self.bus.bind_address(&mut transport, address) {
            error!("Failed to set I2C address to 0x{:02x}: {:?}", address, e);
            self.bus.release(transport);
            return Err(ConnectError::AddressBindFailed { address });
        }

        debug!("opened {} at address 0x{:02x}", self.bus, address);
        self.connection = Some(Connection { transport, address });
        Ok(())
    }

    /// Releases the bus. Does nothing if the link is already closed.
    pub fn close(&mut self) {
        if let Some(conn) = self.connection.take() {
            debug!("closing {} at address 0x{:02x}", self.bus, conn.address);
            self.bus.release(conn.transport);
        }
    }

    pub fn set_security_level(&mut self, level: u8) -> Result<(), LinkError<B>> {
        self.transaction(&Command::SetSecurityLevel { level }, &mut [])
    }

    pub fn read_device_status(&mut self) -> Result<u8, LinkError<B>> {
        let mut response = [0u8; 1];
        self.transaction(&Command::ReadDeviceStatus, &mut response)?;
        Ok(response[0])
    }

    /// Sends the capture command.
    ///
    /// `Ok` only means the sensor took the command; there is no capture-complete signal.
    pub fn capture_fingerprint(&mut self) -> Result<(), LinkError<B>> {
        self.transaction(&Command::CaptureFingerprint, &mut [])
    }

    /// Runs a match and returns the user ID the sensor reports.
    ///
    /// See [`UserId`] for why a non-match can't be told apart here.
    pub fn match_fingerprint(&mut self) -> Result<UserId, LinkError<B>> {
        let mut response = [0u8; 2];
        self.transaction(&Command::MatchFingerprint, &mut response)?;
        Ok(UserId::from_payload(&response))
    }

    /// Sends any command to the ID809 and then blocks waiting for the reply, if it has one.
    pub fn send_command(&mut self, cmd: Command) -> Result<Reply, LinkError<B>> {
        let mut received = [0u8; MAX_RESPONSE_LEN];
        let response = &mut received[..cmd.response_len()];
        self.transaction(&cmd, response)?;
        Ok(parse_reply(&cmd, response))
    }

    fn transaction(&mut self, cmd: &Command, response: &mut [u8]) -> Result<(), LinkError<B>> {
        debug_assert_eq!(response.len(), cmd.response_len());
        self.write_frame(cmd.frame().as_bytes())?;
        if !response.is_empty() {
            self.read_frame(response)?;
        }
        Ok(())
    }

    fn write_frame(&mut self, bytes: &[u8]) -> Result<(), LinkError<B>> {
        let conn = match self.connection.as_mut() {
            Some(conn) => conn,
            None => return Err(OpError::NotConnected),
        };
        trace!("write {:02x?}", bytes);

        let written = conn.transport.write(bytes).map_err(|e| {
            error!("I2C write error: {:?}", e);
            TransportError::Io(e)
        })?;
        if written != bytes.len() {
            error!("I2C write error: wrote {} of {} bytes", written, bytes.len());
            return Err(OpError::Transport(TransportError::ShortWrite {
                expected: bytes.len(),
                written,
            }));
        }
        Ok(())
    }

    fn read_frame(&mut self, buffer: &mut [u8]) -> Result<(), LinkError<B>> {
        let conn = match self.connection.as_mut() {
            Some(conn) => conn,
            None => return Err(OpError::NotConnected),
        };

        let read = conn.transport.read(buffer).map_err(|e| {
            error!("I2C read error: {:?}", e);
            TransportError::Io(e)
        })?;
        if read != buffer.len() {
            error!("I2C read error: read {} of {} bytes", read, buffer.len());
            return Err(OpError::Transport(TransportError::ShortRead {
                expected: buffer.len(),
                read,
            }));
        }
        trace!("read {:02x?}", buffer);
        Ok(())
    }
}

fn parse_reply(cmd: &Command, received: &[u8]) -> Reply {
    match cmd {
        Command::SetSecurityLevel { .. } | Command::CaptureFingerprint => Reply::Ack,
        Command::ReadDeviceStatus => Reply::Status(received[0]),
        Command::MatchFingerprint => Reply::Match(UserId::from_payload(received)),
    }
}

impl<B: Bus> Drop for SensorLink<B> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<B: Bus + fmt::Debug> fmt::Debug for SensorLink<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorLink")
            .field("bus", &self.bus)
            .field("address", &self.address())
            .finish()
    }
}
