use core::fmt;

/// Why `SensorLink::open` failed. The link stays closed in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    /// The bus device could not be opened.
    #[error("I2C bus device unavailable")]
    DeviceUnavailable,

    /// The bus was opened but the peripheral address could not be bound to it.
    #[error("failed to bind I2C address 0x{address:02x}")]
    AddressBindFailed { address: u8 },

    /// `open` was called on a link that is already open.
    #[error("connection already open")]
    AlreadyOpen,
}

/// A transfer that did not move exactly the frame's worth of bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError<E: fmt::Debug> {
    #[error("short write: {written} of {expected} bytes")]
    ShortWrite { expected: usize, written: usize },

    #[error("short read: {read} of {expected} bytes")]
    ShortRead { expected: usize, read: usize },

    /// The underlying bus reported an error.
    #[error("bus I/O error: {0:?}")]
    Io(E),
}

/// Why a sensor operation failed. `E` is the transport's own error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpError<E: fmt::Debug> {
    /// The link is closed. Nothing was sent.
    #[error("not connected")]
    NotConnected,

    #[error("transport error: {0}")]
    Transport(TransportError<E>),
}

impl<E: fmt::Debug> From<TransportError<E>> for OpError<E> {
    fn from(error: TransportError<E>) -> Self {
        OpError::Transport(error)
    }
}
