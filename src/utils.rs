use arrayvec::ArrayVec;

/// Longest command frame the ID809 accepts over I2C.
pub const MAX_FRAME_LEN: usize = 3;

/// Longest reply any command expects back.
pub const MAX_RESPONSE_LEN: usize = 2;

/// One outgoing instruction (opcode plus parameters), exactly as it goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    bytes: ArrayVec<[u8; MAX_FRAME_LEN]>,
}

impl CommandFrame {
    pub(crate) fn new() -> Self {
        Self {
            bytes: ArrayVec::new(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for CommandFrame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

pub trait FromPayload {
    /// `payload` is always exactly as long as the command's response.
    fn from_payload(payload: &[u8]) -> Self;
}

pub trait CommandWriter {
    fn write_cmd_bytes(&mut self, bytes: &[u8]);
}

pub trait ToPayload {
    fn to_payload(&self, writer: &mut dyn CommandWriter);
}

impl CommandWriter for CommandFrame {
    fn write_cmd_bytes(&mut self, bytes: &[u8]) {
        // Every command encodes to at most MAX_FRAME_LEN bytes.
        self.bytes.extend(bytes.iter().copied());
    }
}
