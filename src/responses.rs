use core::fmt;

use byteorder::{BigEndian, ByteOrder};

use crate::utils::FromPayload;

/// Replies decoded from the ID809. Variants follow the command that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// The command was written and no reply was expected
    /// (`SetSecurityLevel`, `CaptureFingerprint`).
    Ack,

    /// Raw device status byte.
    Status(u8),

    /// User ID reported by a match.
    Match(UserId),
}

/// Identifier of an enrolled user, as reported by `MatchFingerprint`.
///
/// The sensor has no "no match" sentinel: an unmatched finger, user 0 and a garbled reply all
/// decode to some `UserId`. Callers that need to tell them apart must consult the device status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(pub u16);

impl From<UserId> for u16 {
    fn from(id: UserId) -> u16 {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromPayload for UserId {
    fn from_payload(payload: &[u8]) -> UserId {
        // High byte first.
        UserId(BigEndian::read_u16(&payload[0..2]))
    }
}
