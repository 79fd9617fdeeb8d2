use crate::utils::{CommandFrame, CommandWriter, ToPayload};
//# Opcodes are the ones the DFRobot ID809 answers to on its I2C interface.

const CMD_READ_STATUS: u8 = 0x00;
const CMD_CONFIGURE: u8 = 0x01;
const CMD_CAPTURE: u8 = 0x02;
const CMD_MATCH: u8 = 0x03;

const SUB_SECURITY_LEVEL: u8 = 0x0A;
const SUB_DEFAULT: u8 = 0x01;

/// Enum for commands one can send to the ID809.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Sets the matching threshold of the sensor.
    SetSecurityLevel {
        /// The new security level. The sensor defines which values are meaningful; every byte
        /// is sent as-is.
        level: u8,
    },

    /// Reads the one-byte device status.
    ReadDeviceStatus,

    /// Asks the sensor to capture a fingerprint image.
    ///
    /// The sensor does not report when (or whether) the capture finished.
    CaptureFingerprint,

    /// Matches the captured fingerprint and reads back the 16-bit user ID.
    MatchFingerprint,
}

impl Command {
    /// Encodes the command into the frame that goes on the wire.
    pub fn frame(&self) -> CommandFrame {
        let mut frame = CommandFrame::new();
        self.to_payload(&mut frame);
        frame
    }

    /// Number of bytes the sensor sends back after this command. Zero means no read happens.
    pub fn response_len(&self) -> usize {
        match self {
            Self::SetSecurityLevel { .. } => 0,
            Self::ReadDeviceStatus => 1,
            Self::CaptureFingerprint => 0,
            Self::MatchFingerprint => 2,
        }
    }
}

impl ToPayload for Command {
    fn to_payload(&self, writer: &mut dyn CommandWriter) {
        match self {
            // Required frame:
            // opcode | 0x01 [1]
            // sub    | 0x0A [1]
            // level  | cmd.level [1]
            Self::SetSecurityLevel { level } => {
                writer.write_cmd_bytes(&[CMD_CONFIGURE, SUB_SECURITY_LEVEL]);
                writer.write_cmd_bytes(&[*level]);
            }

            // Required frame:
            // opcode | 0x00 [1]
            // Reply:
            // status | [1]
            Self::ReadDeviceStatus => {
                writer.write_cmd_bytes(&[CMD_READ_STATUS]);
            }

            // Required frame:
            // opcode | 0x02 [1]
            // sub    | 0x01 [1]
            Self::CaptureFingerprint => {
                writer.write_cmd_bytes(&[CMD_CAPTURE, SUB_DEFAULT]);
            }

            // Required frame:
            // opcode | 0x03 [1]
            // sub    | 0x01 [1]
            // Reply:
            // userid | big endian [2]
            Self::MatchFingerprint => {
                writer.write_cmd_bytes(&[CMD_MATCH, SUB_DEFAULT]);
            }
        }
    }
}
