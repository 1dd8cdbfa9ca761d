use std::io::Read;

use crate::command::Command;

/// Start-of-transmission marker.
pub const STX: u8 = 0x55;
/// End-of-transmission marker.
pub const ETX: u8 = 0xAA;

/// A single command frame as sent to the module.
///
/// Wire layout is `STX, opcode, length, payload..., ETX`. The length byte
/// counts payload bytes only, so a frame without payload is always exactly
/// four bytes. The protocol has no checksum and does not escape STX/ETX
/// values inside the payload; a payload byte equal to a marker is sent as-is
/// and left for the module to sort out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    opcode: u8,
    payload: Vec<u8>,
}

impl CommandFrame {
    /// Length is a single byte on the wire.
    pub const MAXIMUM_PAYLOAD_LENGTH: usize = 255;

    pub fn new(command: Command) -> Self {
        Self { opcode: command.opcode(), payload: Vec::new() }
    }

    /// Builds a frame carrying `data` as its payload. Each character is
    /// encoded as its single-byte ordinal value, so only characters up to
    /// U+00FF are representable.
    pub fn with_payload(command: Command, data: &str) -> Result<Self, FrameError> {
        let payload = encode_payload(data)?;
        Ok(Self { opcode: command.opcode(), payload })
    }

    pub const fn opcode(&self) -> u8 {
        self.opcode
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn serialize(&self) -> Vec<u8> {
        Vec::from(self)
    }

    pub fn try_from_read(reader: &mut (impl Read + ?Sized)) -> Result<Self, FrameParseError> {
        let mut header = [0; 3];
        reader.read_exact(&mut header)?;
        let [stx, opcode, length] = header;

        if stx != STX {
            return Err(FrameParseError::InvalidStx(stx));
        }

        let mut payload = vec![0; length as usize];
        reader.read_exact(&mut payload)?;

        let mut etx = [0; 1];
        reader.read_exact(&mut etx)?;
        if etx[0] != ETX {
            return Err(FrameParseError::InvalidEtx(etx[0]));
        }

        Ok(Self { opcode, payload })
    }
}

impl From<&CommandFrame> for Vec<u8> {
    fn from(frame: &CommandFrame) -> Self {
        let mut v = Vec::with_capacity(4 + frame.payload.len());
        v.push(STX);
        v.push(frame.opcode);
        v.push(frame.payload.len() as u8);
        v.extend(&frame.payload);
        v.push(ETX);
        v
    }
}

impl TryFrom<&[u8]> for CommandFrame {
    type Error = FrameParseError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from_read(&mut std::io::Cursor::new(value))
    }
}

fn encode_payload(data: &str) -> Result<Vec<u8>, FrameError> {
    let mut payload = Vec::with_capacity(data.len());
    for c in data.chars() {
        let ordinal = c as u32;
        if ordinal > 0xFF {
            return Err(FrameError::UnencodableChar(c));
        }
        payload.push(ordinal as u8);
    }

    if payload.len() > CommandFrame::MAXIMUM_PAYLOAD_LENGTH {
        return Err(FrameError::PayloadTooLong { length: payload.len() });
    }

    Ok(payload)
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("payload is {length} bytes, the length field fits at most 255")]
    PayloadTooLong { length: usize },
    #[error("payload character {0:?} does not fit in a single byte")]
    UnencodableChar(char),
}

#[derive(Debug, strum::Display)]
pub enum FrameParseError {
    InvalidStx(u8),
    InvalidEtx(u8),
    Io(std::io::Error),
}

impl std::error::Error for FrameParseError {}

impl From<std::io::Error> for FrameParseError {
    fn from(value: std::io::Error) -> Self {
        FrameParseError::Io(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Command::GetDeviceName, vec![0x55, 0x05, 0x00, 0xAA]; "getDeviceName")]
    #[test_case(Command::Save, vec![0x55, 0x0e, 0x00, 0xAA]; "save")]
    #[test_case(Command::Reboot, vec![0x55, 0x10, 0x00, 0xAA]; "reboot")]
    fn frame_without_payload_is_four_bytes(command: Command, expected: Vec<u8>) {
        assert_eq!(CommandFrame::new(command).serialize(), expected);
    }

    #[test]
    fn frame_with_payload_carries_length_and_bytes() {
        let frame = CommandFrame::with_payload(Command::StartAp, "foo").unwrap();
        assert_eq!(frame.serialize(), vec![0x55, 0x08, 3, 0x66, 0x6F, 0x6F, 0xAA]);
    }

    #[test]
    fn single_char_payload() {
        let frame = CommandFrame::with_payload(Command::ConnectToServer, "X").unwrap();
        assert_eq!(frame.serialize(), vec![0x55, 0x19, 1, b'X', 0xAA]);
    }

    #[test]
    fn empty_payload_matches_payloadless_frame() {
        let with = CommandFrame::with_payload(Command::StartAp, "").unwrap();
        assert_eq!(with.serialize(), CommandFrame::new(Command::StartAp).serialize());
    }

    #[test]
    fn latin1_payload_is_encoded_as_ordinals() {
        let frame = CommandFrame::with_payload(Command::ConnectToAp, "café").unwrap();
        assert_eq!(frame.payload(), &[b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn wide_char_payload_is_rejected() {
        assert!(matches!(
            CommandFrame::with_payload(Command::StartAp, "Ā"),
            Err(FrameError::UnencodableChar('Ā'))
        ));
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let data = "x".repeat(256);
        assert!(matches!(
            CommandFrame::with_payload(Command::StartAp, &data),
            Err(FrameError::PayloadTooLong { length: 256 })
        ));
    }

    #[test]
    fn maximum_payload_is_accepted() {
        let data = "x".repeat(255);
        let frame = CommandFrame::with_payload(Command::StartAp, &data).unwrap();
        assert_eq!(frame.serialize().len(), 4 + 255);
    }

    #[test]
    fn frame_parses_back() {
        let bytes = vec![0x55, 0x05, 3, b'a', b'b', b'c', 0xAA];
        let frame = CommandFrame::try_from(bytes.as_slice()).unwrap();
        assert_eq!(frame.opcode(), 0x05);
        assert_eq!(frame.payload(), b"abc");
    }

    #[test_case(vec![0x54, 0x05, 0x00, 0xAA]; "bad stx")]
    #[test_case(vec![0x55, 0x05, 0x00, 0xAB]; "bad etx")]
    #[test_case(vec![0x55, 0x05, 0x02, b'a', 0xAA]; "short payload")]
    #[test_case(vec![0x55]; "truncated header")]
    fn malformed_frame_is_rejected(bytes: Vec<u8>) {
        assert!(CommandFrame::try_from(bytes.as_slice()).is_err());
    }
}
