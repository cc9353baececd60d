//! Serial command decoding
//!
//! The serial link carries bare single-byte commands with no framing.
//! Anything that is not a known command is dropped.

/// Commands accepted on the serial link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `'o'`: unlock (honored only while closed)
    Open,
    /// `'c'`: lock (honored only while opened)
    Close,
}

impl Command {
    /// Decode a received byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'o' => Some(Command::Open),
            b'c' => Some(Command::Close),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_commands() {
        assert_eq!(Command::from_byte(b'o'), Some(Command::Open));
        assert_eq!(Command::from_byte(b'c'), Some(Command::Close));
    }

    #[test]
    fn test_unknown_bytes_ignored() {
        for byte in [b'x', b'O', b'C', b'\r', b'\n', 0x00, 0xFF] {
            assert_eq!(Command::from_byte(byte), None);
        }
    }
}
