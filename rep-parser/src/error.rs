//! Replay decoding error types

/// Errors raised while decoding a replay
///
/// Unknown command opcodes are not errors: the decoder skips the rest of
/// the command block and carries on with the next frame.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// The replay ID section does not hold the `reRS` marker
    #[error("not a replay file (magic 0x{magic:08X})")]
    NotAReplay {
        /// Value read from the replay ID section
        magic: u32,
    },

    /// A read ran past the end of a section buffer
    #[error("truncated data: needed {needed} bytes at offset {position}, {available} available")]
    TruncatedData {
        /// Cursor position when the read was attempted
        position: usize,
        /// Bytes the read required
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
    },

    /// A command was attributed to a player id outside the slot range
    #[error("command at frame {frame} attributed to invalid player id {player_id}")]
    InvalidPlayerAttribution {
        /// Offending player id
        player_id: u8,
        /// Frame of the command block, 0 for a header slot id
        frame: u32,
    },

    /// Section framing or decompression failed
    #[error("malformed section: {0}")]
    MalformedSection(String),

    /// IO error while reading the replay file
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ReplayError {
    /// Short name of the failure kind, used in log events
    pub fn kind(&self) -> &'static str {
        match self {
            ReplayError::NotAReplay { .. } => "not_a_replay",
            ReplayError::TruncatedData { .. } => "truncated_data",
            ReplayError::InvalidPlayerAttribution { .. } => "invalid_player_attribution",
            ReplayError::MalformedSection(_) => "malformed_section",
            ReplayError::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ReplayError::NotAReplay { magic: 0x1234 }.to_string(),
            "not a replay file (magic 0x00001234)"
        );
        assert_eq!(
            ReplayError::TruncatedData {
                position: 10,
                needed: 4,
                available: 1
            }
            .to_string(),
            "truncated data: needed 4 bytes at offset 10, 1 available"
        );
        assert_eq!(
            ReplayError::InvalidPlayerAttribution {
                player_id: 200,
                frame: 7
            }
            .to_string(),
            "command at frame 7 attributed to invalid player id 200"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            ReplayError::MalformedSection("x".into()).kind(),
            "malformed_section"
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(ReplayError::from(io).kind(), "io");
    }
}
