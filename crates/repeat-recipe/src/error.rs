//! Error types for repeat-recipe

/// Result type for recipe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Maximum number of payload characters quoted in an error message
const PAYLOAD_PREVIEW: usize = 200;

/// Errors that can occur while decoding a recipe
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed recipe at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(
        "Malformed recipe at end of input with open block: |{payload}\nAre you missing a closing pipe '|'?"
    )]
    Unterminated { payload: String },
}

impl Error {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn unterminated(payload: &str) -> Self {
        let preview = match payload.char_indices().nth(PAYLOAD_PREVIEW) {
            Some((idx, _)) => format!("{}...", &payload[..idx]),
            None => payload.to_string(),
        };
        Self::Unterminated { payload: preview }
    }
}
