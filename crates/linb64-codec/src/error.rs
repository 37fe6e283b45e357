//! Codec error types.

use std::error::Error;
use std::fmt;

use linb64_arena::ArenaError;

/// A transcode module could not be instantiated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadError {
    /// Human-readable description of the failure.
    pub reason: String,
}

impl LoadError {
    /// Create a load error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module instantiation failed: {}", self.reason)
    }
}

impl Error for LoadError {}

/// Errors from [`Base64Bridge`](crate::Base64Bridge) requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodecError {
    /// The arena could not provide the request's block, typically because
    /// the region could not grow.
    Arena(ArenaError),
    /// The request's block size does not fit the address space.
    InputTooLarge {
        /// Input length in bytes.
        len: usize,
    },
    /// Decode input contained a character that cannot be staged as one byte.
    NonAscii {
        /// Byte index of the offending character in the input text.
        index: usize,
    },
    /// The transcode module could not be (re)instantiated.
    Load(LoadError),
    /// The codec configuration violates a documented invariant.
    InvalidConfig {
        /// Human-readable description of the violated invariant.
        reason: String,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::InputTooLarge { len } => {
                write!(f, "input of {len} bytes is too large for linear memory")
            }
            Self::NonAscii { index } => {
                write!(f, "non-ASCII character at byte {index} of base64 input")
            }
            Self::Load(e) => write!(f, "{e}"),
            Self::InvalidConfig { reason } => write!(f, "invalid codec config: {reason}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            Self::Load(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for CodecError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

impl From<LoadError> for CodecError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_error_is_source() {
        let err = CodecError::from(ArenaError::GrowthRefused {
            requested_pages: 9,
            current_pages: 1,
            max_pages: 8,
        });
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("arena: memory growth refused"));
    }

    #[test]
    fn non_ascii_reports_index() {
        let err = CodecError::NonAscii { index: 7 };
        assert_eq!(
            err.to_string(),
            "non-ASCII character at byte 7 of base64 input"
        );
    }
}
