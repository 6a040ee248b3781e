//! Share-code error types.
//!
//! Every failure the codec can produce. Decode-side variants are terminal for
//! the navigation attempt: the caller reports [`INVALID_LINK_MESSAGE`] and
//! returns to the home view.

use thiserror::Error;

/// What the user sees for any share code that cannot be used.
pub const INVALID_LINK_MESSAGE: &str = "invalid or corrupted link";

/// Errors that can occur when encoding or decoding a share code.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Base64, gzip, UTF-8 or JSON decoding failed.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The payload parsed but is missing required fields.
    #[error("payload failed validation: {0}")]
    Validation(String),

    /// The payload references a template id the registry does not know.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// Serialization or compression failed while producing a code.
    #[error("encode failed: {0}")]
    Encode(String),
}

impl CodecError {
    /// Returns `true` if this error came from reading a code rather than
    /// producing one.
    pub fn is_decode_side(&self) -> bool {
        !matches!(self, CodecError::Encode(_))
    }

    /// Message suitable for showing to the person who followed the link.
    pub fn user_message(&self) -> &'static str {
        match self {
            CodecError::Encode(_) => "could not create a share link",
            _ => INVALID_LINK_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_side_errors_share_one_message() {
        for err in [
            CodecError::Decode("bad base64".into()),
            CodecError::Validation("missing quizTitle".into()),
            CodecError::UnknownTemplate("nope".into()),
        ] {
            assert!(err.is_decode_side());
            assert_eq!(err.user_message(), INVALID_LINK_MESSAGE);
        }
        assert!(!CodecError::Encode("io".into()).is_decode_side());
    }

    #[test]
    fn display_includes_detail() {
        let err = CodecError::UnknownTemplate("unknown-id".into());
        assert_eq!(err.to_string(), "unknown template: unknown-id");
    }
}
