use thiserror::Error;

/// Errors reported by the classifier and segmenter.
///
/// Classification and segmentation never fail on well-formed text; the only
/// reportable problem is input that is not text at all (invalid UTF-8, an
/// empty run where one character is required) or a tag name that does not
/// exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
    #[error("unknown script tag {0:?}")]
    UnknownScript(String),
}

impl TextError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TextError>;
