use thiserror::Error;

/// Errors raised while loading or applying a font registry or theme.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[source] toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),
    /// Every problem found by validation.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
    /// A key that names no script.
    #[error("unknown script {0:?}")]
    UnknownScript(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_joins_problems() {
        let err = ConfigError::Validation(vec!["a is bad".into(), "b is bad".into()]);
        assert_eq!(err.to_string(), "validation errors: a is bad; b is bad");
    }

    #[test]
    fn io_error_keeps_source() {
        use std::error::Error as _;
        let err = ConfigError::Io(std::io::Error::other("disk gone"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("disk gone"));
    }
}
