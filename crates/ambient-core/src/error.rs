//! Error types for the ambient engine

use thiserror::Error;

/// The main error type for ambient operations.
///
/// The simulation itself never fails; these errors only come from parsing
/// configuration and other external input.
#[derive(Debug, Error)]
pub enum AmbientError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid fps: {0} is not one of 15, 30, 60")]
    InvalidFps(u32),

    #[error("Invalid quality: {0}")]
    InvalidQuality(String),

    #[error("Invalid platform: {0}")]
    InvalidPlatform(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Result type alias for ambient operations
pub type Result<T> = std::result::Result<T, AmbientError>;

impl From<toml::de::Error> for AmbientError {
    fn from(err: toml::de::Error) -> Self {
        AmbientError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_errors_convert() {
        let err: AmbientError = toml::from_str::<toml::Table>("a = ").unwrap_err().into();
        assert!(matches!(err, AmbientError::TomlParseError(_)));
    }

    #[test]
    fn fps_error_message() {
        let err = AmbientError::InvalidFps(45);
        assert_eq!(err.to_string(), "Invalid fps: 45 is not one of 15, 30, 60");
    }
}
