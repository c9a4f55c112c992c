// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Error hierarchy for font probing
/// Covers input validation, environment capability, discovery and configuration
#[derive(Error, Debug)]
pub enum ProbeError {
    // Input Errors
    #[error("Invalid input: {field} {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Invalid font stack: {stack:?}")]
    InvalidFontStack { stack: String },

    // Environment Errors
    #[error("Unsupported environment: {reason}")]
    UnsupportedEnvironment { reason: String },

    #[error("No fonts available")]
    NoFontsAvailable,

    #[error("Platform font discovery not supported")]
    PlatformNotSupported,

    // Font Loading Errors
    #[error("Failed to load font {path}: {message}")]
    FontLoad { path: PathBuf, message: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    // Configuration Errors
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: serde_json::Error,
    },
}

impl ProbeError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput { field, reason: reason.into() }
    }

    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedEnvironment { reason: reason.into() }
    }

    /// Whether the failure is about the host rather than the caller's input
    pub fn is_environmental(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedEnvironment { .. } | Self::NoFontsAvailable | Self::PlatformNotSupported
        )
    }
}

pub type ProbeResult<T> = Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = ProbeError::invalid("font_name", "must not be empty");
        assert_eq!(err.to_string(), "Invalid input: font_name must not be empty");
        assert!(!err.is_environmental());
    }

    #[test]
    fn test_environmental_errors() {
        assert!(ProbeError::unsupported("no surface").is_environmental());
        assert!(ProbeError::NoFontsAvailable.is_environmental());

        let io = ProbeError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!io.is_environmental());
    }
}
