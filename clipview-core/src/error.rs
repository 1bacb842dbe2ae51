/// Error types for clipview
///
/// Interaction never fails: bad ranges are corrected in place and operations
/// without a loaded mesh are no-ops. These errors cover the fallible edges,
/// configuration and parsing names from text.
use thiserror::Error;

/// Errors raised by configuration and parsing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClipViewError {
    /// A configuration value is out of its allowed range.
    #[error("Invalid configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Text did not name an axis.
    #[error("Unknown axis '{0}' (expected x, y or z)")]
    UnknownAxis(String),

    /// Text did not name a sample mesh.
    #[error("Unknown sample mesh '{0}' (expected cube, tube, terrain or torus)")]
    UnknownSample(String),
}

/// Result type for clipview operations.
pub type Result<T> = std::result::Result<T, ClipViewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClipViewError::UnknownAxis("w".to_string());
        assert_eq!(format!("{err}"), "Unknown axis 'w' (expected x, y or z)");

        let err = ClipViewError::InvalidConfig {
            field: "epsilon",
            value: -0.5,
            reason: "must be > 0",
        };
        assert!(format!("{err}").contains("-0.5"));
        assert!(format!("{err}").contains("epsilon"));
    }
}
