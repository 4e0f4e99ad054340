//! ═══════════════════════════════════════════════════════════════════════════════
//! ERROR — Unified Error Type for MindWave
//! ═══════════════════════════════════════════════════════════════════════════════
//! The generator and the rolling window cannot fail. Everything that can
//! (config files, form input, route lookup) reports through `MindwaveError`.
//! ═══════════════════════════════════════════════════════════════════════════════

use std::fmt;

/// The unified error type for the MindWave crate
#[derive(Debug)]
pub enum MindwaveError {
    /// I/O error (config file read/write)
    Io(std::io::Error),
    /// JSON serialization/deserialization error
    Json(serde_json::Error),
    /// Configuration error
    Config(ConfigError),
    /// Form validation error
    Validation(ValidationError),
    /// Navigation error
    Route(RouteError),
    /// Internal error (should not happen)
    Internal(String),
}

impl std::error::Error for MindwaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MindwaveError::Io(e) => Some(e),
            MindwaveError::Json(e) => Some(e),
            MindwaveError::Config(e) => Some(e),
            MindwaveError::Validation(e) => Some(e),
            MindwaveError::Route(e) => Some(e),
            MindwaveError::Internal(_) => None,
        }
    }
}

impl fmt::Display for MindwaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MindwaveError::Io(e) => write!(f, "I/O error: {}", e),
            MindwaveError::Json(e) => write!(f, "JSON error: {}", e),
            MindwaveError::Config(e) => write!(f, "Configuration error: {}", e),
            MindwaveError::Validation(e) => write!(f, "Validation error: {}", e),
            MindwaveError::Route(e) => write!(f, "Route error: {}", e),
            MindwaveError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl From<std::io::Error> for MindwaveError {
    fn from(err: std::io::Error) -> Self {
        MindwaveError::Io(err)
    }
}

impl From<serde_json::Error> for MindwaveError {
    fn from(err: serde_json::Error) -> Self {
        MindwaveError::Json(err)
    }
}

/// Configuration-specific errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Window length not one of the selectable spans
    InvalidWindowSeconds(u32),
    /// Window text that is neither a number of seconds nor a span label
    InvalidWindow(String),
    /// Probability outside [0, 1]
    ProbabilityOutOfRange(f64),
    /// A tick or frame period of zero
    ZeroPeriod(&'static str),
    /// A capacity-like field set to zero
    ZeroCapacity(&'static str),
    /// Environment variable present but unparseable
    InvalidEnv { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWindowSeconds(secs) => {
                write!(f, "window must be 1, 10, 30 or 60 seconds (got {})", secs)
            }
            ConfigError::InvalidWindow(text) => {
                write!(f, "window must be 1, 10, 30 or 60 seconds (got {:?})", text)
            }
            ConfigError::ProbabilityOutOfRange(p) => {
                write!(f, "probability must be within [0, 1] (got {})", p)
            }
            ConfigError::ZeroPeriod(field) => write!(f, "{} must be greater than zero", field),
            ConfigError::ZeroCapacity(field) => write!(f, "{} must be greater than zero", field),
            ConfigError::InvalidEnv { key, value } => {
                write!(f, "cannot parse {}={:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for MindwaveError {
    fn from(err: ConfigError) -> Self {
        MindwaveError::Config(err)
    }
}

/// Form validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field left empty
    EmptyField(&'static str),
    /// Password and confirmation differ
    PasswordMismatch,
    /// Email without a local part or domain
    MalformedEmail(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField(field) => write!(f, "{} is required", field),
            ValidationError::PasswordMismatch => write!(f, "passwords do not match"),
            ValidationError::MalformedEmail(email) => {
                write!(f, "{:?} is not a valid email address", email)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for MindwaveError {
    fn from(err: ValidationError) -> Self {
        MindwaveError::Validation(err)
    }
}

/// Navigation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No page registered for this path
    NotFound(String),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::NotFound(path) => write!(f, "no page at {}", path),
        }
    }
}

impl std::error::Error for RouteError {}

impl From<RouteError> for MindwaveError {
    fn from(err: RouteError) -> Self {
        MindwaveError::Route(err)
    }
}

/// Result alias for MindWave operations
pub type MindwaveResult<T> = Result<T, MindwaveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MindwaveError::Config(ConfigError::InvalidWindowSeconds(15));
        assert!(err.to_string().contains("15"));

        let err = ConfigError::InvalidWindow("abc".into());
        assert!(err.to_string().contains("\"abc\""));
        assert!(!err.to_string().contains("got 0"));

        let err = MindwaveError::Validation(ValidationError::PasswordMismatch);
        assert_eq!(err.to_string(), "Validation error: passwords do not match");
    }

    #[test]
    fn test_error_conversion() {
        let err: MindwaveError = RouteError::NotFound("/forgot-password".into()).into();
        assert!(matches!(err, MindwaveError::Route(_)));

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: MindwaveError = io.into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
