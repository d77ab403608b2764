use crate::session::SessionError;
use std::fmt;

#[derive(Debug)]
pub enum SuiteError {
    /// Device property bag is malformed or out of contract.
    PropertyError(String),
    /// Configuration file could not be read or parsed.
    ConfigError(String),
    /// The underlying device session failed.
    SessionError(SessionError),
    /// A diagnostic artifact (plot, report) could not be written.
    DiagnosticError(String),
}

impl fmt::Display for SuiteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SuiteError::PropertyError(msg) => write!(f, "Camera property error: {}", msg),
            SuiteError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            SuiteError::SessionError(err) => write!(f, "Camera session error: {}", err),
            SuiteError::DiagnosticError(msg) => write!(f, "Diagnostic output error: {}", msg),
        }
    }
}

impl std::error::Error for SuiteError {}

impl From<SessionError> for SuiteError {
    fn from(err: SessionError) -> Self {
        SuiteError::SessionError(err)
    }
}
