//! CLI error types.

use std::fmt;

use error_stack::Report;
use myra_signature::SignatureError;

#[derive(Debug)]
pub enum CliError {
    /// Configuration file or environment error
    Config(String),
    /// Request could not be built from the arguments
    Request(String),
    /// Signing or verification failed
    Signature(Report<SignatureError>),
    /// Signature did not verify
    Verification(String),
    /// IO error
    Io(std::io::Error),
    /// JSON serialization error
    Json(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Request(msg) => write!(f, "Request error: {}", msg),
            CliError::Signature(report) => write!(f, "Signature error: {:?}", report),
            CliError::Verification(msg) => write!(f, "Verification failed: {}", msg),
            CliError::Io(err) => write!(f, "IO error: {}", err),
            CliError::Json(msg) => write!(f, "JSON error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(err) => Some(err),
            CliError::Signature(report) => Some(report.current_context()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<Report<SignatureError>> for CliError {
    fn from(report: Report<SignatureError>) -> Self {
        CliError::Signature(report)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err.to_string())
    }
}
