//! Shared error type across memgauge crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Conflicting or malformed metric/config definition.
    Configuration,
    /// Invalid argument to a metric operation.
    InvalidArgument,
    /// Reading an external resource failed.
    SamplingFailed,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::Configuration => "CONFIGURATION",
            ClientCode::InvalidArgument => "INVALID_ARGUMENT",
            ClientCode::SamplingFailed => "SAMPLING_FAILED",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MemgaugeError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum MemgaugeError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("sampling {resource} failed: {reason}")]
    ExternalSampling { resource: String, reason: String },
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MemgaugeError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MemgaugeError::Configuration(_) => ClientCode::Configuration,
            MemgaugeError::InvalidArgument(_) => ClientCode::InvalidArgument,
            MemgaugeError::ExternalSampling { .. } => ClientCode::SamplingFailed,
            MemgaugeError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            MemgaugeError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Build a per-resource sampling failure.
    pub fn sampling(resource: impl Into<String>, reason: impl ToString) -> Self {
        MemgaugeError::ExternalSampling {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}
