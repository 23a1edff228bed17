//! Error types for the Towngas to InfluxDB2 forwarder.
//!
//! This module defines typed errors for different components of the application,
//! so the scheduler can tell an authentication problem from a transient network
//! failure or a change in the vendor's payloads.

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Towngas portal communication and parsing errors
    #[error("Towngas error: {0}")]
    TownGas(#[from] TownGasError),

    /// InfluxDB storage errors
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to parse environment variables: {0}")]
    EnvParse(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Towngas portal communication errors.
#[derive(Error, Debug)]
pub enum TownGasError {
    /// HTTP transport failed (connection refused, TLS, DNS, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The login endpoint answered with a non-success status
    #[error("authentication failed (status {status})")]
    AuthFailed { status: u16 },

    /// A data endpoint answered with a non-success status
    #[error("server error (status {status}): {message}")]
    ServerError { status: u16, message: String },

    /// A request did not complete within the configured timeout
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// The response body could not be interpreted
    #[error("response parsing error")]
    Parse(#[from] ParseError),
}

/// Payload interpretation errors.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Body was not the JSON shape we expected
    #[error("invalid JSON from {endpoint}: {message}")]
    Json { endpoint: String, message: String },

    /// Account lookup returned no accounts
    #[error("account lookup returned no accounts")]
    EmptyAccountList,

    /// Failed to parse numeric value
    #[error("failed to parse number from '{text}': {message}")]
    NumberParse { text: String, message: String },

    /// Unexpected payload structure
    #[error("unexpected response structure: {0}")]
    UnexpectedStructure(String),
}

/// Metric collection errors.
#[derive(Error, Debug)]
pub enum CollectorError {
    /// Collector task timed out
    #[error("collector '{name}' timed out after {timeout} seconds")]
    Timeout { name: String, timeout: u64 },

    /// Data source error
    #[error("failed to collect from source")]
    Source(#[from] TownGasError),
}

/// InfluxDB storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// InfluxDB client error
    #[error("InfluxDB error: {0}")]
    Client(#[from] influxdb2::RequestError),

    /// Invalid data point
    #[error("invalid data point: {0}")]
    InvalidDataPoint(String),
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(err: impl std::fmt::Display) -> Self {
        Self::EnvParse(err.to_string())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl TownGasError {
    /// Creates an error for a non-success status on a data endpoint.
    pub fn server_error(status: reqwest::StatusCode, body: String) -> Self {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            Self::AuthFailed {
                status: status.as_u16(),
            }
        } else {
            Self::ServerError {
                status: status.as_u16(),
                message: body,
            }
        }
    }

    /// Classifies a reqwest failure, keeping timeouts distinct.
    pub fn from_request(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_secs)
        } else {
            Self::Http(err)
        }
    }

    /// Whether retrying later might succeed without any change on our side.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout(_) => true,
            Self::ServerError { status, .. } => *status >= 500,
            Self::AuthFailed { .. } | Self::Parse(_) => false,
        }
    }
}

impl ParseError {
    /// Creates a JSON decoding error for the given endpoint.
    pub fn json(endpoint: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Json {
            endpoint: endpoint.into(),
            message: err.to_string(),
        }
    }

    /// Creates a number parse error.
    pub fn number_parse(text: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::NumberParse {
            text: text.into(),
            message: err.to_string(),
        }
    }
}

impl CollectorError {
    /// Creates a timeout error.
    pub fn timeout(name: impl Into<String>, timeout: u64) -> Self {
        Self::Timeout {
            name: name.into(),
            timeout,
        }
    }
}
