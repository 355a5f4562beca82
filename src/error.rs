//! Error types for the cfctl control-plane client.

use std::fmt;
use thiserror::Error;

/// Platform error codes the CLI reacts to.
pub mod error_codes {
    /// The route is already bound to the requested service instance.
    pub const SERVICE_INSTANCE_ALREADY_BOUND_TO_SAME_ROUTE: &str = "130008";
    /// The relation being removed does not exist.
    pub const INVALID_RELATION: &str = "1002";
}

/// An HTTP-level failure reported by the Cloud Controller.
///
/// `error_code` is the platform error code from the response body (the numeric
/// `code` field rendered as a string), or empty when the body carried none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    pub status: u16,
    pub error_code: String,
    pub description: String,
}

impl HttpError {
    pub fn new(status: u16, error_code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            status,
            error_code: error_code.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Server error, status code: {}, error code: {}, message: {}",
            self.status, self.error_code, self.description
        )
    }
}

/// Errors surfaced by requirements, commands, repositories and the gateway.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Incorrect Usage. {0}")]
    IncorrectUsage(String),

    #[error("Not logged in. Set session.access_token in the config file or CFCTL__SESSION__ACCESS_TOKEN.")]
    NotLoggedIn,

    #[error("No org targeted. Set session.organization in the config file.")]
    NoOrgTargeted,

    #[error("No space targeted. Set session.space in the config file.")]
    NoSpaceTargeted,

    #[error("{kind} {name} not found")]
    NotFound { kind: String, name: String },

    #[error("{feature} requires CF API version {required}+. Your target is {current}.")]
    ApiVersionTooLow {
        feature: String,
        current: String,
        required: String,
    },

    #[error("The app is running on the DEA backend, which does not support this command.")]
    UnsupportedBackend,

    #[error("{0}")]
    Http(HttpError),

    #[error("Error parsing headers: {0}")]
    InvalidHeaders(String),

    #[error("Invalid configuration provided for -c flag. Please provide a valid JSON object or path to a file containing a valid JSON object.")]
    InvalidParameters,

    #[error("Error performing request: {0}")]
    Transport(String),

    #[error("Invalid response from API: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0} was executed before its requirements were evaluated")]
    RequirementsNotEvaluated(String),

    #[error("Unknown command '{0}'. Run 'cfctl --help' for a list of commands.")]
    UnknownCommand(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        ApiError::NotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// The HTTP error carried by this error, if it is one.
    pub fn http_error(&self) -> Option<&HttpError> {
        match self {
            ApiError::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        ApiError::Http(err)
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
