//! Blog API error types

use thiserror::Error;

/// Errors raised by the API repositories.
///
/// Every variant carries a message that is already localized and meant to
/// be shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout, unreadable body
    #[error("{0}")]
    Network(String),

    /// 401 on login
    #[error("{0}")]
    InvalidCredentials(String),

    /// 400 on register (validation failure or duplicate account)
    #[error("{0}")]
    InvalidRegistration(String),

    /// 401/403 on a call made with a bearer token
    #[error("{0}")]
    Unauthorized(String),

    /// 404 on a single-resource lookup
    #[error("{0}")]
    NotFound(String),

    /// Any other unsuccessful status
    #[error("{message}")]
    Rejected {
        /// HTTP status code returned by the server
        status: u16,
        message: String,
    },

    /// Successful status but the body did not match the expected shape
    #[error("{0}")]
    Decode(String),

    /// Blocked locally before any request was issued
    #[error("{0}")]
    AccessDenied(String),
}

impl ApiError {
    /// HTTP status associated with the error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidCredentials(_) | Self::Unauthorized(_) => Some(401),
            Self::InvalidRegistration(_) => Some(400),
            Self::NotFound(_) => Some(404),
            Self::Rejected { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) | Self::AccessDenied(_) => None,
        }
    }

    /// True if the server refused the bearer credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

/// Result type alias using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
