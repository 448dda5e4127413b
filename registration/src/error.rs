use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
#[error("{error}")]
pub struct AuthenticationError {
    pub error: AuthenticationErrorType,
}

impl AuthenticationError {
    pub fn new(error: AuthenticationErrorType) -> AuthenticationError {
        AuthenticationError { error }
    }
}

impl From<AuthenticationErrorType> for AuthenticationError {
    fn from(error: AuthenticationErrorType) -> AuthenticationError {
        AuthenticationError { error }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum AuthenticationErrorType {
    #[error("UnknownError")]
    UnknownError,
    #[error("NotSupportedError")]
    NotSupportedError,
    #[error("InvalidStateError")]
    InvalidStateError,
    #[error("NotAllowedError")]
    NotAllowedError,
    #[error("ConstraintError")]
    ConstraintError,
    #[error("OperationError")]
    OperationError,
    #[error("NotFoundError")]
    NotFoundError,
    #[error("EncodingError")]
    EncodingError,
    #[error("QuotaExceededError")]
    QuotaExceededError,
    #[error("SecurityError")]
    SecurityError,
    #[error("AbortError")]
    AbortError,
}

impl AuthenticationErrorType {
    /// Maps a `DOMException` name onto the matching variant.
    pub fn from_dom_exception(name: &str) -> AuthenticationErrorType {
        match name {
            "NotSupportedError" => AuthenticationErrorType::NotSupportedError,
            "InvalidStateError" => AuthenticationErrorType::InvalidStateError,
            "NotAllowedError" => AuthenticationErrorType::NotAllowedError,
            "ConstraintError" => AuthenticationErrorType::ConstraintError,
            "OperationError" => AuthenticationErrorType::OperationError,
            "NotFoundError" => AuthenticationErrorType::NotFoundError,
            "EncodingError" => AuthenticationErrorType::EncodingError,
            "QuotaExceededError" => AuthenticationErrorType::QuotaExceededError,
            "SecurityError" => AuthenticationErrorType::SecurityError,
            "AbortError" => AuthenticationErrorType::AbortError,
            _ => AuthenticationErrorType::UnknownError,
        }
    }
}
