use crypto_core::jwt::TokenError;
use grpc_jwt_propagation::UNAUTHENTICATED_MESSAGE;
use thiserror::Error;
use tonic::{Code, Status};

pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Failures that abort a call with a gRPC status
///
/// Business outcomes (not found, duplicate email, invalid transition) are not
/// errors; they travel as `BaseResponse` envelopes inside successful replies.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Missing identity, wrong password or wrong role
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("JWT error: {0}")]
    Token(#[from] TokenError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl StorefrontError {
    /// Convert to gRPC Status for wire protocol
    pub fn to_status(&self) -> Status {
        match self {
            StorefrontError::Unauthenticated => {
                Status::new(Code::Unauthenticated, UNAUTHENTICATED_MESSAGE)
            }
            StorefrontError::Database(_)
            | StorefrontError::PasswordHash(_)
            | StorefrontError::Token(_)
            | StorefrontError::Internal(_) => {
                // Don't leak internal details
                Status::new(Code::Internal, "Internal server error")
            }
        }
    }
}

impl From<sqlx::Error> for StorefrontError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", err);
        StorefrontError::Database(err.to_string())
    }
}

impl From<StorefrontError> for Status {
    fn from(err: StorefrontError) -> Self {
        if !matches!(err, StorefrontError::Unauthenticated) {
            tracing::error!(error = %err, "Request failed");
        }
        err.to_status()
    }
}
