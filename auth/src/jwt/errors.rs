use thiserror::Error;

/// Error type for JWT operations.
///
/// Variants carry diagnostic detail for logs; callers that answer untrusted
/// clients collapse all of them into a single "invalid token" outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Signing key too short: minimum {min} bytes, got {actual}")]
    KeyTooShort { min: usize, actual: usize },
}
