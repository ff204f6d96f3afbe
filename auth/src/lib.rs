//! Credential and token primitives
//!
//! Provides the building blocks of the identity service:
//! - Password hashing (Argon2id)
//! - Signing key handling and JWT (HS256) encoding/decoding
//! - Token issuance with a fixed lifetime and expiry checks
//!
//! Nothing in this crate touches storage; tokens are self-contained.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Token Lifecycle
//! ```
//! use auth::{Authenticator, SigningKey};
//! use chrono::Duration;
//!
//! let key = SigningKey::generate();
//! let auth = Authenticator::new(&key, Duration::hours(1));
//!
//! let issued = auth.issue_token("alice").unwrap();
//!
//! // Signature check only
//! let claims = auth.validate_token(&issued.token).unwrap();
//! assert_eq!(claims.sub, "alice");
//!
//! // Signature and expiry
//! assert!(auth.verify_token(&issued.token).is_ok());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SigningKey;
pub use password::PasswordError;
pub use password::PasswordHasher;
