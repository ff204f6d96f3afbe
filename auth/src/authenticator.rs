use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SigningKey;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token handling.
///
/// Holds only immutable state (signing key material, token lifetime and a
/// decoy hash), so a single instance can be shared across threads.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
    decoy_hash: Option<String>,
}

/// A freshly signed identity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWS string handed to the client
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Authenticator {
    /// Default token lifetime.
    pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `signing_key` - Secret used to sign and verify tokens
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(signing_key: &SigningKey, token_ttl: Duration) -> Self {
        let password_hasher = PasswordHasher::new();

        // Verified against when the account does not exist, so that unknown
        // usernames cost the same as wrong passwords.
        let decoy_hash = password_hasher
            .hash(&uuid::Uuid::new_v4().to_string())
            .map_err(|e| tracing::warn!(error = %e, "Failed to prepare decoy password hash"))
            .ok();

        Self {
            password_hasher,
            jwt_handler: JwtHandler::new(signing_key),
            token_ttl,
            decoy_hash,
        }
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against the stored hash of an account, if any.
    ///
    /// With no stored hash the password is still run through a full
    /// verification against the decoy hash before answering `false`. A
    /// malformed stored hash is logged and answers `false`.
    pub fn verify_password(&self, password: &str, stored_hash: Option<&str>) -> bool {
        match stored_hash {
            Some(hash) => self
                .password_hasher
                .verify(password, hash)
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Stored password hash could not be verified");
                    false
                }),
            None => {
                if let Some(decoy) = &self.decoy_hash {
                    let _ = self.password_hasher.verify(password, decoy);
                }
                false
            }
        }
    }

    /// Issue a token for `subject` valid from now for the configured TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed or the TTL overflows the date range
    pub fn issue_token(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        self.issue_token_at(subject, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_token_at(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken, JwtError> {
        let claims = Claims::for_subject(subject, now, self.token_ttl)?;
        let (Some(issued_at), Some(expires_at)) = (claims.issued_at(), claims.expires_at()) else {
            return Err(JwtError::EncodingFailed(
                "Token timestamps are out of range".to_string(),
            ));
        };
        let token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedToken {
            token,
            issued_at,
            expires_at,
        })
    }

    /// Verify the signature of a token and return its claims, expired or not.
    ///
    /// # Errors
    /// * `DecodingFailed` - Token is malformed, forged or uses another algorithm
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Verify the signature of a token and that it is not yet expired.
    ///
    /// # Errors
    /// * `DecodingFailed` - Signature or structure is invalid
    /// * `TokenExpired` - Current time has reached `exp`
    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_token_at(token, Utc::now())
    }

    /// Same as [`Self::verify_token`] with an explicit current time.
    pub fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}
