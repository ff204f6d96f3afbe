use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::JwtError;

/// Identity token claims.
///
/// `sub` and `exp` are mandatory on decode; timestamps are Unix seconds as
/// required by RFC 7519.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique token identifier)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// Create claims for a subject issued at `issued_at` and valid for `ttl`.
    ///
    /// Sub-second precision is dropped so the claims and the reported
    /// issue/expiry instants agree exactly.
    ///
    /// # Errors
    /// * `EncodingFailed` - `ttl` pushes `exp` outside the representable date range
    pub fn for_subject(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let iat = issued_at.timestamp();
        let exp = iat
            .checked_add(ttl.num_seconds())
            .filter(|exp| DateTime::from_timestamp(*exp, 0).is_some())
            .ok_or_else(|| {
                JwtError::EncodingFailed(format!(
                    "Token lifetime of {} seconds is out of range",
                    ttl.num_seconds()
                ))
            })?;

        Ok(Self {
            sub: subject.to_string(),
            iat,
            exp,
            jti: Some(Uuid::new_v4().to_string()),
        })
    }

    /// A token is expired once `current_timestamp` reaches `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// `None` when `iat` lies outside the representable date range.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    /// `None` when `exp` lies outside the representable date range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
