use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Holds only the password hash, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: Username,
    pub password_hash: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Username value type
///
/// Case-sensitive; compared byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MAX_LENGTH: usize = 255;

    /// Create a new valid username.
    ///
    /// # Arguments
    /// * `username` - Raw username string
    ///
    /// # Errors
    /// * `Blank` - Empty or whitespace-only
    /// * `TooLong` - Longer than 255 characters
    /// * `ControlCharacters` - Contains control characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.trim().is_empty() {
            return Err(UsernameError::Blank);
        }

        let length = username.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        if username.chars().any(char::is_control) {
            return Err(UsernameError::ControlCharacters);
        }

        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub password: String,
    pub email: Option<String>,
}

impl RegisterUserCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `password` - Plain text password (hashed by the service)
    /// * `email` - Optional display-only email address
    pub fn new(username: Username, password: String, email: Option<String>) -> Self {
        Self {
            username,
            password,
            email,
        }
    }
}
