use async_trait::async_trait;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use auth::IssuedToken;

/// Port for credential and token operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new user with a hashed password.
    ///
    /// # Arguments
    /// * `command` - Validated username, plaintext password and optional email
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `PasswordHashing` - Password could not be hashed
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Check a username/password pair.
    ///
    /// # Returns
    /// `true` if the user exists and the password matches. Unknown users and
    /// wrong passwords both yield `false`.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn authenticate(&self, username: &str, password: &str) -> Result<bool, UserError>;

    /// Authenticate and, on success, issue a signed token.
    ///
    /// # Returns
    /// `Some(token)` on success, `None` on any authentication failure
    ///
    /// # Errors
    /// * `TokenIssuance` - Token could not be signed
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, username: &str, password: &str)
        -> Result<Option<IssuedToken>, UserError>;

    /// Verify a token's signature and return its subject, ignoring expiry.
    fn validate(&self, token: &str) -> Option<String>;

    /// `true` iff the token's signature verifies and it has not expired.
    fn verify_token(&self, token: &str) -> bool;

    /// Look up a user by exact username.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn get_user(&self, username: &str) -> Result<Option<User>, UserError>;

    /// Delete a user.
    ///
    /// # Returns
    /// `true` if a user existed and was removed, `false` if absent
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn delete_user(&self, username: &str) -> Result<bool, UserError>;
}

/// Persistence operations for user records.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve user by exact, case-sensitive username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError>;

    /// Insert a user, or replace the record with the same username.
    ///
    /// Uniqueness is the caller's responsibility.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn save(&self, user: User) -> Result<User, UserError>;

    /// Remove a user permanently. Removing an absent user is a no-op.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, user: &User) -> Result<(), UserError>;
}
