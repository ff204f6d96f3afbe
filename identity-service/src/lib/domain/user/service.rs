use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::IssuedToken;
use chrono::Utc;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::CredentialServicePort;
use crate::user::ports::UserRepository;

/// Credential and token engine.
///
/// Concrete implementation of CredentialServicePort. Stateless apart from the
/// shared authenticator; every user record is read from the repository per call.
pub struct CredentialService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> CredentialService<UR>
where
    UR: UserRepository,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hasher and token signer built from the signing key
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> CredentialServicePort for CredentialService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        // Check and save are separate store calls: two concurrent registrations
        // of one username can both pass this check.
        if self
            .repository
            .find_by_username(command.username.as_str())
            .await?
            .is_some()
        {
            tracing::info!(username = %command.username, "Registration refused, username taken");
            return Err(UserError::UsernameAlreadyExists(
                command.username.as_str().to_string(),
            ));
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = User {
            username: command.username,
            password_hash,
            email: command.email,
            created_at: Utc::now(),
        };

        let created_user = self.repository.save(user).await?;
        tracing::info!(username = %created_user.username, "User registered");

        Ok(created_user)
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<bool, UserError> {
        let user = self.repository.find_by_username(username).await?;
        let stored_hash = user.as_ref().map(|user| user.password_hash.as_str());

        Ok(self.authenticator.verify_password(password, stored_hash))
    }

    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<IssuedToken>, UserError> {
        if !self.authenticate(username, password).await? {
            tracing::info!("Login refused");
            return Ok(None);
        }

        let issued = self.authenticator.issue_token(username)?;
        tracing::info!(
            username,
            expires_at = %issued.expires_at,
            "Token issued"
        );

        Ok(Some(issued))
    }

    fn validate(&self, token: &str) -> Option<String> {
        match self.authenticator.validate_token(token) {
            Ok(claims) => Some(claims.sub),
            Err(e) => {
                tracing::debug!(error = %e, "Token rejected");
                None
            }
        }
    }

    fn verify_token(&self, token: &str) -> bool {
        match self.authenticator.verify_token(token) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Token not usable");
                false
            }
        }
    }

    async fn get_user(&self, username: &str) -> Result<Option<User>, UserError> {
        self.repository.find_by_username(username).await
    }

    async fn delete_user(&self, username: &str) -> Result<bool, UserError> {
        let Some(user) = self.repository.find_by_username(username).await? else {
            return Ok(false);
        };

        self.repository.delete(&user).await?;
        tracing::info!(username = %user.username, "User deleted");

        Ok(true)
    }
}
