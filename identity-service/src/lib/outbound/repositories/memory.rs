use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store keyed by username.
///
/// Data is lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn save(&self, user: User) -> Result<User, UserError> {
        self.users
            .write()
            .await
            .insert(user.username.as_str().to_string(), user.clone());

        Ok(user)
    }

    async fn delete(&self, user: &User) -> Result<(), UserError> {
        self.users.write().await.remove(user.username.as_str());
        Ok(())
    }
}
