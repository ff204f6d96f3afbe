//! Runtime-selected user store.
//!
//! [`UserStore`] wraps every available [`UserRepository`] implementation so the
//! backend can be picked from configuration while the service stays statically
//! dispatched.

use async_trait::async_trait;

use super::memory::InMemoryUserRepository;
use super::postgres::PostgresUserRepository;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub enum UserStore {
    /// Process-local store for development and tests
    Memory(InMemoryUserRepository),
    /// PostgreSQL `users` table
    Postgres(PostgresUserRepository),
}

impl UserStore {
    pub fn memory() -> Self {
        Self::Memory(InMemoryUserRepository::new())
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres",
        }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        match self {
            Self::Memory(repository) => repository.find_by_username(username).await,
            Self::Postgres(repository) => repository.find_by_username(username).await,
        }
    }

    async fn save(&self, user: User) -> Result<User, UserError> {
        match self {
            Self::Memory(repository) => repository.save(user).await,
            Self::Postgres(repository) => repository.save(user).await,
        }
    }

    async fn delete(&self, user: &User) -> Result<(), UserError> {
        match self {
            Self::Memory(repository) => repository.delete(user).await,
            Self::Postgres(repository) => repository.delete(user).await,
        }
    }
}
