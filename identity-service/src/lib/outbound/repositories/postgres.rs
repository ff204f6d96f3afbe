use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: PgRow) -> Result<User, UserError> {
    let username: String = row.try_get("username").map_err(database_error)?;
    let username = Username::new(username)
        .map_err(|e| UserError::DatabaseError(format!("Stored username is invalid: {}", e)))?;

    Ok(User {
        username,
        password_hash: row.try_get("password_hash").map_err(database_error)?,
        email: row.try_get("email").map_err(database_error)?,
        created_at: row.try_get("created_at").map_err(database_error)?,
    })
}

fn database_error(e: sqlx::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT username, password_hash, email, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(user_from_row).transpose()
    }

    async fn save(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, email, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (username) DO UPDATE
            SET password_hash = EXCLUDED.password_hash, email = EXCLUDED.email
            "#,
        )
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(user)
    }

    async fn delete(&self, user: &User) -> Result<(), UserError> {
        sqlx::query(
            r#"
            DELETE FROM users
            WHERE username = $1
            "#,
        )
        .bind(user.username.as_str())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }
}
