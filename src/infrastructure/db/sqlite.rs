use crate::domain::error::{AppError, Result};
use crate::domain::user::{Session, User};
use crate::infrastructure::db::CredentialStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::str::FromStr;

pub struct SqliteCredentialStore {
    pool: Pool<Sqlite>,
}

impl SqliteCredentialStore {
    pub async fn init(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to parse connection string: {}", e))
            })?
            .create_if_missing(true);

        // In-memory databases live as long as their connection
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect: {}", e)))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at DATETIME NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create users table: {}", e)))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                username TEXT NOT NULL,
                expires_at INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(format!("Failed to create sessions table: {}", e))
        })?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn find_user(&self, username: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, UserEntity>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch user: {}", e)))
        .map(|entity| entity.map(Into::into))
    }

    async fn create_user(&self, user: &mut User) -> Result<()> {
        let created_at = user.created_at.unwrap_or_else(Utc::now);

        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Username already exists".to_string())
            }
            other => AppError::DatabaseError(format!("Failed to save user: {}", other)),
        })?;

        user.id = Some(result.last_insert_rowid());
        user.created_at = Some(created_at);
        Ok(())
    }

    async fn create_session(&self, session: &Session) -> Result<()> {
        sqlx::query("INSERT INTO sessions (token, username, expires_at) VALUES (?, ?, ?)")
            .bind(&session.token)
            .bind(&session.username)
            .bind(session.expires_at.timestamp())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to save session: {}", e)))?;

        Ok(())
    }

    async fn find_session(&self, token: &str) -> Result<Option<Session>> {
        let entity = sqlx::query_as::<_, SessionEntity>(
            "SELECT token, username, expires_at FROM sessions WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch session: {}", e)))?;

        entity.map(Session::try_from).transpose()
    }

    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now.timestamp())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to purge sessions: {}", e)))?;

        Ok(result.rows_affected())
    }
}

// Internal entities for database mapping
#[derive(sqlx::FromRow)]
struct UserEntity {
    id: i64,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserEntity> for User {
    fn from(e: UserEntity) -> Self {
        Self {
            id: Some(e.id),
            username: e.username,
            password_hash: e.password_hash,
            created_at: Some(e.created_at),
        }
    }
}

#[derive(sqlx::FromRow)]
struct SessionEntity {
    token: String,
    username: String,
    expires_at: i64,
}

impl TryFrom<SessionEntity> for Session {
    type Error = AppError;

    fn try_from(e: SessionEntity) -> Result<Self> {
        let expires_at = DateTime::<Utc>::from_timestamp(e.expires_at, 0).ok_or_else(|| {
            AppError::DatabaseError(format!("Invalid session expiry: {}", e.expires_at))
        })?;

        Ok(Self {
            token: e.token,
            username: e.username,
            expires_at,
        })
    }
}
