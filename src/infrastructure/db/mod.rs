pub mod sqlite;

use crate::domain::error::Result;
use crate::domain::user::{Session, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use sqlite::SqliteCredentialStore;

/// Persistence for accounts and bearer sessions
#[async_trait]
pub trait CredentialStore {
    async fn find_user(&self, username: &str) -> Result<Option<User>>;

    /// Insert a user and fill in its id. A taken username is a `Conflict`.
    async fn create_user(&self, user: &mut User) -> Result<()>;

    async fn create_session(&self, session: &Session) -> Result<()>;
    async fn find_session(&self, token: &str) -> Result<Option<Session>>;

    /// Remove sessions expired at `now`, returning how many were dropped
    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64>;
}
