use crate::domain::error::{AppError, Result};
use crate::domain::user::{AccessToken, Credentials, Session, User};
use crate::infrastructure::db::CredentialStore;
use crate::infrastructure::security::PasswordHasher;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

const BAD_CREDENTIALS: &str = "Bad username or password";

/// Registration, login and bearer-token resolution
pub struct AuthUseCase {
    store: Arc<dyn CredentialStore + Send + Sync>,
    hasher: PasswordHasher,
    token_ttl: Duration,
}

impl AuthUseCase {
    pub fn new(
        store: Arc<dyn CredentialStore + Send + Sync>,
        hasher: PasswordHasher,
        token_ttl: Duration,
    ) -> Self {
        Self {
            store,
            hasher,
            token_ttl,
        }
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<()> {
        if !credentials.is_complete() {
            return Err(AppError::MissingInput(
                "Username and password are required".to_string(),
            ));
        }
        credentials.validate()?;

        if self.store.find_user(&credentials.username).await?.is_some() {
            warn!(username = %credentials.username, "Registration rejected, username taken");
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let password_hash = self.hash_password(credentials.password.clone()).await?;
        let mut user = User::new(credentials.username.clone(), password_hash);
        self.store.create_user(&mut user).await?;

        info!(username = %user.username, user_id = ?user.id, "Registered user");
        Ok(())
    }

    /// Issue a fresh bearer token. Unknown users and wrong passwords are
    /// reported the same way.
    pub async fn login(&self, credentials: &Credentials) -> Result<AccessToken> {
        let user = self.store.find_user(&credentials.username).await?;

        let verified = match &user {
            Some(user) => {
                self.verify_password(credentials.password.clone(), user.password_hash.clone())
                    .await?
            }
            None => false,
        };

        let Some(user) = user.filter(|_| verified) else {
            warn!(username = %credentials.username, "Login failed");
            return Err(AppError::AuthError(BAD_CREDENTIALS.to_string()));
        };

        let now = Utc::now();
        let purged = self.store.purge_expired_sessions(now).await?;

        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            username: user.username,
            expires_at: now + self.token_ttl,
        };
        self.store.create_session(&session).await?;

        info!(username = %session.username, purged_sessions = purged, "Issued access token");
        Ok(AccessToken {
            access_token: session.token,
        })
    }

    /// Resolve a bearer token to its username
    pub async fn authenticate(&self, token: &str) -> Result<String> {
        match self.store.find_session(token).await? {
            Some(session) if !session.is_expired(Utc::now()) => Ok(session.username),
            Some(_) => Err(AppError::AuthError("Token has expired".to_string())),
            None => Err(AppError::AuthError("Invalid token".to_string())),
        }
    }

    async fn hash_password(&self, password: String) -> Result<String> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
    }

    async fn verify_password(&self, password: String, encoded: String) -> Result<bool> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &encoded))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
    }
}
