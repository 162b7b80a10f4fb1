use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;
use uuid::Uuid;

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::features::sessions::models::{CurrentUser, Session};
use crate::features::sessions::repositories::SessionRepository;
use crate::features::users::repositories::UserRepository;

/// Starts, resolves and ends server-side sessions
pub struct SessionService {
    sessions: Arc<dyn SessionRepository>,
    users: Arc<dyn UserRepository>,
    config: SessionConfig,
}

impl SessionService {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        config: SessionConfig,
    ) -> Self {
        Self {
            sessions,
            users,
            config,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Start a session for `user_id`
    pub async fn start(&self, user_id: Uuid) -> Result<Session> {
        let now = Utc::now();
        let ttl = chrono::Duration::from_std(self.config.ttl)
            .map_err(|e| AppError::Internal(format!("Invalid session TTL: {}", e)))?;

        let session = Session {
            id: Uuid::new_v4(),
            user_id,
            created_at: now,
            expires_at: now + ttl,
        };
        self.sessions.insert(&session).await?;

        tracing::info!(user_id = %user_id, "Session started");
        Ok(session)
    }

    /// Start a session for `user_id`, ending the one the request arrived with
    pub async fn establish(
        &self,
        previous: Option<&CurrentUser>,
        user_id: Uuid,
    ) -> Result<Session> {
        if let Some(previous) = previous {
            self.end(previous.session_id).await?;
        }
        self.start(user_id).await
    }

    /// Resolve a session id to its user, if the session is live and the user still exists
    pub async fn resolve(&self, session_id: Uuid) -> Result<Option<CurrentUser>> {
        let Some(session) = self.sessions.find_active(session_id, Utc::now()).await? else {
            return Ok(None);
        };

        let user = self.users.find_by_id(session.user_id).await?;
        Ok(user.map(|u| CurrentUser {
            user_id: u.id,
            email: u.email,
            session_id: session.id,
        }))
    }

    pub async fn end(&self, session_id: Uuid) -> Result<()> {
        self.sessions.delete(session_id).await?;
        tracing::info!(session_id = %session_id, "Session ended");
        Ok(())
    }

    pub async fn purge_expired(&self) -> Result<u64> {
        self.sessions.delete_expired(Utc::now()).await
    }

    /// Cookie referencing `session`, valid for the session TTL
    pub fn session_cookie(&self, session: &Session) -> Cookie<'static> {
        let max_age = i64::try_from(self.config.ttl.as_secs()).unwrap_or(i64::MAX);

        Cookie::build((self.config.cookie_name.clone(), session.id.to_string()))
            .path("/")
            .max_age(time::Duration::seconds(max_age))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.cookie_secure)
            .build()
    }

    /// Cookie that clears the session cookie in the browser
    pub fn clear_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.config.cookie_name.clone(), ""))
            .path("/")
            .max_age(time::Duration::seconds(0))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.cookie_secure)
            .build()
    }
}
