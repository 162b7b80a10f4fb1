//! In-memory repositories and fixtures shared by unit and handler tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Utc};
use fake::{uuid::UUIDv4, Fake};
use uuid::Uuid;

use crate::core::config::{PasswordConfig, SessionConfig};
use crate::core::error::{AppError, Result};
use crate::core::router;
use crate::core::state::AppState;
use crate::features::sessions::models::Session;
use crate::features::sessions::repositories::SessionRepository;
use crate::features::sessions::SessionService;
use crate::features::users::models::{NewUser, User};
use crate::features::users::password::PasswordService;
use crate::features::users::repositories::UserRepository;
use crate::features::users::UserService;

pub const SESSION_COOKIE: &str = "test_session";

/// Cheap Argon2 parameters so tests stay fast
pub fn test_password_config() -> PasswordConfig {
    PasswordConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}

pub fn test_session_config() -> SessionConfig {
    SessionConfig {
        cookie_name: SESSION_COOKIE.to_string(),
        ttl: Duration::from_secs(60 * 60),
        cookie_secure: false,
    }
}

/// Unique address that always satisfies the email format rule
pub fn fake_email() -> String {
    let id: Uuid = UUIDv4.fake();
    format!("user-{}@example.com", id.simple())
}

#[derive(Default)]
struct UserStore {
    users: Vec<User>,
    reject_next_insert: bool,
}

/// Enforces case-insensitive email uniqueness under a single lock, like the
/// unique index does in PostgreSQL
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: Mutex<UserStore>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.store.lock().unwrap().users.len()
    }

    /// Make the next insert behave as if a concurrent signup claimed the email
    pub fn reject_next_insert(&self) {
        self.store.lock().unwrap().reject_next_insert = true;
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .users
            .iter()
            .find(|u| u.email.to_lowercase() == email.to_lowercase())
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<Option<User>> {
        let mut store = self.store.lock().unwrap();

        if std::mem::take(&mut store.reject_next_insert) {
            return Ok(None);
        }

        let taken = store
            .users
            .iter()
            .any(|u| u.email.to_lowercase() == user.email.to_lowercase());
        if taken {
            return Ok(None);
        }

        let now = Utc::now();
        let created = User {
            id: user.id,
            email: user.email,
            password_hash: user.password_hash.into_string(),
            created_at: now,
            updated_at: now,
        };
        store.users.push(created.clone());
        Ok(Some(created))
    }
}

/// Same boundary as `PgSessionRepository`: live while `expires_at > now`
fn is_expired(session: &Session, now: DateTime<Utc>) -> bool {
    session.expires_at <= now
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<Uuid, Session>>,
    unavailable: AtomicBool,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    /// Make lookups fail as if the database pool were exhausted
    pub fn make_unavailable(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    /// Move the session's expiry into the past
    pub fn expire(&self, id: Uuid) {
        if let Some(session) = self.sessions.lock().unwrap().get_mut(&id) {
            session.expires_at = Utc::now() - chrono::Duration::seconds(1);
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert(&self, session: &Session) -> Result<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id, session.clone());
        Ok(())
    }

    async fn find_active(&self, id: Uuid, now: DateTime<Utc>) -> Result<Option<Session>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }

        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .get(&id)
            .filter(|s| !is_expired(s, now))
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.sessions.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| !is_expired(s, now));
        Ok((before - sessions.len()) as u64)
    }
}

/// Fully wired application over in-memory storage
pub struct TestApp {
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<InMemorySessionRepository>,
    pub state: AppState,
}

impl TestApp {
    pub fn router(&self) -> Router {
        router::routes(&self.state)
    }
}

pub fn test_app() -> TestApp {
    let users = Arc::new(InMemoryUserRepository::new());
    let sessions = Arc::new(InMemorySessionRepository::new());

    let passwords = PasswordService::new(&test_password_config()).unwrap();
    let user_service = Arc::new(UserService::new(users.clone(), passwords));
    let session_service = Arc::new(SessionService::new(
        sessions.clone(),
        users.clone(),
        test_session_config(),
    ));

    TestApp {
        users,
        sessions,
        state: AppState::new(user_service, session_service),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_expiry_boundary() {
        let repo = InMemorySessionRepository::new();
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            user_id: Uuid::now_v7(),
            created_at: now - chrono::Duration::hours(1),
            expires_at: now,
        };
        repo.insert(&session).await.unwrap();

        let just_before = now - chrono::Duration::seconds(1);
        assert!(repo.find_active(session.id, just_before).await.unwrap().is_some());
        assert!(repo.find_active(session.id, now).await.unwrap().is_none());

        assert_eq!(repo.delete_expired(just_before).await.unwrap(), 0);
        assert_eq!(repo.delete_expired(now).await.unwrap(), 1);
        assert_eq!(repo.len(), 0);
    }
}
