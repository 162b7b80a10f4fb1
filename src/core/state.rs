use std::sync::Arc;

use crate::features::sessions::SessionService;
use crate::features::users::UserService;

/// Services shared by the account and session handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub sessions: Arc<SessionService>,
}

impl AppState {
    pub fn new(users: Arc<UserService>, sessions: Arc<SessionService>) -> Self {
        Self { users, sessions }
    }
}
