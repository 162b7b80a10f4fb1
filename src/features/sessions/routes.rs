use axum::{
    routing::{get, post},
    Router,
};

use crate::core::state::AppState;
use crate::features::sessions::handlers;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout_api))
        .route("/api/auth/me", get(handlers::get_me))
        .route("/logout", post(handlers::logout))
        .with_state(state)
}
