use axum::{
    routing::{get, post},
    Router,
};

use crate::core::state::AppState;
use crate::features::users::handlers::{signup_handler, user_handler};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/signup",
            get(signup_handler::new_user).post(signup_handler::create_user),
        )
        .route("/api/users", post(user_handler::register))
        .with_state(state)
}
