use axum::{routing::get, Router};

use crate::features::pages::handlers;

pub fn routes() -> Router {
    Router::new().route("/", get(handlers::home))
}
