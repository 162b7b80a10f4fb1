use axum::{http::StatusCode, middleware::from_fn_with_state, routing::get, Router};

use crate::core::middleware;
use crate::core::state::AppState;
use crate::features::{pages, sessions, users};

/// Simple health check endpoint
async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Application routes with session resolution applied.
///
/// Transport layers (CORS, tracing, request ids) and Swagger UI are added
/// by the binary.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(pages::routes::routes())
        .merge(users::routes::routes(state.clone()))
        .merge(sessions::routes::routes(state.clone()))
        .layer(from_fn_with_state(
            state.sessions.clone(),
            middleware::session_middleware,
        ))
        .route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::TestServer;

    use crate::shared::test_helpers::{test_app, SESSION_COOKIE};

    #[tokio::test]
    async fn test_health() {
        let server = TestServer::new(test_app().router()).unwrap();
        server.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let server = TestServer::new(test_app().router()).unwrap();
        server
            .get("/nope")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_garbage_session_cookie_is_anonymous() {
        let app = test_app();
        let server = TestServer::new(app.router()).unwrap();

        let response = server
            .get("/")
            .add_header(
                header::COOKIE,
                HeaderValue::from_str(&format!("{}=not-a-uuid", SESSION_COOKIE)).unwrap(),
            )
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("Sign up"));
    }

    #[tokio::test]
    async fn test_session_store_failure_serves_pages_anonymously() {
        let app = test_app();
        let server = TestServer::new(app.router()).unwrap();
        let cookie = server
            .post("/api/users")
            .json(&serde_json::json!({ "email": "jane@example.com", "password": "password123" }))
            .await
            .cookie(SESSION_COOKIE);

        app.sessions.make_unavailable();

        let home = server.get("/").add_cookie(cookie.clone()).await;
        home.assert_status_ok();
        assert!(home.text().contains("Sign up"));

        server
            .get("/signup")
            .add_cookie(cookie.clone())
            .await
            .assert_status_ok();

        server
            .get("/api/auth/me")
            .add_cookie(cookie)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
