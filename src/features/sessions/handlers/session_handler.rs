use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    Json,
};
use axum_extra::extract::CookieJar;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::core::state::AppState;
use crate::features::sessions::CurrentUser;
use crate::features::users::dtos::{LoginRequestDto, UserResponseDto};
use crate::shared::constants::HOME_PATH;
use crate::shared::flash::Flash;
use crate::shared::types::ApiResponse;
use crate::shared::validation::FieldErrors;

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation failed")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    current: Option<CurrentUser>,
    jar: CookieJar,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<(CookieJar, Json<ApiResponse<UserResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(FieldErrors::from(&e).full_messages()))?;

    let user = state.users.authenticate(&dto.email, &dto.password).await?;
    let session = state.sessions.establish(current.as_ref(), user.id).await?;
    let jar = jar.add(state.sessions.session_cookie(&session));

    Ok((
        jar,
        Json(ApiResponse::success(Some(UserResponseDto::from(user)), None)),
    ))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session ended (or none was active)")
    ),
    tag = "auth"
)]
pub async fn logout_api(
    State(state): State<AppState>,
    current: Option<CurrentUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<()>>)> {
    if let Some(user) = current {
        state.sessions.end(user.session_id).await?;
    }
    let jar = jar.add(state.sessions.clear_cookie());

    Ok((
        jar,
        Json(ApiResponse::success(None, Some("Logged out!".to_string()))),
    ))
}

/// POST /logout, from the button on the home page
pub async fn logout(
    State(state): State<AppState>,
    current: Option<CurrentUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse> {
    if let Some(user) = current {
        state.sessions.end(user.session_id).await?;
    }
    let jar = jar
        .add(state.sessions.clear_cookie())
        .add(Flash::SignedOut.cookie());

    Ok((jar, Redirect::to(HOME_PATH)))
}

/// Get the signed-in user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Not signed in")
    ),
    tag = "auth",
    security(
        ("session_cookie" = [])
    )
)]
pub async fn get_me(
    user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let account = state
        .users
        .find(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::success(
        Some(UserResponseDto::from(account)),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::{TestResponse, TestServer};
    use serde_json::{json, Value};

    use crate::shared::constants::FLASH_COOKIE_NAME;
    use crate::shared::test_helpers::{test_app, TestApp, SESSION_COOKIE};

    async fn signed_up(app: &TestApp, server: &TestServer) -> TestResponse {
        let response = server
            .post("/api/users")
            .json(&json!({ "email": "jane@example.com", "password": "password123" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(app.sessions.len(), 1);
        response
    }

    fn clears_cookie(response: &TestResponse, name: &str) -> bool {
        response
            .headers()
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| v.starts_with(&format!("{}=;", name)) && v.contains("Max-Age=0"))
    }

    #[tokio::test]
    async fn test_login_then_me() {
        let app = test_app();
        let server = TestServer::new(app.router()).unwrap();
        signed_up(&app, &server).await;

        let login = server
            .post("/api/auth/login")
            .json(&json!({ "email": "JANE@example.com", "password": "password123" }))
            .await;
        login.assert_status_ok();
        assert_eq!(app.sessions.len(), 2);

        let me = server
            .get("/api/auth/me")
            .add_cookie(login.cookie(SESSION_COOKIE))
            .await;
        me.assert_status_ok();
        let body: Value = me.json();
        assert_eq!(body["data"]["email"], "jane@example.com");
    }

    #[tokio::test]
    async fn test_login_replaces_current_session() {
        let app = test_app();
        let server = TestServer::new(app.router()).unwrap();
        let first = signed_up(&app, &server).await.cookie(SESSION_COOKIE);

        let login = server
            .post("/api/auth/login")
            .add_cookie(first)
            .json(&json!({ "email": "jane@example.com", "password": "password123" }))
            .await;

        login.assert_status_ok();
        assert_eq!(app.sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let app = test_app();
        let server = TestServer::new(app.router()).unwrap();
        signed_up(&app, &server).await;

        let response = server
            .post("/api/auth/login")
            .json(&json!({ "email": "jane@example.com", "password": "wrong-password" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_blank_fields() {
        let app = test_app();
        let server = TestServer::new(app.router()).unwrap();

        let response = server
            .post("/api/auth/login")
            .json(&json!({ "email": "", "password": "" }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(
            body["errors"],
            json!(["Email is required", "Password is required"])
        );
    }

    #[tokio::test]
    async fn test_me_requires_session() {
        let app = test_app();
        let server = TestServer::new(app.router()).unwrap();

        server
            .get("/api/auth/me")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_api_logout_ends_session() {
        let app = test_app();
        let server = TestServer::new(app.router()).unwrap();
        let cookie = signed_up(&app, &server).await.cookie(SESSION_COOKIE);

        let response = server
            .post("/api/auth/logout")
            .add_cookie(cookie.clone())
            .await;
        response.assert_status_ok();
        assert!(clears_cookie(&response, SESSION_COOKIE));
        assert_eq!(app.sessions.len(), 0);

        server
            .get("/api/auth/me")
            .add_cookie(cookie)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_form_logout_redirects_with_notice() {
        let app = test_app();
        let server = TestServer::new(app.router()).unwrap();
        let cookie = signed_up(&app, &server).await.cookie(SESSION_COOKIE);

        let response = server.post("/logout").add_cookie(cookie).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/");
        assert_eq!(response.cookie(FLASH_COOKIE_NAME).value(), "signed_out");
        assert!(clears_cookie(&response, SESSION_COOKIE));
        assert_eq!(app.sessions.len(), 0);
    }

    #[tokio::test]
    async fn test_logout_without_session_is_harmless() {
        let app = test_app();
        let server = TestServer::new(app.router()).unwrap();

        server.post("/logout").await.assert_status(StatusCode::SEE_OTHER);
        server.post("/api/auth/logout").await.assert_status_ok();
    }
}
