use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::core::state::AppState;
use crate::features::sessions::CurrentUser;
use crate::features::users::dtos::{SignupRequestDto, UserResponseDto};
use crate::shared::types::ApiResponse;

/// Register a new account and start a session for it
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = SignupRequestDto,
    responses(
        (status = 201, description = "Account created, session cookie set", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Validation failed")
    ),
    tag = "users"
)]
pub async fn register(
    State(state): State<AppState>,
    current: Option<CurrentUser>,
    jar: CookieJar,
    AppJson(dto): AppJson<SignupRequestDto>,
) -> Result<(StatusCode, CookieJar, Json<ApiResponse<UserResponseDto>>)> {
    let user = state.users.signup(dto).await?;
    let session = state.sessions.establish(current.as_ref(), user.id).await?;
    let jar = jar.add(state.sessions.session_cookie(&session));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(ApiResponse::success(
            Some(UserResponseDto::from(user)),
            Some("Thank you for signing up!".to_string()),
        )),
    ))
}
