//! Server-rendered signup form

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::CookieJar;
use minijinja::context;

use crate::core::error::{AppError, Result};
use crate::core::state::AppState;
use crate::features::sessions::CurrentUser;
use crate::features::users::dtos::SignupRequestDto;
use crate::shared::constants::HOME_PATH;
use crate::shared::flash::Flash;
use crate::shared::views;

/// GET /signup
pub async fn new_user() -> Result<Html<String>> {
    render_form(&SignupRequestDto::default(), &[])
}

/// POST /signup
///
/// Success starts a session for the new account and redirects home with a
/// notice. Validation failure re-renders the form with 422 and writes nothing.
#[tracing::instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    current: Option<CurrentUser>,
    jar: CookieJar,
    Form(form): Form<SignupRequestDto>,
) -> Result<Response> {
    let redisplay = SignupRequestDto {
        email: form.email.clone(),
        ..SignupRequestDto::default()
    };

    match state.users.signup(form).await {
        Ok(user) => {
            let session = state.sessions.establish(current.as_ref(), user.id).await?;
            let jar = jar
                .add(state.sessions.session_cookie(&session))
                .add(Flash::SignedUp.cookie());

            Ok((jar, Redirect::to(HOME_PATH)).into_response())
        }
        Err(AppError::Validation(errors)) => {
            let page = render_form(&redisplay, &errors)?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Password fields are never echoed back
fn render_form(form: &SignupRequestDto, errors: &[String]) -> Result<Html<String>> {
    let html = views::render(
        "users/new.html",
        context! {
            email => form.email,
            errors => errors,
        },
    )?;
    Ok(Html(html))
}
