use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::sessions::{handlers as sessions_handlers, CurrentUser};
use crate::features::users::{dtos as users_dtos, handlers::user_handler};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Users
        user_handler::register,
        // Sessions
        sessions_handlers::login,
        sessions_handlers::logout_api,
        sessions_handlers::get_me,
    ),
    components(
        schemas(
            // Users
            users_dtos::SignupRequestDto,
            users_dtos::LoginRequestDto,
            users_dtos::UserResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
            // Sessions
            CurrentUser,
        )
    ),
    tags(
        (name = "users", description = "Account registration"),
        (name = "auth", description = "Cookie session login, logout and current user"),
    ),
    info(
        title = "Signup API",
        version = "0.1.0",
        description = "Account registration and session API",
    )
)]
pub struct ApiDoc;

/// Documents the configured session cookie as the `session_cookie` scheme
pub struct SessionCookieSecurity {
    pub cookie_name: String,
}

impl Modify for SessionCookieSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(&self.cookie_name))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
