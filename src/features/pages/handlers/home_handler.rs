use axum::response::Html;
use axum_extra::extract::CookieJar;
use minijinja::context;

use crate::core::error::Result;
use crate::features::sessions::CurrentUser;
use crate::shared::flash;
use crate::shared::views;

/// GET /
///
/// Shows and consumes the flash notice left by the previous request.
pub async fn home(
    current: Option<CurrentUser>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>)> {
    let (jar, notice) = flash::take(jar);

    let html = views::render(
        "home.html",
        context! {
            notice => notice.map(|n| n.message()),
            current_email => current.map(|u| u.email),
        },
    )?;

    Ok((jar, Html(html)))
}
