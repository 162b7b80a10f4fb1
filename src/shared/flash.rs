//! One-shot notices carried to the next page view in a cookie.
//!
//! The cookie stores a short key, never the message text.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::shared::constants::FLASH_COOKIE_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    SignedUp,
    SignedOut,
}

impl Flash {
    fn key(self) -> &'static str {
        match self {
            Flash::SignedUp => "signed_up",
            Flash::SignedOut => "signed_out",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "signed_up" => Some(Flash::SignedUp),
            "signed_out" => Some(Flash::SignedOut),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::SignedUp => "Thank you for signing up!",
            Flash::SignedOut => "Logged out!",
        }
    }

    pub fn cookie(self) -> Cookie<'static> {
        Cookie::build((FLASH_COOKIE_NAME, self.key()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }
}

/// Read the pending notice, if any, and clear it from the browser
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(key) = jar.get(FLASH_COOKIE_NAME).map(|c| c.value().to_string()) else {
        return (jar, None);
    };

    let cleared = Cookie::build((FLASH_COOKIE_NAME, ""))
        .path("/")
        .max_age(time::Duration::seconds(0))
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    (jar.add(cleared), Flash::from_key(&key))
}
