/// Cookie carrying the one-shot flash notice key
pub const FLASH_COOKIE_NAME: &str = "flash_notice";

/// Landing page after signup, login and logout
pub const HOME_PATH: &str = "/";
