pub mod signup_handler;
pub mod user_handler;
