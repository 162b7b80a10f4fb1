pub mod pages;
pub mod sessions;
pub mod users;
