//! Account registration.
//!
//! Accounts are identified by email (unique, case-insensitive) and carry an
//! Argon2id password hash. A successful signup also signs the new user in.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/signup` | Blank signup form |
//! | POST | `/signup` | Create account from form data, redirect home |
//! | POST | `/api/users` | Create account from JSON |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::UserService;
