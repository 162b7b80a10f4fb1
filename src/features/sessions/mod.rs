//! Server-side sessions for signed-in users.
//!
//! The session cookie carries only an opaque session id; the session row
//! references the user. Every request passes through
//! [`crate::core::middleware::session_middleware`], which attaches a
//! [`CurrentUser`] when the cookie resolves to a live session.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/auth/login` | No | Start a session with email and password |
//! | POST | `/api/auth/logout` | No | End the current session |
//! | GET | `/api/auth/me` | Yes | Current user |
//! | POST | `/logout` | No | End the current session, redirect home |

pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod workers;

pub use models::CurrentUser;
pub use services::SessionService;
pub use workers::SessionSweeper;
