//! Landing page.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/` | Home page with the pending notice, if any |

pub mod handlers;
pub mod routes;
