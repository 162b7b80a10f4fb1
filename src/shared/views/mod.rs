//! HTML view rendering backed by Jinja2 templates.

mod engine;

pub use engine::{render, TemplateError};
