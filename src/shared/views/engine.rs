//! Template engine for server-rendered pages using Jinja2 syntax.
//!
//! Templates live under `templates/` and are compiled into the binary, so
//! rendering never depends on the working directory.

use minijinja::{AutoEscape, Environment, Value};
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../../templates/layout.html")),
    ("home.html", include_str!("../../../templates/home.html")),
    ("users/new.html", include_str!("../../../templates/users/new.html")),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);

    for (name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a template with the given context.
///
/// # Example
/// ```ignore
/// let html = render("home.html", minijinja::context! { notice => "Hi" })?;
/// ```
pub fn render(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_missing_template() {
        let result = render("nonexistent.html", context! {});
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_signup_form_escapes_input() {
        let html = render(
            "users/new.html",
            context! {
                email => "<script>alert(1)</script>",
                errors => vec!["Email is invalid"],
            },
        )
        .unwrap();

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("Email is invalid"));
    }

    #[test]
    fn test_home_page_renders_notice() {
        let html = render(
            "home.html",
            context! { notice => "Thank you for signing up!", current_email => "jane@example.com" },
        )
        .unwrap();

        assert!(html.contains("Thank you for signing up!"));
        assert!(html.contains("jane@example.com"));
    }
}
