use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// The rendering seam: page views assemble a context document and hand
/// it here; the template engine itself lives in the host.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),
    #[error("Render failed: {0}")]
    Render(String),
}

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        match self {
            Self::TemplateNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            Self::Render(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}

/// Render a page context to an HTML response, mapping render failures
/// to their error responses.
pub fn respond(
    renderer: &dyn TemplateRenderer,
    template: &str,
    context: &serde_json::Value,
) -> Response {
    match renderer.render(template, context) {
        Ok(body) => Html(body).into_response(),
        Err(error) => error.into_response(),
    }
}
