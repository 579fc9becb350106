use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    response::Response,
    Json,
};
use validator::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("Invalid JSON format")]
    InvalidJson(#[from] JsonRejection),
    #[error("Validation error")]
    ValidationError(ValidationErrors),
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidJson(_) => {
                (StatusCode::BAD_REQUEST, "Invalid JSON format").into_response()
            }
            Self::ValidationError(errors) => {
                (StatusCode::BAD_REQUEST, Json(serde_json::json!(errors))).into_response()
            }
        }
    }
}

/// Form-body counterpart of [`JsonError`], used by the create-form
/// submission path of the generic pages.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Invalid form submission")]
    InvalidForm(#[from] FormRejection),
    #[error("Validation error")]
    ValidationError(ValidationErrors),
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidForm(_) => {
                (StatusCode::BAD_REQUEST, "Invalid form submission").into_response()
            }
            Self::ValidationError(errors) => {
                (StatusCode::BAD_REQUEST, Json(serde_json::json!(errors))).into_response()
            }
        }
    }
}
