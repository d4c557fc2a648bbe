use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};

/// Errors raised by shared plumbing before a request reaches a service handler.
///
/// Services define their own richer error enums; both render the same
/// `{"kind", "message"}` body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
        };
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

/// Router fallback for unmatched paths.
pub async fn fallback(uri: Uri) -> AppError {
    tracing::debug!(%uri, "no route matched");
    AppError::NotFound
}
