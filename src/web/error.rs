use crate::charts::RenderError;
use crate::report::ReportError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Error returned by the HTTP handlers as `{"error": {"code", "message"}}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidSelection(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidSelection(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidSelection(_) => "InvalidSelection",
            ApiError::Internal(_) => "Internal",
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        if err.is_invalid_selection() {
            ApiError::InvalidSelection(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        } else {
            tracing::warn!(code = self.code(), error = %self, "request rejected");
        }
        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_errors_map_to_bad_request() {
        let err = ApiError::from(ReportError::UnknownReport("Weekly".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "InvalidSelection");
    }

    #[test]
    fn render_errors_map_to_internal() {
        let err = ApiError::from(RenderError::Drawing {
            chart: "yearly-history".to_string(),
            message: "no font".to_string(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("yearly-history"));
    }
}
