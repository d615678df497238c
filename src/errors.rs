use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] crate::validation::ValidationError),

    #[error("Bookmark not found with id of {0}")]
    NotFound(i32),

    #[error("User {user} is not authorized to {action} this bookmark")]
    Forbidden {
        user: String,
        action: &'static str,
    },

    #[error("Not authorized to access this route")]
    Unauthorized,

    #[error("{0}")]
    Database(#[from] diesel::result::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Database(ref err) => {
                error!(error = %err, "Database error occurred");
                StatusCode::BAD_REQUEST
            }
        };

        let body = Json(json!({
            "success": false,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
