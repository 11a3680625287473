use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DatabaseError;
use thiserror::Error;

use crate::models::ErrorBody;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search query is required")]
    MissingQuery,

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Image search failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Image search returned status {0}")]
    UpstreamStatus(u16),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = match self {
            SearchError::MissingQuery
            | SearchError::MalformedPayload(_)
            | SearchError::Upstream(_)
            | SearchError::UpstreamStatus(_) => StatusCode::BAD_REQUEST,
            SearchError::Config(_) | SearchError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        tracing::warn!("Responding {status}: {self}");

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
