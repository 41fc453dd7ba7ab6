// Error types for the peer table service

use crate::models::node_stats::NodeId;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by the HTTP table view
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Peer not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RefreshError {
    #[error("Refresh interval must be greater than 0")]
    InvalidInterval,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for TableError {
    fn into_response(self) -> Response {
        let status = match &self {
            TableError::NodeNotFound(_) => StatusCode::NOT_FOUND,
            TableError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
