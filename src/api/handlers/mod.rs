use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::models::*;

// ============================================================
// Error Handling
// ============================================================

/// JSON body returned with failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

/// Log a store error and answer with a fixed, client-safe message.
/// The full error chain stays in the server log.
fn internal_error(message: &'static str) -> impl FnOnce(anyhow::Error) -> ApiError {
    move |e| {
        tracing::error!("{}: {:#}", message, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                message: message.to_string(),
            }),
        )
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Content
// ============================================================

pub async fn list_collections(
    State(db): State<Database>,
) -> Result<Json<Vec<CollectionItem>>, ApiError> {
    db.list_collection_items()
        .map(Json)
        .map_err(internal_error("Failed to load collections"))
}

pub async fn list_lookbook(
    State(db): State<Database>,
) -> Result<Json<Vec<LookbookImage>>, ApiError> {
    db.list_lookbook_images()
        .map(Json)
        .map_err(internal_error("Failed to load lookbook"))
}
