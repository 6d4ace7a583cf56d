use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A lookbook shot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LookbookImage {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// Mood line shown as a pill, e.g. `City / Night`.
    pub mood: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a lookbook image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLookbookImage {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub mood: String,
}
