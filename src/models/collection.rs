use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A garment in the current collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Display price, currency included (e.g. `NPR 7,500`).
    pub price_label: String,
    pub image_url: String,
    /// Short badge such as `New` or `Signature`.
    pub tag: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a collection item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCollectionItem {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price_label: String,
    pub image_url: String,
    pub tag: Option<String>,
}
