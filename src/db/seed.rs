//! Demo content loaded into empty collections.

use anyhow::Result;

use super::Database;
use crate::models::{NewCollectionItem, NewLookbookImage};

/// How many records each collection received from a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub collection_items: usize,
    pub lookbook_images: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.collection_items == 0 && self.lookbook_images == 0
    }
}

impl Database {
    /// Seeds each collection that has no records yet.
    ///
    /// The two collections are checked independently, so a database that
    /// already has collection items still gets its lookbook seeded.
    pub fn seed_if_empty(&self) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        if self.count_collection_items()? == 0 {
            for item in demo_collection_items() {
                self.insert_collection_item(item)?;
                report.collection_items += 1;
            }
            tracing::info!("Seeded {} collection items", report.collection_items);
        }

        if self.count_lookbook_images()? == 0 {
            for image in demo_lookbook_images() {
                self.insert_lookbook_image(image)?;
                report.lookbook_images += 1;
            }
            tracing::info!("Seeded {} lookbook images", report.lookbook_images);
        }

        Ok(report)
    }
}

fn item(name: &str, description: &str, price_label: &str, image_url: &str, tag: &str) -> NewCollectionItem {
    NewCollectionItem {
        name: name.to_string(),
        category: "Outerwear".to_string(),
        description: description.to_string(),
        price_label: price_label.to_string(),
        image_url: image_url.to_string(),
        tag: Some(tag.to_string()),
    }
}

fn shot(title: &str, description: &str, image_url: &str, mood: &str) -> NewLookbookImage {
    NewLookbookImage {
        title: title.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        mood: mood.to_string(),
    }
}

pub fn demo_collection_items() -> Vec<NewCollectionItem> {
    vec![
        item(
            "The Grey Hoodie",
            "Soft fleece hoodie in Kathmandu grey — clean, minimal and made for everyday layers.",
            "NPR 7,500",
            "/assets/grey_hoodie.png",
            "New",
        ),
        item(
            "The Trench Coat",
            "Tailored trench in muted sand, the perfect top layer for cool evenings in the valley.",
            "NPR 14,500",
            "/assets/trench_coat.png",
            "Signature",
        ),
        item(
            "The Puffer Jacket",
            "Lightweight navy puffer with a streamlined profile, warm enough for Himalayan winds.",
            "NPR 11,200",
            "/assets/puffer_jacket.png",
            "Essential",
        ),
        item(
            "The Denim Jacket",
            "Classic indigo denim jacket with subtle distressing — built for Kathmandu streets.",
            "NPR 8,900",
            "/assets/denim_jacket.png",
            "Core",
        ),
    ]
}

pub fn demo_lookbook_images() -> Vec<NewLookbookImage> {
    vec![
        shot(
            "Night Shift",
            "Elevated streetwear under city lights.",
            "/assets/lookbook/night-shift-1.jpg",
            "City / Night",
        ),
        shot(
            "Soft Concrete",
            "Muted layers against brutalist lines.",
            "/assets/lookbook/soft-concrete-1.jpg",
            "Minimal / Day",
        ),
        shot(
            "Edge of Light",
            "Monochrome silhouettes in motion.",
            "/assets/lookbook/edge-of-light-1.jpg",
            "Motion / Contrast",
        ),
        shot(
            "Static Calm",
            "Quiet luxury in oversized forms.",
            "/assets/lookbook/static-calm-1.jpg",
            "Calm / Texture",
        ),
    ]
}
