mod schema;
mod seed;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use crate::models::*;

pub use seed::{demo_collection_items, demo_lookbook_images, SeedReport};

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "black-croz")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("black-croz.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Collection operations
    // ============================================================

    /// All collection items, newest first. Items created in the same instant
    /// are returned latest insert first.
    pub fn list_collection_items(&self) -> Result<Vec<CollectionItem>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, name, category, description, price_label, image_url, tag, created_at, updated_at
             FROM collection_items ORDER BY created_at DESC, rowid DESC",
        )?;

        let items = stmt
            .query_map([], |row| {
                Ok(CollectionItem {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    name: row.get(1)?,
                    category: row.get(2)?,
                    description: row.get(3)?,
                    price_label: row.get(4)?,
                    image_url: row.get(5)?,
                    tag: row.get(6)?,
                    created_at: parse_datetime(row.get::<_, String>(7)?),
                    updated_at: parse_datetime(row.get::<_, String>(8)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    pub fn insert_collection_item(&self, input: NewCollectionItem) -> Result<CollectionItem> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = current_time();

        conn.execute(
            "INSERT INTO collection_items (id, name, category, description, price_label, image_url, tag, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.name,
                &input.category,
                &input.description,
                &input.price_label,
                &input.image_url,
                &input.tag,
                format_datetime(now),
                format_datetime(now),
            ),
        )?;

        Ok(CollectionItem {
            id,
            name: input.name,
            category: input.category,
            description: input.description,
            price_label: input.price_label,
            image_url: input.image_url,
            tag: input.tag,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn count_collection_items(&self) -> Result<usize> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM collection_items", [], |row| {
            row.get(0)
        })?;
        Ok(count as usize)
    }

    // ============================================================
    // Lookbook operations
    // ============================================================

    /// All lookbook images, newest first, same tie-break as collections.
    pub fn list_lookbook_images(&self) -> Result<Vec<LookbookImage>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, description, image_url, mood, created_at, updated_at
             FROM lookbook_images ORDER BY created_at DESC, rowid DESC",
        )?;

        let images = stmt
            .query_map([], |row| {
                Ok(LookbookImage {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    title: row.get(1)?,
                    description: row.get(2)?,
                    image_url: row.get(3)?,
                    mood: row.get(4)?,
                    created_at: parse_datetime(row.get::<_, String>(5)?),
                    updated_at: parse_datetime(row.get::<_, String>(6)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(images)
    }

    pub fn insert_lookbook_image(&self, input: NewLookbookImage) -> Result<LookbookImage> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = current_time();

        conn.execute(
            "INSERT INTO lookbook_images (id, title, description, image_url, mood, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.title,
                &input.description,
                &input.image_url,
                &input.mood,
                format_datetime(now),
                format_datetime(now),
            ),
        )?;

        Ok(LookbookImage {
            id,
            title: input.title,
            description: input.description,
            image_url: input.image_url,
            mood: input.mood,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn count_lookbook_images(&self) -> Result<usize> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM lookbook_images", [], |row| {
            row.get(0)
        })?;
        Ok(count as usize)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Current time at the precision timestamps are stored with.
fn current_time() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 so stored timestamps sort lexically.
fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}
