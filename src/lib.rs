//! Black Croz storefront server.
//!
//! Serves the read-only content API (collections and lookbook) backed by
//! SQLite, and hosts the single-page front end. Viewport tracking for the
//! front end lives in [`black_croz_core`].

pub mod api;
pub mod db;
pub mod models;

pub use black_croz_core::{sections, viewport};
