//! Core library for the Black Croz site.
//!
//! # Core Concepts
//!
//! - [`sections`]: The ordered list of page sections that navigation and
//!   reveal effects are built around.
//! - [`viewport`]: The viewport activity tracker. It follows which section is
//!   "active" (centered in the viewport) and which sections have been revealed
//!   at least once, and publishes that state to the rendering layer.

pub mod sections;
pub mod viewport;

pub use sections::{section_ids, Section, DEFAULT_ACTIVE_SECTION, SECTIONS};
