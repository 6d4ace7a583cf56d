//! Domain models for the Black Croz content API.
//!
//! Both collections are read-only over HTTP and are filled by the seeder:
//!
//! - [`CollectionItem`]: A garment shown in the product grid.
//! - [`LookbookImage`]: A styled shot shown in the lookbook gallery.
//!
//! Models serialize in camelCase, which is what the front end reads.

mod collection;
mod lookbook;

pub use collection::*;
pub use lookbook::*;
