//! Catalog module - the static list of values users choose from.

mod values_catalog;
mod category;
mod entry;

pub use values_catalog::{CatalogError, ValuesCatalog};
pub use category::ValueCategory;
pub use entry::ValueEntry;
