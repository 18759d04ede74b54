// Catalog module: file discovery and loading of vendor price lists.

pub mod discovery;
pub mod loader;

// Re-export the main loader for ease of use.
pub use loader::{CatalogLoader, Loader};
