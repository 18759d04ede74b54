// Analyzer module: querying and summarizing a loaded catalog.

pub mod search;
pub mod stats;

// Re-export the query functions for ease of use.
pub use search::{search, sort_by_price};
pub use stats::{CatalogStats, summarize};
