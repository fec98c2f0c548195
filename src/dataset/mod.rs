//! The Iris table: download, parsing and the process-wide cache.

mod cache;
mod fetch;
mod table;

pub use cache::{DatasetCache, load_dataset};
pub use fetch::fetch_table;
pub use table::{
    FEATURE_COLUMNS, IrisRecord, IrisTable, MAX_MEASUREMENT, MIN_MEASUREMENT, Measurements,
    parse_table,
};

use std::sync::Arc;

use thiserror::Error;

/// Failure to obtain the dataset.
///
/// Cloneable so a cached failure can be handed to every later caller.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// The request could not be sent or the connection failed.
    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },
    /// The server answered with a non-success status.
    #[error("Fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    /// The body could not be read or exceeded the size limit.
    #[error("Failed to read dataset body from {url}: {source}")]
    Read {
        url: String,
        source: Arc<std::io::Error>,
    },
    /// The CSV was malformed or missing required columns.
    #[error("Invalid dataset CSV: {0}")]
    Parse(String),
    /// The CSV parsed but held no rows.
    #[error("Dataset contains no rows")]
    Empty,
}
