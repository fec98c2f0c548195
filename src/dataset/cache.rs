use std::sync::{Arc, OnceLock};

use crate::config::DatasetSettings;

use super::{IrisTable, LoadError, fetch_table};

/// Single-slot memo for the dataset load result.
///
/// The first result is kept whether it succeeded or failed; later callers get
/// it back without running the loader again.
#[derive(Debug, Default)]
pub struct DatasetCache {
    slot: OnceLock<Result<Arc<IrisTable>, LoadError>>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Return the cached result, running `load` only if nothing is cached yet.
    pub fn get_or_load<F>(&self, load: F) -> Result<Arc<IrisTable>, LoadError>
    where
        F: FnOnce() -> Result<IrisTable, LoadError>,
    {
        self.slot
            .get_or_init(|| {
                let result = load().map(Arc::new);
                match &result {
                    Ok(table) => tracing::info!(
                        rows = table.len(),
                        species = table.species().collect::<std::collections::BTreeSet<_>>().len(),
                        "Dataset loaded"
                    ),
                    Err(err) => tracing::warn!("Dataset failed to load: {err}"),
                }
                result
            })
            .clone()
    }

    /// True once a result, success or failure, has been stored.
    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }
}

static PROCESS_DATASET: DatasetCache = DatasetCache::new();

/// Load the dataset once per process.
///
/// The URL from the first call wins; later calls return the cached table or
/// the cached failure.
pub fn load_dataset(settings: &DatasetSettings) -> Result<Arc<IrisTable>, LoadError> {
    PROCESS_DATASET.get_or_load(|| fetch_table(settings))
}
