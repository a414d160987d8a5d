use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use super::loader::{self, LoadError};
use super::model::Dataset;

type Slot = Arc<Mutex<Option<Result<Arc<Dataset>, LoadError>>>>;

// ---------------------------------------------------------------------------
// DatasetCache – load once per (path, encoding) for the process lifetime
// ---------------------------------------------------------------------------

/// Memoizes loaded datasets.
///
/// Each key owns its own slot mutex: the first caller reads the file while
/// later callers for the same key wait on the slot and then share the
/// outcome, failures included. Only [`DatasetCache::forget`] clears an entry.
#[derive(Debug, Default)]
pub struct DatasetCache {
    slots: Mutex<HashMap<(PathBuf, String), Slot>>,
    loads: AtomicUsize,
}

impl DatasetCache {
    /// The process-wide cache used by the application.
    pub fn global() -> &'static DatasetCache {
        static CACHE: OnceLock<DatasetCache> = OnceLock::new();
        CACHE.get_or_init(DatasetCache::default)
    }

    /// Return the cached dataset for `path`, loading it on first access.
    pub fn get_or_load(&self, path: &Path, encoding: &str) -> Result<Arc<Dataset>, LoadError> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(
                slots
                    .entry((path.to_path_buf(), encoding.to_string()))
                    .or_default(),
            )
        };

        let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(outcome) = slot.as_ref() {
            log::debug!("Cache hit for {}", path.display());
            return outcome.clone();
        }

        self.loads.fetch_add(1, Ordering::SeqCst);
        let outcome = loader::load(path, encoding).map(Arc::new);
        if let Ok(dataset) = &outcome {
            log::info!(
                "Loaded {} rows from {} with columns {:?}",
                dataset.len(),
                path.display(),
                dataset.column_names().collect::<Vec<_>>()
            );
        }
        *slot = Some(outcome.clone());
        outcome
    }

    /// Drop the memoized outcome for `path`, so the next call reads it again.
    pub fn forget(&self, path: &Path, encoding: &str) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if slots.remove(&(path.to_path_buf(), encoding.to_string())).is_some() {
            log::debug!("Forgot cached load of {}", path.display());
        }
    }

    /// Number of underlying file loads attempted so far.
    #[cfg(test)]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}
