use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::{DashboardConfig, TopNRange};
use crate::data::cache::DatasetCache;
use crate::data::filter::{select, Subset};
use crate::data::loader::LoadError;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// Path of the file currently shown, or last attempted.
    pub data_path: PathBuf,

    /// Encoding label used for every load.
    pub encoding: String,

    /// Slider bounds.
    pub top_n_range: TopNRange,

    /// Slider value.
    pub top_n: usize,

    /// Artists picked in the multi-select. Non-empty overrides `top_n`.
    pub selected_artists: BTreeSet<String>,

    /// Search text narrowing the artist list.
    pub artist_query: String,

    /// Rows passing the current selection (cached).
    pub subset: Option<Subset>,

    /// Colour per artist.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            dataset: None,
            data_path: config.data_path.clone(),
            encoding: config.encoding.clone(),
            top_n_range: config.top_n,
            top_n: config.top_n.default,
            selected_artists: BTreeSet::new(),
            artist_query: String::new(),
            subset: None,
            color_map: None,
            status_message: None,
        }
    }

    /// Load `path` through `cache` and show it. On failure the previous
    /// dataset is dropped and the error is put in the status line.
    pub fn load_from(&mut self, path: &Path, cache: &DatasetCache) {
        self.data_path = path.to_path_buf();
        match cache.get_or_load(path, &self.encoding) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.dataset = None;
                self.subset = None;
                self.color_map = None;
                self.status_message = Some(error_message(&e));
            }
        }
    }

    /// Forget any memoized outcome for `path`, then load it again. Used when
    /// the user explicitly picks a file.
    pub fn reload_from(&mut self, path: &Path, cache: &DatasetCache) {
        cache.forget(path, &self.encoding);
        self.load_from(path, cache);
    }

    /// Ingest a loaded dataset, reset the artist selection and colours.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        if dataset.is_empty() {
            log::warn!("{} has a header but no rows", self.data_path.display());
        }
        self.color_map = Some(ColorMap::new(&dataset.artists));
        self.selected_artists.clear();
        self.artist_query.clear();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `subset` after a control change.
    pub fn refilter(&mut self) {
        self.subset = self
            .dataset
            .as_ref()
            .map(|ds| select(ds, self.top_n, &self.selected_artists));
    }

    pub fn set_top_n(&mut self, n: usize) {
        self.top_n = self.top_n_range.clamp(n);
        self.refilter();
    }

    /// Toggle one artist in the multi-select.
    pub fn toggle_artist(&mut self, artist: &str) {
        if !self.selected_artists.remove(artist) {
            self.selected_artists.insert(artist.to_string());
        }
        self.refilter();
    }

    pub fn clear_artists(&mut self) {
        self.selected_artists.clear();
        self.refilter();
    }

    /// Artists of the loaded dataset matching the search box, case-insensitively.
    pub fn artist_options(&self) -> Vec<&str> {
        let query = self.artist_query.trim().to_lowercase();
        self.dataset
            .as_deref()
            .map(|ds| {
                ds.artists
                    .iter()
                    .map(String::as_str)
                    .filter(|a| query.is_empty() || a.to_lowercase().contains(&query))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn error_message(err: &LoadError) -> String {
    match err {
        LoadError::FileNotFound(path) => format!(
            "ERROR: CSV file not found! Make sure '{}' exists or open another file (File → Open…).",
            path.display()
        ),
        other => format!("Error: {other}"),
    }
}
