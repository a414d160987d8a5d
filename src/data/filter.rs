use std::collections::BTreeSet;
use std::sync::Arc;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Selection: which rows the user asked for
// ---------------------------------------------------------------------------

/// The two mutually exclusive filter modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// First `n` rows in file order.
    TopN(usize),
    /// Every row whose `Artist` is in the set, in file order.
    Artists(BTreeSet<String>),
}

impl Selection {
    /// Combine the raw control values. A non-empty artist set always wins
    /// over the top-N cutoff.
    pub fn from_controls(top_n: usize, artists: &BTreeSet<String>) -> Self {
        if artists.is_empty() {
            Selection::TopN(top_n)
        } else {
            Selection::Artists(artists.clone())
        }
    }
}

/// Return indices of rows matching `selection`, in dataset order.
pub fn filtered_indices(dataset: &Dataset, selection: &Selection) -> Vec<usize> {
    match selection {
        Selection::TopN(n) => (0..dataset.len().min(*n)).collect(),
        Selection::Artists(artists) => (0..dataset.len())
            .filter(|&i| artists.contains(dataset.artist(i)))
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Subset – the rows shown for one render
// ---------------------------------------------------------------------------

/// A row-filtered view over a shared dataset.
#[derive(Debug, Clone)]
pub struct Subset {
    dataset: Arc<Dataset>,
    indices: Vec<usize>,
}

impl Subset {
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Dataset row indices in display order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Select the rows to present for the given control values.
pub fn select(dataset: &Arc<Dataset>, top_n: usize, artists: &BTreeSet<String>) -> Subset {
    let selection = Selection::from_controls(top_n, artists);
    let indices = filtered_indices(dataset, &selection);
    log::debug!("{selection:?} matched {} rows", indices.len());
    Subset { dataset: Arc::clone(dataset), indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;
    use crate::data::schema::Schema;
    use pretty_assertions::assert_eq;

    fn dataset(rows: &[(&str, u64)]) -> Arc<Dataset> {
        let mut text = String::from("Track,Artist,Spotify Streams\n");
        for (i, (artist, streams)) in rows.iter().enumerate() {
            text.push_str(&format!("t{i},{artist},{streams}\n"));
        }
        Arc::new(parse_csv(&text, &Schema::streaming()).expect("parse"))
    }

    fn pairs(subset: &Subset) -> Vec<(String, f64)> {
        let ds = subset.dataset();
        subset
            .indices()
            .iter()
            .map(|&i| (ds.artist(i).to_string(), ds.spotify_streams(i).unwrap_or(f64::NAN)))
            .collect()
    }

    fn artists(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn artist_set_overrides_top_n() {
        let ds = dataset(&[("A", 1), ("B", 2), ("A", 3)]);
        for top_n in [0, 1, 2, 5, 20] {
            let subset = select(&ds, top_n, &artists(&["A"]));
            assert_eq!(pairs(&subset), vec![("A".to_string(), 1.0), ("A".to_string(), 3.0)]);
        }
    }

    #[test]
    fn empty_artist_set_takes_first_n_rows() {
        let ds = dataset(&[("A", 1), ("B", 2), ("C", 3)]);
        let subset = select(&ds, 2, &BTreeSet::new());
        assert_eq!(pairs(&subset), vec![("A".to_string(), 1.0), ("B".to_string(), 2.0)]);
    }

    #[test]
    fn top_n_larger_than_dataset_returns_everything() {
        let ds = dataset(&[("A", 1), ("B", 2)]);
        assert_eq!(select(&ds, 10, &BTreeSet::new()).indices(), &[0, 1]);
    }

    #[test]
    fn artist_match_is_exact() {
        let ds = dataset(&[("Drake", 1), ("drake", 2), ("Drake ", 3)]);
        assert_eq!(select(&ds, 10, &artists(&["Drake"])).indices(), &[0]);
    }

    #[test]
    fn unknown_artist_yields_empty_subset() {
        let ds = dataset(&[("A", 1)]);
        let subset = select(&ds, 10, &artists(&["Nobody"]));
        assert!(subset.is_empty());
    }

    #[test]
    fn multiple_artists_preserve_dataset_order() {
        let ds = dataset(&[("C", 1), ("A", 2), ("B", 3), ("C", 4)]);
        assert_eq!(select(&ds, 1, &artists(&["A", "C"])).indices(), &[0, 1, 3]);
    }

    #[test]
    fn selection_modes_are_exclusive() {
        assert_eq!(Selection::from_controls(7, &BTreeSet::new()), Selection::TopN(7));
        assert_eq!(
            Selection::from_controls(7, &artists(&["A"])),
            Selection::Artists(artists(&["A"]))
        );
    }

    #[test]
    fn absent_artists_never_match() {
        let ds = dataset(&[("A", 1), ("N/A", 2), ("", 3)]);
        assert_eq!(ds.artists, ["A"]);
        assert_eq!(select(&ds, 10, &artists(&["N/A"])).indices(), &[] as &[usize]);
        assert!(!ds.is_empty());
    }

    #[test]
    fn subset_shares_the_dataset() {
        let ds = dataset(&[("A", 1), ("B", 2), ("A", 3)]);
        let subset = select(&ds, 10, &artists(&["A"]));
        assert_eq!(subset.len(), 2);
        assert!(std::ptr::eq(subset.dataset(), ds.as_ref()));
    }
}
