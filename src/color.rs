use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Artist palette
// ---------------------------------------------------------------------------

/// Hue step between consecutive artists. Successive colours stay far apart
/// however many artists the file has.
const GOLDEN_ANGLE_DEG: f32 = 137.507_77;

/// Lightness alternates so neighbouring hues also differ in brightness.
const LIGHTNESS: [f32; 2] = [0.58, 0.44];

/// The `i`-th artist colour: golden-angle hue, alternating lightness.
fn artist_color(i: usize) -> Color32 {
    let hue = (i as f32 * GOLDEN_ANGLE_DEG) % 360.0;
    let hsl = Hsl::new(hue, 0.7, LIGHTNESS[i % LIGHTNESS.len()]);
    let rgb: Srgb = hsl.into_color();
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// `n` artist colours. The first `k` never change when `n` grows.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n).map(artist_color).collect()
}

// ---------------------------------------------------------------------------
// Color mapping: artist → Color32
// ---------------------------------------------------------------------------

/// Assigns each artist of the dataset a fixed colour, so an artist keeps
/// its colour whatever the current filter shows.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map over `artists`, in the order given.
    pub fn new(artists: &[String]) -> Self {
        let mapping = artists
            .iter()
            .cloned()
            .zip(generate_palette(artists.len()))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given artist.
    pub fn color_for(&self, artist: &str) -> Color32 {
        self.mapping
            .get(artist)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn palette_colours_are_distinct() {
        let palette = generate_palette(6);
        assert_eq!(palette.len(), 6);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn large_artist_lists_keep_distinct_stable_colours() {
        let palette = generate_palette(40);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(generate_palette(12), palette[..12].to_vec());
    }

    #[test]
    fn unknown_artist_gets_default_colour() {
        let map = ColorMap::new(&["Drake".to_string(), "SZA".to_string()]);
        assert_ne!(map.color_for("Drake"), map.color_for("SZA"));
        assert_eq!(map.color_for("Nobody"), Color32::GRAY);
    }
}
