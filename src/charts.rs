use crate::data::filter::Subset;

/// Largest scatter marker radius, in points.
pub const MAX_MARKER_RADIUS: f32 = 20.0;
/// Smallest scatter marker radius so tiny values stay visible.
pub const MIN_MARKER_RADIUS: f32 = 2.0;

// ---------------------------------------------------------------------------
// Series grouping
// ---------------------------------------------------------------------------

/// All points of one artist; one legend entry and one colour per series.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistSeries<T> {
    pub artist: String,
    pub points: Vec<T>,
}

/// Group items by artist, series ordered by first appearance.
fn group_by_artist<T>(items: impl IntoIterator<Item = (String, T)>) -> Vec<ArtistSeries<T>> {
    let mut series: Vec<ArtistSeries<T>> = Vec::new();
    for (artist, point) in items {
        match series.iter_mut().find(|s| s.artist == artist) {
            Some(s) => s.points.push(point),
            None => series.push(ArtistSeries { artist, points: vec![point] }),
        }
    }
    series
}

// ---------------------------------------------------------------------------
// Bar chart: Track × Spotify Streams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    /// Category slot on the x axis (position within the subset).
    pub slot: usize,
    pub track: String,
    pub streams: f64,
}

/// One x-axis category label per subset row, including rows without streams.
pub fn track_labels(subset: &Subset) -> Vec<String> {
    let ds = subset.dataset();
    subset.indices().iter().map(|&i| ds.track(i).to_string()).collect()
}

/// Axis label for the category tick at `value`; blank between slots.
pub fn category_label(labels: &[String], value: f64) -> String {
    let slot = value.round();
    if slot < 0.0 || (value - slot).abs() > 1e-6 {
        return String::new();
    }
    labels.get(slot as usize).cloned().unwrap_or_default()
}

/// Bars grouped by artist. Rows with absent streams keep their slot but get
/// no bar.
pub fn bar_series(subset: &Subset) -> Vec<ArtistSeries<BarDatum>> {
    let ds = subset.dataset();
    group_by_artist(subset.indices().iter().enumerate().filter_map(|(slot, &i)| {
        let streams = ds.spotify_streams(i)?;
        let bar = BarDatum { slot, track: ds.track(i).to_string(), streams };
        Some((ds.artist(i).to_string(), bar))
    }))
}

// ---------------------------------------------------------------------------
// Scatter chart: TikTok Views (log) × Spotify Streams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterDatum {
    pub track: String,
    pub tiktok_views: f64,
    pub streams: f64,
    pub radius: f32,
}

impl ScatterDatum {
    /// Plot coordinates: x is `log10(tiktok_views)`.
    pub fn position(&self) -> [f64; 2] {
        [self.tiktok_views.log10(), self.streams]
    }
}

/// Marker radius for `streams`: marker area grows linearly with the value.
pub fn marker_radius(streams: f64, max_streams: f64) -> f32 {
    if max_streams <= 0.0 || streams <= 0.0 {
        return MIN_MARKER_RADIUS;
    }
    let scaled = (streams / max_streams).sqrt() as f32 * MAX_MARKER_RADIUS;
    scaled.clamp(MIN_MARKER_RADIUS, MAX_MARKER_RADIUS)
}

/// Scatter points grouped by artist.
///
/// Rows missing either value, or with non-positive TikTok views (no place on
/// a log axis), are left out.
pub fn scatter_series(subset: &Subset) -> Vec<ArtistSeries<ScatterDatum>> {
    let ds = subset.dataset();
    let plotted: Vec<(usize, f64, f64)> = subset
        .indices()
        .iter()
        .filter_map(|&i| {
            let views = ds.tiktok_views(i).filter(|v| *v > 0.0)?;
            Some((i, views, ds.spotify_streams(i)?))
        })
        .collect();

    let max_streams = plotted.iter().map(|&(_, _, s)| s).fold(0.0_f64, f64::max);

    group_by_artist(plotted.into_iter().map(|(i, tiktok_views, streams)| {
        let datum = ScatterDatum {
            track: ds.track(i).to_string(),
            tiktok_views,
            streams,
            radius: marker_radius(streams, max_streams),
        };
        (ds.artist(i).to_string(), datum)
    }))
}

/// Track of the scatter point drawn at `pos` (plot coordinates), if any.
pub fn track_at<'a>(series: &'a [ArtistSeries<ScatterDatum>], pos: [f64; 2]) -> Option<&'a str> {
    let close = |a: f64, b: f64| (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0);
    series
        .iter()
        .flat_map(|s| s.points.iter())
        .find(|p| {
            let [x, y] = p.position();
            close(x, pos[0]) && close(y, pos[1])
        })
        .map(|p| p.track.as_str())
}

/// Axis tick label for a log10 coordinate, e.g. `6.0` → `1M`.
pub fn log_tick_label(exponent: f64) -> String {
    let rounded = exponent.round();
    if (exponent - rounded).abs() < 1e-9 {
        format_count(10f64.powi(rounded as i32))
    } else {
        format_count(10f64.powf(exponent))
    }
}

/// Compact count label: `1.2B`, `350M`, `12k`.
pub fn format_count(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "k")
    } else {
        (value, "")
    };
    let text = format!("{scaled:.1}");
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{text}{suffix}")
}
