use eframe::egui::{Color32, Ui};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, Legend, MarkerShape, Plot, Points};

use crate::charts::{self, format_count};
use crate::color::ColorMap;
use crate::data::filter::Subset;

const CHART_HEIGHT: f32 = 360.0;

fn series_color(color_map: Option<&ColorMap>, artist: &str) -> Color32 {
    color_map
        .map(|cm| cm.color_for(artist))
        .unwrap_or(Color32::LIGHT_BLUE)
}

// ---------------------------------------------------------------------------
// Bar chart: Spotify streams per track
// ---------------------------------------------------------------------------

/// Render the "Spotify Success" bar chart, one bar chart per artist so the
/// legend groups by artist.
pub fn streams_bar_chart(ui: &mut Ui, subset: &Subset, color_map: Option<&ColorMap>) {
    let labels = charts::track_labels(subset);
    let series = charts::bar_series(subset);

    Plot::new("streams_bar")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Track")
        .y_axis_label("Spotify Streams")
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark, _range| charts::category_label(&labels, mark.value))
        .y_axis_formatter(|mark, _range| format_count(mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for s in &series {
                let color = series_color(color_map, &s.artist);
                let bars: Vec<Bar> = s
                    .points
                    .iter()
                    .map(|b| {
                        Bar::new(b.slot as f64, b.streams)
                            .name(&b.track)
                            .width(0.8)
                            .fill(color)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&s.artist).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart: TikTok views (log x) vs Spotify streams
// ---------------------------------------------------------------------------

/// Render the TikTok-vs-Spotify scatter. Marker size follows streams and
/// hovering a marker shows its track.
pub fn virality_scatter(ui: &mut Ui, subset: &Subset, color_map: Option<&ColorMap>) {
    let series = charts::scatter_series(subset);
    let hover = series.clone();

    Plot::new("tiktok_scatter")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("TikTok Views (log scale)")
        .y_axis_label("Spotify Streams")
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(|mark, _range| charts::log_tick_label(mark.value))
        .y_axis_formatter(|mark, _range| format_count(mark.value))
        .label_formatter(move |name, value| match charts::track_at(&hover, [value.x, value.y]) {
            Some(track) => format!(
                "{track}\n{name}\nTikTok Views: {}\nSpotify Streams: {}",
                charts::log_tick_label(value.x),
                format_count(value.y)
            ),
            None => String::new(),
        })
        .show(ui, |plot_ui| {
            for s in &series {
                let color = series_color(color_map, &s.artist);
                for p in &s.points {
                    plot_ui.points(
                        Points::new(vec![p.position()])
                            .name(&s.artist)
                            .color(color)
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(p.radius),
                    );
                }
            }
        });
}
