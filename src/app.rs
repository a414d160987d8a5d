use eframe::egui::{self, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::data::cache::DatasetCache;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StreamScopeApp {
    pub state: AppState,
}

impl StreamScopeApp {
    /// Build the app and load the configured file through the shared cache.
    pub fn new(config: &DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        let path = state.data_path.clone();
        state.load_from(&path, DatasetCache::global());
        Self { state }
    }
}

impl eframe::App for StreamScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

const DASHBOARD_HEADING: &str = "Music Streaming Trends: Team Demo";

fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.heading(DASHBOARD_HEADING);

    let Some(subset) = &state.subset else {
        if state.status_message.is_none() {
            ui.label("Open a file to view streaming data  (File → Open…)");
        }
        return;
    };
    let color_map = state.color_map.as_ref();

    ui.add_space(8.0);
    ui.strong(format!("Insights for {} Tracks", subset.len()));
    if subset.is_empty() {
        ui.label("No tracks match the current selection.");
        return;
    }
    ui.label("Spotify Success");
    plot::streams_bar_chart(ui, subset, color_map);

    ui.add_space(8.0);
    ui.strong("TikTok Virality vs. Spotify Streams");
    plot::virality_scatter(ui, subset, color_map);

    ui.add_space(8.0);
    table::raw_table(ui, subset);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_keeps_the_demo_title() {
        assert_eq!(DASHBOARD_HEADING, "Music Streaming Trends: Team Demo");
    }
}
