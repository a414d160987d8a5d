use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::cache::DatasetCache;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter the Data");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Top-N slider ----
    let range = state.top_n_range;
    let mut top_n = state.top_n;
    let slider = ui.add(egui::Slider::new(&mut top_n, range.min..=range.max).text("Show Top Songs"));
    if slider.changed() {
        state.set_top_n(top_n);
    }
    if !state.selected_artists.is_empty() {
        ui.label(RichText::new("Ignored while artists are selected").weak().small());
    }
    ui.separator();

    // ---- Artist multi-select ----
    ui.strong("Select Specific Artists");
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{} selected", state.selected_artists.len()));
        let has_selection = !state.selected_artists.is_empty();
        if ui.add_enabled(has_selection, egui::Button::new("Clear").small()).clicked() {
            state.clear_artists();
        }
    });
    ui.add(egui::TextEdit::singleline(&mut state.artist_query).hint_text("Search artists…"));

    let options: Vec<String> = state.artist_options().into_iter().map(str::to_string).collect();
    let mut toggled: Option<String> = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for artist in &options {
                let mut checked = state.selected_artists.contains(artist);
                let mut text = RichText::new(artist);
                if let Some(cm) = &state.color_map {
                    text = text.color(cm.color_for(artist));
                }
                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some(artist.clone());
                }
            }
        });

    if let Some(artist) = toggled {
        state.toggle_artist(&artist);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(subset)) = (&state.dataset, &state.subset) {
            ui.label(format!(
                "{}: {} tracks loaded, {} shown",
                state.data_path.display(),
                ds.len(),
                subset.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open streaming statistics")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.reload_from(&path, DatasetCache::global());
    }
}
