mod app;
mod charts;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::anyhow;
use app::StreamScopeApp;
use clap::Parser;
use config::{Cli, DashboardConfig};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = DashboardConfig::resolve(&cli)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Music Data Demo",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_theme(if config.dark_mode {
                egui::Theme::Dark
            } else {
                egui::Theme::Light
            });
            Ok(Box::new(StreamScopeApp::new(&config)))
        }),
    )
    .map_err(|e| anyhow!("running dashboard: {e}"))
}
