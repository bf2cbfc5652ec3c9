//! LearnScape - desktop browser for a study-material catalog
//!
//! Search and filter documents, preview PDFs, browse materials by semester.

mod action;
mod app;
mod core;
mod session;
mod ui;

use app::LearnscapeApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting LearnScape...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("LearnScape"),
        ..Default::default()
    };

    eframe::run_native(
        "LearnScape",
        native_options,
        Box::new(|cc| Ok(Box::new(LearnscapeApp::new(cc)?))),
    )
}
