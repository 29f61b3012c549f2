#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::sync::Arc;

use app::CropApp;
use config::Config;
use eframe::egui;
use flexi_logger::{Logger, WriteMode};
use log::{info, warn};
use string_log::{ArcStringLog, StringLog};

mod app;
mod config;
mod dirs;
mod modal;
mod model;
mod session;
mod source_image;
mod string_log;
mod theme;
mod utils;
mod widget;

fn main() -> anyhow::Result<()> {
    let log: Arc<StringLog> = Arc::new(StringLog::new());

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };

    let _logger = Logger::try_with_env_or_str(&config.log_spec)?
        .log_to_writer(Box::new(ArcStringLog::new(Arc::clone(&log))))
        .write_mode(WriteMode::Direct)
        .start()?;

    if let Some(err) = config_error {
        warn!("Ignoring invalid config, using defaults: {}", err);
    }
    info!("Starting with {:?}", config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Crop Prep")
            .with_inner_size([1280.0, 960.0])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let app_log = Arc::clone(&log);
    eframe::run_native(
        "Crop Prep",
        options,
        Box::new(|_cc| Ok(Box::new(CropApp::new(config, app_log)))),
    )
    .map_err(|e| anyhow::anyhow!("Error running native app: {}", e))
}
