//! Desktop weather lookup: type a city, get the current temperature, an
//! emoji for the condition and a short description.

pub mod app;
pub mod config;
pub mod error;
pub mod provider;
pub mod weather;
pub mod weather_type;

use std::path::Path;

use app::WeatherApp;
use config::{load_env_file, Config};
use error::AppError;
use weather::WeatherLookup;

const WINDOW_TITLE: &str = "Weather App";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

fn load_icon(path: &Path) -> Option<eframe::IconData> {
    match image::open(path) {
        Ok(img) => {
            let rgba = img.into_rgba8();
            let (width, height) = rgba.dimensions();
            Some(eframe::IconData {
                rgba: rgba.into_raw(),
                width,
                height,
            })
        }
        Err(e) => {
            tracing::debug!("No window icon loaded from {}: {}", path.display(), e);
            None
        }
    }
}

pub fn run() -> Result<(), AppError> {
    init_tracing();
    load_env_file();
    let config = Config::from_env();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let lookup = WeatherLookup::new(&config)?;
    let app = WeatherApp::new(lookup, runtime.handle().clone());

    let native_options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(800.0, 800.0)),
        initial_window_pos: Some(egui::pos2(1100.0, 500.0)),
        icon_data: load_icon(&config.icon_path),
        ..Default::default()
    };

    tracing::info!("Starting egui application");
    eframe::run_native(WINDOW_TITLE, native_options, Box::new(|_cc| Box::new(app)))
        .map_err(|e| AppError::Gui(e.to_string()))
}
