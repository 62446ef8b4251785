use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_ICON_PATH: &str = "static/weather_app_icon.png";

const API_KEY_VAR: &str = "WEATHER_API_KEY";
const API_URL_VAR: &str = "WEATHER_API_URL";
const TIMEOUT_VAR: &str = "WEATHER_TIMEOUT_SECS";
const ICON_VAR: &str = "WEATHER_APP_ICON";

/// Settings resolved once at startup and handed to the lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Left unset when missing; the provider then answers 401.
    pub api_key: Option<String>,
    pub api_url: String,
    /// `None` keeps reqwest's default of no timeout.
    pub request_timeout: Option<Duration>,
    pub icon_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
            icon_path: PathBuf::from(DEFAULT_ICON_PATH),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let request_timeout = get(TIMEOUT_VAR).and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
            _ => {
                tracing::warn!("Ignoring {}={:?}: expected a positive number of seconds", TIMEOUT_VAR, raw);
                None
            }
        });

        let config = Self {
            api_key: get(API_KEY_VAR),
            api_url: get(API_URL_VAR).unwrap_or(defaults.api_url),
            request_timeout,
            icon_path: get(ICON_VAR).map(PathBuf::from).unwrap_or(defaults.icon_path),
        };

        if config.api_key.is_none() {
            tracing::warn!("{} is not set; requests will be rejected as unauthorized", API_KEY_VAR);
        }
        config
    }
}

/// Candidate `.env` locations, in priority order.
fn env_file_candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(".env")];

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        paths.push(exe_dir.join(".env"));
    }

    if let Ok(home) = std::env::var("HOME") {
        paths.push(Path::new(&home).join(".weather_app.env"));
    }

    paths
}

/// Loads the first `.env` file found. Variables already set in the process win.
pub fn load_env_file() -> Option<PathBuf> {
    for path in env_file_candidates() {
        if !path.exists() {
            tracing::debug!("No env file at {}", path.display());
            continue;
        }
        match dotenv::from_path(&path) {
            Ok(()) => {
                tracing::info!("Loaded env file from {}", path.display());
                return Some(path);
            }
            Err(e) => tracing::warn!("Error loading env file {}: {}", path.display(), e),
        }
    }
    tracing::debug!("No env file loaded; using process environment only");
    None
}
