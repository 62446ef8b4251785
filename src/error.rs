//! Error types for the weather lookup and the application shell.
//!
//! Every lookup failure ends up as a display string via
//! [`LookupError::user_message`]; nothing here is meant to reach `main`
//! except [`AppError`].

use thiserror::Error;

/// Failures produced by a [`WeatherProvider`](crate::provider::WeatherProvider).
///
/// The payloads keep the raw transport error text, which is shown to the user
/// for the categories without a fixed message.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Connect(String),

    #[error("{0}")]
    Timeout(String),

    #[error("{0}")]
    Redirect(String),

    #[error("{0}")]
    Request(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the API key.
        let e = e.without_url();
        let message = e.to_string();
        if let Some(status) = e.status() {
            FetchError::Status {
                status: status.as_u16(),
                message,
            }
        } else if e.is_connect() {
            FetchError::Connect(message)
        } else if e.is_timeout() {
            FetchError::Timeout(message)
        } else if e.is_redirect() {
            FetchError::Redirect(message)
        } else {
            FetchError::Request(message)
        }
    }
}

/// Everything that can stop a lookup from producing a weather report.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Unexpected(String),
}

impl LookupError {
    /// Returns the message shown in place of the temperature.
    pub fn user_message(&self) -> String {
        match self {
            LookupError::Fetch(FetchError::Status { status, message }) => {
                status_message(*status, message)
            }
            LookupError::Fetch(FetchError::Connect(_)) => {
                "Connection Error\nCheck your internet connection".to_string()
            }
            LookupError::Fetch(FetchError::Timeout(_)) => {
                "Timeout Error:\nThe request timed out".to_string()
            }
            LookupError::Fetch(FetchError::Redirect(_)) => {
                "Too many redirects\nCheck the URL".to_string()
            }
            LookupError::Fetch(FetchError::Request(raw)) => format!("Requests Error\n{raw}"),
            LookupError::Unexpected(raw) => format!("An unexpected error occurred:\n{raw}"),
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(e: serde_json::Error) -> Self {
        LookupError::Unexpected(e.to_string())
    }
}

/// Maps a non-success HTTP status to its user-facing message.
///
/// `raw` is only used for statuses without a fixed message.
pub fn status_message(status: u16, raw: &str) -> String {
    let fixed = match status {
        400 => "Bad request\nPlease check your input",
        401 => "Unauthorized\nInvalid API key",
        403 => "Forbidden\nAccess is denied",
        404 => "Not Found\nCity not found",
        500 => "Internal Server Error\nPlease try again later",
        502 => "Bad Gateway\nInvalid response from server",
        503 => "Service Unavailable\nServer is down",
        504 => "Gateway Timeout\nNo response from the server",
        _ => return format!("HTTP error occurred\n{raw}"),
    };
    fixed.to_string()
}

/// Startup failures that end the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] FetchError),

    #[error("Error running egui: {0}")]
    Gui(String),
}
