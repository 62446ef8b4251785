use std::sync::Arc;

use serde::Deserialize;

use crate::config::Config;
use crate::error::{FetchError, LookupError};
use crate::provider::{OpenWeatherProvider, WeatherProvider};
use crate::weather_type::weather_emoji;

const KELVIN_OFFSET: f64 = 273.15;
const SUCCESS_CODE: f64 = 200.0;

// API response structs
#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub struct Condition {
    pub id: i64,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub main: MainReadings,
    pub weather: Vec<Condition>,
}

/// Display-ready weather for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub temperature_c: i64,
    pub condition_id: i64,
    pub description: String,
    pub emoji: &'static str,
}

impl WeatherReport {
    pub fn from_response(response: &CurrentWeatherResponse) -> Result<Self, LookupError> {
        let condition = response
            .weather
            .first()
            .ok_or_else(|| LookupError::Unexpected("weather list is empty".to_string()))?;

        Ok(Self {
            temperature_c: kelvin_to_celsius(response.main.temp),
            condition_id: condition.id,
            description: capitalize(&condition.description),
            emoji: weather_emoji(condition.id),
        })
    }

    pub fn temperature_label(&self) -> String {
        format!("{}°C", self.temperature_c)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorState {
    pub message: String,
}

/// Result of one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Weather(WeatherReport),
    Error(ErrorState),
    /// HTTP 200 whose embedded `cod` is not 200. The display is left untouched.
    Ignored,
}

/// Truncates toward zero, so anything in (-1, 0) becomes 0.
pub fn kelvin_to_celsius(kelvin: f64) -> i64 {
    (kelvin - KELVIN_OFFSET) as i64
}

/// Trims the input and title-cases every run of cased characters.
///
/// Uncased characters (digits, punctuation, CJK) start a new word.
pub fn normalize_city(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_is_cased = false;
    for c in input.trim().chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if !cased {
            out.push(c);
        } else if previous_is_cased {
            out.extend(c.to_lowercase());
        } else {
            push_title_case(&mut out, c);
        }
        previous_is_cased = cased;
    }
    out
}

/// Only the first character of a multi-character upper-case mapping stays
/// upper case, so `ß` becomes `Ss`.
fn push_title_case(out: &mut String, c: char) {
    let mut upper = c.to_uppercase();
    if let Some(first) = upper.next() {
        out.push(first);
        out.extend(upper.flat_map(char::to_lowercase));
    }
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Turns a city name into a [`LookupOutcome`] using a [`WeatherProvider`].
#[derive(Clone)]
pub struct WeatherLookup {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherLookup {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let provider = OpenWeatherProvider::new(config)?;
        Ok(Self::with_provider(Arc::new(provider)))
    }

    pub fn with_provider(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Never fails: every error is converted into [`LookupOutcome::Error`].
    pub async fn fetch(&self, city_name: &str) -> LookupOutcome {
        let city = normalize_city(city_name);
        tracing::info!("Fetching weather for {:?}", city);

        match self.lookup(&city).await {
            Ok(Some(report)) => {
                tracing::debug!("Weather for {:?}: {:?}", city, report);
                LookupOutcome::Weather(report)
            }
            Ok(None) => LookupOutcome::Ignored,
            Err(e) => {
                tracing::warn!("Weather lookup for {:?} failed: {}", city, e);
                LookupOutcome::Error(ErrorState {
                    message: e.user_message(),
                })
            }
        }
    }

    async fn lookup(&self, city: &str) -> Result<Option<WeatherReport>, LookupError> {
        let data = self.provider.fetch(city).await?;

        let code = data
            .get("cod")
            .ok_or_else(|| LookupError::Unexpected("missing field `cod`".to_string()))?;
        // Any JSON number equal to 200 counts, `200.0` included.
        if code.as_f64() != Some(SUCCESS_CODE) {
            // Kept as a silent no-op for compatibility; only the log shows it.
            tracing::warn!("Ignoring response for {:?} with embedded status {}", city, code);
            return Ok(None);
        }

        let response: CurrentWeatherResponse = serde_json::from_value(data)?;
        WeatherReport::from_response(&response).map(Some)
    }
}
