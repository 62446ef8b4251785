use async_trait::async_trait;
use reqwest::Client;

use crate::config::Config;
use crate::error::FetchError;

/// Source of raw "current weather by city name" payloads.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches the JSON body for an already normalized city name.
    ///
    /// Non-success HTTP statuses come back as [`FetchError::Status`].
    async fn fetch(&self, city: &str) -> Result<serde_json::Value, FetchError>;
}

/// OpenWeatherMap client. Temperatures are returned in Kelvin.
#[derive(Clone)]
pub struct OpenWeatherProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherProvider {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, city: &str) -> Result<serde_json::Value, FetchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body = response.json::<serde_json::Value>().await?;
        Ok(body)
    }
}
