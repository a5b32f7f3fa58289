use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::AppError;

const BASE_URL: &str = "https://api.spacexdata.com/v5";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait LaunchDataProvider: Send + Sync {
    async fn upcoming_launches(&self, limit: u32) -> Result<Value, AppError>;
    async fn company_info(&self) -> Result<Value, AppError>;
}

#[derive(Debug, Clone)]
pub struct SpaceXClient {
    http: reqwest::Client,
    base_url: String,
}

impl SpaceXClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("reqwest client construction"),
            base_url: base_url.into(),
        }
    }

    async fn get_json(&self, url: String, query: &[(&str, String)]) -> Result<Value, AppError> {
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|err| AppError::upstream(format!("launch API request failed: {err}")))?;

        let response = response
            .error_for_status()
            .map_err(|err| AppError::upstream(format!("launch API returned an error: {err}")))?;

        response
            .json::<Value>()
            .await
            .map_err(|err| AppError::upstream(format!("launch API body was not valid JSON: {err}")))
    }
}

impl Default for SpaceXClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LaunchDataProvider for SpaceXClient {
    async fn upcoming_launches(&self, limit: u32) -> Result<Value, AppError> {
        self.get_json(
            format!("{}/launches/upcoming", self.base_url),
            &[("limit", limit.to_string())],
        )
        .await
    }

    async fn company_info(&self) -> Result<Value, AppError> {
        self.get_json(format!("{}/company", self.base_url), &[])
            .await
    }
}
