use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::{FetchError, truncate_body},
    model::WeatherResult,
};

use super::WeatherSource;

/// Client for the weather backend's `GET /api/weather?city=...` endpoint.
#[derive(Debug, Clone)]
pub struct BackendProvider {
    base_url: String,
    http: Client,
}

/// Failure payload the backend sends with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl BackendProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/weather", self.base_url)
    }
}

#[async_trait]
impl WeatherSource for BackendProvider {
    #[instrument(skip(self), level = "debug")]
    async fn weather(&self, city: &str) -> Result<WeatherResult, FetchError> {
        let res = self
            .http
            .get(self.endpoint())
            .query(&[("city", city)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorBody>(&body) {
                Ok(payload) => FetchError::Api {
                    status,
                    message: payload.error,
                },
                Err(_) => FetchError::Status {
                    status,
                    body: truncate_body(&body),
                },
            });
        }

        let parsed: WeatherResult = serde_json::from_str(&body)?;
        parsed.validate().map_err(FetchError::Malformed)?;

        tracing::debug!(
            hours = parsed.hourly.time.len(),
            days = parsed.daily.time.len(),
            "weather backend returned forecast"
        );
        Ok(parsed)
    }
}
