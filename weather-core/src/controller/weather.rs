use std::sync::Arc;

use crate::{FetchError, UiState, WeatherResult, provider::WeatherSource};

/// A weather fetch the controller has started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherTicket {
    seq: u64,
    city: String,
}

impl WeatherTicket {
    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Result of a fetch, to be handed back to [`WeatherController::finish`].
#[derive(Debug)]
pub struct WeatherOutcome {
    seq: u64,
    city: String,
    result: Result<WeatherResult, FetchError>,
}

/// Owns the loading/error/weather state.
#[derive(Debug, Clone)]
pub struct WeatherController {
    source: Arc<dyn WeatherSource>,
    state: UiState,
    issued: u64,
}

impl WeatherController {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self {
            source,
            state: UiState::default(),
            issued: 0,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn weather(&self) -> Option<&WeatherResult> {
        self.state.weather.as_ref()
    }

    pub fn source(&self) -> Arc<dyn WeatherSource> {
        Arc::clone(&self.source)
    }

    /// Marks the view as loading and hands out the request to perform.
    ///
    /// Previous error/weather stay in place until the fetch resolves.
    pub fn begin(&mut self, city: impl Into<String>) -> WeatherTicket {
        self.issued += 1;
        self.state.loading = true;

        WeatherTicket {
            seq: self.issued,
            city: city.into(),
        }
    }

    pub async fn fetch(source: &dyn WeatherSource, ticket: WeatherTicket) -> WeatherOutcome {
        let result = source.weather(&ticket.city).await;
        WeatherOutcome {
            seq: ticket.seq,
            city: ticket.city,
            result,
        }
    }

    /// Stores the outcome of the latest fetch and clears `loading`.
    /// Outcomes of superseded fetches are dropped and `false` is returned.
    pub fn finish(&mut self, outcome: WeatherOutcome) -> bool {
        if outcome.seq != self.issued {
            tracing::debug!(
                city = %outcome.city,
                seq = outcome.seq,
                latest = self.issued,
                "dropping stale weather response"
            );
            return false;
        }

        match outcome.result {
            Ok(weather) => {
                self.state.weather = Some(weather);
                self.state.error = None;
            }
            Err(err) => {
                tracing::warn!(city = %outcome.city, error = %err, "weather fetch failed");
                self.state.weather = None;
                self.state.error = Some(err.user_message());
            }
        }
        self.state.loading = false;
        true
    }

    /// Fetches weather for `city` and applies the result.
    pub async fn load(&mut self, city: impl Into<String>) {
        let ticket = self.begin(city);
        let source = self.source();
        let outcome = Self::fetch(source.as_ref(), ticket).await;
        self.finish(outcome);
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    pub enum Reply {
        Weather(WeatherResult),
        ApiError(String),
        Unreachable,
    }

    /// Weather source answering with a fixed reply and recording requested cities.
    #[derive(Debug)]
    pub struct FakeWeatherSource {
        pub reply: Reply,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeWeatherSource {
        pub fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("calls lock").clone()
        }
    }

    #[async_trait]
    impl WeatherSource for FakeWeatherSource {
        async fn weather(&self, city: &str) -> Result<WeatherResult, FetchError> {
            self.calls.lock().expect("calls lock").push(city.to_string());
            match &self.reply {
                Reply::Weather(w) => Ok(w.clone()),
                Reply::ApiError(message) => Err(FetchError::Api {
                    status: StatusCode::NOT_FOUND,
                    message: message.clone(),
                }),
                Reply::Unreachable => Err(FetchError::Status {
                    status: StatusCode::BAD_GATEWAY,
                    body: String::new(),
                }),
            }
        }
    }
}
