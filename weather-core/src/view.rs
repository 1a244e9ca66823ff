use std::sync::Arc;

use crate::{
    Suggestion, UiState,
    controller::{SuggestionController, WeatherController, WeatherTicket},
    provider::{Geocoder, WeatherSource},
    render::{self, DisplayState},
};

/// The weather widget: city input with suggestions plus the forecast panel.
#[derive(Debug, Clone)]
pub struct WeatherView {
    input: SuggestionController,
    forecast: WeatherController,
}

impl WeatherView {
    pub fn new(geocoder: Arc<dyn Geocoder>, source: Arc<dyn WeatherSource>) -> Self {
        Self {
            input: SuggestionController::new(geocoder),
            forecast: WeatherController::new(source),
        }
    }

    pub fn query(&self) -> &str {
        self.input.query()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        self.input.suggestions()
    }

    pub fn state(&self) -> &UiState {
        self.forecast.state()
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState::of(self.forecast.state())
    }

    pub fn input(&self) -> &SuggestionController {
        &self.input
    }

    pub fn forecast_mut(&mut self) -> &mut WeatherController {
        &mut self.forecast
    }

    /// The user edited the input.
    pub async fn type_query(&mut self, query: impl Into<String>) {
        self.input.update_query(query).await;
    }

    /// The user picked the suggestion at `index`: the input takes its name and
    /// the forecast for it is fetched. Returns `false` if there is no such row.
    pub async fn select_suggestion(&mut self, index: usize) -> bool {
        match self.input.select(index) {
            Some(city) => {
                self.forecast.load(city).await;
                true
            }
            None => false,
        }
    }

    /// Fetches the forecast for whatever is currently typed.
    pub async fn submit(&mut self) {
        let city = self.input.query().to_string();
        self.forecast.load(city).await;
    }

    /// Resolves the text the prompt returned and starts the forecast fetch.
    ///
    /// A dropdown label selects that suggestion; any other text is fetched as
    /// typed. Blank answers start nothing. Perform the returned ticket with
    /// [`WeatherController::fetch`] and hand the outcome to
    /// [`WeatherController::finish`] via [`Self::forecast_mut`].
    pub fn begin_answer(&mut self, answer: &str) -> Option<WeatherTicket> {
        if answer.trim().is_empty() {
            return None;
        }

        let city = match self.input.position_of_label(answer) {
            Some(index) => self.input.select(index)?,
            None => {
                self.input.commit_query(answer);
                answer.to_string()
            }
        };

        Some(self.forecast.begin(city))
    }

    pub fn render(&self) -> String {
        render::render(self.query(), self.suggestions(), self.state())
    }
}
