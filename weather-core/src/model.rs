use serde::{Deserialize, Serialize};

/// A place offered by the geocoder while the user is typing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub country: String,
    pub id: u64,
}

impl Suggestion {
    /// Dropdown label, e.g. "Paris, France".
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.country)
    }
}

/// Forecast returned by the weather backend.
///
/// Only the blocks the view renders are modelled; any extra fields the
/// backend passes through (coordinates, units, timezone) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub current: CurrentWeather,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature_2m: f64,
    pub weathercode: i32,
}

/// Index-aligned hourly columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
    pub weathercode: Vec<i32>,
}

/// Index-aligned daily columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub weathercode: Vec<i32>,
}

impl WeatherResult {
    /// Checks that every parallel column has the same length as its `time` column.
    pub fn validate(&self) -> Result<(), String> {
        let hours = self.hourly.time.len();
        if self.hourly.temperature_2m.len() != hours || self.hourly.weathercode.len() != hours {
            return Err(format!(
                "hourly columns disagree in length: time={}, temperature_2m={}, weathercode={}",
                hours,
                self.hourly.temperature_2m.len(),
                self.hourly.weathercode.len(),
            ));
        }

        let days = self.daily.time.len();
        if self.daily.temperature_2m_max.len() != days
            || self.daily.temperature_2m_min.len() != days
            || self.daily.weathercode.len() != days
        {
            return Err(format!(
                "daily columns disagree in length: time={}, temperature_2m_max={}, \
                 temperature_2m_min={}, weathercode={}",
                days,
                self.daily.temperature_2m_max.len(),
                self.daily.temperature_2m_min.len(),
                self.daily.weathercode.len(),
            ));
        }

        Ok(())
    }
}

/// Snapshot of the fetch controller's state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    pub loading: bool,
    pub error: Option<String>,
    pub weather: Option<WeatherResult>,
}
