//! Text rendering of the weather view.
//!
//! Everything here is a pure function of the view state.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::{Suggestion, UiState, WeatherResult, codes::describe};

pub const TITLE: &str = "Weather forecast";
pub const INPUT_PLACEHOLDER: &str = "City name";
pub const LOADING_TEXT: &str = "Loading...";
pub const CURRENT_HEADING: &str = "Now";
pub const HOURLY_HEADING: &str = "Next 24 hours";
pub const DAILY_HEADING: &str = "7-day forecast";

/// Which of the four screens the view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Idle,
    Loading,
    Error,
    Success,
}

impl DisplayState {
    pub fn of(state: &UiState) -> Self {
        if state.loading {
            DisplayState::Loading
        } else if state.error.is_some() {
            DisplayState::Error
        } else if state.weather.is_some() {
            DisplayState::Success
        } else {
            DisplayState::Idle
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentCard {
    pub temperature: f64,
    pub description: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyCard {
    pub time: String,
    pub temperature: Option<f64>,
    pub description: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyCard {
    pub date: String,
    pub max: Option<f64>,
    pub min: Option<f64>,
    pub description: Option<&'static str>,
}

pub fn current_card(weather: &WeatherResult) -> CurrentCard {
    CurrentCard {
        temperature: weather.current.temperature_2m,
        description: describe(weather.current.weathercode),
    }
}

/// One card per entry of `hourly.time`.
pub fn hourly_cards(weather: &WeatherResult) -> Vec<HourlyCard> {
    let hourly = &weather.hourly;
    hourly
        .time
        .iter()
        .enumerate()
        .map(|(i, time)| HourlyCard {
            time: format_hour(time),
            temperature: hourly.temperature_2m.get(i).copied(),
            description: hourly.weathercode.get(i).copied().and_then(describe),
        })
        .collect()
}

/// One card per entry of `daily.time`.
pub fn daily_cards(weather: &WeatherResult) -> Vec<DailyCard> {
    let daily = &weather.daily;
    daily
        .time
        .iter()
        .enumerate()
        .map(|(i, day)| DailyCard {
            date: format_day(day),
            max: daily.temperature_2m_max.get(i).copied(),
            min: daily.temperature_2m_min.get(i).copied(),
            description: daily.weathercode.get(i).copied().and_then(describe),
        })
        .collect()
}

/// `HH:MM` for an ISO-8601 timestamp. Timestamps without an offset are
/// already local to the forecast location. Unparseable input is returned as is.
pub fn format_hour(timestamp: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.with_timezone(&Local).format("%H:%M").to_string();
    }

    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(timestamp, fmt).ok())
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// `DD.MM.YYYY` for an ISO-8601 date. Unparseable input is returned as is.
pub fn format_day(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

fn temp(value: Option<f64>) -> String {
    value.map(|t| format!("{t}°C")).unwrap_or_default()
}

/// Error line, loading indicator or the forecast sections for `city`.
pub struct Report<'a> {
    pub city: &'a str,
    pub state: &'a UiState,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.state.error {
            writeln!(f, "{error}")?;
        }

        if self.state.loading {
            return writeln!(f, "{LOADING_TEXT}");
        }

        let Some(weather) = &self.state.weather else {
            return Ok(());
        };

        writeln!(f, "== {} ==", self.city)?;

        let current = current_card(weather);
        writeln!(f)?;
        writeln!(f, "{CURRENT_HEADING}")?;
        writeln!(f, "  {}", temp(Some(current.temperature)))?;
        writeln!(f, "  {}", current.description.unwrap_or_default())?;

        writeln!(f)?;
        writeln!(f, "{HOURLY_HEADING}")?;
        for card in hourly_cards(weather) {
            writeln!(
                f,
                "  {:>5} | {:>8} | {}",
                card.time,
                temp(card.temperature),
                card.description.unwrap_or_default()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{DAILY_HEADING}")?;
        for card in daily_cards(weather) {
            writeln!(
                f,
                "  {} | day {:>8} | night {:>8} | {}",
                card.date,
                temp(card.max),
                temp(card.min),
                card.description.unwrap_or_default()
            )?;
        }

        Ok(())
    }
}

/// The whole screen: title, input line, dropdown and report.
pub struct Frame<'a> {
    pub query: &'a str,
    pub suggestions: &'a [Suggestion],
    pub state: &'a UiState,
}

impl fmt::Display for Frame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TITLE}")?;

        if self.query.is_empty() {
            writeln!(f, "> ({INPUT_PLACEHOLDER})")?;
        } else {
            writeln!(f, "> {}", self.query)?;
        }

        for suggestion in self.suggestions {
            writeln!(f, "  - {suggestion}")?;
        }

        write!(
            f,
            "{}",
            Report {
                city: self.query,
                state: self.state,
            }
        )
    }
}

pub fn render(query: &str, suggestions: &[Suggestion], state: &UiState) -> String {
    Frame {
        query,
        suggestions,
        state,
    }
    .to_string()
}
