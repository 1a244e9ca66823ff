//! Core library for the `weather` lookup client.
//!
//! This crate defines:
//! - Configuration & the GeoNames credential
//! - Clients for the geocoding service and the weather backend
//! - The suggestion and forecast controllers behind the weather view
//! - Pure text rendering of the view
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod codes;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod view;

pub use config::{Config, GeoNamesConfig};
pub use error::FetchError;
pub use model::{CurrentWeather, DailySeries, HourlySeries, Suggestion, UiState, WeatherResult};
pub use provider::{Geocoder, WeatherSource};
pub use render::DisplayState;
pub use view::WeatherView;
