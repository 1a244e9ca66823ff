use crate::{
    Config, FetchError, Suggestion, WeatherResult,
    provider::{backend::BackendProvider, geonames::GeoNamesProvider},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod backend;
pub mod geonames;

/// Source of place suggestions for a partially typed city name.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, FetchError>;
}

/// Source of forecasts for a city name.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn weather(&self, city: &str) -> Result<WeatherResult, FetchError>;
}

/// Construct the geocoder from config. Fails when no GeoNames username is available.
pub fn geocoder_from_config(config: &Config) -> anyhow::Result<Arc<dyn Geocoder>> {
    let username = config.require_geonames_username()?;

    Ok(Arc::new(GeoNamesProvider::new(
        config.geonames.url.clone(),
        username.to_owned(),
        config.geonames.lang.clone(),
    )))
}

/// Construct the weather backend client from config.
pub fn weather_source_from_config(config: &Config) -> Arc<dyn WeatherSource> {
    Arc::new(BackendProvider::new(config.backend_url.clone()))
}
