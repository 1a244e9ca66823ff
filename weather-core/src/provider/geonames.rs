use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::{FetchError, truncate_body},
    model::Suggestion,
};

use super::Geocoder;

/// Maximum number of suggestions requested per lookup.
pub const MAX_ROWS: u8 = 3;

/// Only populated places (cities, towns, villages).
const FEATURE_CLASS: &str = "P";

/// GeoNames `searchJSON` client.
#[derive(Debug, Clone)]
pub struct GeoNamesProvider {
    url: String,
    username: String,
    lang: String,
    http: Client,
}

impl GeoNamesProvider {
    pub fn new(url: String, username: String, lang: String) -> Self {
        Self {
            url,
            username,
            lang,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GnSearchResponse {
    geonames: Option<Vec<GnPlace>>,
    status: Option<GnStatus>,
}

#[derive(Debug, Deserialize)]
struct GnPlace {
    name: String,
    #[serde(rename = "countryName", default)]
    country_name: String,
    #[serde(rename = "geonameId")]
    geoname_id: u64,
}

/// Error envelope GeoNames returns with HTTP 200 (e.g. unknown username).
#[derive(Debug, Deserialize)]
struct GnStatus {
    message: String,
}

impl From<GnPlace> for Suggestion {
    fn from(place: GnPlace) -> Self {
        Suggestion {
            name: place.name,
            country: place.country_name,
            id: place.geoname_id,
        }
    }
}

#[async_trait]
impl Geocoder for GeoNamesProvider {
    #[instrument(skip(self), level = "debug")]
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        let max_rows = MAX_ROWS.to_string();

        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("name", query),
                ("maxRows", max_rows.as_str()),
                ("lang", self.lang.as_str()),
                ("featureClass", FEATURE_CLASS),
                ("username", self.username.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: GnSearchResponse = serde_json::from_str(&body)?;

        match (parsed.geonames, parsed.status) {
            (Some(places), _) => {
                tracing::debug!(count = places.len(), "GeoNames returned places");
                Ok(places.into_iter().map(Suggestion::from).collect())
            }
            (None, Some(status)) => Err(FetchError::Service(status.message)),
            (None, None) => Err(FetchError::Malformed(
                "GeoNames response has no `geonames` array".to_string(),
            )),
        }
    }
}
