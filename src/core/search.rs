use crate::domain::model::{fmt_km, PlaceType, SearchResult};
use crate::domain::ports::{Geocoder, PlacesConfig};
use crate::utils::error::{ActionError, Result};
use reqwest::Client;
use serde::Deserialize;

/// Canned reply for any upstream failure or empty result set.
pub const NO_RESULTS_FALLBACK: &str =
    "No results returned. Try with a different location or larger radius.";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    name: String,
    geocodes: RawGeocodes,
    /// Meters from the search origin.
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct RawGeocodes {
    main: RawPoint,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    latitude: f64,
    longitude: f64,
}

/// Client for the places-search API. Stateless per call; the only
/// cross-call state is the rate limiter inside the geocoder.
pub struct PlacesSearchClient<G: Geocoder, C: PlacesConfig> {
    geocoder: G,
    config: C,
    client: Client,
}

impl<G: Geocoder, C: PlacesConfig> PlacesSearchClient<G, C> {
    pub fn new(geocoder: G, config: C) -> Self {
        Self {
            geocoder,
            config,
            client: Client::new(),
        }
    }

    /// Build the reply text for the given slots. Upstream failures never
    /// surface to the caller; they are logged and the canned fallback is
    /// returned instead.
    pub async fn search(&self, place_type: PlaceType, lat_lon: &str, radius_km: f64) -> String {
        match self.try_search(place_type, lat_lon, radius_km).await {
            Ok(results) if results.is_empty() => {
                tracing::debug!("Places API returned an empty result set");
                NO_RESULTS_FALLBACK.to_string()
            }
            Ok(results) => render_reply(&results),
            Err(e) => {
                tracing::warn!("Places search failed: {}", e);
                NO_RESULTS_FALLBACK.to_string()
            }
        }
    }

    async fn try_search(
        &self,
        place_type: PlaceType,
        lat_lon: &str,
        radius_km: f64,
    ) -> Result<Vec<SearchResult>> {
        let categories = place_type.category_code();
        let radius_meters = (radius_km * 1000.0).round() as i64;
        let radius_param = radius_meters.to_string();

        tracing::debug!(
            "GET {} ll={} radius={} categories={}",
            self.config.search_endpoint(),
            lat_lon,
            radius_param,
            categories
        );

        let response = self
            .client
            .get(self.config.search_endpoint())
            .query(&[
                ("ll", lat_lon),
                ("radius", radius_param.as_str()),
                ("categories", categories),
            ])
            .header("Accept", "application/json")
            .header("Authorization", self.config.api_key())
            .send()
            .await?
            .error_for_status()?;

        let parsed: SearchResponse = response.json().await?;
        tracing::debug!("Places API returned {} results", parsed.results.len());

        let mut results = Vec::with_capacity(parsed.results.len());
        for raw in parsed.results {
            let latitude = raw.geocodes.main.latitude;
            let longitude = raw.geocodes.main.longitude;

            // Serialized through the geocoder's rate limiter.
            let address = self
                .geocoder
                .reverse(latitude, longitude)
                .await?
                .ok_or(ActionError::ReverseGeocodeMiss {
                    latitude,
                    longitude,
                })?;

            results.push(SearchResult {
                name: raw.name,
                latitude,
                longitude,
                distance_km: raw.distance / 1000.0,
                address,
            });
        }

        Ok(results)
    }
}

/// Three-line block per result, blocks separated by a blank line, API
/// ordering preserved.
fn render_reply(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| {
            format!(
                "Name: {}\nAddress: {}\nDistance: {} km",
                r.name,
                r.address,
                fmt_km(r.distance_km)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
