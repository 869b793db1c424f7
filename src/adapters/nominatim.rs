use crate::domain::model::Coordinates;
use crate::domain::ports::Geocoder;
use crate::utils::error::{ActionError, Result};
use crate::utils::rate_limit::MinIntervalLimiter;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "places-actions";
pub const DEFAULT_REVERSE_MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Nominatim returns coordinates as JSON strings, not numbers.
#[derive(Debug, Deserialize)]
struct SearchPlace {
    lat: String,
    lon: String,
}

/// A reverse miss comes back as `{"error": "..."}` with HTTP 200.
#[derive(Debug, Deserialize)]
struct ReversePlace {
    display_name: Option<String>,
    error: Option<String>,
}

/// Geocoder backed by a Nominatim instance. Reverse lookups go through a
/// shared minimum-interval limiter; clones share the limiter state, so a
/// validator and a search client built from the same instance cannot
/// exceed the provider's rate expectations between them.
#[derive(Clone)]
pub struct NominatimGeocoder {
    endpoint: String,
    client: Client,
    reverse_limiter: MinIntervalLimiter,
}

impl NominatimGeocoder {
    pub fn new(
        endpoint: impl Into<String>,
        user_agent: &str,
        reverse_min_interval: Duration,
    ) -> Result<Self> {
        // Nominatim rejects requests without an identifying user agent.
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
            reverse_limiter: MinIntervalLimiter::new(reverse_min_interval),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>> {
        let url = format!("{}/search", self.endpoint);
        let places: Vec<SearchPlace> = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let latitude = place
            .lat
            .parse::<f64>()
            .map_err(|e| ActionError::MalformedResponseError {
                message: format!("bad latitude {:?}: {}", place.lat, e),
            })?;
        let longitude = place
            .lon
            .parse::<f64>()
            .map_err(|e| ActionError::MalformedResponseError {
                message: format!("bad longitude {:?}: {}", place.lon, e),
            })?;

        Ok(Some(Coordinates {
            latitude,
            longitude,
        }))
    }

    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<String>> {
        self.reverse_limiter.acquire().await;

        let url = format!("{}/reverse", self.endpoint);
        let place: ReversePlace = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("format", "jsonv2".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = place.error {
            tracing::debug!("Reverse geocode miss for {},{}: {}", latitude, longitude, error);
            return Ok(None);
        }
        Ok(place.display_name)
    }
}
