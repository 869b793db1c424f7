use crate::domain::model::{Coordinates, SlotValue};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// The capability set actions need from the dialogue manager's
/// dispatcher: emit literal text or a named utterance template.
pub trait Dispatcher: Send {
    fn utter_text(&mut self, text: &str);
    fn utter_template(&mut self, template: &str);
}

/// Read access to conversation slot state.
pub trait Tracker: Send + Sync {
    fn get_slot(&self, name: &str) -> Option<&SlotValue>;
}

/// Forward and reverse geocoding. Implementations own their own rate
/// limiting; callers just await.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a free-text query to coordinates. `Ok(None)` means the
    /// provider had no match; `Err` is a transport/provider failure.
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>>;

    /// Resolve coordinates to a human-readable address.
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<String>>;
}

pub trait PlacesConfig: Send + Sync {
    fn search_endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn geocoder_endpoint(&self) -> &str;
    fn geocoder_user_agent(&self) -> &str;
    fn reverse_min_interval(&self) -> Duration;
}
