//! places-actions: custom action handlers for a places-search dialogue agent
//!
//! This library provides the handlers a dialogue manager calls while
//! collecting a places search from a user:
//! - slot validation for a free-text address (forward geocoding) and a
//!   spoken-language radius ("fifty", "0.5"), with clamp-and-notify bounds
//! - a places-search client that queries the Foursquare v3 API,
//!   reverse-geocodes each hit, and renders the reply text
//! - adapters for Nominatim geocoding (rate-limited), a collecting
//!   dispatcher, and an in-memory slot tracker
//!
//! The dialogue manager itself, the upstream providers, and utterance
//! template rendering are external collaborators behind the ports in
//! `domain::ports`.

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{CollectingDispatcher, InMemoryTracker, NominatimGeocoder, Utterance};
pub use config::{CliConfig, TomlConfig};
pub use crate::core::actions::{
    Action, BeginningSearchAction, PlacesSearchAction, ValidateSlotsAction,
};
pub use crate::core::search::PlacesSearchClient;
pub use crate::core::validator::SlotValidator;
pub use domain::model::{PlaceType, SearchResult, SlotUpdate, SlotValue};
pub use domain::ports::{Dispatcher, Geocoder, PlacesConfig, Tracker};
pub use utils::error::{ActionError, Result};
