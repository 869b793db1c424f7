// Adapters layer: concrete implementations for external systems (geocoding provider, dialogue-manager I/O).

pub mod dispatcher;
pub mod nominatim;
pub mod tracker;

pub use dispatcher::{CollectingDispatcher, Utterance};
pub use nominatim::NominatimGeocoder;
pub use tracker::InMemoryTracker;
