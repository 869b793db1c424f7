pub mod actions;
pub mod search;
pub mod validator;

pub use crate::domain::model::{PlaceType, SearchResult, SlotUpdate, SlotValue};
pub use crate::domain::ports::{Dispatcher, Geocoder, PlacesConfig, Tracker};
pub use crate::utils::error::Result;
