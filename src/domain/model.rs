use crate::utils::error::ActionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Slot names as the dialogue manager knows them.
pub mod slots {
    pub const ADDRESS: &str = "address";
    pub const LAT_LON: &str = "lat_lon";
    pub const RADIUS: &str = "radius";
    pub const PLACE_TYPE: &str = "place_type";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceType {
    Restaurants,
    CoffeeHouses,
    Both,
}

impl PlaceType {
    /// Foursquare v3 category ids. The mapping is total over the three
    /// variants; an unrecognized slot string is rejected in `FromStr`,
    /// never defaulted here.
    pub fn category_code(self) -> &'static str {
        match self {
            PlaceType::Restaurants => "13065",
            PlaceType::CoffeeHouses => "13032",
            PlaceType::Both => "13065,13032",
        }
    }
}

impl FromStr for PlaceType {
    type Err = ActionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "restaurants" => Ok(PlaceType::Restaurants),
            "coffee houses" | "coffee_houses" => Ok(PlaceType::CoffeeHouses),
            "both restaurants and coffee houses" | "both" => Ok(PlaceType::Both),
            _ => Err(ActionError::UnknownPlaceType {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PlaceType {
    /// Spoken form, as it appears in utterances.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spoken = match self {
            PlaceType::Restaurants => "restaurants",
            PlaceType::CoffeeHouses => "coffee houses",
            PlaceType::Both => "both restaurants and coffee houses",
        };
        f.write_str(spoken)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Comma-joined decimal string for the `lat_lon` slot. Debug float
    /// formatting keeps a trailing `.0` on whole-number coordinates, so
    /// (40.0, -73.0) renders as "40.0,-73.0".
    pub fn to_slot_value(&self) -> String {
        format!("{:?},{:?}", self.latitude, self.longitude)
    }
}

/// Kilometre values shown to the user keep a trailing `.0` on whole
/// numbers ("50.0 km", "2.0 km") while shorter fractions stay short
/// ("1.5 km").
pub fn fmt_km(value: f64) -> String {
    format!("{:?}", value)
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    Text(String),
    Tokens(Vec<String>),
}

impl SlotValue {
    pub fn text(value: impl Into<String>) -> Self {
        SlotValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SlotValue::Text(value) => Some(value),
            SlotValue::Tokens(_) => None,
        }
    }

    pub fn as_tokens(&self) -> Option<&[String]> {
        match self {
            SlotValue::Tokens(tokens) => Some(tokens),
            SlotValue::Text(_) => None,
        }
    }
}

/// One slot mutation returned by an action. `value: None` clears the
/// slot so the dialogue manager re-prompts for it.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotUpdate {
    pub slot: String,
    pub value: Option<SlotValue>,
}

impl SlotUpdate {
    pub fn set(slot: impl Into<String>, value: SlotValue) -> Self {
        Self {
            slot: slot.into(),
            value: Some(value),
        }
    }

    pub fn clear(slot: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            value: None,
        }
    }
}

/// One hit from the places API, already reverse-geocoded. Built per
/// response item and consumed straight into the reply text.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
    pub address: String,
}
