use crate::domain::model::fmt_km;
use crate::domain::ports::Geocoder;
use crate::utils::error::Result;
use crate::utils::word_number;

pub const MAX_RADIUS_METERS: i64 = 100_000;
pub const MIN_RADIUS_METERS: i64 = 100;

/// Outcome of address validation. Transport failures are reported as
/// `Err` by `validate_address` so the caller can distinguish "bad input"
/// from "provider down".
#[derive(Debug, Clone, PartialEq)]
pub enum AddressOutcome {
    /// Address resolved; `lat_lon` is the comma-joined coordinate string
    /// for the derived slot. The address slot itself stays unchanged.
    Valid { lat_lon: String },
    /// The provider had no match for the query.
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RadiusOutcome {
    /// Parsed and inside [0.1, 100] km; holds the decimal slot string.
    InRange(String),
    /// Above 100 km, clamped down.
    ClampedMax,
    /// Below 0.1 km, clamped up.
    ClampedMin,
    /// Not parseable as a quantity.
    Invalid,
}

impl RadiusOutcome {
    /// The radius slot value this outcome settles on, `None` meaning the
    /// slot is cleared for a re-prompt.
    pub fn slot_value(&self) -> Option<String> {
        match self {
            RadiusOutcome::InRange(value) => Some(value.clone()),
            RadiusOutcome::ClampedMax => Some("100".to_string()),
            RadiusOutcome::ClampedMin => Some("0.1".to_string()),
            RadiusOutcome::Invalid => None,
        }
    }
}

/// Parse and bound-check a user-supplied radius, in kilometers.
///
/// Single implementation for every validation entry point (standing slot
/// validation and form validation must clamp identically). The value is
/// converted to whole meters before comparing against the bounds, so
/// "100.00001" still counts as in range.
pub fn validate_radius(raw: &str) -> RadiusOutcome {
    let Some(value) = word_number::parse_quantity(raw) else {
        return RadiusOutcome::Invalid;
    };

    let meters = (value * 1000.0).round() as i64;
    if meters > MAX_RADIUS_METERS {
        RadiusOutcome::ClampedMax
    } else if meters < MIN_RADIUS_METERS {
        RadiusOutcome::ClampedMin
    } else {
        RadiusOutcome::InRange(fmt_km(meters as f64 / 1000.0))
    }
}

pub struct SlotValidator<G: Geocoder> {
    geocoder: G,
}

impl<G: Geocoder> SlotValidator<G> {
    pub fn new(geocoder: G) -> Self {
        Self { geocoder }
    }

    /// Geocode the joined address tokens. The `lat_lon` slot is always
    /// derived here, never taken from the user.
    pub async fn validate_address(&self, tokens: &[String]) -> Result<AddressOutcome> {
        let query = tokens.join(", ");
        tracing::debug!("Geocoding address query: {}", query);

        match self.geocoder.geocode(&query).await? {
            Some(coordinates) => Ok(AddressOutcome::Valid {
                lat_lon: coordinates.to_slot_value(),
            }),
            None => Ok(AddressOutcome::NotFound),
        }
    }
}
