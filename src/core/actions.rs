//! Dialogue-manager-facing action handlers.
//!
//! Each handler receives a dispatcher for emitting messages and a tracker
//! for reading slot state, and returns slot updates for the dialogue
//! manager to apply. Handlers never panic on upstream trouble; failures
//! either become user-facing notices or typed errors at the boundary.

use crate::core::search::PlacesSearchClient;
use crate::core::validator::{self, AddressOutcome, RadiusOutcome, SlotValidator};
use crate::domain::model::{slots, PlaceType, SlotUpdate, SlotValue};
use crate::domain::ports::{Dispatcher, Geocoder, PlacesConfig, Tracker};
use crate::utils::error::{ActionError, Result};
use async_trait::async_trait;
use std::str::FromStr;

pub const SERVER_ISSUES_TEXT: &str = "Facing server issues. Please try again later";
pub const MAX_RADIUS_TEXT: &str = "Maximum radius is 100 km. Setting radius to 100 km.";
pub const MIN_RADIUS_TEXT: &str = "Minimum radius is 0.1 km. Setting radius to 0.1 km.";
pub const WRONG_ADDRESS_TEMPLATE: &str = "utter_wrong_address";
pub const WRONG_RADIUS_TEMPLATE: &str = "utter_wrong_radius";

#[async_trait]
pub trait Action: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(
        &self,
        dispatcher: &mut dyn Dispatcher,
        tracker: &dyn Tracker,
    ) -> Result<Vec<SlotUpdate>>;
}

fn text_slot<'a>(tracker: &'a dyn Tracker, name: &str) -> Result<&'a str> {
    tracker
        .get_slot(name)
        .and_then(SlotValue::as_text)
        .ok_or_else(|| ActionError::MissingSlotError {
            slot: name.to_string(),
        })
}

fn tokens_slot<'a>(tracker: &'a dyn Tracker, name: &str) -> Result<&'a [String]> {
    tracker
        .get_slot(name)
        .and_then(SlotValue::as_tokens)
        .ok_or_else(|| ActionError::MissingSlotError {
            slot: name.to_string(),
        })
}

/// Announces the search parameters before the search itself runs.
pub struct BeginningSearchAction;

#[async_trait]
impl Action for BeginningSearchAction {
    fn name(&self) -> &'static str {
        "action_beginning_search"
    }

    async fn run(
        &self,
        dispatcher: &mut dyn Dispatcher,
        tracker: &dyn Tracker,
    ) -> Result<Vec<SlotUpdate>> {
        let place_type = text_slot(tracker, slots::PLACE_TYPE)?;
        let address = tokens_slot(tracker, slots::ADDRESS)?.join(", ");
        let radius = text_slot(tracker, slots::RADIUS)?;

        dispatcher.utter_text(&format!(
            "Looking for {} in {} with a search radius of {} km",
            place_type, address, radius
        ));
        Ok(Vec::new())
    }
}

/// Runs the places search against the filled slots and utters the reply.
pub struct PlacesSearchAction<G: Geocoder, C: PlacesConfig> {
    client: PlacesSearchClient<G, C>,
}

impl<G: Geocoder, C: PlacesConfig> PlacesSearchAction<G, C> {
    pub fn new(client: PlacesSearchClient<G, C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<G: Geocoder, C: PlacesConfig> Action for PlacesSearchAction<G, C> {
    fn name(&self) -> &'static str {
        "action_places_search"
    }

    async fn run(
        &self,
        dispatcher: &mut dyn Dispatcher,
        tracker: &dyn Tracker,
    ) -> Result<Vec<SlotUpdate>> {
        // An unknown place type is a hard error here, never a silent
        // fallback to some default category.
        let place_type = PlaceType::from_str(text_slot(tracker, slots::PLACE_TYPE)?)?;
        let lat_lon = text_slot(tracker, slots::LAT_LON)?;
        let radius_raw = text_slot(tracker, slots::RADIUS)?;
        let radius_km: f64 =
            radius_raw
                .parse()
                .map_err(|_| ActionError::InvalidSlotValueError {
                    slot: slots::RADIUS.to_string(),
                    value: radius_raw.to_string(),
                })?;

        let reply = self.client.search(place_type, lat_lon, radius_km).await;
        dispatcher.utter_text(&reply);
        Ok(Vec::new())
    }
}

/// Validates the `address` and `radius` slots, whether they arrive
/// through standing slot validation or through form validation. Both
/// paths share the same outcome-to-notice mapping.
pub struct ValidateSlotsAction<G: Geocoder> {
    validator: SlotValidator<G>,
}

impl<G: Geocoder> ValidateSlotsAction<G> {
    pub fn new(validator: SlotValidator<G>) -> Self {
        Self { validator }
    }

    pub async fn validate_address(
        &self,
        tokens: &[String],
        dispatcher: &mut dyn Dispatcher,
    ) -> Vec<SlotUpdate> {
        match self.validator.validate_address(tokens).await {
            Ok(AddressOutcome::Valid { lat_lon }) => vec![
                SlotUpdate::set(slots::ADDRESS, SlotValue::Tokens(tokens.to_vec())),
                SlotUpdate::set(slots::LAT_LON, SlotValue::text(lat_lon)),
            ],
            Ok(AddressOutcome::NotFound) => {
                dispatcher.utter_template(WRONG_ADDRESS_TEMPLATE);
                vec![SlotUpdate::clear(slots::ADDRESS)]
            }
            Err(e) => {
                // Provider down: keep whatever the slot held and let the
                // user retry on the next turn.
                tracing::warn!("Address geocoding failed: {}", e);
                dispatcher.utter_text(SERVER_ISSUES_TEXT);
                Vec::new()
            }
        }
    }

    pub fn validate_radius(&self, raw: &str, dispatcher: &mut dyn Dispatcher) -> Vec<SlotUpdate> {
        let outcome = validator::validate_radius(raw);
        match &outcome {
            RadiusOutcome::ClampedMax => dispatcher.utter_text(MAX_RADIUS_TEXT),
            RadiusOutcome::ClampedMin => dispatcher.utter_text(MIN_RADIUS_TEXT),
            RadiusOutcome::Invalid => dispatcher.utter_template(WRONG_RADIUS_TEMPLATE),
            RadiusOutcome::InRange(_) => {}
        }

        match outcome.slot_value() {
            Some(value) => vec![SlotUpdate::set(slots::RADIUS, SlotValue::text(value))],
            None => vec![SlotUpdate::clear(slots::RADIUS)],
        }
    }
}

#[async_trait]
impl<G: Geocoder> Action for ValidateSlotsAction<G> {
    fn name(&self) -> &'static str {
        "validate_places_search_form"
    }

    async fn run(
        &self,
        dispatcher: &mut dyn Dispatcher,
        tracker: &dyn Tracker,
    ) -> Result<Vec<SlotUpdate>> {
        let mut updates = Vec::new();

        if let Some(tokens) = tracker.get_slot(slots::ADDRESS).and_then(SlotValue::as_tokens) {
            updates.extend(self.validate_address(tokens, &mut *dispatcher).await);
        }

        if let Some(raw) = tracker.get_slot(slots::RADIUS).and_then(SlotValue::as_text) {
            updates.extend(self.validate_radius(raw, &mut *dispatcher));
        }

        Ok(updates)
    }
}
