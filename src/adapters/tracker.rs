use crate::domain::model::{SlotUpdate, SlotValue};
use crate::domain::ports::Tracker;
use std::collections::HashMap;

/// Slot store for driving handlers outside a real dialogue manager
/// (CLI runs and tests).
#[derive(Debug, Default)]
pub struct InMemoryTracker {
    slots: HashMap<String, SlotValue>,
}

impl InMemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: SlotValue) {
        self.slots.insert(name.into(), value);
    }

    /// Apply handler output; a `None` value clears the slot.
    pub fn apply(&mut self, updates: Vec<SlotUpdate>) {
        for update in updates {
            match update.value {
                Some(value) => {
                    self.slots.insert(update.slot, value);
                }
                None => {
                    self.slots.remove(&update.slot);
                }
            }
        }
    }

    pub fn has_slot(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }
}

impl Tracker for InMemoryTracker {
    fn get_slot(&self, name: &str) -> Option<&SlotValue> {
        self.slots.get(name)
    }
}
