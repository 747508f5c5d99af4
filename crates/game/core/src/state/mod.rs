//! Mutable world progress.
//!
//! Static content (zones, actions, activities) never changes during a
//! session. Everything that does change lives here: the seed and nonce that
//! drive resolution rolls, per-zone clear progress, action statuses and the
//! set of unlocked locations and activities. Cross-references are ids or
//! stable names so the state serializes without pointers.
mod ids;
mod progress;

use std::collections::{BTreeMap, BTreeSet};

pub use ids::{LocationId, ZoneId};
pub use progress::{ActionStatus, ClearEvent, ZoneProgress};

use crate::reward::{ActionRef, ActivityRef};

/// Canonical snapshot of world progress.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    /// RNG seed for deterministic resolution.
    ///
    /// Set once when the session starts and never modified.
    pub game_seed: u64,

    /// Resolution counter, advanced once per resolution call.
    nonce: u64,

    zones: BTreeMap<ZoneId, ZoneProgress>,
    actions: BTreeMap<ActionRef, ActionStatus>,
    unlocked_locations: BTreeSet<String>,
    unlocked_activities: BTreeSet<ActivityRef>,

    /// Location the hero currently stands in.
    pub current_location: Option<String>,
}

impl WorldState {
    pub fn with_seed(game_seed: u64) -> Self {
        Self {
            game_seed,
            ..Self::default()
        }
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Returns the nonce for the next resolution call and advances it.
    pub fn next_nonce(&mut self) -> u64 {
        let nonce = self.nonce;
        self.nonce = self.nonce.wrapping_add(1);
        nonce
    }

    /// Progress of a zone; zones never touched report default progress.
    pub fn zone(&self, id: ZoneId) -> ZoneProgress {
        self.zones.get(&id).copied().unwrap_or_default()
    }

    pub fn zone_mut(&mut self, id: ZoneId) -> &mut ZoneProgress {
        self.zones.entry(id).or_default()
    }

    /// Marks a zone unlocked. Returns `false` if it already was.
    pub fn unlock_zone(&mut self, id: ZoneId) -> bool {
        let progress = self.zone_mut(id);
        !std::mem::replace(&mut progress.is_unlocked, true)
    }

    pub fn action_status(&self, action: &ActionRef) -> ActionStatus {
        self.actions.get(action).copied().unwrap_or_default()
    }

    pub fn set_action_status(&mut self, action: ActionRef, status: ActionStatus) {
        self.actions.insert(action, status);
    }

    /// Unlocks a locked action. Finished actions stay finished.
    pub fn unlock_action(&mut self, action: ActionRef) -> bool {
        let status = self.actions.entry(action).or_default();
        if *status == ActionStatus::Locked {
            *status = ActionStatus::Unlocked;
            true
        } else {
            false
        }
    }

    pub fn unlock_location(&mut self, location: impl Into<String>) -> bool {
        self.unlocked_locations.insert(location.into())
    }

    pub fn is_location_unlocked(&self, location: &str) -> bool {
        self.unlocked_locations.contains(location)
    }

    pub fn unlock_activity(&mut self, activity: ActivityRef) -> bool {
        self.unlocked_activities.insert(activity)
    }

    pub fn is_activity_unlocked(&self, activity: &ActivityRef) -> bool {
        self.unlocked_activities.contains(activity)
    }

    pub fn unlocked_locations(&self) -> impl Iterator<Item = &str> + '_ {
        self.unlocked_locations.iter().map(String::as_str)
    }
}
