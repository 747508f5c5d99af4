use crate::encounter::CombatZone;
use crate::reward::RewardPayload;

/// Lifecycle of a gated action.
///
/// `Locked → Unlocked → Finished`. Only non-repeatable actions reach
/// `Finished`; repeatable ones return to `Unlocked` after every attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionStatus {
    #[default]
    Locked,
    Unlocked,
    Finished,
}

/// Clear progress of one combat zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneProgress {
    /// Enemy groups defeated so far. Only ever increases.
    pub enemy_groups_killed: u32,
    pub is_unlocked: bool,
    /// Set on the first clear of a challenge zone.
    pub is_finished: bool,
    pub first_cleared: bool,
}

/// Emitted when a kill completes a clear of the zone.
#[derive(Clone, Debug, PartialEq)]
pub struct ClearEvent {
    /// Total clears including this one.
    pub clears: u32,
    pub first_clear: bool,
    /// Whether this clear finished a challenge zone.
    pub finished: bool,
    pub reward: Option<RewardPayload>,
}

impl ZoneProgress {
    pub const fn unlocked() -> Self {
        Self {
            enemy_groups_killed: 0,
            is_unlocked: true,
            is_finished: false,
            first_cleared: false,
        }
    }

    /// Number of completed clears.
    pub fn clears(&self, zone: &CombatZone) -> u32 {
        self.enemy_groups_killed / zone.enemy_count()
    }

    /// Records one defeated group.
    ///
    /// Returns a [`ClearEvent`] when the counter reaches a multiple of the
    /// zone's clear threshold. The first clear pays `first_reward`, later
    /// clears pay `repeatable_reward`.
    pub fn record_group_killed(&mut self, zone: &CombatZone) -> Option<ClearEvent> {
        self.enemy_groups_killed = self.enemy_groups_killed.saturating_add(1);
        if self.enemy_groups_killed % zone.enemy_count() != 0 {
            return None;
        }

        let first_clear = !self.first_cleared;
        self.first_cleared = true;

        let finished = first_clear && zone.is_challenge();
        if finished {
            self.is_finished = true;
        }

        let reward = if first_clear {
            zone.first_reward().cloned()
        } else {
            zone.repeatable_reward().cloned()
        };

        tracing::info!(
            zone = zone.name(),
            kills = self.enemy_groups_killed,
            first_clear,
            finished,
            "zone cleared"
        );

        Some(ClearEvent {
            clears: self.clears(zone),
            first_clear,
            finished,
            reward,
        })
    }
}
