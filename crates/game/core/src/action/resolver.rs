//! Gated action resolution.
//!
//! `can_be_started` checks the status and the hard `required` gate.
//! `start` opens an attempt (or resolves at once when the attempt takes no
//! time or its snapshotted conditions already fail). `finish` scores the
//! conditions, interpolates the success chance and rolls.

use crate::env::{Env, RollStream};
use crate::reward::{ActionRef, ItemStack, RewardPayload};
use crate::scaling::{ConditionStatus, Tier, lerp};
use crate::state::ActionStatus;

use super::conditions::{consumed_items, evaluate, meets};
use super::{ActionError, LocationAction};

/// How an attempt ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutcomeKind {
    Success,
    /// Conditions were met but the roll failed.
    RandomLoss,
    /// Conditions were never met.
    ConditionalLoss,
}

/// An attempt in progress, held by the external scheduler.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionAttempt {
    pub action: ActionRef,
    /// Ticks until the attempt may be finished.
    pub duration: u32,
    /// Conditions scored at start, when the action does not re-check them
    /// on finish.
    pub snapshot: Option<ConditionStatus>,
}

/// Result of a finished attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionOutcome {
    pub action: ActionRef,
    pub kind: OutcomeKind,
    pub text: String,
    /// Reward to hand to the sink, if any.
    pub rewards: Option<RewardPayload>,
    /// Items to remove from the inventory.
    pub consumed_items: Vec<ItemStack>,
    /// Fuzzy condition score used for the roll.
    pub score: f64,
    /// Chance the roll was made against; 0 for a conditional loss.
    pub success_chance: f64,
    pub next_status: ActionStatus,
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        self.kind == OutcomeKind::Success
    }
}

/// Result of starting an action.
#[derive(Clone, Debug, PartialEq)]
pub enum StartOutcome {
    /// The attempt occupies a slot for `duration` ticks.
    InProgress(ActionAttempt),
    /// The attempt resolved immediately.
    Resolved(ActionOutcome),
}

/// Success chance for a fuzzy condition score.
///
/// Interpolates linearly from the minimum to the ideal chance; a single
/// configured chance is used as is. The result is clamped to `[0, 1]`.
pub fn success_chance(chances: &Tier<f64>, score: f64) -> f64 {
    let ideal = chances.ideal.unwrap_or(chances.minimum);
    let chance = lerp(chances.minimum, ideal, score);
    if !(0.0..=1.0).contains(&chance) {
        tracing::warn!(chance, "success chance outside [0, 1]; clamped");
        return if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
    }
    chance
}

/// Resolves gated actions against the hero's skills and character.
pub struct ActionResolver<'a> {
    env: Env<'a>,
}

impl<'a> ActionResolver<'a> {
    pub fn new(env: Env<'a>) -> Self {
        Self { env }
    }

    /// Checks status and the hard `required` gate.
    ///
    /// # Errors
    ///
    /// [`ActionError::Locked`], [`ActionError::Finished`] or
    /// [`ActionError::RequirementsNotMet`].
    pub fn can_be_started(
        &self,
        id: &ActionRef,
        action: &LocationAction,
        status: ActionStatus,
    ) -> Result<(), ActionError> {
        match status {
            ActionStatus::Locked => return Err(ActionError::Locked(id.clone())),
            ActionStatus::Finished => return Err(ActionError::Finished(id.clone())),
            ActionStatus::Unlocked => {}
        }
        if !meets(&action.required, self.env.character()?, self.env.skills()?) {
            return Err(ActionError::RequirementsNotMet(id.clone()));
        }
        Ok(())
    }

    /// Starts an attempt.
    ///
    /// Resolves immediately when the attempt has no duration, or when
    /// conditions are snapshotted at start and found unmet.
    pub fn start(
        &self,
        id: ActionRef,
        action: &LocationAction,
        status: ActionStatus,
        rolls: &mut RollStream<'_>,
    ) -> Result<StartOutcome, ActionError> {
        self.can_be_started(&id, action, status)?;

        let snapshot = if action.check_conditions_on_finish {
            None
        } else {
            Some(self.score(action)?)
        };

        let attempt = ActionAttempt {
            action: id,
            duration: action.attempt_duration,
            snapshot,
        };

        if attempt.duration == 0 || snapshot == Some(ConditionStatus::Unmet) {
            return self.finish(&attempt, action, rolls).map(StartOutcome::Resolved);
        }

        tracing::debug!(
            action = %attempt.action.action,
            duration = attempt.duration,
            snapshot = ?attempt.snapshot,
            "action attempt started"
        );
        Ok(StartOutcome::InProgress(attempt))
    }

    /// Completes an attempt: scores conditions, rolls and picks the payout.
    pub fn finish(
        &self,
        attempt: &ActionAttempt,
        action: &LocationAction,
        rolls: &mut RollStream<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        if attempt.action.action != action.name {
            return Err(ActionError::AttemptMismatch {
                expected: ActionRef {
                    location: attempt.action.location.clone(),
                    action: action.name.clone(),
                },
                found: attempt.action.clone(),
            });
        }

        let status = match attempt.snapshot {
            Some(status) => status,
            None => self.score(action)?,
        };

        let outcome = match status {
            ConditionStatus::Met(score) if score > 0.0 => {
                let chance = success_chance(&action.success_chances, score);
                let consumed = consumed_items(&action.conditions.minimum);
                if rolls.chance(chance) {
                    ActionOutcome {
                        action: attempt.action.clone(),
                        kind: OutcomeKind::Success,
                        text: action.texts.success_text.clone(),
                        rewards: Some(action.rewards.clone()),
                        consumed_items: consumed,
                        score,
                        success_chance: chance,
                        next_status: if action.repeatable {
                            ActionStatus::Unlocked
                        } else {
                            ActionStatus::Finished
                        },
                    }
                } else {
                    ActionOutcome {
                        action: attempt.action.clone(),
                        kind: OutcomeKind::RandomLoss,
                        text: action.texts.failure_texts.random_loss.clone(),
                        rewards: action.loss_rewards.clone(),
                        consumed_items: consumed,
                        score,
                        success_chance: chance,
                        next_status: ActionStatus::Unlocked,
                    }
                }
            }
            // unmet, or a restored snapshot with zero credit
            _ => ActionOutcome {
                action: attempt.action.clone(),
                kind: OutcomeKind::ConditionalLoss,
                text: action.texts.failure_texts.conditional_loss.clone(),
                rewards: None,
                consumed_items: Vec::new(),
                score: 0.0,
                success_chance: 0.0,
                next_status: ActionStatus::Unlocked,
            },
        };

        tracing::debug!(
            action = %action.name,
            kind = ?outcome.kind,
            score = outcome.score,
            chance = outcome.success_chance,
            "action resolved"
        );
        Ok(outcome)
    }

    fn score(&self, action: &LocationAction) -> Result<ConditionStatus, ActionError> {
        Ok(evaluate(
            &action.conditions,
            self.env.character()?,
            self.env.skills()?,
        ))
    }
}
