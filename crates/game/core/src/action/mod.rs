//! Gated actions.
//!
//! A [`LocationAction`] moves through `Locked → Unlocked → Finished`
//! ([`crate::state::ActionStatus`]). Starting requires the binary `required`
//! gate; resolution scores the two-tier conditions, interpolates the success
//! chance from that score and rolls once.
mod conditions;
mod definition;
mod error;
mod resolver;

pub use conditions::{consumed_items, evaluate, meets};
pub use definition::{
    ActionConditions, ActionTexts, ConditionTier, FailureTexts, ItemCondition, LocationAction,
};
pub use error::ActionError;
pub use resolver::{
    ActionAttempt, ActionOutcome, ActionResolver, OutcomeKind, StartOutcome, success_chance,
};
