//! Scaling formulas shared by every resolver.
//!
//! - [`geometric`]: `v0 * (v1 / v0)^p`, the skill curve for gathering time,
//!   drop chances, drop amounts and job pay
//! - [`fuzzy_score`]: two-tier partial credit between a minimum and an ideal
mod fuzzy;
mod geometric;

pub use fuzzy::{ConditionStatus, Tier, fuzzy_score};
pub use geometric::{SkillScaled, SkillWindow, geometric, lerp};
