//! Deterministic resolution rules shared by the runtime and offline tools.
//!
//! `realm-core` turns static content into runtime outcomes: which enemies a
//! combat zone spawns next, how a zone's hazards are mitigated by the hero's
//! skills, whether a gated action succeeds, and how fast a gathering activity
//! yields. Every component reads the outside world through the oracle traits
//! in [`env`], draws randomness from a seeded [`env::RollStream`], and
//! reports rewards as payloads instead of mutating player state.
pub mod action;
pub mod activity;
pub mod config;
pub mod encounter;
pub mod env;
pub mod environment;
pub mod error;
pub mod reward;
pub mod scaling;
pub mod state;
pub mod stats;

#[cfg(test)]
mod testing;

pub use action::{
    ActionAttempt, ActionConditions, ActionError, ActionOutcome, ActionResolver, ActionTexts,
    ConditionTier, FailureTexts, ItemCondition, LocationAction, OutcomeKind, StartOutcome,
};
pub use activity::{
    ActivityEfficiency, ActivityError, ActivityWork, Availability, EfficiencyModel,
    GainedResources, HourWindow, JobPayment, LocationActivity, ResourceDrop, ScaledDrop,
};
pub use config::GameConfig;
pub use encounter::{
    CombatTrigger, CombatTriggers, CombatZone, Encounter, EncounterError, EncounterGenerator,
    EncounterSource, EnemyInstance, EnemySources, GenerationBehavior, GenerationContext,
    GenerationHook, GenerationHookRegistry, GenerationOverride, GroupSize, PostGenerate,
    RareSpawn, ZoneConfig, ZoneType,
};
pub use env::{
    CharacterOracle, EnemyOracle, EnemyTemplate, Env, LocationType, LocationTypeOracle,
    LootEntry, OracleError, PcgRng, RngOracle, RollStream, SkillOracle, TypeStage,
};
pub use environment::{EnvironmentAggregator, EnvironmentPenalties};
pub use error::{ContentError, ErrorSeverity, GameError};
pub use reward::{
    ActionRef, ActivityRef, CountRange, ItemStack, RewardPayload, RewardSink, TextlineRef,
    Unlocks,
};
pub use scaling::{ConditionStatus, SkillScaled, SkillWindow, Tier};
pub use state::{ActionStatus, ClearEvent, LocationId, WorldState, ZoneId, ZoneProgress};
pub use stats::{CombatStat, EnemyStat, EnemyStats, StatEffects};
