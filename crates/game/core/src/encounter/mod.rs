//! Encounter generation.
//!
//! Given a zone's enemy sources and its kill count, [`EncounterGenerator`]
//! picks the next group (sequence, pool, boss, rare, default) and
//! materializes each enemy from its template with behavior overrides and
//! per-stat variation.
mod behavior;
mod error;
mod generator;
mod instance;
mod zone;

pub use behavior::{
    CombatTrigger, CombatTriggers, GenerationBehavior, GenerationContext, GenerationHook,
    GenerationHookRegistry, GenerationOverride, PostGenerate,
};
pub use error::EncounterError;
pub use generator::{
    Encounter, EncounterGenerator, EncounterSource, GroupSelection, select_group, vary_stats,
};
pub use instance::EnemyInstance;
pub use zone::{CombatZone, EnemySources, GroupSize, RareSpawn, ZoneConfig, ZoneType};
