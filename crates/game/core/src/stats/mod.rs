//! Stat blocks and stat effects.
//!
//! - [`EnemyStats`]: the numeric block every enemy template carries and every
//!   enemy instance materializes (after variance and overrides)
//! - [`StatEffects`]: multiplicative and additive effects keyed by
//!   [`CombatStat`], used by location types and the environment aggregator
//!
//! Character stat aggregation is external; character stats are read by name
//! through [`crate::env::CharacterOracle`].

pub mod effects;
pub mod enemy;

pub use effects::{CombatStat, StatEffects};
pub use enemy::{EnemyStat, EnemyStats};
