//! Enemy template definitions and oracle interface.
//!
//! Templates are immutable for the session. The encounter generator
//! materializes them into [`crate::encounter::EnemyInstance`]s.

use crate::encounter::{CombatTriggers, GenerationBehavior};
use crate::reward::CountRange;
use crate::stats::EnemyStats;

/// One entry of an enemy's loot table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item: String,
    pub chance: f64,
    #[cfg_attr(feature = "serde", serde(default = "CountRange::one"))]
    pub count: CountRange,
}

/// Static definition of an enemy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub stats: EnemyStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub xp_value: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot: Vec<LootEntry>,
    /// Special generation behavior consulted before stats are materialized.
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: Option<GenerationBehavior>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub triggers: CombatTriggers,
}

impl EnemyTemplate {
    pub fn new(name: impl Into<String>, stats: EnemyStats) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            stats,
            xp_value: 0,
            loot: Vec::new(),
            behavior: None,
            triggers: CombatTriggers::default(),
        }
    }

    pub fn with_behavior(mut self, behavior: GenerationBehavior) -> Self {
        self.behavior = Some(behavior);
        self
    }

    pub fn with_xp(mut self, xp_value: u32) -> Self {
        self.xp_value = xp_value;
        self
    }
}

/// Oracle providing enemy templates by name.
pub trait EnemyOracle {
    /// Returns the template for an enemy name, if defined.
    fn template(&self, name: &str) -> Option<&EnemyTemplate>;
}

impl EnemyOracle for std::collections::HashMap<String, EnemyTemplate> {
    fn template(&self, name: &str) -> Option<&EnemyTemplate> {
        self.get(name)
    }
}
