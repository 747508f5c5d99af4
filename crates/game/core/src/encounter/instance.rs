use crate::env::{EnemyTemplate, LootEntry};
use crate::stats::EnemyStats;

use super::CombatTriggers;

/// A materialized enemy, owned by the combat session that spawned it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyInstance {
    /// Display name; post-generation may change it.
    pub name: String,
    /// Name of the template this instance was built from.
    pub template: String,
    pub stats: EnemyStats,
    pub max_health: u32,
    pub health: u32,
    pub is_alive: bool,
    pub xp_value: u32,
    pub loot: Vec<LootEntry>,
    pub triggers: CombatTriggers,
}

impl EnemyInstance {
    /// Builds an instance from final stats, at full health.
    pub fn new(template: &EnemyTemplate, stats: EnemyStats) -> Self {
        Self {
            name: template.name.clone(),
            template: template.name.clone(),
            max_health: stats.health,
            health: stats.health,
            stats,
            is_alive: true,
            xp_value: template.xp_value,
            loot: template.loot.clone(),
            triggers: template.triggers.clone(),
        }
    }
}
