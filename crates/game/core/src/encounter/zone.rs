//! Combat zone definitions.
//!
//! [`ZoneConfig`] is the authored form, straight from content files.
//! [`CombatZone::new`] validates it: a zone without any enemy source or with
//! an out-of-range type stage is rejected, while out-of-range numeric tuning
//! (group size, stat variation, rare chance, clear threshold) is clamped and
//! logged.

use crate::config::GameConfig;
use crate::error::ContentError;
use crate::reward::RewardPayload;
use crate::state::{LocationId, ZoneId};

/// Environmental hazard declared by a zone.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneType {
    /// Location type name.
    pub kind: String,
    /// 1-based severity stage.
    pub stage: u8,
    /// Skill xp granted to the stage's related skill per combat action.
    #[cfg_attr(feature = "serde", serde(default))]
    pub xp_gain: f64,
}

/// Inclusive bounds of a default enemy group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupSize {
    pub min: u32,
    pub max: u32,
}

impl Default for GroupSize {
    fn default() -> Self {
        Self { min: 1, max: 1 }
    }
}

/// The three ways a zone can produce enemies, checked in this order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemySources {
    /// Fixed groups, one per kill; the last repeats once exhausted.
    pub sequence: Vec<Vec<String>>,
    /// Groups picked uniformly at random.
    pub pool: Vec<Vec<String>>,
    /// Enemies drawn independently into a group of random size.
    pub list: Vec<String>,
    pub group_size: GroupSize,
}

impl EnemySources {
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty() && self.pool.is_empty() && self.list.is_empty()
    }

    /// Every enemy name referenced by any source.
    pub fn enemy_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sequence
            .iter()
            .chain(self.pool.iter())
            .flatten()
            .chain(self.list.iter())
            .map(String::as_str)
    }
}

/// Rare group spawned on a successful roll.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RareSpawn {
    pub enemies: Vec<String>,
    pub chance: f64,
}

/// Authored zone definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoneConfig {
    pub name: String,
    pub description: String,
    /// Groups per clear.
    pub enemy_count: u32,
    pub types: Vec<ZoneType>,
    pub enemies: EnemySources,
    pub rare: Option<RareSpawn>,
    /// Group spawned on the last kill before each clear.
    pub boss: Vec<String>,
    /// Falls back to `GameConfig::default_stat_variation` when absent.
    pub enemy_stat_variation: Option<f64>,
    pub is_unlocked: bool,
    /// Cleared once, then closed for good.
    pub is_challenge: bool,
    pub first_reward: Option<RewardPayload>,
    pub repeatable_reward: Option<RewardPayload>,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            enemy_count: 30,
            types: Vec::new(),
            enemies: EnemySources::default(),
            rare: None,
            boss: Vec::new(),
            enemy_stat_variation: None,
            is_unlocked: true,
            is_challenge: false,
            first_reward: None,
            repeatable_reward: None,
        }
    }
}

impl ZoneConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Validated combat zone.
#[derive(Clone, Debug, PartialEq)]
pub struct CombatZone {
    id: ZoneId,
    parent: LocationId,
    config: ZoneConfig,
    stat_variation: f64,
}

impl CombatZone {
    /// Validates a zone definition.
    ///
    /// # Errors
    ///
    /// - [`ContentError::NoEnemySource`] when sequence, pool and list are all empty
    /// - [`ContentError::InvalidTypeStage`] when a type stage is outside `1..=3`
    pub fn new(
        id: ZoneId,
        parent: LocationId,
        mut config: ZoneConfig,
        game: &GameConfig,
    ) -> Result<Self, ContentError> {
        if config.enemies.is_empty() {
            return Err(ContentError::NoEnemySource { zone: config.name });
        }

        if let Some(bad) = config
            .types
            .iter()
            .find(|t| t.stage == 0 || t.stage > GameConfig::MAX_TYPE_STAGE)
        {
            return Err(ContentError::InvalidTypeStage {
                zone: config.name.clone(),
                kind: bad.kind.clone(),
                stage: bad.stage,
            });
        }

        if config.enemy_count == 0 {
            tracing::warn!(zone = %config.name, "enemy_count of 0 corrected to 1");
            config.enemy_count = 1;
        }

        config.enemies.group_size = clamp_group_size(&config.name, config.enemies.group_size);

        if let Some(rare) = config.rare.as_mut() {
            rare.chance = clamp_unit(&config.name, "rare chance", rare.chance);
        }

        let variation = config
            .enemy_stat_variation
            .unwrap_or(game.default_stat_variation);
        let stat_variation = clamp_unit(&config.name, "enemy stat variation", variation);

        Ok(Self {
            id,
            parent,
            config,
            stat_variation,
        })
    }

    pub fn id(&self) -> ZoneId {
        self.id
    }

    pub fn parent(&self) -> LocationId {
        self.parent
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn description(&self) -> &str {
        &self.config.description
    }

    pub fn enemy_count(&self) -> u32 {
        self.config.enemy_count
    }

    pub fn types(&self) -> &[ZoneType] {
        &self.config.types
    }

    pub fn sources(&self) -> &EnemySources {
        &self.config.enemies
    }

    pub fn rare(&self) -> Option<&RareSpawn> {
        self.config.rare.as_ref()
    }

    pub fn boss(&self) -> &[String] {
        &self.config.boss
    }

    /// Stat variation in `[0, 1]`.
    pub fn stat_variation(&self) -> f64 {
        self.stat_variation
    }

    pub fn starts_unlocked(&self) -> bool {
        self.config.is_unlocked
    }

    pub fn is_challenge(&self) -> bool {
        self.config.is_challenge
    }

    pub fn first_reward(&self) -> Option<&RewardPayload> {
        self.config.first_reward.as_ref()
    }

    pub fn repeatable_reward(&self) -> Option<&RewardPayload> {
        self.config.repeatable_reward.as_ref()
    }

    /// Whether the kill after `kills` triggers the boss group.
    pub fn is_boss_kill(&self, kills: u32) -> bool {
        let count = self.enemy_count();
        !self.config.boss.is_empty() && kills % count == count - 1
    }

    /// Every enemy name the zone can spawn, including rare and boss groups.
    pub fn enemy_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.config
            .enemies
            .enemy_names()
            .chain(self.config.rare.iter().flat_map(|r| r.enemies.iter()).map(String::as_str))
            .chain(self.config.boss.iter().map(String::as_str))
    }
}

fn clamp_group_size(zone: &str, size: GroupSize) -> GroupSize {
    let bounds = GameConfig::MIN_GROUP_SIZE..=GameConfig::MAX_GROUP_SIZE;
    let mut min = size.min.clamp(*bounds.start(), *bounds.end());
    let mut max = size.max.clamp(*bounds.start(), *bounds.end());
    if min > max {
        std::mem::swap(&mut min, &mut max);
    }
    let corrected = GroupSize { min, max };
    if corrected != size {
        tracing::warn!(
            zone,
            min = size.min,
            max = size.max,
            corrected_min = min,
            corrected_max = max,
            "enemy group size outside [1, 8]; clamped"
        );
    }
    corrected
}

fn clamp_unit(zone: &str, what: &str, value: f64) -> f64 {
    let corrected = if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    };
    if corrected != value {
        tracing::warn!(zone, value, corrected, "{what} outside [0, 1]; clamped");
    }
    corrected
}
