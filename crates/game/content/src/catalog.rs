//! Authored content definitions not owned by `realm-core`.
//!
//! Skills and items are external collaborators of the rule engine; the
//! catalogs here exist so the verifier can check references against them and
//! the runtime can look up maximum skill levels.

use realm_core::{
    EnemyTemplate, GameConfig, LocationAction, LocationActivity, LocationType, ZoneConfig,
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub name: String,
    pub max_level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: u64,
}

/// A location with its actions and activities.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationConfig {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Names of neighbouring locations and combat zones.
    #[cfg_attr(feature = "serde", serde(default))]
    pub connections: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub actions: Vec<LocationAction>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub activities: Vec<LocationActivity>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_unlocked: bool,
}

impl LocationConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            connections: Vec::new(),
            actions: Vec::new(),
            activities: Vec::new(),
            is_unlocked: false,
        }
    }
}

/// A combat zone and the location it hangs off.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneDefinition {
    pub parent: String,
    pub zone: ZoneConfig,
}

/// Every catalog the game needs, as loaded from disk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentBundle {
    pub config: GameConfig,
    pub skills: Vec<SkillDefinition>,
    pub items: Vec<ItemDefinition>,
    pub enemies: Vec<EnemyTemplate>,
    pub location_types: Vec<LocationType>,
    pub locations: Vec<LocationConfig>,
    pub zones: Vec<ZoneDefinition>,
    /// Location the hero starts in.
    pub start_location: Option<String>,
}
