//! Environmental hazard catalog.
//!
//! A location type ("dark", "narrow", "miasma", ...) declares up to three
//! severity stages. Each stage names the skill that mitigates it and the
//! stat effects it applies at full strength.

use crate::stats::StatEffects;

/// One severity stage of a location type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeStage {
    /// Skill whose level discounts this stage's effects.
    pub related_skill: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub effects: StatEffects,
}

/// Named environmental hazard with up to three stages.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationType {
    pub name: String,
    pub stages: Vec<TypeStage>,
}

impl LocationType {
    /// Stage by 1-based index.
    pub fn stage(&self, stage: u8) -> Option<&TypeStage> {
        let index = usize::from(stage).checked_sub(1)?;
        self.stages.get(index)
    }
}

/// Oracle providing location types by name.
pub trait LocationTypeOracle {
    fn location_type(&self, name: &str) -> Option<&LocationType>;
}

impl LocationTypeOracle for std::collections::HashMap<String, LocationType> {
    fn location_type(&self, name: &str) -> Option<&LocationType> {
        self.get(name)
    }
}
