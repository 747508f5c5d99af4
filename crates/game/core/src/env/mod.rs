//! Traits describing the external collaborators and read-only content.
//!
//! Oracles expose the skill registry, the character facade, enemy templates
//! and location types. The [`Env`] aggregate bundles them so the resolvers
//! can reach everything they need without hard coupling to concrete
//! implementations. Randomness is passed separately as a [`RollStream`]
//! scoped to a single resolution call.
mod character;
mod enemies;
mod error;
mod location_types;
mod rng;
mod skills;

pub use character::CharacterOracle;
pub use enemies::{EnemyOracle, EnemyTemplate, LootEntry};
pub use error::OracleError;
pub use location_types::{LocationType, LocationTypeOracle, TypeStage};
pub use rng::{PcgRng, RngOracle, RollStream, compute_seed};
pub use skills::SkillOracle;

/// Aggregates read-only oracles required by the resolvers.
///
/// Every oracle is optional so callers only wire what a given resolution
/// needs; accessors report a missing oracle as [`OracleError`].
#[derive(Clone, Copy)]
pub struct Env<'a> {
    skills: Option<&'a dyn SkillOracle>,
    character: Option<&'a dyn CharacterOracle>,
    enemies: Option<&'a dyn EnemyOracle>,
    location_types: Option<&'a dyn LocationTypeOracle>,
}

impl<'a> Env<'a> {
    pub fn empty() -> Self {
        Self {
            skills: None,
            character: None,
            enemies: None,
            location_types: None,
        }
    }

    pub fn with_skills(mut self, skills: &'a dyn SkillOracle) -> Self {
        self.skills = Some(skills);
        self
    }

    pub fn with_character(mut self, character: &'a dyn CharacterOracle) -> Self {
        self.character = Some(character);
        self
    }

    pub fn with_enemies(mut self, enemies: &'a dyn EnemyOracle) -> Self {
        self.enemies = Some(enemies);
        self
    }

    pub fn with_location_types(mut self, location_types: &'a dyn LocationTypeOracle) -> Self {
        self.location_types = Some(location_types);
        self
    }

    /// Returns the SkillOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SkillsNotAvailable` if no skill oracle was provided.
    pub fn skills(&self) -> Result<&'a dyn SkillOracle, OracleError> {
        self.skills.ok_or(OracleError::SkillsNotAvailable)
    }

    /// Returns the CharacterOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::CharacterNotAvailable` if no character oracle was provided.
    pub fn character(&self) -> Result<&'a dyn CharacterOracle, OracleError> {
        self.character.ok_or(OracleError::CharacterNotAvailable)
    }

    /// Returns the EnemyOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::EnemiesNotAvailable` if no enemy oracle was provided.
    pub fn enemies(&self) -> Result<&'a dyn EnemyOracle, OracleError> {
        self.enemies.ok_or(OracleError::EnemiesNotAvailable)
    }

    /// Returns the LocationTypeOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::LocationTypesNotAvailable` if no location type oracle was provided.
    pub fn location_types(&self) -> Result<&'a dyn LocationTypeOracle, OracleError> {
        self.location_types
            .ok_or(OracleError::LocationTypesNotAvailable)
    }
}

impl Default for Env<'_> {
    fn default() -> Self {
        Self::empty()
    }
}
