//! Static content for the realm simulation.
//!
//! This crate houses the authored catalogs the rule engine reads:
//! - skills and items (reference targets only)
//! - enemy templates and location (hazard) types
//! - locations with their actions, activities and combat zones
//! - tuning constants (TOML)
//!
//! [`ContentRepository`] turns a loaded [`ContentBundle`] into an arena of
//! validated locations and zones addressed by typed ids, and implements the
//! core oracles over it. [`verify`] reports every dangling name reference.

pub mod catalog;
pub mod repository;
pub mod verify;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{ContentBundle, ItemDefinition, LocationConfig, SkillDefinition, ZoneDefinition};
pub use repository::{ActivityEntry, ContentRepository, Destination, Location};
pub use verify::{VerificationReport, VerifyError, verify};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EnemyLoader, ItemLoader, LocationTypeLoader, SkillLoader,
    WorldCatalog, WorldLoader,
};
