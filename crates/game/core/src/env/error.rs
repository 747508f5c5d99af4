//! Oracle access errors.
//!
//! Errors related to oracle availability and lookups by name.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when accessing oracle data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// SkillOracle is not available in the environment.
    #[error("SkillOracle not available")]
    SkillsNotAvailable,

    /// CharacterOracle is not available in the environment.
    #[error("CharacterOracle not available")]
    CharacterNotAvailable,

    /// EnemyOracle is not available in the environment.
    #[error("EnemyOracle not available")]
    EnemiesNotAvailable,

    /// LocationTypeOracle is not available in the environment.
    #[error("LocationTypeOracle not available")]
    LocationTypesNotAvailable,

    /// Enemy template was not found by name.
    #[error("enemy template '{0}' not found")]
    EnemyTemplateNotFound(String),

    /// Location type was not found by name.
    #[error("location type '{0}' not found")]
    LocationTypeNotFound(String),

    /// Location type exists but lacks the requested stage.
    #[error("location type '{kind}' has no stage {stage}")]
    TypeStageNotFound { kind: String, stage: u8 },
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            SkillsNotAvailable | CharacterNotAvailable | EnemiesNotAvailable
            | LocationTypesNotAvailable => ErrorSeverity::Fatal,

            EnemyTemplateNotFound(_) | LocationTypeNotFound(_) | TypeStageNotFound { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            SkillsNotAvailable => "ORACLE_SKILLS_NOT_AVAILABLE",
            CharacterNotAvailable => "ORACLE_CHARACTER_NOT_AVAILABLE",
            EnemiesNotAvailable => "ORACLE_ENEMIES_NOT_AVAILABLE",
            LocationTypesNotAvailable => "ORACLE_LOCATION_TYPES_NOT_AVAILABLE",
            EnemyTemplateNotFound(_) => "ORACLE_ENEMY_TEMPLATE_NOT_FOUND",
            LocationTypeNotFound(_) => "ORACLE_LOCATION_TYPE_NOT_FOUND",
            TypeStageNotFound { .. } => "ORACLE_TYPE_STAGE_NOT_FOUND",
        }
    }
}
