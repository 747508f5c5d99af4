use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised while producing the next enemy group.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncounterError {
    #[error("combat zone '{zone}' is locked")]
    ZoneLocked { zone: String },

    #[error("challenge zone '{zone}' is already finished")]
    ZoneFinished { zone: String },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ZoneLocked { .. } => ErrorSeverity::Recoverable,
            Self::ZoneFinished { .. } => ErrorSeverity::Validation,
            Self::Oracle(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZoneLocked { .. } => "ENCOUNTER_ZONE_LOCKED",
            Self::ZoneFinished { .. } => "ENCOUNTER_ZONE_FINISHED",
            Self::Oracle(e) => e.error_code(),
        }
    }
}
