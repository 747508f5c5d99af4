//! Unified error type surfaced by the session API.
//!
//! Wraps failures from content loading and the core resolvers so callers can
//! bubble them up with consistent context.
use realm_core::{
    ActionError, ActionRef, ActivityError, ActivityRef, ContentError, EncounterError,
    ErrorSeverity, GameError, OracleError,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to load content")]
    Load(#[source] anyhow::Error),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Encounter(#[from] EncounterError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Activity(#[from] ActivityError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("unknown combat zone {0}")]
    UnknownZone(realm_core::ZoneId),

    #[error("unknown action '{}' in '{}'", .0.action, .0.location)]
    UnknownAction(ActionRef),

    #[error("unknown activity '{}' in '{}'", .0.activity, .0.location)]
    UnknownActivity(ActivityRef),

    #[error("activity '{}' in '{}' is locked", .0.activity, .0.location)]
    ActivityLocked(ActivityRef),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Load(_) => ErrorSeverity::Fatal,
            Self::Content(e) => e.severity(),
            Self::Encounter(e) => e.severity(),
            Self::Action(e) => e.severity(),
            Self::Activity(e) => e.severity(),
            Self::Oracle(e) => e.severity(),
            Self::UnknownZone(_) | Self::UnknownAction(_) | Self::UnknownActivity(_) => {
                ErrorSeverity::Validation
            }
            Self::ActivityLocked(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Load(_) => "RUNTIME_LOAD_FAILED",
            Self::Content(e) => e.error_code(),
            Self::Encounter(e) => e.error_code(),
            Self::Action(e) => e.error_code(),
            Self::Activity(e) => e.error_code(),
            Self::Oracle(e) => e.error_code(),
            Self::UnknownZone(_) => "RUNTIME_UNKNOWN_ZONE",
            Self::UnknownAction(_) => "RUNTIME_UNKNOWN_ACTION",
            Self::UnknownActivity(_) => "RUNTIME_UNKNOWN_ACTIVITY",
            Self::ActivityLocked(_) => "RUNTIME_ACTIVITY_LOCKED",
        }
    }
}
