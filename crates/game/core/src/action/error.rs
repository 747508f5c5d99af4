use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::reward::ActionRef;

/// Reasons an action cannot be started or completed.
///
/// Failing the action's conditions or its roll is not an error; those are
/// reported as [`super::OutcomeKind`] values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("action '{}' in '{}' is locked", .0.action, .0.location)]
    Locked(ActionRef),

    #[error("action '{}' in '{}' is already finished", .0.action, .0.location)]
    Finished(ActionRef),

    #[error("requirements for action '{}' in '{}' are not met", .0.action, .0.location)]
    RequirementsNotMet(ActionRef),

    #[error("attempt for '{}' cannot complete action '{}'", found.action, expected.action)]
    AttemptMismatch { expected: ActionRef, found: ActionRef },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Locked(_) | Self::RequirementsNotMet(_) => ErrorSeverity::Recoverable,
            Self::Finished(_) | Self::AttemptMismatch { .. } => ErrorSeverity::Validation,
            Self::Oracle(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Locked(_) => "ACTION_LOCKED",
            Self::Finished(_) => "ACTION_FINISHED",
            Self::RequirementsNotMet(_) => "ACTION_REQUIREMENTS_NOT_MET",
            Self::AttemptMismatch { .. } => "ACTION_ATTEMPT_MISMATCH",
            Self::Oracle(e) => e.error_code(),
        }
    }
}
