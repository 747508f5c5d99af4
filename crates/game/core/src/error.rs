//! Common error infrastructure for realm-core.
//!
//! Domain errors (`OracleError`, `ActionError`) live next to the code that
//! raises them. This module holds the shared severity classification, the
//! [`GameError`] trait every error implements, and [`ContentError`], which
//! covers malformed static content detected while building zones, actions
//! and activities.
//!
//! Runtime outcomes such as "conditions not met" or "random failure" are not
//! errors. They are reported through the resolvers' outcome types.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry later or with a different choice.
    ///
    /// Examples: action still locked, required gate not met yet
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown enemy template, unknown location type
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - content is malformed and the game cannot run.
    ///
    /// Examples: combat zone with no enemy source
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates broken content or a bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all realm-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable upper-snake identifiers used in logs and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Configuration errors found while building static content.
///
/// These abort content loading. Each variant names the offending zone,
/// action or activity so the content author can find it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    /// Zone has neither a sequence, a pool, nor an enemy list.
    #[error("combat zone '{zone}' has no enemy source (sequence, pool or enemy list)")]
    NoEnemySource { zone: String },

    /// Zone declares a location type stage outside 1..=3.
    #[error("combat zone '{zone}' uses stage {stage} of location type '{kind}'; stages run 1..=3")]
    InvalidTypeStage {
        zone: String,
        kind: String,
        stage: u8,
    },

    /// Activity is neither infinite nor restricted to a time window.
    #[error("activity '{activity}' in '{location}' is not infinite and has no availability window")]
    MissingAvailability { location: String, activity: String },

    /// Activity has no base skill to scale with.
    #[error("activity '{activity}' in '{location}' scales with skill but names no base skill")]
    NoBaseSkill { location: String, activity: String },

    /// Zone's parent location does not exist.
    #[error("combat zone '{zone}' names unknown parent location '{parent}'")]
    UnknownParent { zone: String, parent: String },

    /// The configured start location does not exist.
    #[error("start location '{location}' does not exist")]
    UnknownStartLocation { location: String },

    /// Two definitions share the same name.
    #[error("duplicate {kind} '{name}'")]
    Duplicate { kind: &'static str, name: String },
}

impl GameError for ContentError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use ContentError::*;
        match self {
            NoEnemySource { .. } => "CONTENT_NO_ENEMY_SOURCE",
            InvalidTypeStage { .. } => "CONTENT_INVALID_TYPE_STAGE",
            MissingAvailability { .. } => "CONTENT_MISSING_AVAILABILITY",
            NoBaseSkill { .. } => "CONTENT_NO_BASE_SKILL",
            UnknownParent { .. } => "CONTENT_UNKNOWN_PARENT",
            UnknownStartLocation { .. } => "CONTENT_UNKNOWN_START_LOCATION",
            Duplicate { .. } => "CONTENT_DUPLICATE",
        }
    }
}
