//! Common error infrastructure for jrpg-core.
//!
//! Domain-specific errors (`InventoryError`, `PartyError`, `EquipError`) live
//! next to the operations they reject. This module only holds the shared
//! classification used by callers that need to decide how loudly to report a
//! rejection.
//!
//! Nothing in the battle engine is fatal: a rejected selection is logged and
//! the engine stays in the same state. Menu and shop hosts can surface the
//! error text to the player instead.

/// Severity level of an error, used for categorization and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request could succeed later or with a different choice.
    ///
    /// Examples: inventory full, not enough gold
    Recoverable,

    /// The request referenced something that does not exist or does not fit.
    ///
    /// Examples: unknown item name, slot index out of range
    Validation,

    /// Bookkeeping went out of sync; indicates a host or engine bug.
    ///
    /// Examples: an item vanished between lookup and removal
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all jrpg-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for categorization in logs and for tests.
    fn error_code(&self) -> &'static str;
}

/// Emits a log line for a rejected request at a level matching its severity.
pub(crate) fn log_rejection(context: &'static str, error: &impl GameError) {
    match error.severity() {
        ErrorSeverity::Internal => tracing::warn!(
            code = error.error_code(),
            severity = error.severity().as_str(),
            "{context}: {error}"
        ),
        _ => tracing::debug!(
            code = error.error_code(),
            severity = error.severity().as_str(),
            "{context}: {error}"
        ),
    }
}
