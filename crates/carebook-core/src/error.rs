//! # Error Types
//!
//! Domain-specific error types for carebook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError                                                              │
//! │  ├── Validation(ValidationError)  - malformed or missing input          │
//! │  ├── Reference(ReferenceError)    - ID points at nothing                │
//! │  └── InvariantViolated            - store consistency check failed      │
//! │                                                                         │
//! │  Faithful mode never produces Validation or Reference errors.           │
//! │  Strict mode produces them before any ID is allocated.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::ids::EntityKind;

// =============================================================================
// Core Error
// =============================================================================

/// Errors surfaced by the entity store.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed strict-mode validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A reference field names a record that does not exist.
    #[error("Reference error: {0}")]
    Reference(#[from] ReferenceError),

    /// A collection no longer satisfies the store's invariants.
    ///
    /// ## When This Occurs
    /// - Only from `EntityStore::check_invariants`. Append-only creation
    ///   cannot produce this; it exists to catch regressions in tests.
    #[error("{entity} invariant violated: {reason}")]
    InvariantViolated { entity: EntityKind, reason: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors (strict mode only).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field does not parse (non-numeric amount, malformed date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Amount is below zero.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Reference Error
// =============================================================================

/// A soft reference that strict mode refused to accept.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{field} '{id}' does not match any {target}")]
pub struct ReferenceError {
    /// The field on the record being created, e.g. `patientID`.
    pub field: String,
    /// The collection the ID was looked up in.
    pub target: EntityKind,
    /// The ID the caller supplied.
    pub id: String,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
