//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use std::fmt;

use thiserror::Error;

/// A single field-level constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Domain-specific errors
///
/// These errors represent rejected input and business rule violations.
/// They are independent of the web/infrastructure layer; the HTTP status
/// for each variant is decided in `crate::error`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// One or more field constraints failed before anything was persisted
    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    /// Input was well-formed but breaks a domain rule
    #[error("{0}")]
    BusinessRule(String),

    /// A referenced customer or credit does not exist
    #[error("{0}")]
    NotFound(String),

    /// An identifier could not be parsed
    #[error("{0}")]
    MalformedIdentifier(String),

    /// A uniqueness constraint was violated
    #[error("{0}")]
    Conflict(String),
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl DomainError {
    /// Unknown customer id
    pub fn customer_not_found(id: i64) -> Self {
        Self::NotFound(format!("Id {} not found", id))
    }

    /// The supplied customer does not own the credit.
    ///
    /// The message is deliberately generic so callers cannot tell whether a
    /// credit code exists under another customer.
    pub fn ownership_mismatch() -> Self {
        Self::BusinessRule("Contact admin".to_string())
    }

    /// Human-readable detail lines, one per violation
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::Validation(violations) => {
                violations.iter().map(|v| v.message.clone()).collect()
            }
            Self::BusinessRule(msg)
            | Self::NotFound(msg)
            | Self::MalformedIdentifier(msg)
            | Self::Conflict(msg) => vec![msg.clone()],
        }
    }

    /// Check if this is a conflict error
    pub fn is_conflict_error(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
