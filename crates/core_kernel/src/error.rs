//! Engine-wide error taxonomy
//!
//! Every handler validates eagerly and returns the first error encountered;
//! nothing is recovered internally and no retries are attempted. The
//! `Display` form of each variant is the single descriptive message surfaced
//! to the invoking client.

use std::fmt;

use thiserror::Error;

use crate::key::KeyError;
use crate::ledger::LedgerError;

/// Errors surfaced by operation invocations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The invocation carried the wrong number of arguments.
    #[error("incorrect number of arguments: expected {expected}, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },

    /// An argument was empty or failed a format/type parse.
    #[error("argument {position} ({name}) is invalid: {reason}")]
    ArgumentFormat {
        position: usize,
        name: String,
        reason: String,
    },

    /// A referenced record does not exist in the ledger.
    #[error("not found: {key}")]
    NotFound { key: String },

    /// An operation-specific business rule was violated.
    #[error("business rule violation: {0}")]
    RuleViolation(String),

    /// A reference key could not be built or parsed.
    #[error("reference error: {0}")]
    Key(#[from] KeyError),

    /// A record or event could not be encoded or decoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// A call to the ledger collaborator failed.
    #[error("ledger access failed: {0}")]
    Ledger(#[from] LedgerError),

    /// The operation name is not part of the contract.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
}

impl EngineError {
    /// Creates an ArgumentFormat error. Positions are 1-based, matching the
    /// positional argument schema of the invocation contract.
    pub fn format(position: usize, name: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::ArgumentFormat {
            position,
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a NotFound error naming the missing key.
    pub fn not_found(key: impl fmt::Display) -> Self {
        EngineError::NotFound {
            key: key.to_string(),
        }
    }

    /// Creates a RuleViolation with a human-readable reason.
    pub fn rule(reason: impl Into<String>) -> Self {
        EngineError::RuleViolation(reason.into())
    }

    /// Returns true if this error names a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::NotFound { .. })
    }

    /// Returns true if this error is a business-rule violation.
    pub fn is_rule_violation(&self) -> bool {
        matches!(self, EngineError::RuleViolation(_))
    }

    /// Returns true if this error came from argument validation
    /// (arity or format), before any record was resolved.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            EngineError::ArgumentCount { .. } | EngineError::ArgumentFormat { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::EntityClass;
    use crate::key::RefKey;

    #[test]
    fn test_not_found_names_the_key() {
        let key = RefKey::new(EntityClass::Vehicle, "ABC123");
        let err = EngineError::not_found(&key);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "not found: base.Vehicle#ABC123");
    }

    #[test]
    fn test_argument_format_message() {
        let err = EngineError::format(3, "occurredAt", "not a valid RFC3339 timestamp");
        assert!(err.is_argument_error());
        assert_eq!(
            err.to_string(),
            "argument 3 (occurredAt) is invalid: not a valid RFC3339 timestamp"
        );
    }

    #[test]
    fn test_rule_violation_predicate() {
        let err = EngineError::rule("tax must be between 0 and 100");
        assert!(err.is_rule_violation());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_key_error_converts() {
        let err: EngineError = RefKey::parse("no-separator").unwrap_err().into();
        assert!(matches!(err, EngineError::Key(_)));
    }
}
