//! Record-level rule errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::EngineError;

/// Business rules enforced by the record types themselves.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// The single-responder invariant: `respondingERS` may be set at most
    /// once for the life of an accident report.
    #[error("Emergency Services already responding: {existing}")]
    ResponderAlreadyAssigned { existing: String },

    /// Tax percentage outside the permitted range.
    #[error("tax must be between 0 and 100, got {tax}")]
    TaxOutOfRange { tax: Decimal },
}

impl From<RecordError> for EngineError {
    fn from(err: RecordError) -> Self {
        EngineError::rule(err.to_string())
    }
}
