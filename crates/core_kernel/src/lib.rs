//! Core Kernel - foundational types for the claims ledger engine
//!
//! This crate provides the building blocks shared by every other crate in the
//! workspace:
//! - Composite reference keys (`class#id`) addressing records in the ledger
//! - The entity class taxonomy of the wire format
//! - The ledger collaborator port (Get/Put/Emit) and an in-memory adapter
//! - Natural identifier allocation
//! - The engine-wide error taxonomy

pub mod class;
pub mod error;
pub mod idgen;
pub mod key;
pub mod ledger;

pub use class::EntityClass;
pub use error::EngineError;
pub use idgen::{IdSource, SequenceIdSource, UuidIdSource};
pub use key::{KeyError, RefKey};
pub use ledger::{EmittedEvent, LedgerError, LedgerPort, MemoryLedger};
