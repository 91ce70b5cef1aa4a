//! Operation handlers
//!
//! One handler per operation of the invocation contract. Each handler is a
//! function of the current ledger snapshot and the argument list: it runs
//! the validation pipeline, resolves referenced records through the
//! gateway, applies the operation's business rules, writes the target
//! record, and emits the correlated event. The first failure aborts the
//! handler; no write is issued before every rule check has passed.

pub mod accident;
pub mod claim;
pub mod policy;
pub mod query;
pub mod repair;
