//! Transaction engine for the claims ledger
//!
//! Turns string-encoded operation invocations into validated,
//! referentially-consistent record mutations plus correlated notification
//! events. An invocation carries an operation name and an ordered list of
//! string arguments; the engine validates them, resolves every referenced
//! record against the ledger collaborator, applies the operation's business
//! rules, writes the resulting records, and emits the correlated event.
//!
//! Writes only start once every rule check of the invocation has succeeded;
//! atomicity of the writes themselves is the ledger collaborator's
//! guarantee.

pub mod args;
pub mod dispatch;
pub mod fixtures;
pub mod gateway;
pub mod handlers;

pub use dispatch::Engine;
pub use gateway::LedgerGateway;
