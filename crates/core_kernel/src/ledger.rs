//! Ledger collaborator port
//!
//! The engine consumes the underlying versioned key-value ledger only
//! through three primitives: `get`, `put`, and `emit`. Storage, ordering,
//! replication, endorsement, and commit/rollback all live behind this port;
//! isolation between concurrent invocations and atomic commit of one
//! invocation's writes are the collaborator's guarantees, not ours. The
//! engine's only obligation is to issue no `put` before its validation
//! pipeline has fully succeeded for the invocation.
//!
//! `MemoryLedger` is the reference adapter used by tests and demos, in the
//! manner of an in-memory mock port.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors raised by the ledger collaborator.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("get failed for key {key}: {reason}")]
    Get { key: String, reason: String },

    #[error("put failed for key {key}: {reason}")]
    Put { key: String, reason: String },

    #[error("emit failed for event {name}: {reason}")]
    Emit { name: String, reason: String },
}

/// The three-primitive contract of the external ledger.
///
/// All calls are issued sequentially by a handler; any failure aborts the
/// invocation immediately. The engine performs no retries and has no
/// timeout or cancellation concept - those belong to the collaborator or
/// its caller.
#[async_trait]
pub trait LedgerPort: Send + Sync {
    /// Reads the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Writes `value` under `key`, overwriting any existing value.
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Dispatches a named notification event with an opaque payload.
    async fn emit(&self, name: &str, payload: Vec<u8>) -> Result<(), LedgerError>;
}

/// An event captured by [`MemoryLedger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedEvent {
    pub name: String,
    pub payload: Vec<u8>,
}

impl EmittedEvent {
    /// Decodes the payload as JSON.
    pub fn payload_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}

/// In-memory reference implementation of [`LedgerPort`].
///
/// Stores state in a map and records every emitted event so tests can
/// assert on notification contents. Puts overwrite by replacement, exactly
/// like the real collaborator.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: RwLock<HashMap<String, Vec<u8>>>,
    events: RwLock<Vec<EmittedEvent>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all events emitted so far, in order.
    pub async fn events(&self) -> Vec<EmittedEvent> {
        self.events.read().await.clone()
    }

    /// Returns the most recently emitted event, if any.
    pub async fn last_event(&self) -> Option<EmittedEvent> {
        self.events.read().await.last().cloned()
    }

    /// Returns true if a value is stored under `key`.
    pub async fn contains(&self, key: &str) -> bool {
        self.state.read().await.contains_key(key)
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.state.read().await.len()
    }

    /// True when nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.is_empty()
    }
}

#[async_trait]
impl LedgerPort for MemoryLedger {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.state.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.state.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn emit(&self, name: &str, payload: Vec<u8>) -> Result<(), LedgerError> {
        self.events.write().await.push(EmittedEvent {
            name: name.to_string(),
            payload,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_absent_is_none() {
        let ledger = MemoryLedger::new();
        assert_eq!(ledger.get("base.Vehicle#X").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let ledger = MemoryLedger::new();
        ledger.put("k", b"v".to_vec()).await.unwrap();
        assert_eq!(ledger.get("k").await.unwrap(), Some(b"v".to_vec()));
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let ledger = MemoryLedger::new();
        ledger.put("k", b"first".to_vec()).await.unwrap();
        ledger.put("k", b"second".to_vec()).await.unwrap();
        assert_eq!(ledger.get("k").await.unwrap(), Some(b"second".to_vec()));
        assert_eq!(ledger.len().await, 1);
    }

    #[tokio::test]
    async fn test_emit_captures_events_in_order() {
        let ledger = MemoryLedger::new();
        ledger.emit("First", b"1".to_vec()).await.unwrap();
        ledger.emit("Second", b"2".to_vec()).await.unwrap();

        let events = ledger.events().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "First");
        assert_eq!(ledger.last_event().await.unwrap().name, "Second");
    }
}
