//! Typed repository over the ledger port
//!
//! Records reference each other by composite key strings, not in-memory
//! pointers; every link is resolved on demand through this gateway. A
//! handler holding a key only has lookup rights - the ledger is the sole
//! owner of every record.

use std::sync::Arc;

use core_kernel::{EngineError, LedgerPort, RefKey};
use domain_records::{LedgerEvent, Record};

/// Repository/gateway over the three ledger primitives.
#[derive(Clone)]
pub struct LedgerGateway {
    port: Arc<dyn LedgerPort>,
}

impl LedgerGateway {
    pub fn new(port: Arc<dyn LedgerPort>) -> Self {
        Self { port }
    }

    /// Reads the raw encoded record under `key`; absence is a not-found
    /// error naming the key.
    pub async fn get_raw(&self, key: &RefKey) -> Result<Vec<u8>, EngineError> {
        let key_string = key.to_string();
        match self.port.get(&key_string).await? {
            Some(bytes) => Ok(bytes),
            None => Err(EngineError::not_found(key_string)),
        }
    }

    /// Resolves `key` to a typed record.
    pub async fn get<T: Record>(&self, key: &RefKey) -> Result<T, EngineError> {
        let bytes = self.get_raw(key).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// True when a record is stored under `key`.
    pub async fn exists(&self, key: &RefKey) -> Result<bool, EngineError> {
        Ok(self.port.get(&key.to_string()).await?.is_some())
    }

    /// Existence check that fails with a not-found error naming the key.
    pub async fn require(&self, key: &RefKey) -> Result<(), EngineError> {
        if self.exists(key).await? {
            Ok(())
        } else {
            Err(EngineError::not_found(key))
        }
    }

    /// Encodes `record` and stores it under its own key, overwriting any
    /// previous version. Returns the bytes written.
    pub async fn put<T: Record>(&self, record: &T) -> Result<Vec<u8>, EngineError> {
        let key = record.key().to_string();
        let bytes = serde_json::to_vec(record)?;
        self.port.put(&key, bytes.clone()).await?;
        tracing::debug!(%key, "record stored");
        Ok(bytes)
    }

    /// Encodes `event` and dispatches it under its event name. Returns the
    /// payload, which doubles as the invocation's success result.
    pub async fn emit<E: LedgerEvent>(&self, event: &E) -> Result<Vec<u8>, EngineError> {
        let payload = serde_json::to_vec(event)?;
        self.port.emit(E::NAME, payload.clone()).await?;
        tracing::debug!(event = E::NAME, "event emitted");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{EntityClass, MemoryLedger};
    use domain_records::{Address, LegalEntity, Registrant};

    fn registrant() -> Registrant {
        Registrant::new(
            "908123764",
            LegalEntity::Leaser,
            "AutoLease",
            Address::new("4300 Broadway", "New York, NY 10033"),
        )
    }

    #[tokio::test]
    async fn test_put_then_get_typed() {
        let ledger = Arc::new(MemoryLedger::new());
        let gateway = LedgerGateway::new(ledger);

        let stored = registrant();
        gateway.put(&stored).await.unwrap();

        let loaded: Registrant = gateway.get(&stored.key()).await.unwrap();
        assert_eq!(loaded, stored);
    }

    #[tokio::test]
    async fn test_get_missing_names_the_key() {
        let gateway = LedgerGateway::new(Arc::new(MemoryLedger::new()));
        let key = RefKey::new(EntityClass::Vehicle, "MISSING");

        let err = gateway.get::<domain_records::Vehicle>(&key).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("base.Vehicle#MISSING"));
    }

    #[tokio::test]
    async fn test_require_and_exists() {
        let ledger = Arc::new(MemoryLedger::new());
        let gateway = LedgerGateway::new(ledger);

        let stored = registrant();
        let key = stored.key();
        assert!(!gateway.exists(&key).await.unwrap());
        assert!(gateway.require(&key).await.is_err());

        gateway.put(&stored).await.unwrap();
        assert!(gateway.exists(&key).await.unwrap());
        assert!(gateway.require(&key).await.is_ok());
    }

    #[tokio::test]
    async fn test_emit_returns_payload() {
        let ledger = Arc::new(MemoryLedger::new());
        let gateway = LedgerGateway::new(ledger.clone());

        let event = domain_records::NewAccidentEvent {
            accident_id: "1".to_string(),
            location: "52.092051, 5.066413".to_string(),
        };
        let payload = gateway.emit(&event).await.unwrap();

        let captured = ledger.last_event().await.unwrap();
        assert_eq!(captured.name, "NewAccidentEvent");
        assert_eq!(captured.payload, payload);
    }
}
