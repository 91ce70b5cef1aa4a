//! Invocation dispatch
//!
//! Routes `(operationName, args)` pairs to their handlers. The success
//! result is the emitted event payload or the encoded record, depending on
//! the operation; any failure surfaces as a single descriptive error.

use std::sync::Arc;

use core_kernel::{EngineError, IdSource, LedgerPort, UuidIdSource};

use crate::fixtures;
use crate::gateway::LedgerGateway;
use crate::handlers::{accident, claim, policy, query, repair};

/// The transaction engine: a gateway to the ledger collaborator plus an
/// identifier source for create operations.
pub struct Engine {
    gateway: LedgerGateway,
    ids: Arc<dyn IdSource>,
}

impl Engine {
    /// Creates an engine with the production (UUID v7) identifier source.
    pub fn new(port: Arc<dyn LedgerPort>) -> Self {
        Self::with_id_source(port, Arc::new(UuidIdSource::new()))
    }

    /// Creates an engine with an explicit identifier source, as tests and
    /// demos do for stable keys.
    pub fn with_id_source(port: Arc<dyn LedgerPort>, ids: Arc<dyn IdSource>) -> Self {
        Self {
            gateway: LedgerGateway::new(port),
            ids,
        }
    }

    /// The engine's gateway, for callers that need direct record access.
    pub fn gateway(&self) -> &LedgerGateway {
        &self.gateway
    }

    /// Executes one operation invocation against the ledger.
    pub async fn invoke(&self, operation: &str, args: &[String]) -> Result<Vec<u8>, EngineError> {
        tracing::debug!(operation, argc = args.len(), "invoking");

        let result = match operation {
            "setupAssets" => fixtures::setup_assets(&self.gateway).await,
            "readAssetData" => query::read_asset_data(&self.gateway, args).await,
            "reportAccident" => {
                accident::report_accident(&self.gateway, self.ids.as_ref(), args).await
            }
            "updateReport" => accident::update_report(&self.gateway, args).await,
            "assignResponder" => accident::assign_responder(&self.gateway, args).await,
            "updateDescription" => accident::update_description(&self.gateway, args).await,
            "addVehicle" => accident::add_vehicle(&self.gateway, args).await,
            "requestQuote" => repair::request_quote(&self.gateway, self.ids.as_ref(), args).await,
            "offerQuote" => repair::offer_quote(&self.gateway, self.ids.as_ref(), args).await,
            "issuePolicy" => policy::issue_policy(&self.gateway, args).await,
            "sendClaim" => claim::send_claim(&self.gateway, self.ids.as_ref(), args).await,
            other => Err(EngineError::UnknownOperation(other.to_string())),
        };

        match &result {
            Ok(_) => tracing::info!(operation, "invocation succeeded"),
            Err(error) => tracing::warn!(operation, %error, "invocation failed"),
        }
        result
    }
}
