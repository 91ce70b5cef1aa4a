//! Record schema for the claims ledger
//!
//! Typed definitions for everything the ledger stores or emits:
//! - Participants: Registrant, Insurer, EmergencyServices, RepairShop
//! - Assets: Vehicle, AccidentReport, QuoteRequest, RepairQuote,
//!   InsurancePolicy, InsuranceClaim
//! - Embedded value objects: Address, Location, Goods, Estimate
//! - Notification events correlated with each handler's effect
//!
//! All records are immutable-by-replacement: a put under an existing key
//! overwrites it, and nothing is ever deleted. Cross-entity links are stored
//! as the target's composite key string - a weak reference carrying lookup
//! rights only. The serialized field names (including `$class` tags) are the
//! wire format and are pinned by `serde(rename)` attributes.

pub mod assets;
pub mod concepts;
pub mod error;
pub mod events;
pub mod participants;
pub mod record;

pub use assets::{
    AccidentReport, AccidentStatus, AssetEntry, ClaimStatus, InsuranceClaim, InsurancePolicy,
    QuoteRequest, RepairQuote, Vehicle,
};
pub use concepts::{Address, Estimate, EstimateKind, Goods, Location};
pub use error::RecordError;
pub use events::{
    LedgerEvent, NewAccidentEvent, NewClaimEvent, NewQuoteOfferEvent, ReportUpdateEvent,
    RequestForQuoteEvent,
};
pub use participants::{Company, EmergencyServices, Insurer, LegalEntity, Registrant, RepairShop};
pub use record::Record;
