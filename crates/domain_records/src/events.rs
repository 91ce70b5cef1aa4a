//! Notification events
//!
//! Each mutating handler emits exactly one event correlated with its effect
//! (policy issuance excepted, which returns the encoded policy instead).
//! Event payloads are part of the wire format.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A notification event dispatched through the ledger's `emit` primitive.
pub trait LedgerEvent: Serialize {
    /// The event name clients subscribe to.
    const NAME: &'static str;

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// A new accident report was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccidentEvent {
    pub accident_id: String,
    /// `"<longitude>, <latitude>"`, both at 6 decimal places.
    pub location: String,
}

impl LedgerEvent for NewAccidentEvent {
    const NAME: &'static str = "NewAccidentEvent";
}

/// An accident report changed; `reason` describes the last applied effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportUpdateEvent {
    pub accident_id: String,
    pub reason: String,
}

impl LedgerEvent for ReportUpdateEvent {
    const NAME: &'static str = "ReportUpdateEvent";
}

/// A repair quote was requested for an insured vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestForQuoteEvent {
    pub request_id: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub damage_description: String,
}

impl LedgerEvent for RequestForQuoteEvent {
    const NAME: &'static str = "RequestForQuoteEvent";
}

/// A repair shop answered a quote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuoteOfferEvent {
    pub request_id: String,
    pub quote_id: String,
    /// Pre-tax sum of the quote's estimate lines.
    pub total_estimate: Decimal,
}

impl LedgerEvent for NewQuoteOfferEvent {
    const NAME: &'static str = "NewQuoteOfferEvent";
}

/// A claim was sent to the defendant's insurer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClaimEvent {
    pub claim_id: String,
    pub claimant_policy_id: String,
    pub defendant_policy_id: String,
    /// Tax-inclusive total of the referenced repair quote.
    pub cost_of_repair: Decimal,
}

impl LedgerEvent for NewClaimEvent {
    const NAME: &'static str = "NewClaimEvent";
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_event_names() {
        assert_eq!(NewAccidentEvent::NAME, "NewAccidentEvent");
        assert_eq!(ReportUpdateEvent::NAME, "ReportUpdateEvent");
        assert_eq!(RequestForQuoteEvent::NAME, "RequestForQuoteEvent");
        assert_eq!(NewQuoteOfferEvent::NAME, "NewQuoteOfferEvent");
        assert_eq!(NewClaimEvent::NAME, "NewClaimEvent");
    }

    #[test]
    fn test_payload_field_names() {
        let event = NewClaimEvent {
            claim_id: "1".to_string(),
            claimant_policy_id: "USA-AX203-3459802".to_string(),
            defendant_policy_id: "USA-AS204-1042919".to_string(),
            cost_of_repair: dec!(450),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["claimId"], "1");
        assert_eq!(json["claimantPolicyId"], "USA-AX203-3459802");
        assert_eq!(json["defendantPolicyId"], "USA-AS204-1042919");
        assert!(json.get("costOfRepair").is_some());
    }
}
