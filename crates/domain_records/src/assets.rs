//! Asset records
//!
//! The workflow's stateful records. Only `AccidentReport` supports
//! post-creation mutation; every other asset is written exactly once by its
//! owning handler and never removed. The `occuredAt` and `autorisedBy`
//! spellings below are the original wire format and are kept verbatim.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::EntityClass;

use crate::concepts::{Estimate, Goods, Location};
use crate::error::RecordError;
use crate::record::Record;

/// Registered vehicle, owned by a registrant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "$class")]
    pub class: EntityClass,
    #[serde(rename = "registrationNumber")]
    pub registration_number: String,
    #[serde(rename = "licencePlate")]
    pub licence_plate: String,
    #[serde(rename = "dateFirstAdmission")]
    pub date_first_admission: DateTime<Utc>,
    #[serde(rename = "dateAscription")]
    pub date_ascription: DateTime<Utc>,
    /// Registrant reference key.
    pub owner: String,
    pub make: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color: Option<String>,
    #[serde(rename = "maxMass", skip_serializing_if = "Option::is_none", default)]
    pub max_mass: Option<u32>,
    #[serde(rename = "maxSeating")]
    pub max_seating: u32,
}

impl Record for Vehicle {
    const CLASS: EntityClass = EntityClass::Vehicle;

    fn natural_id(&self) -> &str {
        &self.registration_number
    }
}

/// Lifecycle of an accident report.
///
/// `Resolved` is declared in the data model but no operation currently
/// transitions into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccidentStatus {
    New,
    Responding,
    Resolved,
}

/// Report of a road accident, the mutable hub of the workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentReport {
    #[serde(rename = "$class")]
    pub class: EntityClass,
    #[serde(rename = "accidentId")]
    pub accident_id: String,
    #[serde(rename = "occuredAt")]
    pub occurred_at: DateTime<Utc>,
    pub status: AccidentStatus,
    pub location: Location,
    #[serde(
        rename = "accidentDescription",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub description: Option<String>,
    #[serde(rename = "involvedGoods", skip_serializing_if = "Option::is_none", default)]
    pub involved_goods: Option<Goods>,
    /// EmergencyServices reference key, set at most once.
    #[serde(rename = "respondingERS", skip_serializing_if = "Option::is_none", default)]
    pub responding_ers: Option<String>,
}

impl AccidentReport {
    /// Creates a fresh report in the `NEW` state.
    pub fn new(accident_id: impl Into<String>, occurred_at: DateTime<Utc>, location: Location) -> Self {
        Self {
            class: EntityClass::AccidentReport,
            accident_id: accident_id.into(),
            occurred_at,
            status: AccidentStatus::New,
            location,
            description: None,
            involved_goods: None,
            responding_ers: None,
        }
    }

    /// Assigns the responding emergency services and moves the report to
    /// `RESPONDING`. A second assignment fails without mutating anything.
    pub fn assign_responder(&mut self, ers_ref: impl Into<String>) -> Result<(), RecordError> {
        if let Some(existing) = &self.responding_ers {
            return Err(RecordError::ResponderAlreadyAssigned {
                existing: existing.clone(),
            });
        }
        self.responding_ers = Some(ers_ref.into());
        self.status = AccidentStatus::Responding;
        Ok(())
    }

    /// Adds a vehicle reference to the involved-goods set.
    pub fn record_vehicle(&mut self, vehicle_ref: impl Into<String>) {
        match &mut self.involved_goods {
            Some(goods) => goods.push(vehicle_ref),
            None => self.involved_goods = Some(Goods::single(vehicle_ref)),
        }
    }

    /// True when the given vehicle reference is a member of the
    /// involved-goods set.
    pub fn involves(&self, vehicle_ref: &str) -> bool {
        self.involved_goods
            .as_ref()
            .is_some_and(|goods| goods.contains(vehicle_ref))
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }
}

impl Record for AccidentReport {
    const CLASS: EntityClass = EntityClass::AccidentReport;

    fn natural_id(&self) -> &str {
        &self.accident_id
    }
}

/// Request for a repair quote, linking an accident to an insurance policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(rename = "$class")]
    pub class: EntityClass,
    #[serde(rename = "requestId")]
    pub request_id: String,
    /// AccidentReport reference key.
    #[serde(rename = "accidentReport")]
    pub accident_report: String,
    /// InsurancePolicy reference key.
    #[serde(rename = "vehicleInsurance")]
    pub vehicle_insurance: String,
    #[serde(rename = "damageDescription")]
    pub damage_description: String,
}

impl QuoteRequest {
    pub fn new(
        request_id: impl Into<String>,
        accident_report: impl Into<String>,
        vehicle_insurance: impl Into<String>,
        damage_description: impl Into<String>,
    ) -> Self {
        Self {
            class: EntityClass::QuoteRequest,
            request_id: request_id.into(),
            accident_report: accident_report.into(),
            vehicle_insurance: vehicle_insurance.into(),
            damage_description: damage_description.into(),
        }
    }
}

impl Record for QuoteRequest {
    const CLASS: EntityClass = EntityClass::QuoteRequest;

    fn natural_id(&self) -> &str {
        &self.request_id
    }
}

/// A repair shop's priced answer to a quote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairQuote {
    #[serde(rename = "$class")]
    pub class: EntityClass,
    #[serde(rename = "quoteId")]
    pub quote_id: String,
    /// QuoteRequest reference key.
    #[serde(rename = "quoteRequest")]
    pub quote_request: String,
    /// RepairShop reference key.
    pub estimator: String,
    pub estimates: Vec<Estimate>,
    #[serde(rename = "totalParts")]
    pub total_parts: Decimal,
    #[serde(rename = "totalLabor")]
    pub total_labor: Decimal,
    #[serde(rename = "totalRefinish")]
    pub total_refinish: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl RepairQuote {
    /// Builds a quote from its estimate lines, deriving the per-category
    /// totals and the tax-inclusive grand total:
    /// `total = (sum of totalCost) * (1 + tax/100)`, `tax` in `[0, 100]`.
    pub fn from_estimates(
        quote_id: impl Into<String>,
        quote_request: impl Into<String>,
        estimator: impl Into<String>,
        estimates: Vec<Estimate>,
        tax: Decimal,
    ) -> Result<Self, RecordError> {
        if tax < Decimal::ZERO || tax > Decimal::ONE_HUNDRED {
            return Err(RecordError::TaxOutOfRange { tax });
        }

        let total_parts: Decimal = estimates.iter().map(|e| e.cost_of_parts).sum();
        let total_labor: Decimal = estimates.iter().map(|e| e.cost_of_labor).sum();
        let total_refinish: Decimal = estimates.iter().map(|e| e.cost_of_refinish).sum();
        let estimate_total: Decimal = estimates.iter().map(|e| e.total_cost).sum();
        let total = estimate_total * (Decimal::ONE + tax / Decimal::ONE_HUNDRED);

        Ok(Self {
            class: EntityClass::RepairQuote,
            quote_id: quote_id.into(),
            quote_request: quote_request.into(),
            estimator: estimator.into(),
            estimates,
            total_parts,
            total_labor,
            total_refinish,
            tax,
            total,
        })
    }

    /// Pre-tax sum of the estimate lines' total costs.
    pub fn estimate_total(&self) -> Decimal {
        self.estimates.iter().map(|e| e.total_cost).sum()
    }
}

impl Record for RepairQuote {
    const CLASS: EntityClass = EntityClass::RepairQuote;

    fn natural_id(&self) -> &str {
        &self.quote_id
    }
}

/// Vehicle insurance policy, identified by the composed
/// `countryCode-insurerCode-policyNumber` string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    #[serde(rename = "$class")]
    pub class: EntityClass,
    #[serde(rename = "policyId")]
    pub policy_id: String,
    #[serde(rename = "autorisedBy")]
    pub authorised_by: String,
    #[serde(rename = "validFrom")]
    pub valid_from: DateTime<Utc>,
    #[serde(rename = "validTo")]
    pub valid_to: DateTime<Utc>,
    /// Vehicle reference key.
    #[serde(rename = "registeredVehicle")]
    pub registered_vehicle: String,
    #[serde(rename = "countryCode")]
    pub country_code: String,
    #[serde(rename = "insurerCode")]
    pub insurer_code: String,
    #[serde(rename = "policyNumber")]
    pub policy_number: i64,
    #[serde(rename = "vehicleCategory")]
    pub vehicle_category: String,
    #[serde(rename = "vehicleMake")]
    pub vehicle_make: String,
    pub coverage: Vec<String>,
    /// Registrant reference key.
    #[serde(rename = "policyHolder")]
    pub policy_holder: String,
    /// Insurer reference key.
    #[serde(rename = "issuedBy")]
    pub issued_by: String,
}

impl InsurancePolicy {
    /// Composes the natural policy identifier, e.g. `USA-AX203-3459802`.
    pub fn compose_id(country_code: &str, insurer_code: &str, policy_number: i64) -> String {
        format!("{country_code}-{insurer_code}-{policy_number}")
    }
}

impl Record for InsurancePolicy {
    const CLASS: EntityClass = EntityClass::InsurancePolicy;

    fn natural_id(&self) -> &str {
        &self.policy_id
    }
}

/// Lifecycle of an insurance claim.
///
/// Only `New` is currently reachable; the remaining states are declared for
/// the data model without producing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClaimStatus {
    New,
    Accepted,
    Declined,
    Resolved,
}

/// Claim sent from one policy holder to another over an accident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceClaim {
    #[serde(rename = "$class")]
    pub class: EntityClass,
    #[serde(rename = "claimId")]
    pub claim_id: String,
    #[serde(rename = "dateOfClaim")]
    pub date_of_claim: DateTime<Utc>,
    pub status: ClaimStatus,
    /// AccidentReport reference key.
    #[serde(rename = "accidentReport")]
    pub accident_report: String,
    /// InsurancePolicy reference key of the claiming side.
    pub claimant: String,
    /// InsurancePolicy reference key of the defending side.
    pub defendant: String,
    /// RepairQuote reference key pricing the repair.
    #[serde(rename = "costOfRepair")]
    pub cost_of_repair: String,
}

impl InsuranceClaim {
    pub fn new(
        claim_id: impl Into<String>,
        date_of_claim: DateTime<Utc>,
        accident_report: impl Into<String>,
        claimant: impl Into<String>,
        defendant: impl Into<String>,
        cost_of_repair: impl Into<String>,
    ) -> Self {
        Self {
            class: EntityClass::InsuranceClaim,
            claim_id: claim_id.into(),
            date_of_claim,
            status: ClaimStatus::New,
            accident_report: accident_report.into(),
            claimant: claimant.into(),
            defendant: defendant.into(),
            cost_of_repair: cost_of_repair.into(),
        }
    }
}

impl Record for InsuranceClaim {
    const CLASS: EntityClass = EntityClass::InsuranceClaim;

    fn natural_id(&self) -> &str {
        &self.claim_id
    }
}

/// One `{class, id}` pair in the fixture loader's result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    #[serde(rename = "$class")]
    pub class: EntityClass,
    #[serde(rename = "assetId")]
    pub asset_id: String,
}

impl AssetEntry {
    pub fn new(class: EntityClass, asset_id: impl Into<String>) -> Self {
        Self {
            class,
            asset_id: asset_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn report() -> AccidentReport {
        AccidentReport::new(
            "1534180781",
            Utc.with_ymd_and_hms(2018, 8, 3, 10, 20, 20).unwrap(),
            Location::new(52.092051, 5.066413),
        )
    }

    #[test]
    fn test_new_report_starts_new() {
        let report = report();
        assert_eq!(report.status, AccidentStatus::New);
        assert!(report.responding_ers.is_none());
        assert!(report.involved_goods.is_none());
    }

    #[test]
    fn test_assign_responder_transitions_once() {
        let mut report = report();
        report
            .assign_responder("base.EmergencyServices#NYPD 34th Precinct")
            .unwrap();
        assert_eq!(report.status, AccidentStatus::Responding);

        let err = report
            .assign_responder("base.EmergencyServices#FDNY Engine 95")
            .unwrap_err();
        assert!(matches!(err, RecordError::ResponderAlreadyAssigned { .. }));
        assert_eq!(
            report.responding_ers.as_deref(),
            Some("base.EmergencyServices#NYPD 34th Precinct")
        );
    }

    #[test]
    fn test_record_vehicle_builds_goods() {
        let mut report = report();
        report.record_vehicle("base.Vehicle#A");
        report.record_vehicle("base.Vehicle#B");
        assert!(report.involves("base.Vehicle#A"));
        assert!(report.involves("base.Vehicle#B"));
        assert!(!report.involves("base.Vehicle#C"));
    }

    #[test]
    fn test_quote_totals() {
        use crate::concepts::EstimateKind;
        use rust_decimal_macros::dec;

        let estimates = vec![
            Estimate {
                class: EntityClass::Estimate,
                kind: EstimateKind::Repair,
                description: "Scratch removal".to_string(),
                cost_of_parts: dec!(30),
                cost_of_labor: dec!(70),
                cost_of_refinish: Decimal::ZERO,
                total_cost: dec!(100),
            },
            Estimate {
                class: EntityClass::Estimate,
                kind: EstimateKind::Replace,
                description: "Bumper".to_string(),
                cost_of_parts: dec!(150),
                cost_of_labor: dec!(50),
                cost_of_refinish: Decimal::ZERO,
                total_cost: dec!(200),
            },
        ];

        let quote = RepairQuote::from_estimates(
            "1000000001",
            "vehiclerepair.QuoteRequest#1",
            "base.RepairShop#USA Automotive NYC",
            estimates,
            dec!(50),
        )
        .unwrap();

        assert_eq!(quote.total_parts, dec!(180));
        assert_eq!(quote.total_labor, dec!(120));
        assert_eq!(quote.estimate_total(), dec!(300));
        assert_eq!(quote.total, dec!(450));
    }

    #[test]
    fn test_quote_tax_out_of_range() {
        use rust_decimal_macros::dec;

        let err = RepairQuote::from_estimates("1", "q", "s", vec![], dec!(150)).unwrap_err();
        assert!(matches!(err, RecordError::TaxOutOfRange { .. }));
    }

    #[test]
    fn test_policy_id_composition() {
        assert_eq!(
            InsurancePolicy::compose_id("USA", "AX203", 3459802),
            "USA-AX203-3459802"
        );
    }

    #[test]
    fn test_claim_starts_new() {
        let claim = InsuranceClaim::new(
            "1",
            Utc.with_ymd_and_hms(2018, 8, 10, 9, 0, 0).unwrap(),
            "accident.AccidentReport#1534180781",
            "insurance.InsurancePolicy#USA-AX203-3459802",
            "insurance.InsurancePolicy#USA-AS204-1042919",
            "vehiclerepair.RepairQuote#1000000001",
        );
        assert_eq!(claim.status, ClaimStatus::New);
    }
}
