//! Claim submission handler

use chrono::Utc;

use core_kernel::{EngineError, EntityClass, IdSource};
use domain_records::{
    AccidentReport, InsuranceClaim, InsurancePolicy, NewClaimEvent, Record, RepairQuote,
};

use crate::args::Args;
use crate::gateway::LedgerGateway;

/// Sends a claim from the claimant's insurer to the defendant's.
///
/// Arguments: accidentId, claimantPolicyId, defendantPolicyId,
/// repairQuoteId. Both policies' insured vehicles must be members of the
/// accident's involved-goods set. The claim starts in `NEW`, the terminal
/// state of this workflow.
pub async fn send_claim(
    gateway: &LedgerGateway,
    ids: &dyn IdSource,
    args: &[String],
) -> Result<Vec<u8>, EngineError> {
    let args = Args::exactly(args, 4)?;
    let accident_id = args.required(1, "accidentId")?;
    let claimant_policy_id = args.required(2, "claimantPolicyId")?;
    let defendant_policy_id = args.required(3, "defendantPolicyId")?;
    let repair_quote_id = args.required(4, "repairQuoteId")?;

    let report_key = AccidentReport::ref_for(accident_id);
    let report: AccidentReport = gateway.get(&report_key).await?;

    let claimant_key = InsurancePolicy::ref_for(claimant_policy_id);
    let claimant: InsurancePolicy = gateway.get(&claimant_key).await?;

    let defendant_key = InsurancePolicy::ref_for(defendant_policy_id);
    let defendant: InsurancePolicy = gateway.get(&defendant_key).await?;

    if !report.involves(&claimant.registered_vehicle) {
        return Err(EngineError::rule(format!(
            "insured vehicle of claimant is not involved in the accident: {}",
            claimant.registered_vehicle
        )));
    }
    if !report.involves(&defendant.registered_vehicle) {
        return Err(EngineError::rule(format!(
            "insured vehicle of defendant is not involved in the accident: {}",
            defendant.registered_vehicle
        )));
    }

    let quote_key = RepairQuote::ref_for(repair_quote_id);
    let quote: RepairQuote = gateway.get(&quote_key).await?;

    let claim_id = ids.allocate(EntityClass::InsuranceClaim);
    let claim = InsuranceClaim::new(
        &claim_id,
        Utc::now(),
        report_key.to_string(),
        claimant_key.to_string(),
        defendant_key.to_string(),
        quote_key.to_string(),
    );

    gateway.put(&claim).await?;
    tracing::info!(%claim_id, "insurance claim sent to defendant");

    gateway
        .emit(&NewClaimEvent {
            claim_id,
            claimant_policy_id: claimant_policy_id.to_string(),
            defendant_policy_id: defendant_policy_id.to_string(),
            cost_of_repair: quote.total,
        })
        .await
}
