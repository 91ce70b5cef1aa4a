//! Repair workflow handlers
//!
//! `requestQuote` opens a quote request against an accident and a policy;
//! `offerQuote` is a repair shop's priced answer.

use core_kernel::{EngineError, EntityClass, IdSource, RefKey};
use domain_records::{
    AccidentReport, Estimate, InsurancePolicy, NewQuoteOfferEvent, QuoteRequest, Record,
    RepairQuote, RepairShop, RequestForQuoteEvent, Vehicle,
};

use crate::args::Args;
use crate::gateway::LedgerGateway;

/// Requests a repair quote for an insured vehicle involved in an accident.
///
/// Arguments: accidentId, insurancePolicyId, damageDescription. The
/// policy's insured vehicle must be a member of the accident's
/// involved-goods set.
pub async fn request_quote(
    gateway: &LedgerGateway,
    ids: &dyn IdSource,
    args: &[String],
) -> Result<Vec<u8>, EngineError> {
    let args = Args::exactly(args, 3)?;
    let accident_id = args.required(1, "accidentId")?;
    let policy_id = args.required(2, "insurancePolicyId")?;
    let damage_description = args.required(3, "damageDescription")?;

    let report_key = AccidentReport::ref_for(accident_id);
    let report: AccidentReport = gateway.get(&report_key).await?;

    let policy_key = InsurancePolicy::ref_for(policy_id);
    let policy: InsurancePolicy = gateway.get(&policy_key).await?;

    if !report.involves(&policy.registered_vehicle) {
        return Err(EngineError::rule(format!(
            "insured vehicle is not involved in the accident: {}",
            policy.registered_vehicle
        )));
    }

    // The insured vehicle supplies the descriptive event fields.
    let vehicle: Vehicle = gateway.get(&RefKey::parse(&policy.registered_vehicle)?).await?;

    let request_id = ids.allocate(EntityClass::QuoteRequest);
    let request = QuoteRequest::new(
        &request_id,
        report_key.to_string(),
        policy_key.to_string(),
        damage_description,
    );

    gateway.put(&request).await?;
    tracing::info!(%request_id, "quote request created");

    gateway
        .emit(&RequestForQuoteEvent {
            request_id,
            vehicle_make: vehicle.make,
            vehicle_model: vehicle.model,
            damage_description: damage_description.to_string(),
        })
        .await
}

/// Offers a priced quote answering an open request.
///
/// Arguments: requestId, repairShopName, estimatesJson, taxPercent. The
/// estimate array is caller-supplied JSON; the tax percentage must lie in
/// `[0, 100]`.
pub async fn offer_quote(
    gateway: &LedgerGateway,
    ids: &dyn IdSource,
    args: &[String],
) -> Result<Vec<u8>, EngineError> {
    let args = Args::exactly(args, 4)?;
    let request_id = args.required(1, "requestId")?;
    let shop_name = args.required(2, "repairShop")?;
    let estimates_json = args.required(3, "estimates")?;
    let tax = args.decimal(4, "tax")?;

    let estimates: Vec<Estimate> = serde_json::from_str(estimates_json)?;

    let request_key = QuoteRequest::ref_for(request_id);
    gateway.require(&request_key).await?;

    let shop_key = RepairShop::ref_for(shop_name);
    gateway.require(&shop_key).await?;

    let quote_id = ids.allocate(EntityClass::RepairQuote);
    let quote = RepairQuote::from_estimates(
        &quote_id,
        request_key.to_string(),
        shop_key.to_string(),
        estimates,
        tax,
    )?;
    let total_estimate = quote.estimate_total();

    gateway.put(&quote).await?;
    tracing::info!(%quote_id, %request_id, "repair quote offered");

    gateway
        .emit(&NewQuoteOfferEvent {
            request_id: request_id.to_string(),
            quote_id,
            total_estimate,
        })
        .await
}
