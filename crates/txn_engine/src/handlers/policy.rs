//! Policy issuance handler

use core_kernel::{EngineError, EntityClass};
use domain_records::{Insurer, InsurancePolicy, Record, Registrant, Vehicle};

use crate::args::Args;
use crate::gateway::LedgerGateway;

/// Issues a new insurance policy for a registered vehicle.
///
/// Arguments: authorisedBy, validFrom, validTo, vehicleReg, countryCode,
/// insurerCode, policyNumber, vehicleCategory, vehicleMake, coverage
/// (comma list), policyHolderId, issuerName. The vehicle must be owned by
/// the policy holder, and the composed policy id must not already exist.
/// Returns the encoded policy as the result payload; no event is emitted
/// for this operation.
pub async fn issue_policy(gateway: &LedgerGateway, args: &[String]) -> Result<Vec<u8>, EngineError> {
    let args = Args::exactly(args, 12)?;
    let authorised_by = args.required(1, "authorisedBy")?;
    let valid_from = args.timestamp(2, "validFrom")?;
    let valid_to = args.timestamp(3, "validTo")?;
    let vehicle_reg = args.required(4, "vehicleReg")?;
    let country_code = args.required(5, "countryCode")?;
    let insurer_code = args.required(6, "insurerCode")?;
    let policy_number = args.integer(7, "policyNumber")?;
    let vehicle_category = args.required(8, "vehicleCategory")?;
    let vehicle_make = args.required(9, "vehicleMake")?;
    let coverage = args.csv(10, "coverage")?;
    let holder_id = args.required(11, "policyHolder")?;
    let issuer_name = args.required(12, "issuedBy")?;

    let vehicle_key = Vehicle::ref_for(vehicle_reg);
    let vehicle: Vehicle = gateway.get(&vehicle_key).await?;

    let holder_key = Registrant::ref_for(holder_id);
    gateway.require(&holder_key).await?;

    // Ownership-consistency invariant, checked at issuance.
    if vehicle.owner != holder_key.to_string() {
        return Err(EngineError::rule(
            "the vehicle is not owned by the assigned policy holder",
        ));
    }

    let insurer_key = Insurer::ref_for(issuer_name);
    gateway.require(&insurer_key).await?;

    let policy_id = InsurancePolicy::compose_id(country_code, insurer_code, policy_number);
    let policy_key = InsurancePolicy::ref_for(&policy_id);
    if gateway.exists(&policy_key).await? {
        return Err(EngineError::rule(format!(
            "insurance policy already exists: {policy_key}"
        )));
    }

    let policy = InsurancePolicy {
        class: EntityClass::InsurancePolicy,
        policy_id,
        authorised_by: authorised_by.to_string(),
        valid_from,
        valid_to,
        registered_vehicle: vehicle_key.to_string(),
        country_code: country_code.to_string(),
        insurer_code: insurer_code.to_string(),
        policy_number,
        vehicle_category: vehicle_category.to_string(),
        vehicle_make: vehicle_make.to_string(),
        coverage,
        policy_holder: holder_key.to_string(),
        issued_by: insurer_key.to_string(),
    };

    let payload = gateway.put(&policy).await?;
    tracing::info!(policy_id = %policy.policy_id, "insurance policy issued");
    Ok(payload)
}
