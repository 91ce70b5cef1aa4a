//! Accident report handlers
//!
//! `reportAccident` creates a report; `updateReport` applies up to three
//! sub-effects in one invocation (responder assignment, description,
//! another vehicle) sharing a single emitted reason - the last applied
//! effect wins. The same sub-effects are also exposed as the standalone
//! operations `assignResponder`, `updateDescription`, and `addVehicle`,
//! each emitting its own reason.

use chrono::Utc;

use core_kernel::{EngineError, EntityClass, IdSource};
use domain_records::{
    AccidentReport, EmergencyServices, Location, NewAccidentEvent, Record, ReportUpdateEvent,
    Vehicle,
};

use crate::args::Args;
use crate::gateway::LedgerGateway;

/// Creates a new accident report in the `NEW` state.
///
/// Arguments: longitude, latitude, occurredAt (RFC3339, may be empty),
/// vehicleReg (may be empty). A supplied vehicle must already exist and is
/// recorded as the sole member of the involved-goods set.
pub async fn report_accident(
    gateway: &LedgerGateway,
    ids: &dyn IdSource,
    args: &[String],
) -> Result<Vec<u8>, EngineError> {
    let args = Args::exactly(args, 4)?;
    let longitude = args.float(1, "longitude")?;
    let latitude = args.float(2, "latitude")?;
    let occurred_at = args
        .optional_timestamp(3, "occurredAt")?
        .unwrap_or_else(Utc::now);

    let vehicle_ref = match args.optional(4) {
        Some(registration) => {
            let key = Vehicle::ref_for(registration);
            gateway.require(&key).await?;
            Some(key.to_string())
        }
        None => None,
    };

    let location = Location::new(longitude, latitude);
    let coordinates = location.coordinate_string();
    let accident_id = ids.allocate(EntityClass::AccidentReport);

    let mut report = AccidentReport::new(&accident_id, occurred_at, location);
    if let Some(vehicle_ref) = vehicle_ref {
        report.record_vehicle(vehicle_ref);
    }

    gateway.put(&report).await?;
    tracing::info!(%accident_id, "accident report created");

    gateway
        .emit(&NewAccidentEvent {
            accident_id,
            location: coordinates,
        })
        .await
}

/// Applies the coupled three-effect update to an accident report.
///
/// Arguments: accidentId, respondingERS, description (may be empty),
/// otherVehicle (may be empty). Responder assignment is mandatory and
/// fails the whole invocation when a responder is already set.
pub async fn update_report(gateway: &LedgerGateway, args: &[String]) -> Result<Vec<u8>, EngineError> {
    let args = Args::exactly(args, 4)?;
    let accident_id = args.required(1, "accidentId")?;
    let ers_name = args.required(2, "respondingERS")?;
    let description = args.optional(3);
    let other_vehicle = args.optional(4);

    let mut report: AccidentReport = gateway.get(&AccidentReport::ref_for(accident_id)).await?;

    // Last applied effect supplies the emitted reason.
    let mut reason = responder_effect(gateway, &mut report, ers_name).await?;
    if let Some(description) = description {
        reason = description_effect(&mut report, description);
    }
    if let Some(registration) = other_vehicle {
        reason = vehicle_effect(gateway, &mut report, registration).await?;
    }

    persist_update(gateway, &report, reason).await
}

/// Standalone responder assignment: accidentId, respondingERS.
pub async fn assign_responder(
    gateway: &LedgerGateway,
    args: &[String],
) -> Result<Vec<u8>, EngineError> {
    let args = Args::exactly(args, 2)?;
    let accident_id = args.required(1, "accidentId")?;
    let ers_name = args.required(2, "respondingERS")?;

    let mut report: AccidentReport = gateway.get(&AccidentReport::ref_for(accident_id)).await?;
    let reason = responder_effect(gateway, &mut report, ers_name).await?;
    persist_update(gateway, &report, reason).await
}

/// Standalone description update: accidentId, description.
pub async fn update_description(
    gateway: &LedgerGateway,
    args: &[String],
) -> Result<Vec<u8>, EngineError> {
    let args = Args::exactly(args, 2)?;
    let accident_id = args.required(1, "accidentId")?;
    let description = args.required(2, "description")?;

    let mut report: AccidentReport = gateway.get(&AccidentReport::ref_for(accident_id)).await?;
    let reason = description_effect(&mut report, description);
    persist_update(gateway, &report, reason).await
}

/// Standalone vehicle addition: accidentId, vehicleReg.
pub async fn add_vehicle(gateway: &LedgerGateway, args: &[String]) -> Result<Vec<u8>, EngineError> {
    let args = Args::exactly(args, 2)?;
    let accident_id = args.required(1, "accidentId")?;
    let registration = args.required(2, "vehicleReg")?;

    let mut report: AccidentReport = gateway.get(&AccidentReport::ref_for(accident_id)).await?;
    let reason = vehicle_effect(gateway, &mut report, registration).await?;
    persist_update(gateway, &report, reason).await
}

/// Assigns the responding emergency services, enforcing the
/// single-responder invariant and the NEW -> RESPONDING transition.
async fn responder_effect(
    gateway: &LedgerGateway,
    report: &mut AccidentReport,
    ers_name: &str,
) -> Result<String, EngineError> {
    let ers_key = EmergencyServices::ref_for(ers_name);
    gateway.require(&ers_key).await?;
    report.assign_responder(ers_key.to_string())?;
    Ok(format!(
        "Emergency Services ({ers_name}) responding to accident"
    ))
}

fn description_effect(report: &mut AccidentReport, description: &str) -> String {
    report.set_description(description);
    "Description of accident updated".to_string()
}

/// Existence-checks the vehicle and appends its full reference to the
/// involved-goods set.
async fn vehicle_effect(
    gateway: &LedgerGateway,
    report: &mut AccidentReport,
    registration: &str,
) -> Result<String, EngineError> {
    let vehicle_key = Vehicle::ref_for(registration);
    gateway.require(&vehicle_key).await?;
    report.record_vehicle(vehicle_key.to_string());
    Ok("Another vehicle added to the report".to_string())
}

async fn persist_update(
    gateway: &LedgerGateway,
    report: &AccidentReport,
    reason: String,
) -> Result<Vec<u8>, EngineError> {
    gateway.put(report).await?;
    tracing::info!(accident_id = %report.accident_id, %reason, "accident report updated");

    gateway
        .emit(&ReportUpdateEvent {
            accident_id: report.accident_id.clone(),
            reason,
        })
        .await
}
