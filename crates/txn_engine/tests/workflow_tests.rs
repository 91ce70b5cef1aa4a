//! End-to-end workflow scenario
//!
//! Drives the full accident-to-claim chain against the in-memory ledger:
//! report an accident, update it, issue a second policy, request and offer
//! a quote, and finally send the claim.

use std::sync::Arc;

use rust_decimal_macros::dec;

use core_kernel::{MemoryLedger, SequenceIdSource};
use domain_records::{AccidentReport, AccidentStatus, InsuranceClaim, ClaimStatus};
use txn_engine::Engine;

fn args(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| s.to_string()).collect()
}

fn json(payload: &[u8]) -> serde_json::Value {
    serde_json::from_slice(payload).unwrap()
}

#[tokio::test]
async fn accident_to_claim_chain() {
    let ledger = Arc::new(MemoryLedger::new());
    let engine = Engine::with_id_source(ledger.clone(), Arc::new(SequenceIdSource::default()));
    engine.invoke("setupAssets", &[]).await.unwrap();

    // A second policy so that both sides of the claim are insured: the BMW
    // is leased through AutoLease and insured by AXA.
    engine
        .invoke(
            "issuePolicy",
            &args(&[
                "State of New York",
                "2018-08-01T00:00:00Z",
                "2020-08-01T00:00:00Z",
                "JN6ND01S3GX194659",
                "USA",
                "AX203",
                "3459802",
                "AF",
                "BMW",
                "US,CA,MX",
                "908123764",
                "AXA Insurance",
            ]),
        )
        .await
        .unwrap();

    // The BMW reports the accident; the Prius is added by the responder.
    let payload = engine
        .invoke(
            "reportAccident",
            &args(&[
                "52.0920511",
                "5.0664127",
                "2018-08-03T10:20:20Z",
                "JN6ND01S3GX194659",
            ]),
        )
        .await
        .unwrap();
    let accident_id = json(&payload)["accidentId"].as_str().unwrap().to_string();
    assert_eq!(json(&payload)["location"], "52.092051, 5.066413");

    engine
        .invoke(
            "updateReport",
            &args(&[
                &accident_id,
                "NYPD 34th Precinct",
                "Nose to tail collision",
                "1HTZR0007JH586991",
            ]),
        )
        .await
        .unwrap();

    // The Prius holder requests a quote under the seeded policy.
    let payload = engine
        .invoke(
            "requestQuote",
            &args(&[
                &accident_id,
                "USA-AS204-1042919",
                "Scratch on back bumper (2x0.1 inches)",
            ]),
        )
        .await
        .unwrap();
    let request_id = json(&payload)["requestId"].as_str().unwrap().to_string();

    let estimates = r#"[{"type":"REPAIR","description":"Scratch removal","costOfParts":30.6,"costOfLabor":100,"totalCost":130.6}]"#;
    let payload = engine
        .invoke(
            "offerQuote",
            &args(&[&request_id, "USA Automotive NYC", estimates, "11"]),
        )
        .await
        .unwrap();
    let quote_id = json(&payload)["quoteId"].as_str().unwrap().to_string();

    // Claim: Prius holder against the BMW's policy.
    let payload = engine
        .invoke(
            "sendClaim",
            &args(&[
                &accident_id,
                "USA-AS204-1042919",
                "USA-AX203-3459802",
                &quote_id,
            ]),
        )
        .await
        .unwrap();
    let claim_event: domain_records::NewClaimEvent = serde_json::from_slice(&payload).unwrap();
    assert_eq!(claim_event.claimant_policy_id, "USA-AS204-1042919");
    assert_eq!(claim_event.defendant_policy_id, "USA-AX203-3459802");
    // 130.6 plus 11 percent tax.
    assert_eq!(claim_event.cost_of_repair, dec!(144.966));

    // Final report state: responding, described, both vehicles involved.
    let bytes = engine
        .invoke(
            "readAssetData",
            &args(&["accident.AccidentReport", &accident_id]),
        )
        .await
        .unwrap();
    let report: AccidentReport = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(report.status, AccidentStatus::Responding);
    assert_eq!(report.description.as_deref(), Some("Nose to tail collision"));
    assert!(report.involves("base.Vehicle#JN6ND01S3GX194659"));
    assert!(report.involves("base.Vehicle#1HTZR0007JH586991"));

    // Stored claim is NEW and references the quote that priced it.
    let bytes = engine
        .invoke(
            "readAssetData",
            &args(&["insurance.InsuranceClaim", &claim_event.claim_id]),
        )
        .await
        .unwrap();
    let claim: InsuranceClaim = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(claim.status, ClaimStatus::New);
    assert_eq!(
        claim.cost_of_repair,
        format!("vehiclerepair.RepairQuote#{quote_id}")
    );

    // One event per mutating operation, in invocation order; policy
    // issuance emits nothing.
    let names: Vec<String> = ledger
        .events()
        .await
        .into_iter()
        .map(|event| event.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "NewAccidentEvent",
            "ReportUpdateEvent",
            "RequestForQuoteEvent",
            "NewQuoteOfferEvent",
            "NewClaimEvent",
        ]
    );
}

#[tokio::test]
async fn quote_chain_requires_prior_vehicle_involvement() {
    let ledger = Arc::new(MemoryLedger::new());
    let engine = Engine::with_id_source(ledger, Arc::new(SequenceIdSource::default()));
    engine.invoke("setupAssets", &[]).await.unwrap();

    let payload = engine
        .invoke(
            "reportAccident",
            &args(&["52.092051", "5.066413", "2018-08-03T10:20:20Z", ""]),
        )
        .await
        .unwrap();
    let accident_id = json(&payload)["accidentId"].as_str().unwrap().to_string();

    // Without the insured vehicle on the report, the quote request fails.
    let err = engine
        .invoke(
            "requestQuote",
            &args(&[&accident_id, "USA-AS204-1042919", "Scratch on bumper"]),
        )
        .await
        .unwrap_err();
    assert!(err.is_rule_violation());

    // After an otherVehicle update the same request succeeds.
    engine
        .invoke(
            "updateReport",
            &args(&[
                &accident_id,
                "NYPD 34th Precinct",
                "Nose to tail collision",
                "1HTZR0007JH586991",
            ]),
        )
        .await
        .unwrap();

    engine
        .invoke(
            "requestQuote",
            &args(&[&accident_id, "USA-AS204-1042919", "Scratch on bumper"]),
        )
        .await
        .unwrap();
}
