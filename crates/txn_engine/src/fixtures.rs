//! Demonstration data loader
//!
//! `setup_assets` writes a fixed set of participants, vehicles, and one
//! policy through the gateway and returns the created `{class, id}` pairs.
//! Re-running replaces the same records with the same content, so the
//! loader is idempotent. This is a demo/test utility, not part of the
//! invariant-bearing core.

use chrono::{DateTime, TimeZone, Utc};

use core_kernel::{EngineError, EntityClass};
use domain_records::{
    Address, AssetEntry, Company, EmergencyServices, Insurer, InsurancePolicy, LegalEntity,
    Location, Record, Registrant, RepairShop, Vehicle,
};

use crate::gateway::LedgerGateway;

fn utc_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

async fn store<T: Record>(
    gateway: &LedgerGateway,
    entries: &mut Vec<AssetEntry>,
    record: &T,
) -> Result<(), EngineError> {
    gateway.put(record).await?;
    entries.push(AssetEntry::new(T::CLASS, record.natural_id()));
    Ok(())
}

/// Creates the demonstration data set and returns the encoded list of
/// created assets.
pub async fn setup_assets(gateway: &LedgerGateway) -> Result<Vec<u8>, EngineError> {
    let mut entries = Vec::new();

    let auto_lease = Registrant::new(
        "908123764",
        LegalEntity::Leaser,
        "AutoLease",
        Address::new("4300 Broadway", "New York, NY 10033").with_line3("United States"),
    );
    store(gateway, &mut entries, &auto_lease).await?;

    let john_smith = Registrant::new(
        "170632064",
        LegalEntity::Individual,
        "Smith",
        Address::new("28 Clinton Ave", "Jersey City, NJ 07304").with_line3("United States"),
    )
    .with_initials("J.");
    store(gateway, &mut entries, &john_smith).await?;

    let nypd = EmergencyServices::new(
        Company::new(
            "NYPD 34th Precinct",
            Address::new("4295 Broadway", "New York, NY 10033").with_line3("United States"),
        ),
        Location::new(40.851498, -73.935389).with_description("Police Station"),
    );
    store(gateway, &mut entries, &nypd).await?;

    let allsecur = Insurer::new(
        Company::new(
            "Allsecur Insurance",
            Address::new("59 Maiden Ln", "New York, NY 10038").with_line3("United States"),
        ),
        "iVBORw0KGgoAAAANSUhEUgAAAFQAAAAtCAMAAAAHmLz6",
    );
    store(gateway, &mut entries, &allsecur).await?;

    let axa = Insurer::new(
        Company::new(
            "AXA Insurance",
            Address::new("888 Bergen Ave", "Jersey City, NJ 07306").with_line3("United States"),
        ),
        "iVBORw0KGgoAAAANSUhEUgAAAKUAAAAxBAMAAABJ8nS8",
    );
    store(gateway, &mut entries, &axa).await?;

    let shop_nyc = RepairShop::new(Company::new(
        "USA Automotive NYC",
        Address::new("225 Delancey St", "New York, NY 10002").with_line3("United States"),
    ))
    .with_email("nyc@usa-automotive.com");
    store(gateway, &mut entries, &shop_nyc).await?;

    let shop_jc = RepairShop::new(Company::new(
        "USA Automotive JC",
        Address::new("5 West Side Ave", "Jersey City, NJ 07305").with_line3("United States"),
    ))
    .with_email("jersey@usa-automotive.com");
    store(gateway, &mut entries, &shop_jc).await?;

    let bmw = Vehicle {
        class: EntityClass::Vehicle,
        registration_number: "JN6ND01S3GX194659".to_string(),
        licence_plate: "WPD 9321".to_string(),
        date_first_admission: utc_date(2018, 1, 12),
        date_ascription: utc_date(2018, 1, 13),
        owner: auto_lease.key().to_string(),
        make: "BMW".to_string(),
        model: "X5 Estate 3.0i".to_string(),
        color: Some("Black".to_string()),
        max_mass: Some(2595),
        max_seating: 5,
    };
    store(gateway, &mut entries, &bmw).await?;

    let prius = Vehicle {
        class: EntityClass::Vehicle,
        registration_number: "1HTZR0007JH586991".to_string(),
        licence_plate: "B63-AGM".to_string(),
        date_first_admission: utc_date(2014, 9, 28),
        date_ascription: utc_date(2018, 10, 1),
        owner: john_smith.key().to_string(),
        make: "Toyota".to_string(),
        model: "Prius".to_string(),
        color: Some("Red".to_string()),
        max_mass: Some(1526),
        max_seating: 4,
    };
    store(gateway, &mut entries, &prius).await?;

    let policy = InsurancePolicy {
        class: EntityClass::InsurancePolicy,
        policy_id: InsurancePolicy::compose_id("USA", "AS204", 1042919),
        authorised_by: "State of New Jersey".to_string(),
        valid_from: utc_date(2018, 5, 1),
        valid_to: utc_date(2020, 4, 30),
        registered_vehicle: prius.key().to_string(),
        country_code: "USA".to_string(),
        insurer_code: "AS204".to_string(),
        policy_number: 1042919,
        vehicle_category: "AF".to_string(),
        vehicle_make: "Toyota".to_string(),
        coverage: vec!["US".to_string(), "CA".to_string()],
        policy_holder: john_smith.key().to_string(),
        issued_by: axa.key().to_string(),
    };
    store(gateway, &mut entries, &policy).await?;

    tracing::info!(count = entries.len(), "demonstration assets created");
    Ok(serde_json::to_vec(&entries)?)
}
