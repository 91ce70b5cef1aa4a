//! Entity class taxonomy
//!
//! Every record and embedded concept carries an explicit class tag in its
//! encoded form (the `$class` field), and the same tag is the first half of
//! the composite key addressing the record. The dotted names are part of the
//! wire format and must not change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Class tag of a record or embedded concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityClass {
    // Participants
    #[serde(rename = "base.Registrant")]
    Registrant,
    #[serde(rename = "base.Insurer")]
    Insurer,
    #[serde(rename = "base.EmergencyServices")]
    EmergencyServices,
    #[serde(rename = "base.RepairShop")]
    RepairShop,

    // Assets
    #[serde(rename = "base.Vehicle")]
    Vehicle,
    #[serde(rename = "accident.AccidentReport")]
    AccidentReport,
    #[serde(rename = "vehiclerepair.QuoteRequest")]
    QuoteRequest,
    #[serde(rename = "vehiclerepair.RepairQuote")]
    RepairQuote,
    #[serde(rename = "insurance.InsurancePolicy")]
    InsurancePolicy,
    #[serde(rename = "insurance.InsuranceClaim")]
    InsuranceClaim,

    // Embedded concepts
    #[serde(rename = "base.Address")]
    Address,
    #[serde(rename = "accident.Location")]
    Location,
    #[serde(rename = "accident.Goods")]
    Goods,
    #[serde(rename = "vehiclerepair.Estimate")]
    Estimate,
}

impl EntityClass {
    /// Returns the dotted wire name of this class.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityClass::Registrant => "base.Registrant",
            EntityClass::Insurer => "base.Insurer",
            EntityClass::EmergencyServices => "base.EmergencyServices",
            EntityClass::RepairShop => "base.RepairShop",
            EntityClass::Vehicle => "base.Vehicle",
            EntityClass::AccidentReport => "accident.AccidentReport",
            EntityClass::QuoteRequest => "vehiclerepair.QuoteRequest",
            EntityClass::RepairQuote => "vehiclerepair.RepairQuote",
            EntityClass::InsurancePolicy => "insurance.InsurancePolicy",
            EntityClass::InsuranceClaim => "insurance.InsuranceClaim",
            EntityClass::Address => "base.Address",
            EntityClass::Location => "accident.Location",
            EntityClass::Goods => "accident.Goods",
            EntityClass::Estimate => "vehiclerepair.Estimate",
        }
    }

    /// Returns the short name without its namespace, e.g. `Vehicle`.
    pub fn short_name(&self) -> &'static str {
        let name = self.as_str();
        name.rsplit('.').next().unwrap_or(name)
    }

    /// All classes that are stored as standalone records (not embedded).
    pub fn storable() -> &'static [EntityClass] {
        &[
            EntityClass::Registrant,
            EntityClass::Insurer,
            EntityClass::EmergencyServices,
            EntityClass::RepairShop,
            EntityClass::Vehicle,
            EntityClass::AccidentReport,
            EntityClass::QuoteRequest,
            EntityClass::RepairQuote,
            EntityClass::InsurancePolicy,
            EntityClass::InsuranceClaim,
        ]
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityClass {
    type Err = crate::key::KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base.Registrant" => Ok(EntityClass::Registrant),
            "base.Insurer" => Ok(EntityClass::Insurer),
            "base.EmergencyServices" => Ok(EntityClass::EmergencyServices),
            "base.RepairShop" => Ok(EntityClass::RepairShop),
            "base.Vehicle" => Ok(EntityClass::Vehicle),
            "accident.AccidentReport" => Ok(EntityClass::AccidentReport),
            "vehiclerepair.QuoteRequest" => Ok(EntityClass::QuoteRequest),
            "vehiclerepair.RepairQuote" => Ok(EntityClass::RepairQuote),
            "insurance.InsurancePolicy" => Ok(EntityClass::InsurancePolicy),
            "insurance.InsuranceClaim" => Ok(EntityClass::InsuranceClaim),
            "base.Address" => Ok(EntityClass::Address),
            "accident.Location" => Ok(EntityClass::Location),
            "accident.Goods" => Ok(EntityClass::Goods),
            "vehiclerepair.Estimate" => Ok(EntityClass::Estimate),
            other => Err(crate::key::KeyError::UnknownClass {
                class: other.to_string(),
            }),
        }
    }
}
