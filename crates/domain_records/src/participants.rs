//! Participant records
//!
//! The people and companies taking part in the workflow. Registrants are
//! identified by identification number; the three company participants are
//! identified by trade name and share the `{tradeName, address}` shape.

use serde::{Deserialize, Serialize};

use core_kernel::EntityClass;

use crate::concepts::{Address, Location};
use crate::record::Record;

/// Legal form of a registrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LegalEntity {
    Individual,
    Corporation,
    Leaser,
}

/// Policy holder / vehicle owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registrant {
    #[serde(rename = "$class")]
    pub class: EntityClass,
    #[serde(rename = "identificationNumber")]
    pub identification_number: String,
    #[serde(rename = "legalEntity")]
    pub legal_entity: LegalEntity,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub initials: Option<String>,
    pub address: Address,
}

impl Registrant {
    pub fn new(
        identification_number: impl Into<String>,
        legal_entity: LegalEntity,
        name: impl Into<String>,
        address: Address,
    ) -> Self {
        Self {
            class: EntityClass::Registrant,
            identification_number: identification_number.into(),
            legal_entity,
            name: name.into(),
            initials: None,
            address,
        }
    }

    pub fn with_initials(mut self, initials: impl Into<String>) -> Self {
        self.initials = Some(initials.into());
        self
    }
}

impl Record for Registrant {
    const CLASS: EntityClass = EntityClass::Registrant;

    fn natural_id(&self) -> &str {
        &self.identification_number
    }
}

/// The company shape shared by insurers, emergency services, and repair
/// shops. Flattened into each participant's encoded form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "tradeName")]
    pub trade_name: String,
    pub address: Address,
}

impl Company {
    pub fn new(trade_name: impl Into<String>, address: Address) -> Self {
        Self {
            trade_name: trade_name.into(),
            address,
        }
    }
}

/// Insurance company issuing policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insurer {
    #[serde(rename = "$class")]
    pub class: EntityClass,
    #[serde(flatten)]
    pub company: Company,
    pub signature: String,
}

impl Insurer {
    pub fn new(company: Company, signature: impl Into<String>) -> Self {
        Self {
            class: EntityClass::Insurer,
            company,
            signature: signature.into(),
        }
    }
}

impl Record for Insurer {
    const CLASS: EntityClass = EntityClass::Insurer;

    fn natural_id(&self) -> &str {
        &self.company.trade_name
    }
}

/// Emergency services organisation responding to accidents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyServices {
    #[serde(rename = "$class")]
    pub class: EntityClass,
    #[serde(flatten)]
    pub company: Company,
    pub location: Location,
}

impl EmergencyServices {
    pub fn new(company: Company, location: Location) -> Self {
        Self {
            class: EntityClass::EmergencyServices,
            company,
            location,
        }
    }
}

impl Record for EmergencyServices {
    const CLASS: EntityClass = EntityClass::EmergencyServices;

    fn natural_id(&self) -> &str {
        &self.company.trade_name
    }
}

/// Vehicle repair shop offering quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairShop {
    #[serde(rename = "$class")]
    pub class: EntityClass,
    #[serde(flatten)]
    pub company: Company,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
}

impl RepairShop {
    pub fn new(company: Company) -> Self {
        Self {
            class: EntityClass::RepairShop,
            company,
            phone: None,
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

impl Record for RepairShop {
    const CLASS: EntityClass = EntityClass::RepairShop;

    fn natural_id(&self) -> &str {
        &self.company.trade_name
    }
}
