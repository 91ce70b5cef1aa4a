//! Embedded value objects
//!
//! Concepts are not stored standalone; they appear inside participant and
//! asset records and carry their own `$class` tags in the encoded form.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::EntityClass;

/// Postal address shared by all company participants and registrants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "$class")]
    pub class: EntityClass,
    #[serde(rename = "addressLine1")]
    pub line1: String,
    #[serde(rename = "addressLine2")]
    pub line2: String,
    #[serde(rename = "addressLine3", skip_serializing_if = "Option::is_none", default)]
    pub line3: Option<String>,
}

impl Address {
    pub fn new(line1: impl Into<String>, line2: impl Into<String>) -> Self {
        Self {
            class: EntityClass::Address,
            line1: line1.into(),
            line2: line2.into(),
            line3: None,
        }
    }

    pub fn with_line3(mut self, line3: impl Into<String>) -> Self {
        self.line3 = Some(line3.into());
        self
    }
}

/// Geographic coordinates, optionally described.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "$class")]
    pub class: EntityClass,
    pub longitude: f64,
    pub latitude: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

impl Location {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            class: EntityClass::Location,
            longitude,
            latitude,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The `"<longitude>, <latitude>"` form used in notification payloads,
    /// both coordinates at 6 decimal places.
    pub fn coordinate_string(&self) -> String {
        format!("{:.6}, {:.6}", self.longitude, self.latitude)
    }
}

/// The set of vehicles involved in an accident, stored as vehicle
/// reference keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goods {
    #[serde(rename = "$class")]
    pub class: EntityClass,
    pub vehicles: Vec<String>,
}

impl Goods {
    /// A goods set containing one vehicle reference.
    pub fn single(vehicle_ref: impl Into<String>) -> Self {
        Self {
            class: EntityClass::Goods,
            vehicles: vec![vehicle_ref.into()],
        }
    }

    pub fn contains(&self, vehicle_ref: &str) -> bool {
        self.vehicles.iter().any(|v| v == vehicle_ref)
    }

    pub fn push(&mut self, vehicle_ref: impl Into<String>) {
        self.vehicles.push(vehicle_ref.into());
    }
}

/// Kind of repair work an estimate covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EstimateKind {
    Repair,
    Replace,
}

fn estimate_class() -> EntityClass {
    EntityClass::Estimate
}

/// One line of a repair quote.
///
/// Cost components default to zero when absent, mirroring the wire format
/// where zero components are omitted. Estimate arrays arrive as
/// caller-supplied JSON, so the `$class` tag is defaulted rather than
/// required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    #[serde(rename = "$class", default = "estimate_class")]
    pub class: EntityClass,
    #[serde(rename = "type")]
    pub kind: EstimateKind,
    pub description: String,
    #[serde(rename = "costOfParts", default, skip_serializing_if = "Decimal::is_zero")]
    pub cost_of_parts: Decimal,
    #[serde(rename = "costOfLabor", default, skip_serializing_if = "Decimal::is_zero")]
    pub cost_of_labor: Decimal,
    #[serde(rename = "costOfRefinish", default, skip_serializing_if = "Decimal::is_zero")]
    pub cost_of_refinish: Decimal,
    #[serde(rename = "totalCost")]
    pub total_cost: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_coordinate_string_six_decimals() {
        let location = Location::new(52.0920511, 5.0664127);
        assert_eq!(location.coordinate_string(), "52.092051, 5.066413");
    }

    #[test]
    fn test_goods_membership() {
        let mut goods = Goods::single("base.Vehicle#JN6ND01S3GX194659");
        assert!(goods.contains("base.Vehicle#JN6ND01S3GX194659"));
        assert!(!goods.contains("base.Vehicle#1HTZR0007JH586991"));

        goods.push("base.Vehicle#1HTZR0007JH586991");
        assert!(goods.contains("base.Vehicle#1HTZR0007JH586991"));
    }

    #[test]
    fn test_estimate_decodes_without_class_tag() {
        let json = r#"{
            "type": "REPAIR",
            "description": "Scratch removal",
            "costOfParts": 30.6,
            "costOfLabor": 100,
            "totalCost": 130.6
        }"#;
        let estimate: Estimate = serde_json::from_str(json).unwrap();
        assert_eq!(estimate.class, EntityClass::Estimate);
        assert_eq!(estimate.kind, EstimateKind::Repair);
        assert_eq!(estimate.cost_of_parts, dec!(30.6));
        assert_eq!(estimate.cost_of_refinish, dec!(0));
        assert_eq!(estimate.total_cost, dec!(130.6));
    }

    #[test]
    fn test_estimate_omits_zero_components() {
        let estimate = Estimate {
            class: EntityClass::Estimate,
            kind: EstimateKind::Replace,
            description: "Bumper".to_string(),
            cost_of_parts: dec!(250),
            cost_of_labor: Decimal::ZERO,
            cost_of_refinish: Decimal::ZERO,
            total_cost: dec!(250),
        };
        let json = serde_json::to_value(&estimate).unwrap();
        assert!(json.get("costOfLabor").is_none());
        assert!(json.get("costOfParts").is_some());
    }

    #[test]
    fn test_address_line3_omitted_when_absent() {
        let address = Address::new("4300 Broadway", "New York, NY 10033");
        let json = serde_json::to_value(&address).unwrap();
        assert!(json.get("addressLine3").is_none());

        let full = address.with_line3("United States");
        let json = serde_json::to_value(&full).unwrap();
        assert_eq!(json["addressLine3"], "United States");
    }
}
