//! Composite reference keys
//!
//! Every record in the ledger is addressed by a composite key of the form
//! `<class>#<id>`, e.g. `insurance.InsurancePolicy#USA-AX203-3459802`.
//! Cross-entity links are stored as the target's key string - a weak,
//! non-owning reference resolved on demand against the ledger.
//!
//! No normalization of case or whitespace is performed; callers must supply
//! canonical class tags and identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::class::EntityClass;

/// Separator between the class tag and the natural identifier.
pub const KEY_SEPARATOR: char = '#';

/// Errors raised by the reference codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("malformed reference key (missing '#' separator): {key}")]
    MissingSeparator { key: String },

    #[error("reference key has an empty identifier: {key}")]
    EmptyId { key: String },

    #[error("unknown entity class: {class}")]
    UnknownClass { class: String },
}

/// A parsed composite key addressing one record in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefKey {
    pub class: EntityClass,
    pub id: String,
}

impl RefKey {
    /// Builds a key from a class tag and a natural identifier.
    pub fn new(class: EntityClass, id: impl Into<String>) -> Self {
        Self {
            class,
            id: id.into(),
        }
    }

    /// Parses a `class#id` string back into its parts.
    ///
    /// The identifier may itself contain `#`; only the first separator
    /// splits. Fails when the separator is absent, the identifier is empty,
    /// or the class tag is not part of the taxonomy.
    pub fn parse(key: &str) -> Result<Self, KeyError> {
        let (class, id) = key.split_once(KEY_SEPARATOR).ok_or_else(|| {
            KeyError::MissingSeparator {
                key: key.to_string(),
            }
        })?;
        if id.is_empty() {
            return Err(KeyError::EmptyId {
                key: key.to_string(),
            });
        }
        Ok(Self {
            class: class.parse()?,
            id: id.to_string(),
        })
    }
}

impl fmt::Display for RefKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.class, KEY_SEPARATOR, self.id)
    }
}

impl FromStr for RefKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RefKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RefKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RefKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let key = RefKey::new(EntityClass::Vehicle, "JN6ND01S3GX194659");
        assert_eq!(key.to_string(), "base.Vehicle#JN6ND01S3GX194659");
    }

    #[test]
    fn test_parse_round_trip() {
        let key = RefKey::new(EntityClass::InsurancePolicy, "USA-AX203-3459802");
        let parsed = RefKey::parse(&key.to_string()).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_missing_separator() {
        let err = RefKey::parse("base.Vehicle").unwrap_err();
        assert!(matches!(err, KeyError::MissingSeparator { .. }));
    }

    #[test]
    fn test_id_may_contain_separator() {
        let parsed = RefKey::parse("base.RepairShop#USA#Automotive").unwrap();
        assert_eq!(parsed.id, "USA#Automotive");
    }

    #[test]
    fn test_no_normalization() {
        // Case is significant; an uncanonical tag is simply unknown.
        let err = RefKey::parse("base.vehicle#ABC").unwrap_err();
        assert!(matches!(err, KeyError::UnknownClass { .. }));
    }

    #[test]
    fn test_empty_id_rejected() {
        let err = RefKey::parse("base.Vehicle#").unwrap_err();
        assert!(matches!(err, KeyError::EmptyId { .. }));
    }
}
