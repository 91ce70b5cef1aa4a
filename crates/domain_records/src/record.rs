//! The `Record` trait
//!
//! Ties each storable type to its entity class and natural identifier, from
//! which its composite ledger key derives.

use serde::de::DeserializeOwned;
use serde::Serialize;

use core_kernel::{EntityClass, RefKey};

/// A type stored as a standalone ledger record.
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    /// The class tag under which records of this type are addressed.
    const CLASS: EntityClass;

    /// The natural identifier of this record instance.
    fn natural_id(&self) -> &str;

    /// The composite key addressing this record in the ledger.
    fn key(&self) -> RefKey {
        RefKey::new(Self::CLASS, self.natural_id())
    }

    /// Builds the composite key for an arbitrary identifier of this class.
    fn ref_for(id: impl Into<String>) -> RefKey {
        RefKey::new(Self::CLASS, id)
    }
}
