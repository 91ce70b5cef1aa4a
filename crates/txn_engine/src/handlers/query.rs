//! Read-side handler

use core_kernel::{EngineError, EntityClass, RefKey};

use crate::args::Args;
use crate::gateway::LedgerGateway;

/// Pure lookup of a record's raw encoded form.
///
/// Arguments: entityClass (dotted tag), naturalId. Fails with a not-found
/// error naming the key when absent.
pub async fn read_asset_data(
    gateway: &LedgerGateway,
    args: &[String],
) -> Result<Vec<u8>, EngineError> {
    let args = Args::exactly(args, 2)?;
    let class_tag = args.required(1, "entityClass")?;
    let natural_id = args.required(2, "naturalId")?;

    let class: EntityClass = class_tag.parse()?;
    gateway.get_raw(&RefKey::new(class, natural_id)).await
}
