//! Name resolution against the gateway.
//!
//! Every mutating command addresses its target by human-readable name; the
//! gateway only accepts ids. Resolution queries the kind's list endpoint with
//! an equality filter on `name` and takes the first match. Zero matches abort
//! the command before any mutating call is made.

use serde_json::Value;

use crate::client::Transport;
use crate::error::{Error, Result};
use crate::types::{ResourceKind, ResourceRef};

/// Resolve `name` to a confirmed id.
///
/// When the gateway returns more than one match the first record wins; the
/// filter is an exact equality match, so duplicates are already a server-side
/// anomaly.
pub async fn resolve(
    transport: &dyn Transport,
    kind: ResourceKind,
    name: &str,
) -> Result<ResourceRef> {
    let records = find_by_name(transport, kind, name).await?;
    let first = records.first().ok_or_else(|| Error::NotFound {
        kind,
        name: name.to_string(),
    })?;
    let id = first
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Api {
            status: 0,
            message: format!("{kind} record returned without an id"),
        })?;
    Ok(ResourceRef {
        kind,
        name: name.to_string(),
        id: id.to_string(),
    })
}

/// Raw records matching `name` exactly. Callers that need more than the id
/// (the proxy state guard, the duplicate-proxy probe) deserialize these
/// themselves.
pub async fn find_by_name(
    transport: &dyn Transport,
    kind: ResourceKind,
    name: &str,
) -> Result<Vec<Value>> {
    if name.is_empty() {
        return Err(Error::validation(format!("{kind} name must not be empty")));
    }
    let path = kind.collection_path().ok_or_else(|| {
        Error::validation(format!("{kind}s are addressed by id, not by name"))
    })?;
    let value = transport
        .get(path, &[("field", "name"), ("op", "eq"), ("value", name)])
        .await?;
    Ok(serde_json::from_value(value)?)
}
