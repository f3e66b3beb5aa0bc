//! Locate the group list inside a decoded claim set.

use serde_json::{Map, Value};
use thiserror::Error;

use super::claims::ClaimSet;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupClaimError {
    #[error("claim '{0}' is missing")]
    Missing(String),
    #[error("claim '{0}' is not an array")]
    NotArray(String),
    #[error("claim '{property}' has a non-string element at index {index}")]
    NonString { property: String, index: usize },
}

/// Extracts the caller's groups from `claims`.
///
/// When `prefix` names an object-valued claim, `property` is looked up inside
/// it. When the prefix claim is absent or not an object, the top-level claim
/// set is used instead. That fallback never fails; everything after it does.
pub fn group_list(
    claims: &ClaimSet,
    prefix: Option<&str>,
    property: &str,
) -> Result<Vec<String>, GroupClaimError> {
    let scope = scope(claims.as_map(), prefix);

    let values = match scope.get(property) {
        Some(Value::Array(values)) => values,
        Some(_) => return Err(GroupClaimError::NotArray(property.to_owned())),
        None => return Err(GroupClaimError::Missing(property.to_owned())),
    };

    values
        .iter()
        .enumerate()
        .map(|(index, v)| {
            v.as_str()
                .map(str::to_owned)
                .ok_or_else(|| GroupClaimError::NonString {
                    property: property.to_owned(),
                    index,
                })
        })
        .collect()
}

fn scope<'a>(claims: &'a Map<String, Value>, prefix: Option<&str>) -> &'a Map<String, Value> {
    match prefix.and_then(|p| claims.get(p)) {
        Some(Value::Object(nested)) => nested,
        _ => claims,
    }
}
