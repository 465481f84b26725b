//! Minimal update request synthesis.

use super::PatchOptions;
use crate::diff::{
    apply, diff, group_by_field, ops_under_field, removed_values, Operation, OperationKind,
};
use crate::error::Result;
use crate::value::Value;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// Builds the request that updates a remote resource from `state` to `plan`.
///
/// Returns `None` when nothing has to be sent. A missing `plan` never
/// produces a request; a missing `state` is diffed as the zero value of `T`.
/// Fields that only the state carries (server-assigned identifiers and the
/// like) are copied into changed fields, subject to `options`. Fields the
/// request does not carry keep the zero value of `T`.
pub fn patch_payload<T>(
    state: Option<&T>,
    plan: Option<&T>,
    options: &PatchOptions,
) -> Result<Option<T>>
where
    T: Serialize + DeserializeOwned + Default,
{
    let Some(plan) = plan else {
        return Ok(None);
    };
    let zero = Value::from_serialize(&T::default())?;
    let old = match state {
        Some(state) => Value::from_serialize(state)?,
        None => zero.clone(),
    };
    let new = Value::from_serialize(plan)?;
    synthesize(&old, &new, &zero, options)?
        .map(|patch| overlay(zero.clone(), patch).deserialize_into())
        .transpose()
}

/// Writes `patch` over `base`. Maps merge key by key; anything else in
/// `patch` replaces what `base` holds.
fn overlay(base: Value, patch: Value) -> Value {
    match (base, patch) {
        (Value::Map(mut base), Value::Map(patch)) => {
            for (key, value) in patch.fields {
                let merged = match base.fields.remove(&key) {
                    Some(prior) => overlay(prior, value),
                    None => value,
                };
                base.set(key, merged);
            }
            Value::Map(base)
        }
        (_, patch) => patch,
    }
}

/// Value-tree form of [`patch_payload`].
///
/// `zero` is the serialized zero value of the target shape; it is the
/// baseline the desired value of each changed field is written from.
pub fn synthesize(
    old: &Value,
    new: &Value,
    zero: &Value,
    options: &PatchOptions,
) -> Result<Option<Value>> {
    let ops = diff(old, new);
    let groups = group_by_field(&ops);
    let changed = changed_fields_in(&groups, options);
    debug!(changed = ?changed, operations = ops.len(), "computed changed fields");
    if changed.is_empty() {
        return Ok(None);
    }

    let from_zero = diff(zero, new);
    let no_ops: Vec<Operation> = Vec::new();
    let mut acc = serde_json::Value::Object(serde_json::Map::new());
    for field in &changed {
        let write: Vec<Operation> = ops_under_field(&from_zero, field)
            .filter(|op| op.kind.is_write())
            .cloned()
            .collect();
        let state = state_patch(groups.get(field).unwrap_or(&no_ops), options);
        trace!(field = %field, write = write.len(), state = state.len(), "patching field");
        apply(&mut acc, &write)?;
        apply(&mut acc, &state)?;
    }

    if acc.as_object().is_some_and(|obj| obj.is_empty()) {
        return Ok(None);
    }
    Value::from_json_value(acc).map(Some)
}

/// Returns the top-level fields an update request must carry.
///
/// A field is changed when the diff adds or replaces something below it,
/// removes a list element below it, or when it is forced by `options`.
/// Removing a named field alone does not change it: that is how values only
/// the state knows about look when the plan leaves them out.
pub fn changed_fields(old: &Value, new: &Value, options: &PatchOptions) -> BTreeSet<String> {
    changed_fields_in(&group_by_field(&diff(old, new)), options)
}

fn changed_fields_in(
    groups: &BTreeMap<String, Vec<Operation>>,
    options: &PatchOptions,
) -> BTreeSet<String> {
    let mut changed: BTreeSet<String> = groups
        .iter()
        .filter(|(_, ops)| ops.iter().any(is_change))
        .map(|(field, _)| field.clone())
        .collect();
    changed.extend(options.force_update_attr.iter().cloned());
    changed
}

fn is_change(op: &Operation) -> bool {
    match op.kind {
        OperationKind::Add | OperationKind::Replace => true,
        OperationKind::Remove => op.path.ends_with_index(),
        OperationKind::Test => false,
    }
}

/// Re-adds named fields the plan dropped, using the value the state held.
///
/// Removed list elements are never re-added: the desired list is
/// authoritative.
fn state_patch(ops: &[Operation], options: &PatchOptions) -> Vec<Operation> {
    removed_values(ops)
        .into_iter()
        .filter(|(path, _)| !path.ends_with_index())
        .filter(|(path, _)| {
            let ignored = options.ignore_in_state_path(path);
            if ignored {
                debug!(path = %path, "state value ignored");
            }
            !ignored
        })
        .map(|(path, value)| Operation::add(path.clone(), value.clone()))
        .collect()
}

/// Returns true if `value` serializes exactly like `T::default()`.
pub fn is_zero_values<T: Serialize + Default>(value: &T) -> Result<bool> {
    Ok(Value::from_serialize(value)? == Value::from_serialize(&T::default())?)
}
