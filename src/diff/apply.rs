//! Applying operations to a JSON document.

use super::{Operation, OperationKind};
use crate::error::{Error, Result};
use crate::fieldpath::{Path, PathElement};
use serde_json::Value as Json;

/// Applies `ops` to `doc` in order.
///
/// Each operation goes through the RFC 6902 engine of the `json-patch`
/// crate, with two relaxations for `add` and `replace`: missing intermediate
/// containers are created first, and a `replace` of a missing target is
/// applied as an `add`.
pub fn apply(doc: &mut Json, ops: &[Operation]) -> Result<()> {
    for op in ops {
        apply_one(doc, op)?;
    }
    Ok(())
}

fn apply_one(doc: &mut Json, op: &Operation) -> Result<()> {
    let mut op = op.clone();
    if op.kind.is_write() {
        ensure_parents(doc, &op.path)?;
        if op.kind == OperationKind::Replace && doc.pointer(&op.path.to_string()).is_none() {
            op.kind = OperationKind::Add;
        }
    }
    tracing::trace!(op = %op, "applying operation");

    let path = op.path.to_string();
    let patch_op: json_patch::PatchOperation = serde_json::from_value(op.to_json()?)
        .map_err(|e| Error::patch_apply(&path, e.to_string()))?;
    json_patch::patch(doc, std::slice::from_ref(&patch_op))
        .map_err(|e| Error::patch_apply(&path, e.to_string()))
}

/// Creates every missing container above the target of `path`.
///
/// A container is a list when the element below it is a list position and a
/// map otherwise.
fn ensure_parents(doc: &mut Json, path: &Path) -> Result<()> {
    let elements = path.as_slice();
    if elements.len() < 2 {
        return Ok(());
    }

    let mut node = doc;
    for (depth, element) in elements[..elements.len() - 1].iter().enumerate() {
        let below = &elements[depth + 1];
        let fresh = || {
            if below.is_index() {
                Json::Array(Vec::new())
            } else {
                Json::Object(serde_json::Map::new())
            }
        };
        if node.is_null() {
            *node = match element {
                PathElement::FieldName(_) => Json::Object(serde_json::Map::new()),
                _ => Json::Array(Vec::new()),
            };
        }
        node = match (node, element) {
            (Json::Object(obj), PathElement::FieldName(name)) => {
                obj.entry(name.clone()).or_insert_with(fresh)
            }
            (Json::Array(items), PathElement::Index(i)) => {
                if *i == items.len() {
                    items.push(fresh());
                }
                let len = items.len();
                items.get_mut(*i).ok_or_else(|| {
                    Error::patch_apply(
                        path.to_string(),
                        format!("index {} is out of bounds for a list of {}", i, len),
                    )
                })?
            }
            (Json::Array(items), PathElement::Append) => {
                let end = items.len();
                items.push(fresh());
                &mut items[end]
            }
            (other, element) => {
                return Err(Error::patch_apply(
                    path.to_string(),
                    format!("cannot address {:?} inside a {}", element.token(), json_kind(other)),
                ))
            }
        };
    }
    Ok(())
}

fn json_kind(v: &Json) -> &'static str {
    match v {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "list",
        Json::Object(_) => "map",
    }
}
