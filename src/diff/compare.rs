//! Invertible structural diff between two Value trees.

use super::{Operation, OperationKind};
use crate::fieldpath::{Path, PathElement};
use crate::value::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Computes the operations that turn `old` into `new`.
///
/// The diff is invertible: every `remove` and every `replace` is immediately
/// preceded by a `test` carrying the value it discards.
///
/// - Map keys are visited in sorted order.
/// - Lists are compared position by position over their common prefix. Extra
///   new elements are appended with the `-` token; extra old elements are
///   removed from the highest index down.
/// - Scalars of different value, or nodes of different kind, are replaced.
pub fn diff(old: &Value, new: &Value) -> Vec<Operation> {
    let mut ops = Vec::new();
    compare_values(&Path::new(), old, new, &mut ops);
    ops
}

fn compare_values(path: &Path, old: &Value, new: &Value, ops: &mut Vec<Operation>) {
    match (old, new) {
        (Value::Map(lhs), Value::Map(rhs)) => compare_maps(path, lhs, rhs, ops),
        (Value::List(lhs), Value::List(rhs)) => compare_lists(path, lhs, rhs, ops),
        _ if old == new => {}
        _ => {
            ops.push(Operation::test(path.clone(), old.clone()));
            ops.push(Operation::replace(path.clone(), new.clone()));
        }
    }
}

fn compare_maps(path: &Path, lhs: &Map, rhs: &Map, ops: &mut Vec<Operation>) {
    let keys: BTreeSet<&String> = lhs.keys().chain(rhs.keys()).collect();
    for key in keys {
        let field_path = path.with(PathElement::field_name(key.clone()));
        match (lhs.get(key), rhs.get(key)) {
            (Some(l), Some(r)) => compare_values(&field_path, l, r, ops),
            (None, Some(r)) => ops.push(Operation::add(field_path, r.clone())),
            (Some(l), None) => remove(field_path, l, ops),
            (None, None) => {}
        }
    }
}

fn compare_lists(path: &Path, lhs: &[Value], rhs: &[Value], ops: &mut Vec<Operation>) {
    let common = lhs.len().min(rhs.len());
    for i in 0..common {
        compare_values(&path.with(PathElement::index(i)), &lhs[i], &rhs[i], ops);
    }
    for i in (rhs.len()..lhs.len()).rev() {
        remove(path.with(PathElement::index(i)), &lhs[i], ops);
    }
    for item in &rhs[common..] {
        ops.push(Operation::add(path.with(PathElement::Append), item.clone()));
    }
}

fn remove(path: Path, old: &Value, ops: &mut Vec<Operation>) {
    ops.push(Operation::test(path.clone(), old.clone()));
    ops.push(Operation::remove(path));
}

/// Groups operations by the top-level field they touch.
///
/// Root-level operations are grouped under `""`. Relative order inside each
/// group is preserved, so a `test` still precedes its `remove`.
pub fn group_by_field(ops: &[Operation]) -> BTreeMap<String, Vec<Operation>> {
    let mut groups: BTreeMap<String, Vec<Operation>> = BTreeMap::new();
    for op in ops {
        groups
            .entry(op.path.top_level_field())
            .or_default()
            .push(op.clone());
    }
    groups
}

/// Returns the operations whose path is `field` or lies below it.
pub fn ops_under_field<'a>(
    ops: &'a [Operation],
    field: &'a str,
) -> impl Iterator<Item = &'a Operation> + 'a {
    ops.iter()
        .filter(move |op| field.is_empty() || op.path.top_level_field() == field)
}

/// Pairs each `remove` with the value recorded by the `test` right before it.
pub fn removed_values(ops: &[Operation]) -> Vec<(&Path, &Value)> {
    ops.windows(2)
        .filter_map(|pair| match (&pair[0], &pair[1]) {
            (prior, removal)
                if prior.kind == OperationKind::Test
                    && removal.kind == OperationKind::Remove
                    && prior.path == removal.path =>
            {
                Some((&removal.path, &prior.value))
            }
            _ => None,
        })
        .collect()
}
