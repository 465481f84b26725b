//! Change-path discovery between two snapshots.

use crate::fieldpath::{ChangePath, Segment};
use crate::value::{Map, Value};
use std::collections::BTreeSet;

static NULL: Value = Value::Null;

/// Lists every node whose subtree differs between `old` and `new`.
///
/// The result contains each changed leaf, every ancestor of a changed node,
/// `name[i]` for list elements changed in place, `name[+i]` for appended
/// elements and `name[-i]` for removed ones. Paths are de-duplicated and
/// sorted structurally, so a parent always precedes its children.
///
/// A null on one side against a map or list on the other is compared as an
/// empty map or list.
pub fn find_changes(old: &Value, new: &Value) -> Vec<String> {
    let mut found = BTreeSet::new();
    collect(&ChangePath::new(), old, new, &mut found);
    found.iter().map(ToString::to_string).collect()
}

fn collect(path: &ChangePath, old: &Value, new: &Value, found: &mut BTreeSet<ChangePath>) -> bool {
    let empty_map = Map::new();
    let changed = match (old, new) {
        (Value::Map(lhs), Value::Map(rhs)) => collect_maps(path, lhs, rhs, found),
        (Value::Null, Value::Map(rhs)) => collect_maps(path, &empty_map, rhs, found),
        (Value::Map(lhs), Value::Null) => collect_maps(path, lhs, &empty_map, found),
        (Value::List(lhs), Value::List(rhs)) => collect_lists(path, lhs, rhs, found),
        (Value::Null, Value::List(rhs)) => collect_lists(path, &[], rhs, found),
        (Value::List(lhs), Value::Null) => collect_lists(path, lhs, &[], found),
        _ => old != new,
    };
    if changed && !path.is_empty() {
        found.insert(path.clone());
    }
    changed
}

fn collect_maps(path: &ChangePath, lhs: &Map, rhs: &Map, found: &mut BTreeSet<ChangePath>) -> bool {
    let keys: BTreeSet<&String> = lhs.keys().chain(rhs.keys()).collect();
    let mut changed = false;
    for key in keys {
        let old = lhs.get(key).unwrap_or(&NULL);
        let new = rhs.get(key).unwrap_or(&NULL);
        changed |= collect(&path.field(key.clone()), old, new, found);
    }
    changed
}

fn collect_lists(
    path: &ChangePath,
    lhs: &[Value],
    rhs: &[Value],
    found: &mut BTreeSet<ChangePath>,
) -> bool {
    let common = lhs.len().min(rhs.len());
    let mut changed = false;
    for i in 0..common {
        changed |= collect(&path.with(Segment::Index(i)), &lhs[i], &rhs[i], found);
    }
    for i in common..rhs.len() {
        found.insert(path.with(Segment::Inserted(i)));
        changed = true;
    }
    for i in common..lhs.len() {
        found.insert(path.with(Segment::Removed(i)));
        changed = true;
    }
    changed
}
