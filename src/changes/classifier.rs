//! Yes/no questions over a list of change paths.

use super::find_changes;
use crate::value::Value;
use once_cell::sync::OnceCell;
use std::collections::BTreeSet;

/// AttributeChanges classifies which attributes a change-path list touches.
///
/// The input is a list of already-normalized change paths such as
/// `replication_specs[0].zone_name` or `replication_specs[+1]`. Leaf sets are
/// computed on first use and cached.
#[derive(Debug, Clone, Default)]
pub struct AttributeChanges {
    changes: Vec<String>,
    leaves: OnceCell<BTreeSet<String>>,
    raw_leaves: OnceCell<BTreeSet<String>>,
}

impl AttributeChanges {
    /// Creates a classifier over the given change paths.
    pub fn new<I, S>(changes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AttributeChanges {
            changes: changes.into_iter().map(Into::into).collect(),
            leaves: OnceCell::new(),
            raw_leaves: OnceCell::new(),
        }
    }

    /// Creates a classifier over the changes between two snapshots.
    pub fn from_values(old: &Value, new: &Value) -> Self {
        AttributeChanges::new(find_changes(old, new))
    }

    /// Returns the change paths in input order.
    pub fn changes(&self) -> &[String] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns the set of last dotted segments.
    ///
    /// With `strip_indices`, a trailing bracket suffix is dropped so that
    /// `replication_specs[0]` counts as `replication_specs`.
    pub fn leaf_changes(&self, strip_indices: bool) -> &BTreeSet<String> {
        let cell = if strip_indices {
            &self.leaves
        } else {
            &self.raw_leaves
        };
        cell.get_or_init(|| {
            self.changes
                .iter()
                .map(|path| leaf(path, strip_indices).to_string())
                .collect()
        })
    }

    /// Returns true if some change path ends in the attribute `name`.
    pub fn attribute_changed(&self, name: &str) -> bool {
        self.leaf_changes(true).contains(name)
    }

    /// Collects each changed attribute of `mapping` followed by its dependents.
    ///
    /// Duplicates are kept; callers deduplicate.
    pub fn keep_unknown(&self, mapping: &[(&str, &[&str])]) -> Vec<String> {
        let mut keep = Vec::new();
        for (attr, dependents) in mapping {
            if self.attribute_changed(attr) {
                keep.push(attr.to_string());
                keep.extend(dependents.iter().map(|d| d.to_string()));
            }
        }
        keep
    }

    /// Returns true if the element `name[index]` was edited in place.
    pub fn list_index_changed(&self, name: &str, index: usize) -> bool {
        self.leaf_changes(false)
            .contains(&format!("{}[{}]", name, index))
    }

    /// Returns true if an element was inserted into or removed from the list
    /// `name`, wherever it is nested.
    pub fn list_len_changes(&self, name: &str) -> bool {
        let (inserted, removed) = len_change_prefixes(name);
        self.leaf_changes(false)
            .iter()
            .any(|leaf| leaf.starts_with(&inserted) || leaf.starts_with(&removed))
    }

    /// Like [`list_len_changes`](Self::list_len_changes), but `full_path`
    /// names one specific list, e.g. `replication_specs[0].region_configs`.
    pub fn nested_list_len_changes(&self, full_path: &str) -> bool {
        let (inserted, removed) = len_change_prefixes(full_path);
        self.changes
            .iter()
            .any(|path| path.starts_with(&inserted) || path.starts_with(&removed))
    }
}

fn len_change_prefixes(name: &str) -> (String, String) {
    (format!("{}[+", name), format!("{}[-", name))
}

fn leaf(path: &str, strip_indices: bool) -> &str {
    let last = path.rsplit('.').next().unwrap_or(path);
    if strip_indices && last.ends_with(']') {
        if let Some(open) = last.find('[') {
            return &last[..open];
        }
    }
    last
}
