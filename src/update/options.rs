//! Tunables for patch synthesis.

use crate::error::Result;
use crate::fieldpath::Path;
use serde::{Deserialize, Serialize};

/// PatchOptions controls which state-only values are re-injected into a
/// patch and which top-level fields are always sent.
///
/// Options documents use camelCase keys, so they can be kept next to the
/// request shapes they describe:
///
/// ```yaml
/// ignoreInStateSuffix: [diskSizeGB]
/// ignoreInStatePrefix: [regionConfigs]
/// includeInStateSuffix: [diskIOPS]
/// forceUpdateAttr: [replicationSpecs]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatchOptions {
    /// Last path segments whose state values are never re-injected.
    pub ignore_in_state_suffix: Vec<String>,
    /// Path segments below which state values are never re-injected.
    pub ignore_in_state_prefix: Vec<String>,
    /// Last path segments that are re-injected even when an ignore rule matches.
    pub include_in_state_suffix: Vec<String>,
    /// Top-level fields that are treated as changed even without a diff.
    pub force_update_attr: Vec<String>,
}

fn strings<I, S>(items: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into)
}

impl PatchOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        PatchOptions::default()
    }

    /// Adds last path segments to ignore.
    pub fn with_ignore_in_state_suffix<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_in_state_suffix.extend(strings(suffixes));
        self
    }

    /// Adds path segments to ignore below.
    pub fn with_ignore_in_state_prefix<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_in_state_prefix.extend(strings(prefixes));
        self
    }

    /// Adds last path segments that override the ignore rules.
    pub fn with_include_in_state_suffix<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_in_state_suffix.extend(strings(suffixes));
        self
    }

    /// Adds top-level fields that are always sent.
    pub fn with_force_update_attr<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.force_update_attr.extend(strings(fields));
        self
    }

    /// Appends every list of `other` to this one.
    pub fn extend(&mut self, other: PatchOptions) {
        self.ignore_in_state_suffix.extend(other.ignore_in_state_suffix);
        self.ignore_in_state_prefix.extend(other.ignore_in_state_prefix);
        self.include_in_state_suffix.extend(other.include_in_state_suffix);
        self.force_update_attr.extend(other.force_update_attr);
    }

    /// Combines several option records into one.
    pub fn merge(all: impl IntoIterator<Item = PatchOptions>) -> PatchOptions {
        let mut merged = PatchOptions::new();
        for options in all {
            merged.extend(options);
        }
        merged
    }

    /// Parses an options document in YAML (or JSON).
    pub fn from_yaml(yaml: &str) -> Result<PatchOptions> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses an options document in JSON.
    pub fn from_json(json: &str) -> Result<PatchOptions> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns true if a state value at `path` must not be re-injected.
    pub fn ignore_in_state_path(&self, path: &Path) -> bool {
        let last = path.last_token();
        if self.include_in_state_suffix.iter().any(|s| *s == last) {
            return false;
        }
        if self.ignore_in_state_suffix.iter().any(|s| *s == last) {
            return true;
        }
        path.iter().any(|element| {
            let token = element.token();
            self.ignore_in_state_prefix.iter().any(|p| *p == token)
        })
    }

    /// Returns true if `field` is always treated as changed.
    pub fn is_forced(&self, field: &str) -> bool {
        self.force_update_attr.iter().any(|f| f == field)
    }
}
