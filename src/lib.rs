//! # Config Patch
//!
//! Diff and patch synthesis for nested configuration snapshots.
//!
//! Given the last-applied and the desired snapshot of a resource, this
//! library works out which fields changed, builds the smallest update
//! request that moves the remote resource to the desired state, and
//! realigns ordered lists so that position-wise comparison stays meaningful.
//!
//! ## Modules
//!
//! - [`value`] - In-memory representation of JSON/YAML snapshots
//! - [`fieldpath`] - Paths into a snapshot and change-path strings
//! - [`diff`] - JSON Patch operations: computing and applying them
//! - [`changes`] - Change discovery and attribute change classification
//! - [`update`] - Minimal update request synthesis
//! - [`align`] - Identity-based list alignment

pub mod align;
pub mod changes;
pub mod diff;
pub mod error;
pub mod fieldpath;
pub mod update;
pub mod value;

pub use align::{align_list, align_list_by, Alignment, Identify, IdentityKey, MatchMode};
pub use changes::{find_changes, AttributeChanges};
pub use diff::{apply, diff, Operation, OperationKind};
pub use error::{Error, Result};
pub use fieldpath::{ChangePath, Path, PathElement};
pub use update::{changed_fields, is_zero_values, patch_payload, synthesize, PatchOptions};
pub use value::Value;
