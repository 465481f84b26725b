//! Changes module - Which attributes changed between two snapshots.
//!
//! [`find_changes`] produces the dotted change paths; [`AttributeChanges`]
//! answers questions about them.

mod classifier;
mod find;

pub use classifier::*;
pub use find::*;
