//! Diff module - Structural diff and patch primitives.
//!
//! [`diff`] turns two Value trees into an ordered, invertible list of
//! [`Operation`]s; [`apply`] replays operations onto a JSON document.

mod apply;
mod compare;
mod operation;

pub use apply::*;
pub use compare::*;
pub use operation::*;
