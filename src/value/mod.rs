//! Value module - In-memory tree form of a configuration snapshot.
//!
//! Every snapshot is serialized to this form before it is diffed.

mod value;

pub use value::*;
