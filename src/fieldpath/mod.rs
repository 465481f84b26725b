//! Field path module - Addresses nodes inside snapshot trees.
//!
//! [`Path`] addresses the target of a diff operation and renders as a JSON
//! pointer. [`ChangePath`] is the dotted, bracketed form used to report
//! which attributes changed.

mod changepath;
mod path;

pub use changepath::*;
pub use path::*;
