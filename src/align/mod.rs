//! Align module - Positional alignment of element lists.
//!
//! Rearranges a previously-applied list so that each position lines up with
//! the same logical element of a desired list, which keeps position-wise
//! diffs meaningful across insertions, removals and reordering.

mod aligner;

pub use aligner::*;
