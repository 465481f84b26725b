//! Update module - Synthesis of minimal update requests.
//!
//! Compares a last-applied snapshot with a desired one and builds the
//! smallest request object that moves the remote resource to the desired
//! state.

mod options;
mod payload;

#[cfg(test)]
mod payload_test;

pub use options::*;
pub use payload::*;
