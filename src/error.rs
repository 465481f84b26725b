//! Error types shared by the diff, apply and synthesis steps.

use thiserror::Error;

/// Error is the failure kind surfaced by the engine.
///
/// The engine only distinguishes the kind of failure; callers decide how to
/// present it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A snapshot could not be converted to or from a Value tree.
    #[error("serialization failed: {message}")]
    Serialization { message: String },

    /// An operation could not be applied to the accumulated patch document.
    #[error("{path}: patch apply failed: {message}")]
    PatchApply { path: String, message: String },

    /// A structural diff or one of its operation paths was malformed.
    #[error("diff failed: {message}")]
    Diff { message: String },
}

impl Error {
    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Error::Serialization {
            message: message.into(),
        }
    }

    /// Creates a patch apply error.
    pub fn patch_apply(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::PatchApply {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a diff error.
    pub fn diff(message: impl Into<String>) -> Self {
        Error::Diff {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
