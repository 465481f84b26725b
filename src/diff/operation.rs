//! JSON-Patch style edit operations.

use crate::error::Result;
use crate::fieldpath::Path;
use crate::value::Value;
use std::fmt;

/// OperationKind is the verb of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Add,
    Replace,
    Remove,
    /// Records the prior value at a path. Only used to recover removed values.
    Test,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Add => "add",
            OperationKind::Replace => "replace",
            OperationKind::Remove => "remove",
            OperationKind::Test => "test",
        }
    }

    /// Returns true for the kinds that write a value.
    pub fn is_write(&self) -> bool {
        matches!(self, OperationKind::Add | OperationKind::Replace)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation is one edit at a path. Remove operations carry `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,
    pub path: Path,
    pub value: Value,
}

impl Operation {
    pub fn add(path: Path, value: Value) -> Self {
        Operation {
            kind: OperationKind::Add,
            path,
            value,
        }
    }

    pub fn replace(path: Path, value: Value) -> Self {
        Operation {
            kind: OperationKind::Replace,
            path,
            value,
        }
    }

    pub fn remove(path: Path) -> Self {
        Operation {
            kind: OperationKind::Remove,
            path,
            value: Value::Null,
        }
    }

    pub fn test(path: Path, value: Value) -> Self {
        Operation {
            kind: OperationKind::Test,
            path,
            value,
        }
    }

    /// Renders the operation as an RFC 6902 patch object.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let mut obj = serde_json::Map::new();
        obj.insert("op".into(), self.kind.as_str().into());
        obj.insert("path".into(), self.path.to_string().into());
        if self.kind != OperationKind::Remove {
            obj.insert("value".into(), self.value.to_json_value()?);
        }
        Ok(serde_json::Value::Object(obj))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.kind, self.path.to_string())
    }
}

/// Renders a list of operations as an RFC 6902 patch document.
pub fn to_json_patch(ops: &[Operation]) -> Result<serde_json::Value> {
    Ok(serde_json::Value::Array(
        ops.iter().map(Operation::to_json).collect::<Result<Vec<_>>>()?,
    ))
}
