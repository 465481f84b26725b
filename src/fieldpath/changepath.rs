//! Dotted change paths such as `replication_specs[0].region_configs[+1]`.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Segment is one component of a change path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// An object field, written `.name` (or `name` at the start).
    Field(String),
    /// A list element changed in place, written `[i]`.
    Index(usize),
    /// A list element inserted at position i, written `[+i]`.
    Inserted(usize),
    /// A list element removed from position i, written `[-i]`.
    Removed(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => write!(f, "{}", name),
            Segment::Index(i) => write!(f, "[{}]", i),
            Segment::Inserted(i) => write!(f, "[+{}]", i),
            Segment::Removed(i) => write!(f, "[-{}]", i),
        }
    }
}

/// ChangePath names a node whose subtree differs between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChangePath {
    segments: Vec<Segment>,
}

impl ChangePath {
    pub fn new() -> Self {
        ChangePath {
            segments: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Creates a new path with the given segment appended.
    pub fn with(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        ChangePath { segments }
    }

    pub fn field(&self, name: impl Into<String>) -> Self {
        self.with(Segment::Field(name.into()))
    }

    /// Parses the dotted form. Field names may not contain `.`, `[` or `]`.
    pub fn parse(s: &str) -> Result<ChangePath> {
        let malformed = |why: &str| Error::diff(format!("malformed change path {:?}: {}", s, why));
        let mut segments = Vec::new();
        if s.is_empty() {
            return Ok(ChangePath::new());
        }
        for part in s.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(pos) => part.split_at(pos),
                None => (part, ""),
            };
            if name.is_empty() || name.contains(']') {
                return Err(malformed("empty or invalid field name"));
            }
            segments.push(Segment::Field(name.to_string()));
            while !rest.is_empty() {
                let close = rest.find(']').ok_or_else(|| malformed("unclosed bracket"))?;
                let inner = &rest[1..close];
                let (ctor, digits): (fn(usize) -> Segment, &str) =
                    if let Some(d) = inner.strip_prefix('+') {
                        (Segment::Inserted, d)
                    } else if let Some(d) = inner.strip_prefix('-') {
                        (Segment::Removed, d)
                    } else {
                        (Segment::Index, inner)
                    };
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(malformed("list index must be a non-negative integer"));
                }
                let index = digits
                    .parse::<usize>()
                    .map_err(|e| malformed(&e.to_string()))?;
                segments.push(ctor(index));
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(malformed("unexpected text after bracket"));
                }
            }
        }
        Ok(ChangePath { segments })
    }

    /// The final dotted component, brackets included, e.g. `region_configs[+1]`.
    pub fn leaf(&self) -> String {
        let start = self
            .segments
            .iter()
            .rposition(|s| matches!(s, Segment::Field(_)))
            .unwrap_or(0);
        self.segments[start..].iter().map(ToString::to_string).collect()
    }
}

impl FromStr for ChangePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ChangePath::parse(s)
    }
}

impl fmt::Display for ChangePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && matches!(segment, Segment::Field(_)) {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
