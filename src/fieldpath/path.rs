//! Path element and path types for diff operations.

use std::fmt;

/// PathElement represents one level of navigation into a Value tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathElement {
    /// Field name for map fields.
    FieldName(String),
    /// Position in a list.
    Index(usize),
    /// One past the end of a list, the JSON pointer `-` token.
    Append,
}

impl PathElement {
    /// Creates a new field name path element.
    pub fn field_name(name: impl Into<String>) -> Self {
        PathElement::FieldName(name.into())
    }

    /// Creates a new index path element.
    pub fn index(i: usize) -> Self {
        PathElement::Index(i)
    }

    /// Returns true if this is a list position, appended or not.
    pub fn is_index(&self) -> bool {
        matches!(self, PathElement::Index(_) | PathElement::Append)
    }

    /// Returns the unescaped reference token of this element.
    pub fn token(&self) -> String {
        match self {
            PathElement::FieldName(name) => name.clone(),
            PathElement::Index(i) => i.to_string(),
            PathElement::Append => "-".to_string(),
        }
    }
}

impl fmt::Display for PathElement {
    /// Writes the escaped JSON pointer token (`~` as `~0`, `/` as `~1`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::FieldName(name) => {
                write!(f, "{}", name.replace('~', "~0").replace('/', "~1"))
            }
            PathElement::Index(i) => write!(f, "{}", i),
            PathElement::Append => write!(f, "-"),
        }
    }
}

/// Path locates a node in a Value tree and renders as a JSON pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    /// Creates a new empty path, the document root.
    pub fn new() -> Self {
        Path {
            elements: Vec::new(),
        }
    }

    /// Creates a path from a vector of elements.
    pub fn from_elements(elements: Vec<PathElement>) -> Self {
        Path { elements }
    }

    /// Returns the number of elements in the path.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the path is the root.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns an iterator over the path elements.
    pub fn iter(&self) -> impl Iterator<Item = &PathElement> {
        self.elements.iter()
    }

    /// Appends a path element.
    pub fn push(&mut self, element: PathElement) {
        self.elements.push(element);
    }

    /// Returns the first path element.
    pub fn first(&self) -> Option<&PathElement> {
        self.elements.first()
    }

    /// Returns the last path element.
    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    /// Creates a new path with the given element appended.
    pub fn with(&self, element: PathElement) -> Self {
        let mut new_path = self.clone();
        new_path.push(element);
        new_path
    }

    /// Returns a slice of the path elements.
    pub fn as_slice(&self) -> &[PathElement] {
        &self.elements
    }

    /// Name of the top-level field this path lives under, `""` for the root.
    pub fn top_level_field(&self) -> String {
        self.first().map(PathElement::token).unwrap_or_default()
    }

    /// Returns true if the last element is a bare list position.
    pub fn ends_with_index(&self) -> bool {
        self.last().is_some_and(PathElement::is_index)
    }

    /// Returns the unescaped token of the last element, `""` for the root.
    pub fn last_token(&self) -> String {
        self.last().map(PathElement::token).unwrap_or_default()
    }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<T: IntoIterator<Item = PathElement>>(iter: T) -> Self {
        Path {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathElement;
    type IntoIter = std::slice::Iter<'a, PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.elements {
            write!(f, "/{}", element)?;
        }
        Ok(())
    }
}
