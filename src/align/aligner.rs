//! Identity-based list alignment.

use std::fmt::Debug;
use tracing::debug;

/// IdentityKey is the pair used to recognize the same logical element in two
/// lists: a primary key and an ordered set of secondary keys beneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IdentityKey<P, S> {
    pub primary: P,
    pub secondary: Vec<S>,
}

impl<P, S> IdentityKey<P, S> {
    /// Creates a new identity key.
    pub fn new(primary: P, secondary: impl IntoIterator<Item = S>) -> Self {
        IdentityKey {
            primary,
            secondary: secondary.into_iter().collect(),
        }
    }
}

impl<P: PartialEq, S: PartialEq> IdentityKey<P, S> {
    /// Returns true if `self` identifies the same element as `other` under `mode`.
    pub fn matches(&self, other: &Self, mode: MatchMode) -> bool {
        let primary = self.primary == other.primary;
        let secondary = self.secondary == other.secondary;
        match mode {
            MatchMode::Full => primary && secondary,
            MatchMode::Partial => primary || secondary,
        }
    }
}

/// Identify exposes the identity projection of a list element.
pub trait Identify {
    type Primary: PartialEq + Debug;
    type Secondary: PartialEq + Debug;

    fn identity(&self) -> IdentityKey<Self::Primary, Self::Secondary>;
}

/// MatchMode selects how strictly identities must agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Primary key and secondary keys must both be equal.
    Full,
    /// Either the primary key or the secondary keys must be equal.
    Partial,
}

impl MatchMode {
    /// Full when the lists differ in length, Partial otherwise.
    pub fn for_lengths(old: usize, new: usize) -> MatchMode {
        if old == new {
            MatchMode::Partial
        } else {
            MatchMode::Full
        }
    }
}

/// Alignment is the result of [`align_list`].
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment<T> {
    /// Old elements rearranged to the positions of the new list.
    pub list: Vec<T>,
    /// True if any old element moved, was dropped, or was replaced by a placeholder.
    pub changed: bool,
}

/// Rearranges `old` so that its positions correspond to `new`.
///
/// The output has exactly `new.len()` elements. Position `i` holds the first
/// still-available old element whose identity matches `new[i]`, or
/// `T::default()` when none does. Old elements that nothing matched are
/// dropped.
pub fn align_list<T>(old: &[T], new: &[T]) -> Alignment<T>
where
    T: Identify + Default + Clone,
{
    align_list_by(old, new, T::identity)
}

/// Like [`align_list`], with the identity projection passed explicitly.
pub fn align_list_by<T, P, S, F>(old: &[T], new: &[T], identity: F) -> Alignment<T>
where
    T: Default + Clone,
    P: PartialEq + Debug,
    S: PartialEq + Debug,
    F: Fn(&T) -> IdentityKey<P, S>,
{
    let mode = MatchMode::for_lengths(old.len(), new.len());
    let old_keys: Vec<IdentityKey<P, S>> = old.iter().map(&identity).collect();
    let mut available = vec![true; old.len()];
    let mut changed = old.len() != new.len();
    let mut list = Vec::with_capacity(new.len());

    for (i, element) in new.iter().enumerate() {
        let key = identity(element);
        let found = old_keys
            .iter()
            .zip(&available)
            .position(|(candidate, free)| *free && candidate.matches(&key, mode));
        match found {
            Some(j) => {
                available[j] = false;
                changed |= i != j;
                list.push(old[j].clone());
            }
            None => {
                debug!(position = i, key = ?key, ?mode, "no matching element, using placeholder");
                changed = true;
                list.push(T::default());
            }
        }
    }

    for (j, key) in old_keys.iter().enumerate().filter(|(j, _)| available[*j]) {
        debug!(position = j, key = ?key, "element dropped from aligned list");
    }
    Alignment { list, changed }
}
