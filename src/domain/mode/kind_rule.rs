//! KindRule - an immutable set of entity kinds a mode applies to.

use std::collections::BTreeSet;

/// Set of kinds, grown by value.
///
/// `add` returns a new rule and leaves the receiver untouched, so rules can
/// be shared between modes and extended per mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindRule<K: Ord> {
    kinds: BTreeSet<K>,
}

impl<K: Ord + Copy> KindRule<K> {
    /// A rule matching nothing.
    pub fn new() -> Self {
        Self {
            kinds: BTreeSet::new(),
        }
    }

    /// Returns a copy of this rule that also matches `kind`.
    #[must_use]
    pub fn add(&self, kind: K) -> Self {
        let mut kinds = self.kinds.clone();
        kinds.insert(kind);
        Self { kinds }
    }

    pub fn contains(&self, kind: K) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.kinds.iter().copied()
    }
}

impl<K: Ord + Copy> Default for KindRule<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy> FromIterator<K> for KindRule<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            kinds: iter.into_iter().collect(),
        }
    }
}
