use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::{hash_set, HashSet};
use std::collections::hash_map::RandomState;

/// The set of distinct values stored under one key of a [`MultiValueMap`].
///
/// A `&ValueSet` handed out by the map is a live, read-only view: the map owns the
/// set and is the only one allowed to change it, so values can only be added or
/// removed through the map itself.
///
/// [`MultiValueMap`]: crate::MultiValueMap
#[derive(Clone)]
pub struct ValueSet<V, S = RandomState> {
    set: HashSet<V, S>,
}

impl<V, S> ValueSet<V, S> {
    pub(crate) fn with_hasher(hasher: S) -> Self {
        Self {
            set: HashSet::with_hasher(hasher),
        }
    }

    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns `true` if no values are stored under the key.
    ///
    /// The key itself is still present in the map.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// An iterator visiting all values in arbitrary order.
    pub fn iter(&self) -> hash_set::Iter<'_, V> {
        self.set.iter()
    }

    /// Borrows the underlying set.
    pub fn as_set(&self) -> &HashSet<V, S> {
        &self.set
    }

    /// Consumes the view, returning the underlying set.
    pub fn into_inner(self) -> HashSet<V, S> {
        self.set
    }

    pub(crate) fn retain(&mut self, f: impl FnMut(&V) -> bool) {
        self.set.retain(f)
    }

    pub(crate) fn shrink_to_fit(&mut self)
    where
        V: Eq + Hash,
        S: BuildHasher,
    {
        self.set.shrink_to_fit()
    }
}

impl<V: Eq + Hash, S: BuildHasher> ValueSet<V, S> {
    /// Returns `true` if `value` is stored under the key.
    pub fn contains<R>(&self, value: &R) -> bool
    where
        V: Borrow<R>,
        R: ?Sized + Eq + Hash,
    {
        self.set.contains(value)
    }

    /// Takes an owned snapshot of the values.
    pub fn to_set(&self) -> HashSet<V, S>
    where
        V: Clone,
        S: Clone,
    {
        self.set.clone()
    }

    pub(crate) fn insert(&mut self, value: V) -> bool {
        self.set.insert(value)
    }

    pub(crate) fn remove<R>(&mut self, value: &R) -> bool
    where
        V: Borrow<R>,
        R: ?Sized + Eq + Hash,
    {
        self.set.remove(value)
    }
}

impl<V: fmt::Debug, S> fmt::Debug for ValueSet<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.set.iter()).finish()
    }
}

impl<V: Eq + Hash, S: BuildHasher> PartialEq for ValueSet<V, S> {
    fn eq(&self, other: &Self) -> bool {
        self.set == other.set
    }
}

impl<V: Eq + Hash, S: BuildHasher> Eq for ValueSet<V, S> {}

impl<V: Eq + Hash, S: BuildHasher> PartialEq<HashSet<V, S>> for ValueSet<V, S> {
    fn eq(&self, other: &HashSet<V, S>) -> bool {
        &self.set == other
    }
}

impl<'a, V, S> IntoIterator for &'a ValueSet<V, S> {
    type Item = &'a V;
    type IntoIter = hash_set::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.iter()
    }
}

impl<V, S> IntoIterator for ValueSet<V, S> {
    type Item = V;
    type IntoIter = hash_set::IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.into_iter()
    }
}
