//! A hash map storing a set of distinct values under each key.
//!
//! [`MultiValueMap`] is a multimap with set semantics: inserting the same value under the
//! same key twice has no effect, and a key stays in the map until it is removed explicitly,
//! even when its value set has been emptied.
//!
//! Keys and values must implement [`Eq`] and [`Hash`]. Neither can be absent, so there is
//! no null-argument failure mode. The only lookup failure is [`KeyNotFound`], returned by
//! [`MultiValueMap::try_get`].
//!
//! The map is not internally synchronized. Mutation requires `&mut self`, so sharing it
//! between threads requires an external lock such as `Mutex<MultiValueMap<K, V>>`.

#[cfg(feature = "arbitrary")]
mod arbitrary;
mod error;
mod iter;
#[cfg(feature = "serde")]
mod serde;
mod values;

#[cfg(feature = "rayon")]
pub mod rayon {
    pub mod map;
}

pub use error::KeyNotFound;
pub use iter::{Iter, Keys, OwningIter, Pairs};
pub use values::ValueSet;

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::ops::Index;
use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, HashSet};
use std::collections::hash_map::RandomState;
use tracing::trace;

/// A map from keys to sets of distinct values.
///
/// Every value set is built with a clone of the map's hasher, so `S` must be [`Clone`].
///
/// # Examples
///
/// ```
/// use multivalue::MultiValueMap;
///
/// let mut map = MultiValueMap::new();
/// map.insert("a", 1);
/// map.insert("a", 2);
/// map.insert("a", 1);
/// assert_eq!(map["a"].len(), 2);
///
/// assert!(map.remove_value("a", &1));
/// assert!(map["a"].contains(&2));
///
/// assert!(map.remove("a"));
/// assert!(!map.contains_key("a"));
/// ```
#[derive(Clone)]
pub struct MultiValueMap<K, V, S = RandomState> {
    inner: HashMap<K, ValueSet<V, S>, S>,
    hasher: S,
}

impl<K: Eq + Hash, V: Eq + Hash> MultiValueMap<K, V, RandomState> {
    /// Creates a new empty MultiValueMap.
    ///
    /// # Examples
    ///
    /// ```
    /// use multivalue::MultiValueMap;
    ///
    /// let mut tags = MultiValueMap::new();
    /// tags.insert("post-1", "rust");
    /// ```
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(0, RandomState::new())
    }

    /// Creates a new MultiValueMap with room for at least `capacity` keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use multivalue::MultiValueMap;
    ///
    /// let mut tags = MultiValueMap::with_capacity(2);
    /// tags.insert("post-1", "rust");
    /// tags.insert("post-2", "c");
    /// assert!(tags.capacity() >= 2);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S: Clone> MultiValueMap<K, V, S> {
    /// Creates a new empty MultiValueMap using `hasher` for keys and for every value set.
    ///
    /// # Examples
    ///
    /// ```
    /// use multivalue::MultiValueMap;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let s = RandomState::new();
    /// let mut tags = MultiValueMap::with_hasher(s);
    /// tags.insert("post-1", "rust");
    /// ```
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    /// Creates a new MultiValueMap with a starting key capacity and a hasher.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            inner: HashMap::with_capacity_and_hasher(capacity, hasher.clone()),
            hasher,
        }
    }

    /// Returns a reference to the map's hasher.
    pub fn hasher(&self) -> &S {
        &self.hasher
    }
}

impl<K, V, S> MultiValueMap<K, V, S> {
    /// Returns the number of keys in the map, including keys with no values.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the map contains no keys.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the total number of values stored across all keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use multivalue::MultiValueMap;
    ///
    /// let mut map = MultiValueMap::new();
    /// map.insert_all("odd", [1, 3, 5]);
    /// map.insert_all("even", [2, 4]);
    /// map.insert_key("none");
    /// assert_eq!(map.len(), 3);
    /// assert_eq!(map.value_count(), 5);
    /// ```
    pub fn value_count(&self) -> usize {
        self.inner.values().map(ValueSet::len).sum()
    }

    /// Returns the number of keys the map can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Removes every key together with its values.
    pub fn clear(&mut self) {
        trace!(keys = self.inner.len(), "clearing multimap");
        self.inner.clear();
    }

    /// An iterator visiting all keys in arbitrary order.
    ///
    /// Each key is yielded once, no matter how many values it holds. The iterator can be
    /// cloned to walk the keys again.
    pub fn keys(&self) -> Keys<'_, K, V, S> {
        Keys::new(self.inner.keys())
    }

    /// An iterator visiting every key with its value set, in arbitrary order.
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter::new(self.inner.iter())
    }

    /// An iterator visiting every `(key, value)` pair, in arbitrary order.
    pub fn pairs(&self) -> Pairs<'_, K, V, S> {
        Pairs::new(self.inner.iter())
    }

    /// Retains whole entries for which the predicate returns `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use multivalue::MultiValueMap;
    ///
    /// let mut map = MultiValueMap::new();
    /// map.insert_all("full", [1, 2]);
    /// map.insert_key("empty");
    /// map.retain_keys(|_, values| !values.is_empty());
    /// assert!(map.contains_key("full"));
    /// assert!(!map.contains_key("empty"));
    /// ```
    pub fn retain_keys(&mut self, mut predicate: impl FnMut(&K, &ValueSet<V, S>) -> bool) {
        self.inner.retain(|key, values| predicate(key, &*values));
    }

    /// Retains values for which the predicate returns `true`.
    ///
    /// Keys are never removed by this method, even if all their values are.
    ///
    /// # Examples
    ///
    /// ```
    /// use multivalue::MultiValueMap;
    ///
    /// let mut map = MultiValueMap::new();
    /// map.insert_all("n", [1, 2, 3, 4]);
    /// map.insert_all("m", [5, 7]);
    /// map.retain(|_, v| v % 2 == 0);
    /// assert_eq!(map["n"].len(), 2);
    /// assert!(map["m"].is_empty());
    /// ```
    pub fn retain(&mut self, mut predicate: impl FnMut(&K, &V) -> bool) {
        for (key, values) in self.inner.iter_mut() {
            values.retain(|value| predicate(key, value));
        }
    }
}

impl<K: Eq + Hash, V: Eq + Hash, S: BuildHasher + Clone> MultiValueMap<K, V, S> {
    fn values_or_insert(&mut self, key: K) -> &mut ValueSet<V, S> {
        match self.inner.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                trace!("creating key");
                entry.insert(ValueSet::with_hasher(self.hasher.clone()))
            }
        }
    }

    /// Inserts `value` under `key`, creating the key if it is absent.
    ///
    /// Returns `true` if the value was not already stored under the key. Inserting a
    /// value that is already present leaves the map unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use multivalue::MultiValueMap;
    ///
    /// let mut map = MultiValueMap::new();
    /// assert!(map.insert("k", 1));
    /// assert!(!map.insert("k", 1));
    /// assert_eq!(map["k"].len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.values_or_insert(key).insert(value)
    }

    /// Registers `key` with an empty value set. Does nothing if the key already exists.
    ///
    /// Returns `true` if the key was newly created.
    ///
    /// # Examples
    ///
    /// ```
    /// use multivalue::MultiValueMap;
    ///
    /// let mut map = MultiValueMap::<&str, u32>::new();
    /// assert!(map.insert_key("k"));
    /// assert!(map.contains_key("k"));
    /// assert!(map["k"].is_empty());
    /// assert!(!map.insert_key("k"));
    /// ```
    pub fn insert_key(&mut self, key: K) -> bool {
        match self.inner.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                trace!("creating key");
                entry.insert(ValueSet::with_hasher(self.hasher.clone()));
                true
            }
        }
    }

    /// Inserts every value of `values` under `key`, one at a time.
    ///
    /// The key is created even when `values` yields nothing. Duplicates collapse.
    ///
    /// # Examples
    ///
    /// ```
    /// use multivalue::MultiValueMap;
    ///
    /// let mut map = MultiValueMap::new();
    /// map.insert_all("k", ["x", "y", "x"]);
    /// assert_eq!(map["k"].len(), 2);
    ///
    /// map.insert_all("empty", Vec::new());
    /// assert!(map.contains_key("empty"));
    /// ```
    pub fn insert_all<I>(&mut self, key: K, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        let set = self.values_or_insert(key);

        for value in values {
            set.insert(value);
        }
    }

    /// Returns the value set stored under `key`, or `None` if the key is absent.
    pub fn get<Q>(&self, key: &Q) -> Option<&ValueSet<V, S>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.inner.get(key)
    }

    /// Returns the value set stored under `key`, or [`KeyNotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use multivalue::{KeyNotFound, MultiValueMap};
    ///
    /// let mut map = MultiValueMap::new();
    /// map.insert("k", 1);
    /// assert!(map.try_get("k")?.contains(&1));
    /// assert_eq!(map.try_get("missing").err(), Some(KeyNotFound));
    /// # Ok::<(), KeyNotFound>(())
    /// ```
    pub fn try_get<Q>(&self, key: &Q) -> Result<&ValueSet<V, S>, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.get(key).ok_or(KeyNotFound)
    }

    /// Returns `true` if `key` has an entry, even one with no values.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.inner.contains_key(key)
    }

    /// Returns `true` if `value` is stored under `key`.
    pub fn contains<Q, R>(&self, key: &Q, value: &R) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
        V: Borrow<R>,
        R: ?Sized + Eq + Hash,
    {
        self.get(key).map_or(false, |values| values.contains(value))
    }

    /// Removes `key` and all of its values.
    ///
    /// Returns `true` if the key existed.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.take(key).is_some()
    }

    /// Removes `key` and returns its values.
    ///
    /// # Examples
    ///
    /// ```
    /// use multivalue::MultiValueMap;
    ///
    /// let mut map = MultiValueMap::new();
    /// map.insert_all("k", [1, 2]);
    /// let values = map.take("k").unwrap();
    /// assert_eq!(values.len(), 2);
    /// assert!(map.take("k").is_none());
    /// ```
    pub fn take<Q>(&mut self, key: &Q) -> Option<HashSet<V, S>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        let values = self.inner.remove(key)?;
        trace!(values = values.len(), "removed key");
        Some(values.into_inner())
    }

    /// Removes a single `value` from the set stored under `key`.
    ///
    /// Returns `true` if the value was present. The key is kept even if its set
    /// becomes empty. A missing key returns `false` and is not created.
    pub fn remove_value<Q, R>(&mut self, key: &Q, value: &R) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
        V: Borrow<R>,
        R: ?Sized + Eq + Hash,
    {
        match self.inner.get_mut(key) {
            Some(values) => values.remove(value),
            None => false,
        }
    }

    /// Shrinks the map and every value set as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.inner.shrink_to_fit();

        for values in self.inner.values_mut() {
            values.shrink_to_fit();
        }
    }
}

impl<K: Eq + Hash, V: Eq + Hash, S: Default + BuildHasher + Clone> Default
    for MultiValueMap<K, V, S>
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for MultiValueMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.iter()).finish()
    }
}

impl<K, V, S> PartialEq for MultiValueMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K: Eq + Hash, V: Eq + Hash, S: BuildHasher> Eq for MultiValueMap<K, V, S> {}

impl<K, Q, V, S> Index<&Q> for MultiValueMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Eq + Hash,
    V: Eq + Hash,
    S: BuildHasher + Clone,
{
    type Output = ValueSet<V, S>;

    /// # Panics
    ///
    /// Panics with [`KeyNotFound`] if the key is not present in the map.
    fn index(&self, key: &Q) -> &ValueSet<V, S> {
        match self.try_get(key) {
            Ok(values) => values,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<K: Eq + Hash, V: Eq + Hash, S: BuildHasher + Clone> Extend<(K, V)>
    for MultiValueMap<K, V, S>
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, intoiter: I) {
        for (key, value) in intoiter.into_iter() {
            self.insert(key, value);
        }
    }
}

impl<K: Eq + Hash, V: Eq + Hash, S: Default + BuildHasher + Clone> FromIterator<(K, V)>
    for MultiValueMap<K, V, S>
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(intoiter: I) -> Self {
        let mut map = MultiValueMap::default();

        map.extend(intoiter);

        map
    }
}

impl<K, V, S> IntoIterator for MultiValueMap<K, V, S> {
    type Item = (K, HashSet<V, S>);

    type IntoIter = OwningIter<K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        OwningIter::new(self.inner.into_iter())
    }
}

impl<'a, K, V, S> IntoIterator for &'a MultiValueMap<K, V, S> {
    type Item = (&'a K, &'a ValueSet<V, S>);

    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
