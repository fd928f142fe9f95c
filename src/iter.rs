use crate::ValueSet;
use core::iter::FusedIterator;
use hashbrown::{hash_map, hash_set, HashSet};

/// Iterator over the keys of a MultiValueMap, in arbitrary order.
///
/// Keys whose value set is empty are still yielded.
///
/// # Examples
///
/// ```
/// use multivalue::MultiValueMap;
///
/// let mut map = MultiValueMap::new();
/// map.insert("fruit", "apple");
/// map.insert_key("vegetable");
/// assert_eq!(map.keys().count(), 2);
/// ```
pub struct Keys<'a, K, V, S> {
    inner: hash_map::Keys<'a, K, ValueSet<V, S>>,
}

impl<'a, K, V, S> Keys<'a, K, V, S> {
    pub(crate) fn new(inner: hash_map::Keys<'a, K, ValueSet<V, S>>) -> Self {
        Self { inner }
    }
}

impl<K, V, S> Clone for Keys<'_, K, V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V, S> Iterator for Keys<'a, K, V, S> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, S> ExactSizeIterator for Keys<'_, K, V, S> {}

impl<K, V, S> FusedIterator for Keys<'_, K, V, S> {}

/// Iterator over a MultiValueMap yielding each key with its value set.
///
/// # Examples
///
/// ```
/// use multivalue::MultiValueMap;
///
/// let mut map = MultiValueMap::new();
/// map.insert_all("primes", [2, 3, 5]);
/// for (key, values) in map.iter() {
///     assert_eq!(*key, "primes");
///     assert_eq!(values.len(), 3);
/// }
/// ```
pub struct Iter<'a, K, V, S> {
    inner: hash_map::Iter<'a, K, ValueSet<V, S>>,
}

impl<'a, K, V, S> Iter<'a, K, V, S> {
    pub(crate) fn new(inner: hash_map::Iter<'a, K, ValueSet<V, S>>) -> Self {
        Self { inner }
    }
}

impl<K, V, S> Clone for Iter<'_, K, V, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V, S> Iterator for Iter<'a, K, V, S> {
    type Item = (&'a K, &'a ValueSet<V, S>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, S> ExactSizeIterator for Iter<'_, K, V, S> {}

impl<K, V, S> FusedIterator for Iter<'_, K, V, S> {}

/// Iterator over a MultiValueMap yielding every key-value pair.
///
/// A key with `n` values is yielded `n` times; a key with no values is skipped.
///
/// # Examples
///
/// ```
/// use multivalue::MultiValueMap;
///
/// let mut map = MultiValueMap::new();
/// map.insert_all(1, ["a", "b"]);
/// map.insert(2, "c");
/// map.insert_key(3);
/// assert_eq!(map.pairs().count(), 3);
/// ```
pub struct Pairs<'a, K, V, S> {
    entries: hash_map::Iter<'a, K, ValueSet<V, S>>,
    current: Option<(&'a K, hash_set::Iter<'a, V>)>,
}

impl<'a, K, V, S> Pairs<'a, K, V, S> {
    pub(crate) fn new(entries: hash_map::Iter<'a, K, ValueSet<V, S>>) -> Self {
        Self {
            entries,
            current: None,
        }
    }
}

impl<K, V, S> Clone for Pairs<'_, K, V, S> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            current: self.current.clone(),
        }
    }
}

impl<'a, K, V, S> Iterator for Pairs<'a, K, V, S> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, values)) = self.current.as_mut() {
                if let Some(value) = values.next() {
                    return Some((*key, value));
                }
            }

            let (key, values) = self.entries.next()?;
            self.current = Some((key, values.iter()));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.current.as_ref().map_or(0, |(_, values)| values.len());

        if self.entries.len() == 0 {
            (pending, Some(pending))
        } else {
            (pending, None)
        }
    }
}

impl<K, V, S> FusedIterator for Pairs<'_, K, V, S> {}

/// Owning iterator over a MultiValueMap yielding each key with its set of values.
///
/// # Examples
///
/// ```
/// use multivalue::MultiValueMap;
///
/// let mut map = MultiValueMap::new();
/// map.insert("hello", "world");
/// map.insert("alex", "steve");
/// let entries: Vec<_> = map.into_iter().collect();
/// assert_eq!(entries.len(), 2);
/// ```
pub struct OwningIter<K, V, S> {
    inner: hash_map::IntoIter<K, ValueSet<V, S>>,
}

impl<K, V, S> OwningIter<K, V, S> {
    pub(crate) fn new(inner: hash_map::IntoIter<K, ValueSet<V, S>>) -> Self {
        Self { inner }
    }
}

impl<K, V, S> Iterator for OwningIter<K, V, S> {
    type Item = (K, HashSet<V, S>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, values)| (key, values.into_inner()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, S> ExactSizeIterator for OwningIter<K, V, S> {}

impl<K, V, S> FusedIterator for OwningIter<K, V, S> {}
