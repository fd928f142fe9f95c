use crate::{MultiValueMap, ValueSet};
use core::hash::{BuildHasher, Hash};
use hashbrown::{HashMap, HashSet};
use rayon::iter::plumbing::UnindexedConsumer;
use rayon::iter::{FromParallelIterator, IntoParallelIterator, ParallelExtend, ParallelIterator};

// Pairs are produced in parallel but inserted sequentially: the map has no internal
// locking, so writes stay on the calling thread.
impl<K, V, S> ParallelExtend<(K, V)> for MultiValueMap<K, V, S>
where
    K: Send + Eq + Hash,
    V: Send + Eq + Hash,
    S: BuildHasher + Clone,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = (K, V)>,
    {
        let pairs: Vec<(K, V)> = par_iter.into_par_iter().collect();
        self.extend(pairs);
    }
}

impl<K, V, S> FromParallelIterator<(K, V)> for MultiValueMap<K, V, S>
where
    K: Send + Eq + Hash,
    V: Send + Eq + Hash,
    S: Send + Default + BuildHasher + Clone,
{
    fn from_par_iter<I>(par_iter: I) -> Self
    where
        I: IntoParallelIterator<Item = (K, V)>,
    {
        let mut map = Self::default();
        map.par_extend(par_iter);
        map
    }
}

impl<K, V, S> IntoParallelIterator for MultiValueMap<K, V, S>
where
    K: Send + Eq + Hash,
    V: Send,
    S: Send,
{
    type Iter = OwningIter<K, V, S>;
    type Item = (K, HashSet<V, S>);

    fn into_par_iter(self) -> Self::Iter {
        OwningIter { inner: self.inner }
    }
}

pub struct OwningIter<K, V, S> {
    inner: HashMap<K, ValueSet<V, S>, S>,
}

impl<K, V, S> ParallelIterator for OwningIter<K, V, S>
where
    K: Send + Eq + Hash,
    V: Send,
    S: Send,
{
    type Item = (K, HashSet<V, S>);

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        self.inner
            .into_par_iter()
            .map(|(key, values)| (key, values.into_inner()))
            .drive_unindexed(consumer)
    }
}

// This impl also enables `IntoParallelRefIterator::par_iter`
impl<'a, K, V, S> IntoParallelIterator for &'a MultiValueMap<K, V, S>
where
    K: Sync + Eq + Hash,
    V: Sync,
    S: Sync,
{
    type Iter = Iter<'a, K, V, S>;
    type Item = (&'a K, &'a ValueSet<V, S>);

    fn into_par_iter(self) -> Self::Iter {
        Iter { inner: &self.inner }
    }
}

pub struct Iter<'a, K, V, S> {
    inner: &'a HashMap<K, ValueSet<V, S>, S>,
}

impl<'a, K, V, S> ParallelIterator for Iter<'a, K, V, S>
where
    K: Sync + Eq + Hash,
    V: Sync,
    S: Sync,
{
    type Item = (&'a K, &'a ValueSet<V, S>);

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        self.inner.into_par_iter().drive_unindexed(consumer)
    }
}

#[cfg(test)]
mod tests {
    use crate::MultiValueMap;
    use rayon::prelude::*;

    #[test]
    fn collect_from_parallel() {
        let map: MultiValueMap<u32, u32> = (0..1000u32)
            .into_par_iter()
            .map(|i| (i % 10, i % 7))
            .collect();

        assert_eq!(map.len(), 10);
        assert!(map.iter().all(|(_, values)| values.len() == 7));
    }

    #[test]
    fn par_iter_counts_values() {
        let mut map = MultiValueMap::new();
        map.insert_all("a", 0..50);
        map.insert_all("b", 0..25);

        let total: usize = map.par_iter().map(|(_, values)| values.len()).sum();

        assert_eq!(total, map.value_count());
    }

    #[test]
    fn into_par_iter_takes_sets() {
        let mut map = MultiValueMap::new();
        map.insert_all(1, ["x", "y"]);
        map.insert_key(2);

        let mut sizes: Vec<(i32, usize)> = map
            .into_par_iter()
            .map(|(key, values)| (key, values.len()))
            .collect();
        sizes.sort();

        assert_eq!(sizes, vec![(1, 2), (2, 0)]);
    }
}
