use arbitrary::{Arbitrary, Unstructured};
use core::hash::{BuildHasher, Hash};

impl<'a, K, V, S> Arbitrary<'a> for crate::MultiValueMap<K, V, S>
where
    K: Eq + Hash + Arbitrary<'a>,
    V: Eq + Hash + Arbitrary<'a>,
    S: Default + BuildHasher + Clone,
{
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        u.arbitrary_iter()?.collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::MultiValueMap;
    use arbitrary::{Arbitrary, Unstructured};

    #[test]
    fn builds_from_bytes() {
        let bytes: Vec<u8> = (0..=255).collect();
        let mut u = Unstructured::new(&bytes);

        let map: MultiValueMap<u8, u8> = MultiValueMap::arbitrary(&mut u).unwrap();

        assert_eq!(map.pairs().count(), map.value_count());
    }
}
