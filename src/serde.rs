use crate::{MultiValueMap, ValueSet};
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;
use serde::de::{Deserialize, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde::Deserializer;

pub struct MultiValueMapVisitor<K, V, S> {
    marker: PhantomData<fn() -> MultiValueMap<K, V, S>>,
}

impl<K, V, S> MultiValueMapVisitor<K, V, S>
where
    K: Eq + Hash,
    V: Eq + Hash,
    S: BuildHasher + Clone,
{
    fn new() -> Self {
        MultiValueMapVisitor {
            marker: PhantomData,
        }
    }
}

impl<'de, K, V, S> Visitor<'de> for MultiValueMapVisitor<K, V, S>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de> + Eq + Hash,
    S: Default + BuildHasher + Clone,
{
    type Value = MultiValueMap<K, V, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of keys to sequences of values")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut map =
            MultiValueMap::with_capacity_and_hasher(access.size_hint().unwrap_or(0), S::default());

        // A repeated key merges into the set already stored under it.
        while let Some((key, values)) = access.next_entry::<K, Vec<V>>()? {
            map.insert_all(key, values);
        }

        Ok(map)
    }
}

impl<'de, K, V, S> Deserialize<'de> for MultiValueMap<K, V, S>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de> + Eq + Hash,
    S: Default + BuildHasher + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MultiValueMapVisitor::<K, V, S>::new())
    }
}

impl<K, V, S> Serialize for MultiValueMap<K, V, S>
where
    K: Serialize + Eq + Hash,
    V: Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, values) in self.iter() {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

impl<V, S> Serialize for ValueSet<V, S>
where
    V: Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self.iter() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use crate::MultiValueMap;

    #[test]
    fn serialize_groups_values() {
        let mut map: MultiValueMap<String, u32> = MultiValueMap::new();
        map.insert("answer".to_string(), 42);
        map.insert_key("nothing".to_string());

        let json: serde_json::Value = serde_json::to_value(&map).unwrap();

        assert_eq!(json["answer"], serde_json::json!([42]));
        assert_eq!(json["nothing"], serde_json::json!([]));
    }

    #[test]
    fn deserialize_collapses_duplicates() {
        let map: MultiValueMap<String, u32> =
            serde_json::from_str(r#"{"a": [1, 2, 1], "b": []}"#).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map["a"].len(), 2);
        assert!(map["b"].is_empty());
    }

    #[test]
    fn round_trip() {
        let mut map: MultiValueMap<u8, String> = MultiValueMap::new();
        map.insert_all(1, ["x".to_string(), "y".to_string()]);
        map.insert(2, "z".to_string());

        let text = serde_json::to_string(&map).unwrap();
        let back: MultiValueMap<u8, String> = serde_json::from_str(&text).unwrap();

        assert_eq!(back, map);
    }
}
