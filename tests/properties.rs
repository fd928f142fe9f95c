use multivalue::{KeyNotFound, MultiValueMap};
use std::collections::HashSet;
use tracing_subscriber::filter::LevelFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(LevelFilter::TRACE)
        .try_init();
}

fn sorted<T: Ord + Copy>(values: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut values: Vec<T> = values.into_iter().collect();
    values.sort();
    values
}

#[test]
fn absent_key_is_not_found() {
    let map: MultiValueMap<&str, i32> = MultiValueMap::new();

    for key in ["a", "b", ""] {
        assert!(!map.contains_key(key));
        assert!(map.get(key).is_none());
        assert_eq!(map.try_get(key).err(), Some(KeyNotFound));
    }
}

#[test]
fn insert_creates_key_with_value() {
    init_tracing();
    let mut map = MultiValueMap::new();

    map.insert("k", 7);

    assert!(map.contains_key("k"));
    assert!(map["k"].contains(&7));
}

#[test]
fn insert_is_idempotent() {
    let mut map = MultiValueMap::new();

    assert!(map.insert("k", 7));
    assert!(!map.insert("k", 7));

    assert_eq!(sorted(map["k"].iter().copied()), vec![7]);
}

#[test]
fn insert_all_collapses_duplicates() {
    let mut map = MultiValueMap::new();

    map.insert_all("k", ["v1", "v2", "v1"]);

    let expected: HashSet<&str> = ["v1", "v2"].into_iter().collect();
    let actual: HashSet<&str> = map["k"].iter().copied().collect();
    assert_eq!(actual, expected);
}

#[test]
fn insert_all_with_no_values_registers_key() {
    let mut map: MultiValueMap<&str, i32> = MultiValueMap::new();

    map.insert_all("k", std::iter::empty());

    assert!(map.contains_key("k"));
    assert!(map["k"].is_empty());
}

#[test]
fn insert_key_keeps_existing_values() {
    let mut map = MultiValueMap::new();

    map.insert("k", 1);
    assert!(!map.insert_key("k"));

    assert_eq!(map["k"].len(), 1);
}

#[test]
fn remove_key() {
    init_tracing();
    let mut map = MultiValueMap::new();
    map.insert_all("k", [1, 2]);
    map.insert("other", 3);

    assert!(map.remove("k"));
    assert!(!map.contains_key("k"));

    assert!(!map.remove("k"));
    assert!(!map.remove("never"));
    assert!(map.contains("other", &3));
    assert_eq!(map.len(), 1);
}

#[test]
fn remove_value_leaves_siblings_and_key() {
    let mut map = MultiValueMap::new();
    map.insert_all("k", [1, 2]);

    assert!(map.remove_value("k", &1));
    assert_eq!(sorted(map["k"].iter().copied()), vec![2]);

    assert!(!map.remove_value("k", &1));

    assert!(map.remove_value("k", &2));
    assert!(map.contains_key("k"));
    assert!(map["k"].is_empty());
}

#[test]
fn remove_value_on_missing_key() {
    let mut map: MultiValueMap<&str, i32> = MultiValueMap::new();

    assert!(!map.remove_value("k", &1));
    assert!(!map.contains_key("k"));
    assert!(map.is_empty());
}

#[test]
fn keys_are_distinct() {
    let mut map = MultiValueMap::new();

    map.insert("k1", 1);
    map.insert("k2", 2);
    map.insert("k1", 3);

    let keys = map.keys();
    assert_eq!(keys.len(), 2);
    assert_eq!(sorted(keys.copied()), vec!["k1", "k2"]);
}

#[test]
fn keys_include_empty_entries() {
    let mut map = MultiValueMap::<u8, u8>::new();

    map.insert_key(1);
    map.insert(2, 20);
    map.remove_value(&2, &20);

    assert_eq!(sorted(map.keys().copied()), vec![1, 2]);
}

#[test]
fn worked_example() {
    let mut map = MultiValueMap::new();

    map.insert("a", 1);
    map.insert("a", 2);
    map.insert("a", 1);
    assert_eq!(sorted(map["a"].iter().copied()), vec![1, 2]);

    assert!(map.remove_value("a", &1));
    assert_eq!(sorted(map["a"].iter().copied()), vec![2]);

    assert!(map.remove("a"));
    assert!(!map.contains_key("a"));
}

#[test]
fn lookup_view_tracks_map() {
    let mut map = MultiValueMap::new();
    map.insert("k", 1);

    let snapshot = map["k"].to_set();
    map.insert("k", 2);

    assert_eq!(snapshot.len(), 1);
    assert_eq!(map["k"].len(), 2);
}

#[test]
fn owned_string_keys_borrow_as_str() {
    let mut map: MultiValueMap<String, String> = MultiValueMap::new();

    map.insert("user".to_string(), "admin".to_string());

    assert!(map.contains_key("user"));
    assert!(map.contains("user", "admin"));
    assert!(map.remove_value("user", "admin"));
    assert!(map.take("user").map_or(false, |values| values.is_empty()));
}

#[test]
fn shared_behind_a_lock() {
    use std::sync::{Arc, Mutex};
    use std::thread;

    let map = Arc::new(Mutex::new(MultiValueMap::new()));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for i in 0..100 {
                    map.lock().unwrap().insert(i % 5, t * 100 + i);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let map = map.lock().unwrap();
    assert_eq!(map.len(), 5);
    assert_eq!(map.value_count(), 400);
}
