use std::collections::HashSet;

use chd::{BuildConf, Function, Map};
use proptest::prelude::*;

fn distinct_keys(max_len: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z0-9]{0,12}", 0..max_len)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn injective_and_recovers_indices(keys in distinct_keys(600)) {
        let f = Function::with_conf(&keys, BuildConf::mt(false));
        prop_assert_eq!(f.len(), keys.len());
        prop_assert!(f.output_range().is_power_of_two());
        prop_assert!(f.output_range() >= keys.len());
        let mut seen = HashSet::new();
        for (i, key) in keys.iter().enumerate() {
            let v = f.get(key);
            prop_assert!((v as usize) < f.output_range());
            prop_assert!(seen.insert(v), "value {} assigned twice", v);
            prop_assert_eq!(f.level1()[v as usize] as usize, i);
        }
    }

    #[test]
    fn deterministic(keys in distinct_keys(300)) {
        let a = Function::with_conf(&keys, BuildConf::mt(false));
        let b = Function::with_conf(&keys, BuildConf::mt(true));
        prop_assert_eq!(a.level0(), b.level0());
        prop_assert_eq!(a.level1(), b.level1());
    }

    #[test]
    fn foreign_keys_in_range(keys in distinct_keys(300), foreign in "[A-Z]{1,8}") {
        let f = Function::new(&keys);
        prop_assert!((f.get(&foreign) as usize) < f.output_range());
        let map = Map::try_new(keys.clone(), (0..keys.len()).collect()).unwrap();
        prop_assert_eq!(map.get(&foreign), None);
    }

    #[test]
    fn serialized_function_is_equivalent(keys in distinct_keys(300)) {
        let f = Function::new(&keys);
        let mut buff = Vec::new();
        f.write(&mut buff).unwrap();
        prop_assert_eq!(buff.len(), f.write_bytes());
        let read = Function::read(&mut &buff[..]).unwrap();
        for key in &keys {
            prop_assert_eq!(f.get(key), read.get(key));
        }
    }
}
