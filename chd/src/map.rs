use std::borrow::Borrow;
use std::hash::Hash;

use dyn_size_of::GetSize;
use seedable_hash::{BuildDefaultSeededHasher, BuildSeededHasher};

use crate::stats::BuildStatsCollector;
use crate::{BuildConf, BuildError, Function};

/// Immutable map from keys to values that uses [`Function`] to find entries.
///
/// Unlike [`Function`], the map stores the keys and compares the queried key with the stored one,
/// so it reports the absence of keys not given during construction.
#[derive(Clone)]
pub struct Map<K, V, S = BuildDefaultSeededHasher> {
    function: Function<S>,
    keys: Box<[K]>,
    values: Box<[V]>,
}

impl<K: GetSize, V: GetSize, S> GetSize for Map<K, V, S> {
    fn size_bytes_dyn(&self) -> usize {
        self.function.size_bytes_dyn() + self.keys.size_bytes_dyn() + self.values.size_bytes_dyn()
    }
    fn size_bytes_content_dyn(&self) -> usize {
        self.function.size_bytes_content_dyn() + self.keys.size_bytes_content_dyn() + self.values.size_bytes_content_dyn()
    }
    const USES_DYN_MEM: bool = true;
}

impl<K, V, S> Map<K, V, S> {
    /// Returns the number of entries.
    #[inline] pub fn len(&self) -> usize { self.keys.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    /// Returns the keys, in the order given during construction.
    #[inline] pub fn keys(&self) -> &[K] { &self.keys }

    /// Returns the values, in the order given during construction.
    #[inline] pub fn values(&self) -> &[V] { &self.values }

    /// Returns an iterator over the entries, in the order given during construction.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.keys.iter().zip(self.values.iter())
    }

    /// Returns the function that maps the keys to their indices.
    #[inline] pub fn function(&self) -> &Function<S> { &self.function }
}

impl<K, V, S: BuildSeededHasher> Map<K, V, S> {
    /// Returns the index of the entry with the given `key`, or [`None`] if there is no such entry.
    #[inline] pub fn index<Q>(&self, key: &Q) -> Option<usize> where K: Borrow<Q>, Q: Hash + Eq + ?Sized {
        let index = self.function.index(key) as usize;
        let stored: &Q = self.keys.get(index)?.borrow();
        (stored == key).then_some(index)
    }

    /// Returns the key-value pair corresponding to the `key`.
    #[inline] pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)> where K: Borrow<Q>, Q: Hash + Eq + ?Sized {
        self.index(key).map(|i| (&self.keys[i], &self.values[i]))
    }

    /// Returns the value corresponding to the `key`.
    #[inline] pub fn get<Q>(&self, key: &Q) -> Option<&V> where K: Borrow<Q>, Q: Hash + Eq + ?Sized {
        self.index(key).map(|i| &self.values[i])
    }

    /// Returns `true` if the map contains the `key`.
    #[inline] pub fn contains_key<Q>(&self, key: &Q) -> bool where K: Borrow<Q>, Q: Hash + Eq + ?Sized {
        self.index(key).is_some()
    }
}

impl<K: Hash + Eq + Sync, V, S: BuildSeededHasher + Sync> Map<K, V, S> {
    /// Constructs [`Map`] that assigns `values[i]` to `keys[i]`, using the build configuration `conf`
    /// and reporting statistics with `stats`.
    pub fn try_with_conf_stats<BS>(keys: Vec<K>, values: Vec<V>, conf: BuildConf<S>, stats: &mut BS) -> Result<Self, BuildError>
        where BS: BuildStatsCollector
    {
        if keys.len() != values.len() {
            return Err(BuildError::LengthMismatch { keys: keys.len(), values: values.len() });
        }
        let function = Function::try_with_conf_stats(&keys, conf, stats)?;
        Ok(Self { function, keys: keys.into_boxed_slice(), values: values.into_boxed_slice() })
    }

    /// Constructs [`Map`] that assigns `values[i]` to `keys[i]`, using the build configuration `conf`.
    #[inline] pub fn try_with_conf(keys: Vec<K>, values: Vec<V>, conf: BuildConf<S>) -> Result<Self, BuildError> {
        Self::try_with_conf_stats(keys, values, conf, &mut ())
    }

    /// Constructs [`Map`] with given `entries`, using the build configuration `conf`.
    pub fn try_from_entries_with_conf(entries: Vec<(K, V)>, conf: BuildConf<S>) -> Result<Self, BuildError> {
        let (keys, values) = entries.into_iter().unzip();
        Self::try_with_conf(keys, values, conf)
    }
}

impl<K: Hash + Eq + Sync, V> Map<K, V> {
    /// Constructs [`Map`] that assigns `values[i]` to `keys[i]`.
    pub fn try_new(keys: Vec<K>, values: Vec<V>) -> Result<Self, BuildError> {
        Self::try_with_conf(keys, values, Default::default())
    }

    /// Constructs [`Map`] with given `entries`.
    pub fn try_from_entries(entries: Vec<(K, V)>) -> Result<Self, BuildError> {
        Self::try_from_entries_with_conf(entries, Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get() {
        let entries = (0..1000).map(|i| (format!("key{}", i), i * 10)).collect::<Vec<_>>();
        let map = Map::try_from_entries(entries).unwrap();
        assert_eq!(map.len(), 1000);
        for i in 0..1000 {
            let key = format!("key{}", i);
            assert_eq!(map.get(key.as_str()), Some(&(i * 10)));
            assert_eq!(map.index(&key), Some(i as usize));
            assert_eq!(map.get_key_value(&key), Some((&key, &(i * 10))));
        }
        for i in 1000..2000 {
            assert_eq!(map.get(format!("key{}", i).as_str()), None);
            assert!(!map.contains_key(format!("other{}", i).as_str()));
        }
    }

    #[test]
    fn test_empty() {
        let map = Map::<String, u8>::try_new(Vec::new(), Vec::new()).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.get("a"), None);
        assert_eq!(map.iter().count(), 0);
    }

    #[test]
    fn test_iter_order() {
        let map = Map::try_new(vec!["c", "a", "b"], vec![3, 1, 2]).unwrap();
        assert_eq!(map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(), vec![("c", 3), ("a", 1), ("b", 2)]);
        assert_eq!(map.keys(), &["c", "a", "b"]);
        assert_eq!(map.values(), &[3, 1, 2]);
        assert_eq!(map.function().len(), 3);
    }

    #[test]
    fn test_errors() {
        assert_eq!(Map::try_new(vec![1, 2], vec!['a']).err(), Some(BuildError::LengthMismatch { keys: 2, values: 1 }));
        assert_eq!(Map::try_new(vec![1, 1], vec!['a', 'b']).err(), Some(BuildError::DuplicateKey { first: 0, second: 1 }));
    }

    #[test]
    fn test_size() {
        let map = Map::try_new((0..100u32).collect(), (0..100u64).collect()).unwrap();
        assert_eq!(map.size_bytes_dyn(), map.function().size_bytes_dyn() + 100 * 4 + 100 * 8);
    }
}
