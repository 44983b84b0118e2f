//! Attribute dictionaries carried by scene-graph chunks.
//!
//! ```text
//! int32            : number of pairs
//! { int32 + bytes  : key
//!   int32 + bytes  : value } x N
//! ```

use std::borrow::Cow;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Ordered mapping from byte-string key to byte-string value.
///
/// Keys keep the order of their first appearance. A repeated key replaces the
/// earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeDict {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
}

impl AttributeDict {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair, returning the value it replaced.
    pub fn insert(&mut self, key: Vec<u8>, value: Vec<u8>) -> Option<Vec<u8>> {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(existing, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Looks up the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&[u8]> {
        let key = key.as_ref();
        self.entries
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, v)| v.as_slice())
    }

    /// Looks up `key` and decodes its value as (lossy) UTF-8.
    #[must_use]
    pub fn get_str(&self, key: impl AsRef<[u8]>) -> Option<Cow<'_, str>> {
        self.get(key).map(String::from_utf8_lossy)
    }

    /// Iterates pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.entries.iter().map(|(k, v)| (k.as_slice(), v.as_slice()))
    }

    /// Number of distinct keys.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no pairs.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<Vec<u8>>, V: Into<Vec<u8>>> FromIterator<(K, V)> for AttributeDict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (k, v) in iter {
            dict.insert(k.into(), v.into());
        }
        dict
    }
}

impl Serialize for AttributeDict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(&String::from_utf8_lossy(k), &String::from_utf8_lossy(v))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_key_replaces_in_place() {
        let mut dict = AttributeDict::new();
        assert_eq!(dict.insert(b"_name".to_vec(), b"a".to_vec()), None);
        dict.insert(b"_hidden".to_vec(), b"0".to_vec());
        assert_eq!(dict.insert(b"_name".to_vec(), b"b".to_vec()), Some(b"a".to_vec()));

        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("_name"), Some(&b"b"[..]));
        let keys: Vec<_> = dict.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![&b"_name"[..], &b"_hidden"[..]]);
    }

    #[test]
    fn test_lossy_string_values() {
        let dict: AttributeDict = [("_t", vec![b'1', 0xff])].into_iter().collect();
        assert_eq!(dict.get_str("_t").as_deref(), Some("1\u{fffd}"));
        assert!(dict.get_str("_r").is_none());
    }
}
