//! Reshaping bulk fetch results onto the requested keys
//!
//! A bulk fetch returns rows in whatever order the store produced them. The
//! shapes in this module turn those rows into one value per requested key:
//! - [`Singular`]: one row per key (`Option<V>`), for one-to-one and
//!   many-to-one relations
//! - [`FanOut`]: every row sharing the key (`Vec<V>`), for one-to-many
//!   relations
//!
//! Every requested key gets an entry, so a miss is cached like a hit.

use std::collections::HashMap;
use std::hash::Hash;

/// How rows returned by a bulk fetch map onto the keys that requested them
pub trait Shape<K, V> {
    /// Value produced for one key; `Default` is the "no matching rows" value
    type Output: Clone + Default + Send + Sync + 'static;

    /// Group `rows` under the key extracted by `key_of`, with an entry for
    /// every key in `keys`
    fn reshape(keys: &[K], rows: Vec<V>, key_of: fn(&V) -> K) -> HashMap<K, Self::Output>;
}

/// One row per key; unmatched keys map to `None`
pub enum Singular {}

/// Zero or more rows per key in store order; unmatched keys map to `[]`
pub enum FanOut {}

impl<K, V> Shape<K, V> for Singular
where
    K: Hash + Eq + Clone,
    V: Clone + Send + Sync + 'static,
{
    type Output = Option<V>;

    fn reshape(keys: &[K], rows: Vec<V>, key_of: fn(&V) -> K) -> HashMap<K, Option<V>> {
        let mut shaped: HashMap<K, Option<V>> = HashMap::with_capacity(keys.len());

        // First row in store order wins if the store ever returns duplicates
        for row in rows {
            shaped.entry(key_of(&row)).or_insert(Some(row));
        }

        for key in keys {
            shaped.entry(key.clone()).or_insert(None);
        }

        shaped
    }
}

impl<K, V> Shape<K, V> for FanOut
where
    K: Hash + Eq + Clone,
    V: Clone + Send + Sync + 'static,
{
    type Output = Vec<V>;

    fn reshape(keys: &[K], rows: Vec<V>, key_of: fn(&V) -> K) -> HashMap<K, Vec<V>> {
        let mut shaped: HashMap<K, Vec<V>> = HashMap::with_capacity(keys.len());

        for row in rows {
            shaped.entry(key_of(&row)).or_default().push(row);
        }

        for key in keys {
            shaped.entry(key.clone()).or_default();
        }

        shaped
    }
}

/// Lay shaped values out positionally along `keys`
///
/// Duplicate keys receive equal copies of the same value; keys without an
/// entry receive the shape's empty value.
pub fn align<K, O>(keys: &[K], shaped: &HashMap<K, O>) -> Vec<O>
where
    K: Hash + Eq,
    O: Clone + Default,
{
    keys.iter()
        .map(|key| shaped.get(key).cloned().unwrap_or_default())
        .collect()
}
