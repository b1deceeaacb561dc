//! HashTable - separate-chaining hash table with resize-before-insert
//!
//! Every bucket owns a small vector of `(key, value)` entries. Colliding keys
//! share a bucket and are found by a linear scan of that chain. Before a new
//! key is stored the table checks whether the insert would push it past
//! `capacity * load_factor`, and if so doubles the bucket array and rehashes
//! every entry, so the load invariant holds after every `put`.
//!
//! # Examples
//!
//! ```rust
//! use algometer::HashTable;
//!
//! let mut table = HashTable::new(4, 0.75)?;
//! assert_eq!(table.put("apple", 3), None);
//! assert_eq!(table.put("apple", 5), Some(3));
//! assert_eq!(table.get(&"apple"), Some(&5));
//! assert_eq!(table.remove(&"apple"), Some(5));
//! assert!(table.is_empty());
//! # Ok::<(), algometer::AlgometerError>(())
//! ```

use crate::algorithms::AlgorithmInfo;
use crate::config::ContainerConfig;
use crate::containers::ContainerMetrics;
use crate::error::Result;
use ahash::RandomState;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};

type Bucket<K, V> = Vec<(K, V)>;

/// Separate-chaining hash table
///
/// `S` defaults to AHash's randomly seeded state; any [`BuildHasher`] can be
/// supplied through [`HashTable::with_hasher`].
pub struct HashTable<K, V, S = RandomState> {
    buckets: Vec<Bucket<K, V>>,
    size: usize,
    load_factor: f64,
    hash_builder: S,
    collisions: usize,
    resizes: usize,
}

impl<K, V> HashTable<K, V, RandomState>
where
    K: Hash + Eq,
{
    /// Creates a table with `capacity` buckets that resizes at `load_factor`
    ///
    /// # Errors
    ///
    /// Returns `AlgometerError::Configuration` if `capacity` is zero or
    /// `load_factor` is outside `[MIN_LOAD_FACTOR, 1]`
    ///
    /// [`MIN_LOAD_FACTOR`]: crate::config::MIN_LOAD_FACTOR
    pub fn new(capacity: usize, load_factor: f64) -> Result<Self> {
        Self::with_hasher(capacity, load_factor, RandomState::new())
    }

    /// Creates a table from a [`ContainerConfig`]
    pub fn with_config(config: &ContainerConfig) -> Result<Self> {
        Self::new(config.capacity, config.load_factor)
    }

    /// Static descriptor of the table's strategy and costs
    pub fn info() -> AlgorithmInfo {
        AlgorithmInfo {
            name: "Hash Table",
            strategy: "Separate Chaining",
            time_complexity: "O(1) average, O(n) worst case",
            space_complexity: "O(n)",
            advantages: &["Constant average lookup", "Degrades gracefully under collisions"],
            disadvantages: &["Unordered iteration", "Full rehash on resize"],
            use_cases: &["Caches", "Symbol tables", "Counting distinct keys"],
        }
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a table using `hash_builder` to hash keys
    pub fn with_hasher(capacity: usize, load_factor: f64, hash_builder: S) -> Result<Self> {
        ContainerConfig::validate_capacity(capacity)?;
        ContainerConfig::validate_load_factor(load_factor)?;

        Ok(Self {
            buckets: Self::empty_buckets(capacity),
            size: 0,
            load_factor,
            hash_builder,
            collisions: 0,
            resizes: 0,
        })
    }

    fn empty_buckets(capacity: usize) -> Vec<Bucket<K, V>> {
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Vec::new);
        buckets
    }

    #[inline]
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        (self.hash_builder.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Inserts or replaces `key`, returning the previous value
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        if let Some((_, slot)) = self.buckets[index].iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, value));
        }

        let index = if self.needs_resize() {
            self.resize();
            self.bucket_index(&key)
        } else {
            index
        };

        let bucket = &mut self.buckets[index];
        if !bucket.is_empty() {
            self.collisions += 1;
        }
        bucket.push((key, value));
        self.size += 1;
        None
    }

    /// Returns a reference to the value stored under `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter()
            .find(|(k, _)| <K as Borrow<Q>>::borrow(k) == key)
            .map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|(k, _)| <K as Borrow<Q>>::borrow(k) == key)
            .map(|(_, v)| v)
    }

    /// Removes `key`, returning its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let position = bucket.iter().position(|(k, _)| <K as Borrow<Q>>::borrow(k) == key)?;
        self.size -= 1;
        Some(bucket.swap_remove(position).1)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Growing once more must keep `size + 1 <= capacity * load_factor`
    fn needs_resize(&self) -> bool {
        (self.size + 1) as f64 > self.buckets.len() as f64 * self.load_factor
    }

    /// Doubles the bucket array until the next insert fits, rehashing every entry
    fn resize(&mut self) {
        let old_capacity = self.buckets.len();
        let mut new_capacity = old_capacity;
        while (self.size + 1) as f64 > new_capacity as f64 * self.load_factor {
            match new_capacity.checked_mul(2) {
                Some(next) => {
                    new_capacity = next;
                    self.resizes += 1;
                }
                None => break,
            }
        }

        let old_buckets = std::mem::replace(&mut self.buckets, Self::empty_buckets(new_capacity));
        for (key, value) in old_buckets.into_iter().flatten() {
            let index = self.bucket_index(&key);
            self.buckets[index].push((key, value));
        }

        log::debug!(
            "HashTable resized from {} to {} buckets ({} entries)",
            old_capacity,
            new_capacity,
            self.size
        );
    }

    /// Returns the first entry accepted by `predicate`, in bucket order
    pub fn find_first<P>(&self, mut predicate: P) -> Option<(&K, &V)>
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.iter().find(|&(k, v)| predicate(k, v))
    }

    /// Returns every entry accepted by `predicate`, in bucket order
    pub fn find_all<P>(&self, mut predicate: P) -> Vec<(&K, &V)>
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.iter().filter(|&(k, v)| predicate(k, v)).collect()
    }
}

impl<K, V, S> HashTable<K, V, S> {
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of buckets
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Configured resize threshold
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Ratio of stored entries to buckets
    pub fn current_load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Number of new keys that landed in an already occupied bucket
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Number of bucket-array doublings so far
    pub fn resize_count(&self) -> usize {
        self.resizes
    }

    /// Mean chain length over the non-empty buckets
    pub fn average_chain_length(&self) -> f64 {
        let occupied = self.buckets.iter().filter(|b| !b.is_empty()).count();
        if occupied == 0 {
            0.0
        } else {
            self.size as f64 / occupied as f64
        }
    }

    /// Removes every entry, keeping the bucket count
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.size = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets.iter().flatten().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Snapshot of occupancy, collision and resize figures
    pub fn performance_metrics(&self) -> ContainerMetrics {
        let capacity = self.buckets.len();
        let threshold = (capacity as f64 * self.load_factor).floor() as usize;
        ContainerMetrics {
            time_complexity: "O(1) average",
            space_complexity: "O(n)",
            utilization: (self.current_load_factor() * 100.0).round(),
            len: self.size,
            capacity,
            remaining: threshold.saturating_sub(self.size),
            collisions: Some(self.collisions),
            resize_count: Some(self.resizes),
            average_chain_length: Some(self.average_chain_length()),
        }
    }
}

impl<K, V> Default for HashTable<K, V, RandomState> {
    fn default() -> Self {
        let config = ContainerConfig::default();
        let mut buckets = Vec::with_capacity(config.capacity);
        buckets.resize_with(config.capacity, Vec::new);
        Self {
            buckets,
            size: 0,
            load_factor: config.load_factor,
            hash_builder: RandomState::new(),
            collisions: 0,
            resizes: 0,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}
