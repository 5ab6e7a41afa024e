use crate::{
    InvalidArgument,
    growth::{self, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR},
};
use log::{debug, trace};
use std::{
    borrow::Borrow,
    fmt,
    hash::{DefaultHasher, Hash, Hasher},
    iter::{self, FusedIterator},
    mem, slice,
};

/// An owning link in a chain: either a bucket head or the `next` field of an entry
type Link<K, V> = Option<Box<Entry<K, V>>>;

/// A node in a bucket chain
#[derive(Debug)]
struct Entry<K, V> {
    /// The key, fixed for the lifetime of the node
    key: K,
    /// The value associated with the key
    value: V,
    /// Hash of `key`, computed once on insertion and reused when the table grows
    hash: u64,
    /// The rest of the chain
    next: Link<K, V>,
}

/// A hash table that resolves collisions with singly-linked chains.
///
/// The bucket count is always a power of two. Once the number of stored keys reaches
/// `capacity * load_factor` the bucket array doubles and every entry is relinked into
/// its new chain.
///
/// Note: This implementation is not thread-safe. Shared mutation needs external locking.
pub struct HashTable<K, V> {
    /// The bucket array, one chain head per slot
    buckets: Vec<Link<K, V>>,
    /// Number of distinct keys stored
    size: usize,
    /// Ratio of keys to buckets at which the table grows
    load_factor: f32,
    /// Number of keys at which the next insertion grows the table
    threshold: usize,
}

/// Computes the hash for a key
fn make_hash<Q: ?Sized + Hash>(key: &Q) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Bucket index of `hash` in a table of `capacity` buckets
#[allow(clippy::cast_possible_truncation)]
fn bucket_index(hash: u64, capacity: usize) -> usize {
    // capacity is a power of two, so masking is the modulo
    (hash as usize) & capacity.saturating_sub(1)
}

/// Drops a chain node by node instead of recursing through the boxes
fn unlink_chain<K, V>(mut link: Link<K, V>) {
    while let Some(mut entry) = link {
        link = entry.next.take();
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> HashTable<K, V> {
    /// Creates an empty table with 16 buckets and a load factor of 0.75
    #[must_use]
    pub fn new() -> Self {
        Self::allocate(DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR)
    }

    /// Creates an empty table with `capacity` buckets and the default load factor.
    ///
    /// Capacities above [`MAX_CAPACITY`](crate::MAX_CAPACITY) are clamped to it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`] if `capacity` is negative, zero, or not a power of two.
    pub fn with_capacity(capacity: i64) -> Result<Self, InvalidArgument> {
        Self::with_capacity_and_load_factor(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Creates an empty table with `capacity` buckets that grows once
    /// `capacity * load_factor` keys are stored.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`] if `capacity` is negative, zero, or not a power of two,
    /// or if `load_factor` is not a positive finite number.
    pub fn with_capacity_and_load_factor(
        capacity: i64,
        load_factor: f32,
    ) -> Result<Self, InvalidArgument> {
        let capacity = growth::validate_capacity(capacity)?;
        let load_factor = growth::validate_load_factor(load_factor)?;
        Ok(Self::allocate(capacity, load_factor))
    }

    /// Allocates an empty bucket array from already validated parameters
    fn allocate(capacity: usize, load_factor: f32) -> Self {
        let threshold = growth::threshold_for(capacity, load_factor);
        trace!("allocating {capacity} buckets, load factor {load_factor}, threshold {threshold}");

        Self {
            buckets: iter::repeat_with(|| None).take(capacity).collect(),
            size: 0,
            load_factor,
            threshold,
        }
    }

    /// Returns the number of keys in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of keys at which the next insertion grows the table
    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns the load factor the table was created with
    #[must_use]
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// Returns an iterator over the key-value pairs, bucket by bucket and then along
    /// each chain
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { buckets: self.buckets.iter(), current: None, remaining: self.size }
    }

    /// Removes every entry. The bucket array keeps its size.
    pub fn clear(&mut self) {
        for head in &mut self.buckets {
            unlink_chain(head.take());
        }
        self.size = 0;
    }
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    /// Inserts a key-value pair, or replaces the value if the key is already present.
    ///
    /// Returns the previous value on replacement. A new key is appended to the tail of
    /// its chain, and the table grows if the insertion brings it to the threshold.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = make_hash(&key);
        let index = bucket_index(hash, self.capacity());
        let mut link = self.buckets.get_mut(index)?;

        loop {
            match link {
                Some(entry) if entry.hash == hash && entry.key == key => {
                    return Some(mem::replace(&mut entry.value, value));
                }
                Some(entry) => link = &mut entry.next,
                None => break,
            }
        }
        *link = Some(Box::new(Entry { key, value, hash, next: None }));
        self.size = self.size.saturating_add(1);

        if self.size >= self.threshold {
            self.resize();
        }
        None
    }

    /// Inserts a key-value pair where the key may be missing.
    ///
    /// Behaves like [`insert`](Self::insert) for `Some(key)`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::NullKey`] if `key` is `None`. The table is left untouched.
    pub fn put(&mut self, key: Option<K>, value: V) -> Result<Option<V>, InvalidArgument> {
        let key = key.ok_or(InvalidArgument::NullKey)?;
        Ok(self.insert(key, value))
    }

    /// Finds the entry for a key
    fn find<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = make_hash(key);
        let mut cursor = self.buckets.get(bucket_index(hash, self.capacity()))?.as_deref();

        while let Some(entry) = cursor {
            if entry.hash == hash && entry.key.borrow() == key {
                return Some(entry);
            }
            cursor = entry.next.as_deref();
        }
        None
    }

    /// Retrieve a value for a given key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|entry| &entry.value)
    }

    /// Retrieve the stored key and its value
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|entry| (&entry.key, &entry.value))
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = make_hash(key);
        let index = bucket_index(hash, self.capacity());
        let mut cursor = self.buckets.get_mut(index)?.as_deref_mut();

        while let Some(entry) = cursor {
            if entry.hash == hash && entry.key.borrow() == key {
                return Some(&mut entry.value);
            }
            cursor = entry.next.as_deref_mut();
        }
        None
    }

    /// Removes a key and returns the stored pair.
    ///
    /// The walk keeps a cursor on the link that owns the current node, which is either the
    /// bucket slot or the predecessor's `next`. A match is unlinked by pointing that link at
    /// the node's successor.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = make_hash(key);
        let index = bucket_index(hash, self.capacity());
        let mut link = self.buckets.get_mut(index)?;

        loop {
            match link {
                None => return None,
                Some(entry) if entry.hash == hash && entry.key.borrow() == key => {
                    let next = entry.next.take();
                    let removed = mem::replace(link, next)?;
                    self.size = self.size.saturating_sub(1);
                    let Entry { key, value, .. } = *removed;
                    return Some((key, value));
                }
                Some(entry) => link = &mut entry.next,
            }
        }
    }

    /// Removes a key from the table. Returns true if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).is_some()
    }

    /// Doubles the bucket array and relinks every entry into its new chain.
    ///
    /// Nodes are moved, not reallocated, and keys are not hashed again. Once the table is
    /// at [`MAX_CAPACITY`](crate::MAX_CAPACITY) growth stops and the threshold is lifted.
    fn resize(&mut self) {
        let old_capacity = self.capacity();
        let Some(new_capacity) = growth::grown_capacity(old_capacity) else {
            debug!("hash table at maximum capacity {old_capacity}, growth disabled");
            self.threshold = usize::MAX;
            return;
        };

        let mut buckets: Vec<Link<K, V>> = iter::repeat_with(|| None).take(new_capacity).collect();
        for head in &mut self.buckets {
            let mut chain = head.take();
            while let Some(mut entry) = chain {
                chain = entry.next.take();
                // the mask keeps every index below new_capacity == buckets.len()
                let index = bucket_index(entry.hash, new_capacity);
                debug_assert!(index < buckets.len());
                if let Some(slot) = buckets.get_mut(index) {
                    entry.next = slot.take();
                    *slot = Some(entry);
                }
            }
        }

        self.buckets = buckets;
        self.threshold = growth::threshold_for(new_capacity, self.load_factor);
        debug!(
            "resized hash table from {old_capacity} to {new_capacity} buckets ({} keys, next growth at {})",
            self.size, self.threshold
        );
    }
}

impl<K, V> Drop for HashTable<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, V> Clone for HashTable<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        /// Copies one chain, keeping its order
        fn clone_chain<K: Clone, V: Clone>(mut cursor: Option<&Entry<K, V>>) -> Link<K, V> {
            let mut entries = Vec::new();
            while let Some(entry) = cursor {
                entries.push(entry);
                cursor = entry.next.as_deref();
            }
            entries.into_iter().rev().fold(None, |next, entry| {
                Some(Box::new(Entry {
                    key: entry.key.clone(),
                    value: entry.value.clone(),
                    hash: entry.hash,
                    next,
                }))
            })
        }

        Self {
            buckets: self.buckets.iter().map(|head| clone_chain(head.as_deref())).collect(),
            size: self.size,
            load_factor: self.load_factor,
            threshold: self.threshold,
        }
    }
}

impl<K, V> PartialEq for HashTable<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V> Eq for HashTable<K, V>
where
    K: Eq + Hash,
    V: Eq,
{
}

impl<K, V> fmt::Display for HashTable<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self {
            writeln!(f, "Element {{key={key}, value={value}}}")?;
        }
        Ok(())
    }
}

impl<K, V> fmt::Debug for HashTable<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over the key-value pairs of the hash table
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Bucket heads not yet visited
    buckets: slice::Iter<'a, Link<K, V>>,
    /// Next entry in the chain being walked
    current: Option<&'a Entry<K, V>>,
    /// Number of pairs still to be yielded
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current {
                self.current = entry.next.as_deref();
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&entry.key, &entry.value));
            }
            self.current = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a HashTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
