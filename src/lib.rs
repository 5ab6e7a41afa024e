//! # Chained Hash Table
//!
//! A Rust implementation of a hash table that resolves collisions by separate chaining.
//!
//! `HashTable` keeps a power-of-two array of buckets. Each bucket owns a singly-linked
//! chain of entries; keys that land in the same bucket are appended to its chain. Once
//! the number of keys reaches `capacity * load_factor` the bucket array doubles and every
//! entry is relinked into its new chain.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chained_hashtable::HashTable;
//!
//! // Create a new hash table with 16 buckets and a load factor of 0.75
//! let mut map = HashTable::new();
//!
//! // Insert values
//! map.insert("apple".to_string(), 1);
//! map.insert("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.insert("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! assert!(map.remove("apple"));
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Construction Parameters
//!
//! ```rust
//! use chained_hashtable::{HashTable, InvalidArgument};
//!
//! let map = HashTable::<u32, String>::with_capacity_and_load_factor(8, 0.75)?;
//! assert_eq!(map.capacity(), 8);
//! assert_eq!(map.threshold(), 6);
//!
//! // Capacities must be positive powers of two
//! assert_eq!(
//!     HashTable::<u32, String>::with_capacity(14).err(),
//!     Some(InvalidArgument::CapacityNotPowerOfTwo(14))
//! );
//! # Ok::<(), InvalidArgument>(())
//! ```
//!
//! ## Missing Keys
//!
//! `put` accepts an optional key and rejects a missing one without touching the table.
//!
//! ```rust
//! use chained_hashtable::{HashTable, InvalidArgument};
//!
//! let mut map = HashTable::new();
//! assert_eq!(map.put(Some(1), "Jessica"), Ok(None));
//! assert_eq!(map.put(None, "nobody"), Err(InvalidArgument::NullKey));
//! assert_eq!(map.len(), 1);
//! assert_eq!(map.to_string(), "Element {key=1, value=Jessica}\n");
//! ```

/// Error returned by the constructors and `put`
mod error;
/// Defaults, parameter validation and growth arithmetic
mod growth;
/// Module implementing the chained hash table
mod hash_table;
/// Property tests against `std::collections::HashMap`
mod hash_table_proptest;
/// Logger setup for unit tests
#[cfg(test)]
mod test_support;
/// Utility functions and traits for the hash table
mod utils;

pub use error::InvalidArgument;
pub use growth::{DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, MAX_CAPACITY};
pub use hash_table::{HashTable, Iter};
pub use utils::HashMapExtensions;
