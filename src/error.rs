//! Error type shared by the `HashTable` constructors and `put`

use thiserror::Error;

/// An argument passed to a `HashTable` constructor or to `put` was rejected.
///
/// Every variant names the offending parameter and, where there is one, carries the
/// value that was supplied. Errors are produced before the table is allocated or
/// mutated, so a failed call never leaves partial state behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidArgument {
    /// The requested capacity was below zero
    #[error("capacity must not be negative: {0}")]
    NegativeCapacity(i64),
    /// The requested capacity was zero
    #[error("capacity must be greater than zero")]
    ZeroCapacity,
    /// The requested capacity has more than one bit set
    #[error("capacity must be a power of two: {0}")]
    CapacityNotPowerOfTwo(i64),
    /// The load factor was zero, negative, NaN or infinite
    #[error("load factor must be a positive finite number: {0}")]
    InvalidLoadFactor(f32),
    /// `put` was called without a key
    #[error("null keys are not accepted")]
    NullKey,
}
