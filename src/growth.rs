//! Growth policy for `HashTable`: construction defaults, parameter validation and
//! the capacity/threshold arithmetic used when the table resizes.

use crate::InvalidArgument;
use log::debug;

/// Number of buckets allocated by `HashTable::new`
pub const DEFAULT_CAPACITY: usize = 16;

/// Load factor used when none is supplied
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Largest bucket count a table will ever allocate
pub const MAX_CAPACITY: usize = 1 << 30;

/// Checks a requested bucket count and returns the capacity to allocate.
///
/// Negative, zero and non power of two values are rejected. Anything larger than
/// [`MAX_CAPACITY`] is clamped down to it.
pub(crate) fn validate_capacity(requested: i64) -> Result<usize, InvalidArgument> {
    let Ok(capacity) = u64::try_from(requested) else {
        return Err(InvalidArgument::NegativeCapacity(requested));
    };
    if capacity == 0 {
        return Err(InvalidArgument::ZeroCapacity);
    }
    if !capacity.is_power_of_two() {
        return Err(InvalidArgument::CapacityNotPowerOfTwo(requested));
    }

    match usize::try_from(capacity) {
        Ok(capacity) if capacity <= MAX_CAPACITY => Ok(capacity),
        _ => {
            debug!("requested capacity {requested} clamped to {MAX_CAPACITY}");
            Ok(MAX_CAPACITY)
        }
    }
}

/// Checks that a load factor is a positive, finite number
pub(crate) fn validate_load_factor(load_factor: f32) -> Result<f32, InvalidArgument> {
    if load_factor.is_finite() && load_factor > 0.0 {
        Ok(load_factor)
    } else {
        Err(InvalidArgument::InvalidLoadFactor(load_factor))
    }
}

/// Number of entries at which a table of `capacity` buckets grows
#[must_use]
#[allow(
    clippy::arithmetic_side_effects,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub(crate) fn threshold_for(capacity: usize, load_factor: f32) -> usize {
    // float to int casts saturate, so huge load factors pin the threshold at usize::MAX
    (capacity as f64 * f64::from(load_factor)).floor() as usize
}

/// Capacity to grow to from `capacity`, or `None` once the table is at [`MAX_CAPACITY`]
#[must_use]
pub(crate) fn grown_capacity(capacity: usize) -> Option<usize> {
    if capacity >= MAX_CAPACITY {
        return None;
    }
    capacity.checked_mul(2).map(|doubled| doubled.min(MAX_CAPACITY))
}
