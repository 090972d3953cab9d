// crates/sortscope-trace/src/generator.rs

//! Random input arrays for the trace generator.
//! Produces `len` integer-valued bar heights drawn uniformly from `[min, max]`.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

use anyhow::{ensure, Result};
use rand::{rngs::StdRng, Rng as _, SeedableRng};
use serde::{Deserialize, Serialize};
use sortscope_core::Value;

/// Default number of bars.
pub const DEFAULT_LEN: usize = 25;
/// Default smallest bar height.
pub const DEFAULT_MIN: u32 = 1;
/// Default largest bar height.
pub const DEFAULT_MAX: u32 = 1000;
/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

/// Parameters for [`generate_random_array`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RandomSpec {
    /// Number of values.
    pub len: usize,
    /// Inclusive lower bound.
    pub min: u32,
    /// Inclusive upper bound.
    pub max: u32,
    /// Seed for `StdRng`.
    pub seed: u64,
}

impl Default for RandomSpec {
    fn default() -> Self {
        Self {
            len: DEFAULT_LEN,
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            seed: DEFAULT_SEED,
        }
    }
}

impl RandomSpec {
    /// Draw the array described by `self`.
    ///
    /// # Errors
    /// Fails if `min > max`.
    pub fn generate(&self) -> Result<Vec<Value>> {
        generate_random_array(self.len, self.min, self.max, self.seed)
    }
}

/// Generate `len` integer-valued numbers uniformly from the inclusive range
/// `[min, max]`. The same `seed` always yields the same array.
///
/// # Errors
/// Fails if `min > max`.
pub fn generate_random_array(len: usize, min: u32, max: u32, seed: u64) -> Result<Vec<Value>> {
    ensure!(min <= max, "empty value range: min {min} > max {max}");

    let mut rng = StdRng::seed_from_u64(seed);
    let values = (0..len)
        .map(|_| f64::from(rng.random_range(min..=max)))
        .collect();
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_bounds_and_length() {
        let v = generate_random_array(200, 1, 10, 7).unwrap();
        assert_eq!(v.len(), 200);
        assert!(v.iter().all(|&x| (1.0..=10.0).contains(&x) && x.fract() == 0.0));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let spec = RandomSpec::default();
        assert_eq!(spec.generate().unwrap(), spec.generate().unwrap());
        assert_eq!(spec.generate().unwrap().len(), DEFAULT_LEN);
    }

    #[test]
    fn single_point_range() {
        assert_eq!(generate_random_array(3, 5, 5, 0).unwrap(), vec![5.0; 3]);
        assert!(generate_random_array(0, 1, 2, 0).unwrap().is_empty());
    }

    #[test]
    fn inverted_range_is_an_error() {
        let err = generate_random_array(3, 9, 1, 0).unwrap_err();
        assert!(err.to_string().contains("min 9 > max 1"));
    }
}
