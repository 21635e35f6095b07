//! Many seeds at once.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::GenerationParams;
use crate::terrain::{TerrainBundle, generate_terrain};

/// Generates one bundle per seed, with `params` supplying everything but the
/// seed. Output order matches `seeds`. Every run owns its own generator, so
/// the result is the same with or without the `parallel` feature.
#[must_use]
pub fn generate_batch(params: &GenerationParams, seeds: &[i64]) -> Vec<TerrainBundle> {
    let run = |&seed: &i64| {
        generate_terrain(&GenerationParams {
            seed,
            ..params.clone()
        })
    };

    #[cfg(feature = "parallel")]
    let bundles = seeds.par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let bundles = seeds.iter().map(run).collect();

    bundles
}

/// `count` consecutive seeds starting at `first`.
#[must_use]
pub fn seed_range(first: i64, count: usize) -> Vec<i64> {
    (0..count as i64).map(|i| first.wrapping_add(i)).collect()
}
