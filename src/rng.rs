//! Deterministic random source for terrain generation.
//!
//! Every synthesizer draws from a single [`TerrainRng`] that is owned by one
//! generation call and passed down by `&mut`. The generator is never cloned
//! inside the pipeline: a copy would replay draws and silently desynchronise
//! every feature generated after it.

use rand::RngCore;

/// Splitmix-style increment used to expand a 32-bit seed into four registers.
const GOLDEN_GAMMA: u32 = 0x9E37_79B9;

/// xoshiro128** generator seeded through a multiplicative hash of the seed.
///
/// Produces the same sequence for the same seed on every platform; all
/// arithmetic is wrapping `u32`.
#[derive(Debug)]
pub struct TerrainRng {
    state: [u32; 4],
}

impl TerrainRng {
    #[must_use]
    pub fn new(seed: u32) -> Self {
        let mut mix = seed;
        let mut state = [0u32; 4];
        for register in &mut state {
            *register = splitmix32(&mut mix);
        }
        // The all-zero state is a fixed point of xorshift.
        if state == [0; 4] {
            state[0] = GOLDEN_GAMMA;
        }
        Self { state }
    }

    /// Builds a generator from a user-facing seed of any sign.
    #[must_use]
    pub fn from_seed(seed: i64) -> Self {
        Self::new(normalize_seed(seed))
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.step()) / 4_294_967_296.0
    }

    /// Uniform float in `[min, max)`.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform integer in `[min, max)`. Consumes exactly one draw.
    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        (self.range(min as f64, max as f64).floor() as i64)
            .clamp(min, (max - 1).max(min))
    }

    /// Uniform index in `[0, len)`; `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }

    fn step(&mut self) -> u32 {
        let [s0, s1, s2, s3] = &mut self.state;
        let result = s1.wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = *s1 << 9;

        *s2 ^= *s0;
        *s3 ^= *s1;
        *s1 ^= *s2;
        *s0 ^= *s3;
        *s2 ^= t;
        *s3 = s3.rotate_left(11);

        result
    }
}

impl RngCore for TerrainRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.step());
        let lo = u64::from(self.step());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Folds a signed seed into the 32-bit generator seed: absolute value, then
/// the two halves xor-ed together.
#[must_use]
pub fn normalize_seed(seed: i64) -> u32 {
    let magnitude = seed.unsigned_abs();
    (magnitude as u32) ^ ((magnitude >> 32) as u32)
}

fn splitmix32(state: &mut u32) -> u32 {
    *state = state.wrapping_add(GOLDEN_GAMMA);
    let mut z = *state;
    z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
    z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
    z ^ (z >> 16)
}
