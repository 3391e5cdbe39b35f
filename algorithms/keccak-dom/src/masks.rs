//! Fresh-randomness sources for the masked engine.

use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};

/// Supplier of fresh masking randomness.
///
/// Every cryptographic `rand_core` generator is a source. Closures go
/// through [`MaskFn`].
pub trait MaskSource {
    /// Fill `dest` with fresh uniformly random bytes.
    fn fill_masks(&mut self, dest: &mut [u8]);
}

impl<R: RngCore + CryptoRng + ?Sized> MaskSource for R {
    fn fill_masks(&mut self, dest: &mut [u8]) {
        self.fill_bytes(dest);
    }
}

/// Closure adapter: `MaskFn(|dest: &mut [u8]| ...)` is a [`MaskSource`].
///
/// Nothing checks what the closure writes. Constant or biased masks void
/// the masking, so this is meant for tests and external entropy sources.
#[derive(Debug, Clone, Copy)]
pub struct MaskFn<F>(pub F);

impl<F: FnMut(&mut [u8])> MaskSource for MaskFn<F> {
    fn fill_masks(&mut self, dest: &mut [u8]) {
        (self.0)(dest);
    }
}

/// ChaCha20 mask generator.
///
/// Deterministic for a given seed, which the tests and the leakage
/// assessment rely on. Seed it with [`MaskPrng::from_entropy`] for anything
/// that handles real secrets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskPrng(ChaCha20Rng);

impl MaskPrng {
    /// Generator whose key is expanded from `seed`.
    pub fn new(seed: u64) -> Self {
        Self(ChaCha20Rng::seed_from_u64(seed))
    }

    /// Generator keyed from the operating system's entropy source.
    #[cfg(feature = "std")]
    pub fn from_entropy() -> Self {
        Self(ChaCha20Rng::from_entropy())
    }

    /// Derive an independent generator for stream `index`.
    ///
    /// The child key is read from ChaCha stream `index + 1` of this
    /// generator's key, so it never overlaps the generator's own output
    /// (stream 0) and does not depend on how far the generator has advanced.
    pub fn fork(&self, index: u64) -> Self {
        let mut seeder = self.0.clone();
        seeder.set_stream(index.wrapping_add(1));
        seeder.set_word_pos(0);
        let mut seed = <ChaCha20Rng as SeedableRng>::Seed::default();
        seeder.fill_bytes(&mut seed);
        Self(ChaCha20Rng::from_seed(seed))
    }
}

impl SeedableRng for MaskPrng {
    type Seed = <ChaCha20Rng as SeedableRng>::Seed;

    fn from_seed(seed: Self::Seed) -> Self {
        Self(ChaCha20Rng::from_seed(seed))
    }
}

impl RngCore for MaskPrng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for MaskPrng {}
