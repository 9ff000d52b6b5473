use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use rand_core::RngCore;

use crate::layouts::Field;

/// Deterministic ChaCha8 stream used to draw test vectors and benchmark inputs.
pub struct Source {
    source: ChaCha8Rng,
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    pub fn branch(&mut self) -> ([u8; 32], Self) {
        let seed: [u8; 32] = self.new_seed();
        (seed, Source::new(seed))
    }

    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.fill_bytes(&mut seed);
        seed
    }

    /// Uniform in `[0, max)` by rejection on `next_u64() & mask`.
    #[inline(always)]
    pub fn next_u64n(&mut self, max: u64, mask: u64) -> u64 {
        let mut x: u64 = self.next_u64() & mask;
        while x >= max {
            x = self.next_u64() & mask;
        }
        x
    }

    /// Uniform canonical element of `F`.
    #[inline(always)]
    pub fn next_field<F: Field>(&mut self) -> F {
        let mask: u64 = u64::MAX >> (F::MODULUS - 1).leading_zeros();
        F::from_u64(self.next_u64n(F::MODULUS, mask))
    }

    /// Uniform nonzero element of `F`.
    pub fn next_field_nonzero<F: Field>(&mut self) -> F {
        loop {
            let x: F = self.next_field();
            if !x.is_zero() {
                return x;
            }
        }
    }

    pub fn fill_field<F: Field>(&mut self, data: &mut [F]) {
        data.iter_mut().for_each(|x| *x = self.next_field());
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}
