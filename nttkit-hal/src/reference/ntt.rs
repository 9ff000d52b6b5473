//! Radix-2 number-theoretic transform, reference execution.
//!
//! # Algorithm overview
//!
//! A transform of size `n = 2^l` over a domain of order `2^M` runs in three phases:
//! 1. **Prologue** ([`ntt_prologue`]): bring the input to natural order,
//!    multiply coefficient `i` by `c^i` (forward coset only), then permute to
//!    bit-reversed order.
//! 2. **Butterfly levels** ([`ntt_dit_level`]): Cooley-Tukey DIT for spans
//!    `2, 4, ..., n`, reading the domain twiddles with stride `2^(M - log(span))`.
//!    Output is in natural order.
//! 3. **Epilogue** ([`ntt_epilogue`]): inverse only, multiply by `1/n` and by
//!    `c^-i`; then the scale factor; then the requested output ordering.
//!
//! Every backend must produce exactly the same field elements as this module.

use crate::{
    layouts::{Domain, Field, NttBuffers, NttConfig, NttDir, NttError, NttOrdering, NttResult},
    reference::domain::alloc_elements,
};

/// Per-call constants derived once from an [`NttConfig`] and a size.
#[derive(Clone, Copy, Debug)]
pub struct NttScalars<F: Field> {
    pub coset: Option<F>,
    pub coset_inv: Option<F>,
    pub size_inv: F,
    pub scale: Option<F>,
}

impl<F: Field> NttScalars<F> {
    pub fn new(size: usize, config: &NttConfig<F>) -> NttResult<Self> {
        let size_inv: F = F::from_u64(size as u64)
            .inv()
            .ok_or_else(|| NttError::Internal(format!("size {size} is not invertible in {}", F::NAME)))?;
        let (coset, coset_inv) = if config.has_coset() {
            let inv: F = config
                .coset_gen
                .inv()
                .ok_or_else(|| NttError::invalid(format!("coset generator of {} is zero", F::NAME)))?;
            (Some(config.coset_gen), Some(inv))
        } else {
            (None, None)
        };
        Ok(Self {
            coset,
            coset_inv,
            size_inv,
            scale: config.has_scale().then_some(config.scale_factor),
        })
    }
}

#[inline(always)]
fn bit_reverse(i: usize, log_n: u32) -> usize {
    if log_n == 0 { 0 } else { i.reverse_bits() >> (usize::BITS - log_n) }
}

/// Reorders `data` (of power-of-two length) by bit-reversing indices.
pub fn bit_reverse_permute<F: Field>(data: &mut [F]) {
    let n: usize = data.len();
    debug_assert!(n.is_power_of_two());
    let log_n: u32 = n.trailing_zeros();
    for i in 0..n {
        let j: usize = bit_reverse(i, log_n);
        if i < j {
            data.swap(i, j);
        }
    }
}

/// `data[i] *= base^i`.
pub fn mul_powers<F: Field>(data: &mut [F], base: F) {
    let mut acc: F = F::one();
    for x in data.iter_mut() {
        *x *= acc;
        acc *= base;
    }
}

pub fn mul_scalar<F: Field>(data: &mut [F], s: F) {
    data.iter_mut().for_each(|x| *x *= s);
}

/// Phase 1: leaves `data` in bit-reversed order, ready for the butterfly levels.
pub fn ntt_prologue<F: Field>(data: &mut [F], dir: NttDir, ordering: NttOrdering, scalars: &NttScalars<F>) {
    match (dir, scalars.coset) {
        (NttDir::Forward, Some(c)) => {
            if ordering.input_reversed() {
                bit_reverse_permute(data);
            }
            mul_powers(data, c);
            bit_reverse_permute(data);
        }
        _ => {
            if !ordering.input_reversed() {
                bit_reverse_permute(data);
            }
        }
    }
}

/// `(u, v) <- (u + w·v, u - w·v)`.
#[inline(always)]
pub fn butterfly<F: Field>(u: &mut F, v: &mut F, w: F) {
    let t: F = *v * w;
    *v = *u - t;
    *u += t;
}

/// One butterfly level on a block of exactly the level's span.
#[inline(always)]
pub fn ntt_dit_level<F: Field>(block: &mut [F], twiddles: &[F], stride: usize) {
    let half: usize = block.len() >> 1;
    let (lo, hi) = block.split_at_mut(half);
    for (j, (u, v)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
        butterfly(u, v, twiddles[j * stride]);
    }
}

#[inline]
pub fn twiddles_for<F: Field>(domain: &Domain<F>, dir: NttDir) -> &[F] {
    match dir {
        NttDir::Forward => domain.twiddles(),
        NttDir::Inverse => domain.inv_twiddles(),
    }
}

/// Phase 2, sequential.
pub fn ntt_dit<F: Field>(domain: &Domain<F>, data: &mut [F], dir: NttDir) {
    let twiddles: &[F] = twiddles_for(domain, dir);
    let log_n: u32 = data.len().trailing_zeros();
    for log_span in 1..=log_n {
        let stride: usize = domain.twiddle_stride(log_span);
        for block in data.chunks_exact_mut(1 << log_span) {
            ntt_dit_level(block, twiddles, stride);
        }
    }
}

/// Phase 3: `data` enters in natural order and leaves in the requested output order.
pub fn ntt_epilogue<F: Field>(data: &mut [F], dir: NttDir, ordering: NttOrdering, scalars: &NttScalars<F>) {
    if dir == NttDir::Inverse {
        mul_scalar(data, scalars.size_inv);
        if let Some(c_inv) = scalars.coset_inv {
            mul_powers(data, c_inv);
        }
    }
    if let Some(s) = scalars.scale {
        mul_scalar(data, s);
    }
    if ordering.output_reversed() {
        bit_reverse_permute(data);
    }
}

/// Full transform of one vector of size `data.len()`, in place.
pub fn ntt_vec<F: Field>(domain: &Domain<F>, data: &mut [F], dir: NttDir, ordering: NttOrdering, scalars: &NttScalars<F>) {
    ntt_prologue(data, dir, ordering, scalars);
    ntt_dit(domain, data, dir);
    ntt_epilogue(data, dir, ordering, scalars);
}

/// Copies column `col` of a `batch`-interleaved buffer into `dst`.
pub fn gather_column<F: Field>(src: &[F], batch: usize, col: usize, dst: &mut [F]) {
    dst.iter_mut()
        .zip(src.iter().skip(col).step_by(batch))
        .for_each(|(d, s)| *d = *s);
}

/// Inverse of [`gather_column`].
pub fn scatter_column<F: Field>(src: &[F], batch: usize, col: usize, dst: &mut [F]) {
    dst.iter_mut()
        .skip(col)
        .step_by(batch)
        .zip(src.iter())
        .for_each(|(d, s)| *d = *s);
}

/// Batched transform over validated buffers of `size * config.batch_size` elements.
pub fn ntt_ref<F: Field>(
    domain: &Domain<F>,
    buffers: NttBuffers<'_, F>,
    size: usize,
    dir: NttDir,
    config: &NttConfig<F>,
) -> NttResult<()> {
    let scalars: NttScalars<F> = NttScalars::new(size, config)?;
    let batch: usize = config.batch_size as usize;
    let data: &mut [F] = buffers.into_working();

    if config.columns_batch && batch > 1 {
        let mut column: Vec<F> = alloc_elements(size)?;
        for col in 0..batch {
            gather_column(data, batch, col, &mut column);
            ntt_vec(domain, &mut column, dir, config.ordering, &scalars);
            scatter_column(&column, batch, col, data);
        }
    } else {
        for vec in data.chunks_exact_mut(size) {
            ntt_vec(domain, vec, dir, config.ordering, &scalars);
        }
    }
    Ok(())
}

/// `X_k = sum_i a_i · ω^(ik)`, quadratic time. Test oracle only.
pub fn dft_naive<F: Field>(coeffs: &[F], omega: F) -> Vec<F> {
    let n: usize = coeffs.len();
    let mut res: Vec<F> = vec![F::default(); n];
    let mut w_k: F = F::one();
    for x in res.iter_mut() {
        let mut w: F = F::one();
        for a in coeffs {
            *x += *a * w;
            w *= w_k;
        }
        w_k *= omega;
    }
    res
}

#[cfg(test)]
mod tests {
    use num_traits::One;

    use super::{bit_reverse_permute, dft_naive, ntt_ref};
    use crate::{
        layouts::{BabyBear, Field, NttBuffers, NttConfig, NttDir, Proth23},
        reference::domain::domain_new,
        source::Source,
    };

    #[test]
    fn bit_reverse_is_involution() {
        let mut v: Vec<Proth23> = (0..16u64).map(Proth23::from_u64).collect();
        let orig: Vec<Proth23> = v.clone();
        bit_reverse_permute(&mut v);
        assert_eq!(v[1], Proth23::from_u64(8));
        assert_eq!(v[3], Proth23::from_u64(12));
        bit_reverse_permute(&mut v);
        assert_eq!(v, orig);
    }

    #[test]
    fn forward_matches_naive() {
        let mut source: Source = Source::new([3u8; 32]);
        let d = domain_new(BabyBear::omega(8).unwrap(), 8).unwrap();
        for log_n in 0..=8u32 {
            let n: usize = 1 << log_n;
            let a: Vec<BabyBear> = (0..n).map(|_| source.next_field()).collect();
            let mut res: Vec<BabyBear> = vec![BabyBear::default(); n];
            ntt_ref(
                &d,
                NttBuffers::OutOfPlace { input: &a, output: &mut res },
                n,
                NttDir::Forward,
                &NttConfig::default(),
            )
            .unwrap();
            assert_eq!(res, dft_naive(&a, d.root_of_order(log_n as u64).unwrap()));
        }
    }

    #[test]
    fn size_one_is_identity() {
        let d = domain_new(Proth23::one(), 0).unwrap();
        let mut v: Vec<Proth23> = vec![Proth23::from_u64(42)];
        ntt_ref(&d, NttBuffers::InPlace(&mut v), 1, NttDir::Inverse, &NttConfig::default()).unwrap();
        assert_eq!(v[0], Proth23::from_u64(42));
    }
}
