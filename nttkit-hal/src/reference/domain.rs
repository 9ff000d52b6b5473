//! Domain precomputation.
//!
//! A domain of maximum order `2^M` built from a primitive root `ω` of exact
//! order `2^M` stores:
//! - `roots[l] = ω^(2^(M - l))` for `l = 0..=M`,
//! - `twiddles[i] = ω^i` and `inv_twiddles[i] = ω^-i` for `i < 2^(M - 1)`.

use crate::layouts::{Domain, Field, NttError, NttInitDomainConfig, NttResult};

/// Allocates `len` zeroed elements, reporting failure instead of aborting.
pub fn alloc_elements<F: Field>(len: usize) -> NttResult<Vec<F>> {
    let mut v: Vec<F> = Vec::new();
    v.try_reserve_exact(len).map_err(|_| {
        tracing::error!(target: "nttkit", elements = len, field = F::NAME, "allocation failed");
        NttError::AllocationFailure { elements: len }
    })?;
    v.resize(len, F::default());
    Ok(v)
}

/// Returns `k` such that `root` has exact multiplicative order `2^k`, or
/// `None` if its order is not a power of two no larger than `2^OMEGAS_COUNT`.
pub fn root_log_order<F: Field>(root: F) -> Option<u32> {
    let mut x: F = root;
    for k in 0..=F::OMEGAS_COUNT {
        if x.is_one() {
            return Some(k);
        }
        x *= x;
    }
    None
}

/// Validates `root` against `config` and returns the generator of the
/// requested domain together with its order log.
///
/// Without `config.max_log_size` the domain takes the full order `2^k` of
/// `root`; a requested order log must not exceed `k`, and the generator
/// becomes `root^(2^(k - max_log))`.
pub fn domain_generator<F: Field>(root: F, config: &NttInitDomainConfig) -> NttResult<(F, u32)> {
    if !root.is_canonical() {
        return Err(NttError::invalid(format!("primitive root {root} is not a canonical {} element", F::NAME)));
    }

    let k: u32 = root_log_order(root).ok_or_else(|| {
        NttError::invalid(format!(
            "{root} is not a root of unity of two-power order at most 2^{} in field {}",
            F::OMEGAS_COUNT,
            F::NAME
        ))
    })?;

    let max_log: u32 = match config.max_log_size {
        None => k,
        Some(m) if m <= k => m,
        Some(m) => {
            return Err(NttError::invalid(format!(
                "requested domain of order 2^{m} but the supplied root only has order 2^{k}"
            )));
        }
    };

    let mut generator: F = root;
    for _ in max_log..k {
        generator *= generator;
    }
    Ok((generator, max_log))
}

/// Builds the tables of the domain generated by `root`, of exact order `2^max_log`.
pub fn domain_new<F: Field>(root: F, max_log: u32) -> NttResult<Domain<F>> {
    let half: usize = (1usize << max_log) >> 1;

    let mut roots: Vec<F> = alloc_elements(max_log as usize + 1)?;
    let mut w: F = root;
    for l in (0..=max_log as usize).rev() {
        roots[l] = w;
        w *= w;
    }

    let mut twiddles: Vec<F> = alloc_elements(half)?;
    let mut inv_twiddles: Vec<F> = alloc_elements(half)?;
    if half > 0 {
        let root_inv: F = root
            .inv()
            .ok_or_else(|| NttError::Internal(format!("{} domain root is not invertible", F::NAME)))?;
        let mut acc: F = F::one();
        let mut acc_inv: F = F::one();
        for (t, t_inv) in twiddles.iter_mut().zip(inv_twiddles.iter_mut()) {
            *t = acc;
            *t_inv = acc_inv;
            acc *= root;
            acc_inv *= root_inv;
        }
    }

    Ok(Domain::from_parts(max_log, roots, twiddles, inv_twiddles))
}

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};

    use super::{alloc_elements, domain_generator, domain_new, root_log_order};
    use crate::{
        layouts::{BabyBear, ErrorCode, Field, Goldilocks, NttError, NttInitDomainConfig, Proth23},
        reference::rou::root_of_unity,
    };

    #[test]
    fn log_order() {
        assert_eq!(root_log_order(Proth23::one()), Some(0));
        assert_eq!(root_log_order(-Proth23::one()), Some(1));
        assert_eq!(root_log_order(Proth23::omega(20).unwrap()), Some(20));
        assert_eq!(root_log_order(Proth23::zero()), None);
        // The generator has order p - 1 = 7 * 2^20.
        assert_eq!(root_log_order(Proth23::generator()), None);
    }

    #[test]
    fn generator_restricts_order() {
        let root: BabyBear = BabyBear::omega(10).unwrap();
        let cfg: NttInitDomainConfig = NttInitDomainConfig::default().with_max_log_size(4);
        let (g, m) = domain_generator(root, &cfg).unwrap();
        assert_eq!(m, 4);
        assert_eq!(g, BabyBear::omega(4).unwrap());

        let (g, m) = domain_generator(root, &NttInitDomainConfig::default()).unwrap();
        assert_eq!((g, m), (root, 10));

        let (g, m) = domain_generator(root, &NttInitDomainConfig::default().with_max_log_size(0)).unwrap();
        assert_eq!(m, 0);
        assert!(g.is_one());

        let too_big: NttInitDomainConfig = NttInitDomainConfig::default().with_max_log_size(11);
        assert!(matches!(domain_generator(root, &too_big), Err(NttError::InvalidArgument(_))));
    }

    #[test]
    fn tables_match_oracle() {
        let max_log: u32 = 6;
        let d = domain_new(Goldilocks::omega(max_log).unwrap(), max_log).unwrap();
        assert_eq!(d.max_size(), 64);
        for l in 0..=max_log {
            assert_eq!(d.root_of_order(l as u64).unwrap(), root_of_unity::<Goldilocks>(1 << l).unwrap());
        }
        for (t, t_inv) in d.twiddles().iter().zip(d.inv_twiddles()) {
            assert!((*t * *t_inv).is_one());
        }
        assert_eq!(d.twiddles()[1], d.root());
    }

    #[test]
    fn trivial_domain() {
        let d = domain_new(Proth23::one(), 0).unwrap();
        assert_eq!(d.max_size(), 1);
        assert!(d.twiddles().is_empty());
        assert!(d.root().is_one());
    }

    #[test]
    fn allocation_failure_is_reported() {
        let err: NttError = alloc_elements::<Goldilocks>(usize::MAX >> 3).unwrap_err();
        assert!(matches!(err, NttError::AllocationFailure { elements } if elements == usize::MAX >> 3));
        assert_eq!(err.code(), ErrorCode::AllocationFailure);
        assert_eq!(alloc_elements::<Goldilocks>(3).unwrap(), vec![Goldilocks::zero(); 3]);
    }
}
