//! Root-of-unity oracle.
//!
//! Answers from the field constants alone: no domain, registry or backend is
//! consulted, so the answer is the same before and after any `init_domain`.

use crate::layouts::{Field, NttError, NttResult};

/// `ceil(log2(x))` for `x >= 1`.
#[inline]
pub fn ceil_log2(x: u64) -> u32 {
    debug_assert!(x >= 1);
    if x <= 1 { 0 } else { 64 - (x - 1).leading_zeros() }
}

/// Primitive root of unity of order `2^L`, `L = ceil(log2(max_size))`: the
/// generator of the smallest two-power subgroup holding `max_size` points.
///
/// Fails with [`NttError::InvalidArgument`] if `max_size == 0` or if the field
/// has no root of order `2^L`.
pub fn root_of_unity<F: Field>(max_size: u64) -> NttResult<F> {
    if max_size == 0 {
        return Err(NttError::invalid("root of unity requested for max_size 0"));
    }
    let log: u32 = ceil_log2(max_size);
    F::omega(log).ok_or_else(|| {
        NttError::invalid(format!(
            "no root of unity of order 2^{log} in field {} (max order 2^{})",
            F::NAME,
            F::OMEGAS_COUNT
        ))
    })
}

#[cfg(test)]
mod tests {
    use num_traits::One;

    use super::{ceil_log2, root_of_unity};
    use crate::layouts::{BabyBear, Field, Goldilocks, NttError, Proth23};

    #[test]
    fn ceil_log2_values() {
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(1 << 20), 20);
        assert_eq!(ceil_log2((1 << 20) + 1), 21);
        assert_eq!(ceil_log2(u64::MAX), 64);
    }

    #[test]
    fn proth23_limits() {
        assert!(root_of_unity::<Proth23>(1 << 20).is_ok());
        assert!(matches!(
            root_of_unity::<Proth23>((1 << 20) + 1),
            Err(NttError::InvalidArgument(_))
        ));
        assert!(matches!(root_of_unity::<Proth23>(0), Err(NttError::InvalidArgument(_))));
    }

    #[test]
    fn size_one_is_trivial_root() {
        assert!(root_of_unity::<Goldilocks>(1).unwrap().is_one());
        assert!(root_of_unity::<BabyBear>(1).unwrap().is_one());
    }

    #[test]
    fn non_power_of_two_rounds_up() {
        let r: BabyBear = root_of_unity(1000).unwrap();
        assert_eq!(r, BabyBear::omega(10).unwrap());
        assert!(r.pow(1 << 10).is_one());
        assert!(!r.pow(1 << 9).is_one());
    }
}
