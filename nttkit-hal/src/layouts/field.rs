use std::{
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use num_traits::{One, Zero};

/// Selects a prime field `Z/pZ` with `p < 2^64` together with the constants
/// needed to derive its roots of unity.
///
/// All values are fixed at build time. In particular [`FieldParams::TWO_ADICITY`]
/// bounds the order of every root of unity the field can provide: it never
/// grows at runtime.
pub trait FieldParams: Sized + Sync + Send + 'static {
    /// Human readable name, used in diagnostics.
    const NAME: &'static str;
    /// The prime modulus `p`.
    const MODULUS: u64;
    /// A generator of the multiplicative group `(Z/pZ)*`.
    const GENERATOR: u64;
    /// Largest `k` such that `2^k` divides `p - 1`.
    const TWO_ADICITY: u32;
    /// `GENERATOR^((p - 1) / 2^TWO_ADICITY)`: a primitive `2^TWO_ADICITY`-th root of unity.
    const TWO_ADIC_ROOT: u64;
}

/// Scalar field element as seen by the dispatch layer and every backend.
///
/// Values are always canonical (`< MODULUS`) when produced through this trait.
pub trait Field:
    Copy
    + Eq
    + Hash
    + Debug
    + Display
    + Default
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + Send
    + Sync
    + 'static
{
    const NAME: &'static str;
    const MODULUS: u64;
    /// Number of known omegas: `omega(logn)` exists for every `logn <= OMEGAS_COUNT`.
    const OMEGAS_COUNT: u32;

    /// Reduces `value` modulo the field prime.
    fn from_u64(value: u64) -> Self;

    /// Returns `None` if `value` is not a canonical representative.
    fn from_canonical(value: u64) -> Option<Self>;

    fn as_u64(&self) -> u64;

    /// `false` for elements read from foreign memory that hold a value `>= MODULUS`.
    fn is_canonical(&self) -> bool {
        self.as_u64() < Self::MODULUS
    }

    fn generator() -> Self;

    fn pow(self, exp: u64) -> Self;

    /// Multiplicative inverse, `None` for zero.
    fn inv(self) -> Option<Self>;

    /// Primitive `2^logn`-th root of unity, `None` if `logn > OMEGAS_COUNT`.
    fn omega(logn: u32) -> Option<Self>;

    fn omega_inv(logn: u32) -> Option<Self> {
        Self::omega(logn).and_then(Self::inv)
    }
}

/// Element of the prime field described by `P`, stored as a canonical `u64`.
///
/// The layout is exactly one `u64`, so slices of `Fp<P>` can cross the
/// `extern "C"` boundary as plain word arrays.
#[repr(transparent)]
pub struct Fp<P: FieldParams> {
    value: u64,
    _marker: PhantomData<P>,
}

impl<P: FieldParams> Fp<P> {
    #[inline(always)]
    const fn new_unchecked(value: u64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }
}

impl<P: FieldParams> Clone for Fp<P> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: FieldParams> Copy for Fp<P> {}

impl<P: FieldParams> PartialEq for Fp<P> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<P: FieldParams> Eq for Fp<P> {}

impl<P: FieldParams> Hash for Fp<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state)
    }
}

impl<P: FieldParams> Default for Fp<P> {
    fn default() -> Self {
        Self::new_unchecked(0)
    }
}

impl<P: FieldParams> Debug for Fp<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:#x})", P::NAME, self.value)
    }
}

impl<P: FieldParams> Display for Fp<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<P: FieldParams> Add for Fp<P> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        let (sum, carry) = self.value.overflowing_add(rhs.value);
        if carry || sum >= P::MODULUS {
            Self::new_unchecked(sum.wrapping_sub(P::MODULUS))
        } else {
            Self::new_unchecked(sum)
        }
    }
}

impl<P: FieldParams> Sub for Fp<P> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        if self.value >= rhs.value {
            Self::new_unchecked(self.value - rhs.value)
        } else {
            Self::new_unchecked(self.value + (P::MODULUS - rhs.value))
        }
    }
}

impl<P: FieldParams> Mul for Fp<P> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        let prod: u128 = (self.value as u128) * (rhs.value as u128);
        Self::new_unchecked((prod % P::MODULUS as u128) as u64)
    }
}

impl<P: FieldParams> Neg for Fp<P> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        if self.value == 0 {
            self
        } else {
            Self::new_unchecked(P::MODULUS - self.value)
        }
    }
}

impl<P: FieldParams> AddAssign for Fp<P> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}

impl<P: FieldParams> SubAssign for Fp<P> {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs
    }
}

impl<P: FieldParams> MulAssign for Fp<P> {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs
    }
}

impl<P: FieldParams> Zero for Fp<P> {
    fn zero() -> Self {
        Self::new_unchecked(0)
    }

    fn is_zero(&self) -> bool {
        self.value == 0
    }
}

impl<P: FieldParams> One for Fp<P> {
    fn one() -> Self {
        Self::new_unchecked(1)
    }
}

impl<P: FieldParams> Field for Fp<P> {
    const NAME: &'static str = P::NAME;
    const MODULUS: u64 = P::MODULUS;
    const OMEGAS_COUNT: u32 = P::TWO_ADICITY;

    #[inline(always)]
    fn from_u64(value: u64) -> Self {
        Self::new_unchecked(value % P::MODULUS)
    }

    fn from_canonical(value: u64) -> Option<Self> {
        (value < P::MODULUS).then(|| Self::new_unchecked(value))
    }

    #[inline(always)]
    fn as_u64(&self) -> u64 {
        self.value
    }

    fn generator() -> Self {
        Self::new_unchecked(P::GENERATOR)
    }

    fn pow(self, exp: u64) -> Self {
        let mut res: Self = Self::one();
        let mut base: Self = self;
        let mut e: u64 = exp;
        while e > 0 {
            if e & 1 == 1 {
                res *= base;
            }
            base *= base;
            e >>= 1;
        }
        res
    }

    fn inv(self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        Some(self.pow(P::MODULUS - 2))
    }

    fn omega(logn: u32) -> Option<Self> {
        if logn > P::TWO_ADICITY {
            return None;
        }
        let mut w: Self = Self::new_unchecked(P::TWO_ADIC_ROOT);
        for _ in logn..P::TWO_ADICITY {
            w *= w;
        }
        Some(w)
    }
}
