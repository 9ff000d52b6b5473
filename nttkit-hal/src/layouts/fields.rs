use crate::layouts::{FieldParams, Fp};

/// Goldilocks prime `p = 2^64 - 2^32 + 1`.
///
/// - Multiplicative generator `7`.
/// - `p - 1 = 2^32 · (2^32 - 1)`, so transforms up to `2^32` points exist.
pub struct GoldilocksParams;

impl FieldParams for GoldilocksParams {
    const NAME: &'static str = "goldilocks";
    const MODULUS: u64 = 0xffff_ffff_0000_0001;
    const GENERATOR: u64 = 7;
    const TWO_ADICITY: u32 = 32;
    const TWO_ADIC_ROOT: u64 = 0x1856_29dc_da58_878c;
}

/// BabyBear prime `p = 15 · 2^27 + 1`.
///
/// - Multiplicative generator `31`.
/// - Transforms up to `2^27` points.
pub struct BabyBearParams;

impl FieldParams for BabyBearParams {
    const NAME: &'static str = "babybear";
    const MODULUS: u64 = 2_013_265_921;
    const GENERATOR: u64 = 31;
    const TWO_ADICITY: u32 = 27;
    const TWO_ADIC_ROOT: u64 = 440_564_289;
}

/// 23-bit Proth prime `p = 7 · 2^20 + 1 = 7_340_033`.
///
/// - Multiplicative generator `3`.
/// - Transforms up to `2^20` points.
pub struct Proth23Params;

impl FieldParams for Proth23Params {
    const NAME: &'static str = "proth23";
    const MODULUS: u64 = 7_340_033;
    const GENERATOR: u64 = 3;
    const TWO_ADICITY: u32 = 20;
    const TWO_ADIC_ROOT: u64 = 2_187;
}

pub type Goldilocks = Fp<GoldilocksParams>;
pub type BabyBear = Fp<BabyBearParams>;
pub type Proth23 = Fp<Proth23Params>;
