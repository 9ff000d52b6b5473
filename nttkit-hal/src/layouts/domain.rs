use std::sync::Arc;

use parking_lot::RwLock;

use crate::layouts::{Field, NttError, NttResult, OnExisting};

/// Precomputed root-of-unity tables for transforms of size up to `2^max_log`.
///
/// - `roots[l]` is the primitive `2^l`-th root of unity used for a transform
///   of size `2^l`, for every `l <= max_log`.
/// - `twiddles[i] = ω^i` and `inv_twiddles[i] = ω^-i` for `i < 2^max_log / 2`,
///   where `ω = roots[max_log]`. A transform of size `2^l` reads them with
///   stride `2^(max_log - l)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain<F: Field> {
    max_log: u32,
    roots: Vec<F>,
    twiddles: Vec<F>,
    inv_twiddles: Vec<F>,
}

impl<F: Field> Domain<F> {
    pub fn from_parts(max_log: u32, roots: Vec<F>, twiddles: Vec<F>, inv_twiddles: Vec<F>) -> Self {
        debug_assert_eq!(roots.len(), max_log as usize + 1);
        debug_assert_eq!(twiddles.len(), (1usize << max_log) >> 1);
        debug_assert_eq!(inv_twiddles.len(), twiddles.len());
        Self {
            max_log,
            roots,
            twiddles,
            inv_twiddles,
        }
    }

    #[inline]
    pub fn max_log(&self) -> u32 {
        self.max_log
    }

    #[inline]
    pub fn max_size(&self) -> usize {
        1 << self.max_log
    }

    /// The primitive `2^max_log`-th root the domain was built from.
    pub fn root(&self) -> F {
        self.roots[self.max_log as usize]
    }

    /// Primitive `2^logn`-th root of unity, `None` if `logn > max_log`.
    pub fn root_of_order(&self, logn: u64) -> Option<F> {
        if logn > self.max_log as u64 {
            return None;
        }
        Some(self.roots[logn as usize])
    }

    pub fn roots(&self) -> &[F] {
        &self.roots
    }

    pub fn twiddles(&self) -> &[F] {
        &self.twiddles
    }

    pub fn inv_twiddles(&self) -> &[F] {
        &self.inv_twiddles
    }

    /// Stride into the twiddle tables for a butterfly stage of span `2^log_len`.
    #[inline]
    pub fn twiddle_stride(&self, log_len: u32) -> usize {
        debug_assert!(log_len >= 1 && log_len <= self.max_log);
        1 << (self.max_log - log_len)
    }

    pub fn supports(&self, size: usize) -> bool {
        size.is_power_of_two() && size <= self.max_size()
    }
}

/// Outcome of [`DomainSlot::install`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomainInstall {
    Fresh,
    Replaced,
    Reused,
}

/// Holder of the single active [`Domain`] of one (field, backend) pair.
///
/// Each operation on the slot is atomic, but sequences of operations are not
/// serialized: callers racing `init_domain`/`release_domain` on the same slot
/// must provide their own mutual exclusion. Under contention the winner is
/// fixed by the policy: with [`OnExisting::Error`] and [`OnExisting::Reuse`]
/// the first domain installed stays, with [`OnExisting::Replace`] the last
/// one installed stays.
///
/// Readers take an `Arc` snapshot, so a transform in flight keeps using the
/// domain it started with even if the slot is released or replaced meanwhile.
pub struct DomainSlot<F: Field> {
    active: RwLock<Option<Arc<Domain<F>>>>,
}

impl<F: Field> Default for DomainSlot<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> DomainSlot<F> {
    pub fn new() -> Self {
        Self {
            active: RwLock::new(None),
        }
    }

    pub fn active(&self) -> Option<Arc<Domain<F>>> {
        self.active.read().clone()
    }

    pub fn is_active(&self) -> bool {
        self.active.read().is_some()
    }

    pub fn install(&self, domain: Domain<F>, policy: OnExisting) -> NttResult<DomainInstall> {
        let mut guard = self.active.write();
        match (guard.is_some(), policy) {
            (false, _) => {
                *guard = Some(Arc::new(domain));
                Ok(DomainInstall::Fresh)
            }
            (true, OnExisting::Reuse) => Ok(DomainInstall::Reused),
            (true, OnExisting::Error) => Err(NttError::invalid(format!(
                "a {} domain is already initialized and the policy forbids re-initialization",
                F::NAME
            ))),
            (true, OnExisting::Replace) => {
                *guard = Some(Arc::new(domain));
                Ok(DomainInstall::Replaced)
            }
        }
    }

    /// Removes the active domain, returning it. `None` if nothing was active.
    pub fn release(&self) -> Option<Arc<Domain<F>>> {
        self.active.write().take()
    }
}
