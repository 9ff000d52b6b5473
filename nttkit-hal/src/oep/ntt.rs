//! Backend extension points of the transform capability contract.

use std::sync::Arc;

use crate::layouts::{Backend, Domain, Field, Module, NttBuffers, NttConfig, NttDir, NttInitDomainConfig, NttResult};

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// * See `nttkit-backend/src/cpu_ref/ntt.rs` for the reference implementation.
/// * See [crate::api::Ntt] for corresponding public API.
/// # Safety [crate::doc::backend_safety] for safety contract.
///
/// Called only after the delegates validated that `size` is a power of two
/// supported by `domain`, that both buffers hold `size * config.batch_size`
/// elements, and that `buffers` is in place only if [`Backend::SUPPORTS_INPLACE`].
pub unsafe trait NttImpl<B: Backend, F: Field> {
    fn ntt_impl(
        module: &Module<B, F>,
        domain: &Domain<F>,
        buffers: NttBuffers<'_, F>,
        size: usize,
        dir: NttDir,
        config: &NttConfig<F>,
    ) -> NttResult<()>;
}

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// * See `nttkit-backend/src/cpu_ref/ntt.rs` for the reference implementation.
/// * See [crate::api::NttInitDomain] for corresponding public API.
/// # Safety [crate::doc::backend_safety] for safety contract.
///
/// `root` has exact multiplicative order `2^max_log`. The returned domain is
/// installed by the caller according to the configured [`crate::layouts::OnExisting`] policy.
pub unsafe trait NttInitDomainImpl<B: Backend, F: Field> {
    fn ntt_init_domain_impl(
        module: &Module<B, F>,
        root: F,
        max_log: u32,
        config: &NttInitDomainConfig,
    ) -> NttResult<Domain<F>>;
}

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// * See `nttkit-backend/src/cpu_ref/ntt.rs` for the reference implementation.
/// * See [crate::api::NttReleaseDomain] for corresponding public API.
/// # Safety [crate::doc::backend_safety] for safety contract.
///
/// Invoked with the domain that was just detached from the module. Never
/// invoked when no domain was active.
pub unsafe trait NttReleaseDomainImpl<B: Backend, F: Field> {
    fn ntt_release_domain_impl(module: &Module<B, F>, domain: Arc<Domain<F>>) -> NttResult<()>;
}

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// * See `nttkit-backend/src/cpu_ref/ntt.rs` for the reference implementation.
/// * See [crate::api::NttRouFromDomain] for corresponding public API.
/// # Safety [crate::doc::backend_safety] for safety contract.
///
/// `logn <= domain.max_log()` is guaranteed by the caller.
pub unsafe trait NttRouFromDomainImpl<B: Backend, F: Field> {
    fn ntt_rou_from_domain_impl(module: &Module<B, F>, domain: &Domain<F>, logn: u64) -> NttResult<F>;
}
