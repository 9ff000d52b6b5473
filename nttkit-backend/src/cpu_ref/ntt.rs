use std::sync::Arc;

use nttkit_hal::{
    layouts::{Domain, Field, Module, NttBuffers, NttConfig, NttDir, NttError, NttInitDomainConfig, NttResult},
    oep::{NttImpl, NttInitDomainImpl, NttReleaseDomainImpl, NttRouFromDomainImpl},
    reference::{domain::domain_new, ntt::ntt_ref},
};

use crate::CpuRef;

unsafe impl<F: Field> NttImpl<Self, F> for CpuRef {
    fn ntt_impl(
        _module: &Module<Self, F>,
        domain: &Domain<F>,
        buffers: NttBuffers<'_, F>,
        size: usize,
        dir: NttDir,
        config: &NttConfig<F>,
    ) -> NttResult<()> {
        ntt_ref(domain, buffers, size, dir, config)
    }
}

unsafe impl<F: Field> NttInitDomainImpl<Self, F> for CpuRef {
    fn ntt_init_domain_impl(
        _module: &Module<Self, F>,
        root: F,
        max_log: u32,
        _config: &NttInitDomainConfig,
    ) -> NttResult<Domain<F>> {
        domain_new(root, max_log)
    }
}

unsafe impl<F: Field> NttReleaseDomainImpl<Self, F> for CpuRef {
    fn ntt_release_domain_impl(_module: &Module<Self, F>, domain: Arc<Domain<F>>) -> NttResult<()> {
        drop(domain);
        Ok(())
    }
}

unsafe impl<F: Field> NttRouFromDomainImpl<Self, F> for CpuRef {
    fn ntt_rou_from_domain_impl(_module: &Module<Self, F>, domain: &Domain<F>, logn: u64) -> NttResult<F> {
        domain
            .root_of_order(logn)
            .ok_or_else(|| NttError::invalid(format!("logn {logn} exceeds domain order 2^{}", domain.max_log())))
    }
}
