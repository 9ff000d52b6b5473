use crate::{
    api::{Ntt, NttBackend, NttInitDomain, NttReleaseDomain, NttRouFromDomain},
    layouts::{Backend, Field, Module, NttBuffers, NttConfig, NttDir, NttInitDomainConfig, NttResult},
};

impl<B, F> NttBackend<F> for Module<B, F>
where
    B: Backend,
    F: Field,
    Module<B, F>: Ntt<F> + NttInitDomain<F> + NttReleaseDomain<F> + NttRouFromDomain<F>,
{
    fn name(&self) -> &'static str {
        B::NAME
    }

    fn supports_inplace(&self) -> bool {
        B::SUPPORTS_INPLACE
    }

    fn ntt(&self, buffers: NttBuffers<'_, F>, size: usize, dir: NttDir, config: &NttConfig<F>) -> NttResult<()> {
        Ntt::ntt(self, buffers, size, dir, config)
    }

    fn init_domain(&self, primitive_root: F, config: &NttInitDomainConfig) -> NttResult<()> {
        self.ntt_init_domain(primitive_root, config)
    }

    fn release_domain(&self) -> NttResult<()> {
        self.ntt_release_domain()
    }

    fn rou_from_domain(&self, logn: u64) -> NttResult<F> {
        self.ntt_rou_from_domain(logn)
    }
}
