use crate::layouts::{Field, NttBuffers, NttConfig, NttDir, NttInitDomainConfig, NttResult};

/// Forward or inverse number-theoretic transform of `config.batch_size`
/// independent vectors of `size` elements each.
///
/// Requires an active domain supporting `size` (see [`NttInitDomain`]).
pub trait Ntt<F: Field> {
    fn ntt(&self, buffers: NttBuffers<'_, F>, size: usize, dir: NttDir, config: &NttConfig<F>) -> NttResult<()>;
}

/// Precomputes the transform domain generated by `primitive_root`.
///
/// What happens when a domain is already active is selected by
/// [`NttInitDomainConfig::on_existing`](crate::layouts::NttInitDomainConfig).
pub trait NttInitDomain<F: Field> {
    fn ntt_init_domain(&self, primitive_root: F, config: &NttInitDomainConfig) -> NttResult<()>;
}

/// Drops the active domain. Succeeds when none is active.
pub trait NttReleaseDomain<F: Field> {
    fn ntt_release_domain(&self) -> NttResult<()>;
}

/// Primitive `2^logn`-th root of unity read from the active domain.
pub trait NttRouFromDomain<F: Field> {
    fn ntt_rou_from_domain(&self, logn: u64) -> NttResult<F>;
}
