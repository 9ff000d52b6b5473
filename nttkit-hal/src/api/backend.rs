use crate::layouts::{Field, NttBuffers, NttConfig, NttDir, NttInitDomainConfig, NttResult};

/// Object-safe view of a backend instance: the full capability contract
/// (transform, domain init, domain release, root lookup from the domain).
///
/// Implemented for every [`Module`](crate::layouts::Module) whose backend
/// provides all the corresponding [`crate::oep`] traits. This is the type the
/// [`Registry`](crate::registry::Registry) stores.
pub trait NttBackend<F: Field>: Send + Sync {
    /// Device kind of the backend family.
    fn name(&self) -> &'static str;

    fn supports_inplace(&self) -> bool;

    fn ntt(&self, buffers: NttBuffers<'_, F>, size: usize, dir: NttDir, config: &NttConfig<F>) -> NttResult<()>;

    fn init_domain(&self, primitive_root: F, config: &NttInitDomainConfig) -> NttResult<()>;

    fn release_domain(&self) -> NttResult<()>;

    fn rou_from_domain(&self, logn: u64) -> NttResult<F>;
}
