//! Routes each operation to the backend registered for the selected device.
//!
//! The dispatcher holds no state across calls: every call resolves the
//! backend afresh from the registry.

use crate::{
    api::NttBackend,
    layouts::{Device, Field, NttBuffers, NttConfig, NttDir, NttError, NttInitDomainConfig, NttResult},
    registry::Registry,
};

#[derive(Clone, Copy)]
pub struct Dispatcher<'r, F: Field> {
    registry: &'r Registry<F>,
}

impl<'r, F: Field> Dispatcher<'r, F> {
    pub fn new(registry: &'r Registry<F>) -> Self {
        Self { registry }
    }

    /// Runs `op` on the backend registered for `device.kind()`.
    ///
    /// Fails with [`NttError::BackendNotFound`] without running `op` if no
    /// backend is registered; otherwise returns the result of `op` unchanged.
    pub fn execute<T, Op>(&self, device: &Device, op: Op) -> NttResult<T>
    where
        Op: FnOnce(&dyn NttBackend<F>) -> NttResult<T>,
    {
        match self.registry.lookup(device.kind()) {
            Some(backend) => op(backend),
            None => {
                tracing::warn!(
                    target: "nttkit",
                    field = F::NAME,
                    %device,
                    registered = ?self.registry.devices(),
                    "no backend registered for device"
                );
                Err(NttError::BackendNotFound(device.kind().to_string()))
            }
        }
    }

    pub fn ntt(
        &self,
        device: &Device,
        buffers: NttBuffers<'_, F>,
        size: usize,
        dir: NttDir,
        config: &NttConfig<F>,
    ) -> NttResult<()> {
        self.execute(device, |backend| backend.ntt(buffers, size, dir, config))
    }

    pub fn init_domain(&self, device: &Device, primitive_root: F, config: &NttInitDomainConfig) -> NttResult<()> {
        self.execute(device, |backend| backend.init_domain(primitive_root, config))
    }

    pub fn release_domain(&self, device: &Device) -> NttResult<()> {
        self.execute(device, |backend| backend.release_domain())
    }

    pub fn rou_from_domain(&self, device: &Device, logn: u64) -> NttResult<F> {
        self.execute(device, |backend| backend.rou_from_domain(logn))
    }
}
