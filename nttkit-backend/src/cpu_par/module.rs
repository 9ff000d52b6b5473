//! Backend handle and module initialization for [`CpuPar`](crate::CpuPar).

use nttkit_hal::{
    layouts::{Backend, Field, Module},
    oep::ModuleNewImpl,
};

use crate::CpuPar;

/// Tuning knobs of a `Module<CpuPar, F>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuParHandle {
    min_parallel_log: u32,
}

impl CpuParHandle {
    /// Transforms smaller than `2^10` run their butterfly levels on one thread.
    pub const DEFAULT_MIN_PARALLEL_LOG: u32 = 10;

    pub fn new(min_parallel_log: u32) -> Self {
        Self { min_parallel_log }
    }

    /// Vectors of size below `2^min_parallel_log` are transformed sequentially;
    /// batches are parallel regardless.
    pub fn min_parallel_log(&self) -> u32 {
        self.min_parallel_log
    }
}

impl Default for CpuParHandle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_PARALLEL_LOG)
    }
}

impl Backend for CpuPar {
    type Handle = CpuParHandle;
    const NAME: &'static str = "CPU_PAR";
    const SUPPORTS_INPLACE: bool = true;
}

unsafe impl<F: Field> ModuleNewImpl<Self, F> for CpuPar {
    fn new_impl() -> Module<Self, F> {
        Module::from_handle(CpuParHandle::default())
    }
}

impl CpuPar {
    /// Module with a custom parallelism threshold.
    pub fn module_with<F: Field>(handle: CpuParHandle) -> Module<Self, F> {
        tracing::debug!(target: "nttkit", field = F::NAME, min_parallel_log = handle.min_parallel_log(), "CPU_PAR module");
        Module::from_handle(handle)
    }
}
