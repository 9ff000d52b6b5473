mod module;
mod ntt;


pub use module::CpuParHandle;

/// Multi-core backend. Batches, columns and butterfly levels are spread over
/// the rayon global pool. Registered as `CPU_PAR`.
///
/// Produces exactly the same elements as [`crate::CpuRef`].
pub struct CpuPar {}
