mod module;
mod ntt;

#[cfg(test)]
mod tests;

/// Single-threaded backend running the reference transform of
/// [`nttkit_hal::reference`]. Registered as `CPU`.
pub struct CpuRef {}
