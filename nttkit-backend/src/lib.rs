//! CPU backends for `nttkit-hal`.
//!
//! - [`CpuRef`]: single-threaded reference backend, device kind `CPU`.
//! - [`CpuPar`]: rayon-parallel backend, device kind `CPU_PAR`.
//!
//! Both implement every [`nttkit_hal::oep`] trait for every [`Field`].
//! [`install_cpu_backends`] registers them for all supported fields, after
//! which the `extern "C"` entry points of [`nttkit_hal::boundary`] are usable.
//!
//! Built as a `cdylib`, the crate exports those entry points together with
//! [`nttkit_load_cpu_backends`], so a C caller loads the backends, selects a
//! device with `nttkit_set_device` and then calls `<field>_ntt` and friends.

mod cpu_par;
mod cpu_ref;

use std::sync::Arc;

pub use cpu_par::*;
pub use cpu_ref::*;

use nttkit_hal::{
    api::ModuleNew,
    boundary::install,
    layouts::{BabyBear, ErrorCode, Field, Goldilocks, Module, NttResult, Proth23},
    registry::Registry,
};

/// Registry holding a fresh [`CpuRef`] and [`CpuPar`] module under their default kinds.
pub fn cpu_registry<F: Field>() -> NttResult<Registry<F>> {
    let mut builder = Registry::<F>::builder();
    builder
        .register_default(Arc::new(Module::<CpuRef, F>::new()))?
        .register_default(Arc::new(Module::<CpuPar, F>::new()))?;
    Ok(builder.build())
}

/// Installs [`cpu_registry`] as the process-wide registry of every supported field.
///
/// Fails with [`ErrorCode::InvalidArgument`] if a registry is already installed
/// for one of them.
pub fn install_cpu_backends() -> Result<(), ErrorCode> {
    install::<Goldilocks>(cpu_registry().map_err(|e| e.code())?)?;
    install::<BabyBear>(cpu_registry().map_err(|e| e.code())?)?;
    install::<Proth23>(cpu_registry().map_err(|e| e.code())?)?;
    Ok(())
}

/// C entry point of [`install_cpu_backends`].
#[unsafe(no_mangle)]
pub extern "C" fn nttkit_load_cpu_backends() -> ErrorCode {
    match install_cpu_backends() {
        Ok(()) => ErrorCode::Success,
        Err(code) => code,
    }
}
