//! Fixed-ABI boundary.
//!
//! Every supported field exports five `extern "C"` entry points named
//! `<field>_ntt`, `<field>_ntt_init_domain`, `<field>_ntt_release_domain`,
//! `<field>_get_root_of_unity` and `<field>_get_root_of_unity_from_domain`.
//! They return an [`ErrorCode`] and never unwind. Raw pointers (null and
//! alignment), lengths, enum and flag values (see [`NttConfigAbi`]) and
//! element canonicity are checked once here, then the call is routed by the
//! [`Dispatcher`] to the backend of the calling thread's active device
//! (see [`crate::layouts::set_device`]).
//!
//! Each field owns one process-wide [`Registry`], installed once with
//! [`install`] before the first call. Foreign callers pick their device with
//! [`nttkit_set_device`].

mod abi;
mod entry;
mod ffi;
mod typed;


use std::sync::OnceLock;

pub use abi::*;
pub use entry::EntryPoints;
pub use ffi::*;
pub use typed::*;

use crate::{
    dispatch::Dispatcher,
    layouts::{Device, ErrorCode, Field, NttError, NttResult},
    registry::Registry,
};

/// A field exposed through the boundary.
pub trait NttField: Field {
    /// Table of the exported entry points of this field.
    const ENTRY_POINTS: EntryPoints<Self>;

    fn registry_cell() -> &'static OnceLock<Registry<Self>>;
}

/// Installs the process-wide registry of `F`. Fails if one is already installed.
pub fn install<F: NttField>(registry: Registry<F>) -> Result<(), ErrorCode> {
    let devices: String = registry.devices().join(",");
    match F::registry_cell().set(registry) {
        Ok(()) => {
            tracing::info!(target: "nttkit", field = F::NAME, devices = %devices, "registry installed");
            Ok(())
        }
        Err(_) => Err(NttError::invalid(format!("a {} registry is already installed", F::NAME)).code()),
    }
}

pub fn installed<F: NttField>() -> Option<&'static Registry<F>> {
    F::registry_cell().get()
}

/// `true` if a backend is registered for `device` in the installed registry of `F`.
pub fn is_device_available<F: NttField>(device: &Device) -> bool {
    installed::<F>().is_some_and(|r| r.contains(device.kind()))
}

pub(crate) fn dispatcher<F: NttField>() -> NttResult<Dispatcher<'static, F>> {
    installed::<F>().map(Dispatcher::new).ok_or_else(|| {
        tracing::warn!(target: "nttkit", field = F::NAME, "no registry installed");
        NttError::BackendNotFound(format!("<no {} registry installed>", F::NAME))
    })
}
