use crate::layouts::{Backend, Field, Module};

/// # THIS TRAIT IS AN OPEN EXTENSION POINT (unsafe)
/// * See `nttkit-backend/src/cpu_ref/module.rs` for the reference implementation.
/// * See [crate::api::ModuleNew] for corresponding public API.
/// # Safety [crate::doc::backend_safety] for safety contract.
pub unsafe trait ModuleNewImpl<B: Backend, F: Field> {
    fn new_impl() -> Module<B, F>;
}
