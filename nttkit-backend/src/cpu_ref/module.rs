use nttkit_hal::{
    layouts::{Backend, Field, Module},
    oep::ModuleNewImpl,
};

use crate::CpuRef;

impl Backend for CpuRef {
    type Handle = ();
    const NAME: &'static str = "CPU";
    const SUPPORTS_INPLACE: bool = true;
}

unsafe impl<F: Field> ModuleNewImpl<Self, F> for CpuRef {
    fn new_impl() -> Module<Self, F> {
        Module::from_handle(())
    }
}
