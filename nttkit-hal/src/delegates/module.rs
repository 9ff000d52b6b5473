use crate::{
    api::ModuleNew,
    layouts::{Backend, Field, Module},
    oep::ModuleNewImpl,
};

impl<B, F> ModuleNew<B, F> for Module<B, F>
where
    B: Backend + ModuleNewImpl<B, F>,
    F: Field,
{
    fn new() -> Self {
        B::new_impl()
    }
}
