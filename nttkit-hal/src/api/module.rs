use crate::layouts::{Backend, Field};

/// Instantiate a new [crate::layouts::Module] with no active domain.
pub trait ModuleNew<B: Backend, F: Field> {
    fn new() -> Self;
}
