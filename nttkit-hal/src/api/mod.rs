mod backend;
mod module;
mod ntt;

pub use backend::*;
pub use module::*;
pub use ntt::*;
