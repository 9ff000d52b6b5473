mod buffers;
mod config;
mod device;
mod domain;
mod error;
mod field;
mod fields;
mod module;

pub use buffers::*;
pub use config::*;
pub use device::*;
pub use domain::*;
pub use error::*;
pub use field::*;
pub use fields::*;
pub use module::*;
