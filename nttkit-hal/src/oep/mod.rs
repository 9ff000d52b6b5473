//! Open Extension Points (OEP) for backend crates.
//!
//! This module defines the `unsafe` trait layer that backend crates implement
//! to provide a concrete transform. Each trait mirrors a corresponding safe
//! trait in the [`crate::api`] module, distinguished by an `Impl` suffix
//! (e.g., [`crate::api::Ntt`] is backed by [`NttImpl`]).
//!
//! Together these traits form the backend capability contract: forward and
//! inverse transform, domain init, domain release and root-of-unity lookup
//! from the active domain.

mod module;
mod ntt;

pub use module::*;
pub use ntt::*;
