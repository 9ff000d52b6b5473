//! Pure-Rust reference implementations of the transform, the domain
//! precomputation and the root-of-unity oracle.
//!
//! Backends reuse these building blocks and are checked against them via the
//! [`crate::test_suite`] module.

pub mod domain;
pub mod ntt;
pub mod rou;
