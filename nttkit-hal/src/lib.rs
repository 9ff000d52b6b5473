//! # nttkit-hal
//!
//! A trait-based Hardware Abstraction Layer (HAL) for number-theoretic
//! transforms over 64-bit prime fields.
//!
//! Callers program against one interface; the transform itself runs on
//! whichever backend is registered for the selected device. This crate holds
//! everything but the backends: the capability contract, the registry, the
//! dispatcher, domain lifecycle management, the root-of-unity oracle and the
//! fixed `extern "C"` boundary.
//!
//! ## Core Concepts
//!
//! **Field:** Elements of `Z/pZ` are [`layouts::Fp`] values, one canonical
//! `u64` each. [`layouts::Goldilocks`], [`layouts::BabyBear`] and
//! [`layouts::Proth23`] are supported; the two-adicity of `p - 1` bounds the
//! transform sizes a field admits.
//!
//! **Domain:** A [`layouts::Domain`] holds the roots of unity and twiddle
//! tables precomputed from a primitive root of order `2^M`. Each (field,
//! backend) pair has at most one active domain, owned by its
//! [`layouts::Module`], and every transform of size up to `2^M` reads it.
//!
//! **Device:** A [`layouts::Device`] names the backend a call is routed to.
//! The active device is thread-local and defaults to the `NTTKIT_DEVICE`
//! environment variable, or `CPU`.
//!
//! ## Architecture
//!
//! 1. **[`api`]** -- Safe trait definitions ([`api::Ntt`],
//!    [`api::NttInitDomain`], ...) and the object-safe [`api::NttBackend`].
//! 2. **[`oep`]** -- Unsafe extension-point traits mirroring the API
//!    ([`oep::NttImpl`], ...). Backend crates implement these.
//! 3. **[`delegates`]** -- Blanket `impl` glue connecting each [`api`] trait to
//!    the corresponding [`oep`] trait on [`layouts::Module`], including the
//!    argument checks and domain policy shared by all backends.
//! 4. **[`mod@reference`]** -- Pure-Rust transform, domain precomputation and
//!    root-of-unity oracle. Backends build on it; tests use it as a
//!    correctness oracle.
//!
//! On top of these, [`registry`] maps device kinds to backend instances,
//! [`dispatch`] routes each call through a registry, and [`boundary`]
//! exports the per-field `extern "C"` entry points and their typed front-end.
//!
//! ## Error handling
//!
//! Internal layers return [`layouts::NttResult`]. The boundary flattens
//! errors into the closed [`layouts::ErrorCode`] set and never unwinds.
//! Diagnostics are emitted through `tracing` under the `nttkit` target, once,
//! where the failure is detected. The library never installs a subscriber.
//!
//! ## Testing and Benchmarking
//!
//! The [`test_suite`] module provides backend-parametric test functions.
//! Backend crates instantiate them via the [`backend_test_suite!`] and
//! [`cross_backend_test_suite!`] macros.
//!
//! ## Safety Contract
//!
//! All [`oep`] traits are `unsafe` to implement. Implementors must uphold the
//! contract documented in [`doc::backend_safety`].

#![deny(rustdoc::broken_intra_doc_links)]

/// Safe, user-facing trait definitions of the transform capability contract.
pub mod api;

/// Fixed-ABI entry points, per field, and their typed front-end.
pub mod boundary;

/// Blanket implementations connecting [`api`] traits to [`oep`] traits on
/// [`layouts::Module`].
pub mod delegates;

/// Routing of operations to the backend of a device.
pub mod dispatch;

/// Backend-agnostic data types: field elements, configurations, domains,
/// devices and error codes.
pub mod layouts;

/// Open Extension Points: `unsafe` traits that backend crates implement.
///
/// Each trait mirrors a corresponding [`api`] trait and carries the `Impl`
/// suffix. See [`doc::backend_safety`] for the safety contract.
pub mod oep;

/// Pure-Rust reference implementations.
pub mod reference;

/// Device kind to backend table.
pub mod registry;

/// Deterministic pseudorandom number generation based on ChaCha8.
pub mod source;

/// Fully generic, backend-parametric test functions.
///
/// Backend crates instantiate these via the [`backend_test_suite!`] and
/// [`cross_backend_test_suite!`] macros.
pub mod test_suite;

/// Embedded safety contract documentation for backend implementors.
pub mod doc {
    /// Safety contract that all [`crate::oep`] trait implementations must uphold.
    #[doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/docs/backend_safety_contract.md"))]
    pub mod backend_safety {
        pub const _PLACEHOLDER: () = ();
    }
}
