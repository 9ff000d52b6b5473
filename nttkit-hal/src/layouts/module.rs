use std::{marker::PhantomData, sync::Arc};

use crate::layouts::{Domain, DomainSlot, Field, NttError, NttResult};

/// Marker trait of a backend family.
///
/// A backend type carries no state itself; per-instance state lives in its
/// [`Backend::Handle`], owned by a [`Module`].
pub trait Backend: Sized + Send + Sync + 'static {
    type Handle: Send + Sync + 'static;
    /// Device kind the backend is registered under by default.
    const NAME: &'static str;
    /// Whether the backend accepts `input == output` transforms.
    const SUPPORTS_INPLACE: bool;
}

/// A backend instance bound to one field: its handle plus the slot holding
/// the active transform domain of this (field, backend) pair.
pub struct Module<B: Backend, F: Field> {
    handle: B::Handle,
    domain: DomainSlot<F>,
    _marker: PhantomData<B>,
}

impl<B: Backend, F: Field> Module<B, F> {
    #[inline]
    pub fn from_handle(handle: B::Handle) -> Self {
        Self {
            handle,
            domain: DomainSlot::new(),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn handle(&self) -> &B::Handle {
        &self.handle
    }

    #[inline]
    pub fn domain_slot(&self) -> &DomainSlot<F> {
        &self.domain
    }

    /// Snapshot of the active domain.
    pub fn active_domain(&self) -> NttResult<Arc<Domain<F>>> {
        self.domain.active().ok_or_else(|| {
            tracing::warn!(target: "nttkit", field = F::NAME, backend = B::NAME, "no active domain");
            NttError::UninitializedDomain {
                field: F::NAME,
                backend: B::NAME,
            }
        })
    }

    #[inline]
    pub fn backend_name(&self) -> &'static str {
        B::NAME
    }
}
