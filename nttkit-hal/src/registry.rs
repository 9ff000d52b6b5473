//! Backend registry: maps a device kind to the backend instance serving it.
//!
//! The registry has two phases. Registration happens on a [`RegistryBuilder`]
//! owned by a single thread; [`RegistryBuilder::build`] then freezes it into
//! an immutable [`Registry`] that any number of threads read without locking.

use std::{collections::HashMap, sync::Arc};

use itertools::Itertools;

use crate::{
    api::NttBackend,
    layouts::{Field, NttError, NttResult},
};

pub struct RegistryBuilder<F: Field> {
    entries: HashMap<String, Arc<dyn NttBackend<F>>>,
}

impl<F: Field> Default for RegistryBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> RegistryBuilder<F> {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Registers `backend` under `kind`. A kind can be registered only once.
    pub fn register(&mut self, kind: impl Into<String>, backend: Arc<dyn NttBackend<F>>) -> NttResult<&mut Self> {
        let kind: String = kind.into();
        if self.entries.contains_key(&kind) {
            return Err(NttError::invalid(format!(
                "a {} backend is already registered for device kind {kind:?}",
                F::NAME
            )));
        }
        tracing::debug!(target: "nttkit", field = F::NAME, kind = %kind, backend = backend.name(), "backend registered");
        self.entries.insert(kind, backend);
        Ok(self)
    }

    /// Registers `backend` under its own [`NttBackend::name`].
    pub fn register_default(&mut self, backend: Arc<dyn NttBackend<F>>) -> NttResult<&mut Self> {
        let kind: &'static str = backend.name();
        self.register(kind, backend)
    }

    pub fn build(self) -> Registry<F> {
        Registry { entries: self.entries }
    }
}

/// Immutable device-kind to backend table.
pub struct Registry<F: Field> {
    entries: HashMap<String, Arc<dyn NttBackend<F>>>,
}

impl<F: Field> Registry<F> {
    pub fn builder() -> RegistryBuilder<F> {
        RegistryBuilder::new()
    }

    pub fn lookup(&self, kind: &str) -> Option<&dyn NttBackend<F>> {
        self.entries.get(kind).map(|b| b.as_ref())
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    /// Registered device kinds, sorted.
    pub fn devices(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).sorted_unstable().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
