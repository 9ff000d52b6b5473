
use crate::layouts::{Field, NttError};

/// Direction of a transform.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NttDir {
    Forward = 0,
    Inverse = 1,
}

/// Element ordering of the input and output of a transform.
///
/// `N` is natural order, `R` is bit-reversed order; the first letter
/// describes the input, the second the output.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NttOrdering {
    #[default]
    NN = 0,
    NR = 1,
    RN = 2,
    RR = 3,
}

impl TryFrom<u32> for NttDir {
    type Error = NttError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(NttDir::Forward),
            1 => Ok(NttDir::Inverse),
            v => Err(NttError::invalid(format!("{v} is not a transform direction"))),
        }
    }
}

impl TryFrom<u32> for NttOrdering {
    type Error = NttError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(NttOrdering::NN),
            1 => Ok(NttOrdering::NR),
            2 => Ok(NttOrdering::RN),
            3 => Ok(NttOrdering::RR),
            v => Err(NttError::invalid(format!("{v} is not an element ordering"))),
        }
    }
}

impl NttOrdering {
    pub fn input_reversed(self) -> bool {
        matches!(self, NttOrdering::RN | NttOrdering::RR)
    }

    pub fn output_reversed(self) -> bool {
        matches!(self, NttOrdering::NR | NttOrdering::RR)
    }
}

/// Opaque execution-stream hint. `0` is the default stream.
///
/// CPU backends accept and ignore it; it never changes the synchronous
/// call/return contract.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StreamHandle(pub u64);

/// Per-call transform configuration.
///
/// Immutable for the duration of the call it configures.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NttConfig<F: Field> {
    pub stream: StreamHandle,
    /// Coset shift `c`; the forward transform evaluates on `c·<ω>`. One disables it.
    pub coset_gen: F,
    /// Multiplies every output element. One disables it.
    pub scale_factor: F,
    /// Number of independent transforms packed in the buffers.
    pub batch_size: u32,
    /// `true` when batch elements are interleaved (transform `j` reads every
    /// `batch_size`-th element starting at `j`).
    pub columns_batch: bool,
    pub ordering: NttOrdering,
    pub is_async: bool,
}

impl<F: Field> Default for NttConfig<F> {
    fn default() -> Self {
        Self {
            stream: StreamHandle::default(),
            coset_gen: F::one(),
            scale_factor: F::one(),
            batch_size: 1,
            columns_batch: false,
            ordering: NttOrdering::NN,
            is_async: false,
        }
    }
}

impl<F: Field> NttConfig<F> {
    pub fn with_coset(mut self, coset_gen: F) -> Self {
        self.coset_gen = coset_gen;
        self
    }

    pub fn with_scale(mut self, scale_factor: F) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_batch(mut self, batch_size: u32, columns_batch: bool) -> Self {
        self.batch_size = batch_size;
        self.columns_batch = columns_batch;
        self
    }

    pub fn with_ordering(mut self, ordering: NttOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_stream(mut self, stream: StreamHandle, is_async: bool) -> Self {
        self.stream = stream;
        self.is_async = is_async;
        self
    }

    pub fn has_coset(&self) -> bool {
        !self.coset_gen.is_one()
    }

    pub fn has_scale(&self) -> bool {
        !self.scale_factor.is_one()
    }
}

/// What `init_domain` does when a domain is already active.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OnExisting {
    /// Keep the active domain and report success without invoking the backend.
    #[default]
    Reuse = 0,
    /// Fail with `InvalidArgument`.
    Error = 1,
    /// Build the new domain and overwrite the active one.
    Replace = 2,
}

impl TryFrom<u32> for OnExisting {
    type Error = NttError;

    fn try_from(value: u32) -> Result<Self, <Self as TryFrom<u32>>::Error> {
        match value {
            0 => Ok(OnExisting::Reuse),
            1 => Ok(OnExisting::Error),
            2 => Ok(OnExisting::Replace),
            v => Err(NttError::invalid(format!("{v} is not a re-initialization policy"))),
        }
    }
}

/// Configuration of `init_domain`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NttInitDomainConfig {
    pub on_existing: OnExisting,
    /// Requested maximum order log of the domain. `None` uses the full order
    /// of the supplied root; `Some(0)` asks for the trivial domain.
    pub max_log_size: Option<u32>,
    pub is_async: bool,
}

impl NttInitDomainConfig {
    pub fn with_policy(mut self, on_existing: OnExisting) -> Self {
        self.on_existing = on_existing;
        self
    }

    pub fn with_max_log_size(mut self, max_log_size: u32) -> Self {
        self.max_log_size = Some(max_log_size);
        self
    }
}
