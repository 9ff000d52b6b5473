//! C layouts of the configuration structs.
//!
//! Foreign callers may hand over any bit pattern, so enums and flags cross
//! the boundary as plain integers and are validated while converting to the
//! Rust types. Field elements are `#[repr(transparent)]` words; their
//! canonicity is checked separately.

use crate::layouts::{
    Field, NttConfig, NttDir, NttError, NttInitDomainConfig, NttOrdering, NttResult, OnExisting, StreamHandle,
};

fn flag(what: &str, value: u8) -> NttResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        v => Err(NttError::invalid(format!("{what} = {v} is not a boolean"))),
    }
}

/// Decodes the `dir` argument of `<field>_ntt`.
pub fn dir_from_abi(dir: u32) -> NttResult<NttDir> {
    NttDir::try_from(dir)
}

/// C layout of [`NttConfig`].
///
/// `ordering` holds an [`NttOrdering`] discriminant, the flags hold `0` or `1`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NttConfigAbi<F: Field> {
    pub stream: u64,
    pub coset_gen: F,
    pub scale_factor: F,
    pub batch_size: u32,
    pub columns_batch: u8,
    pub ordering: u32,
    pub is_async: u8,
}

impl<F: Field> From<&NttConfig<F>> for NttConfigAbi<F> {
    fn from(config: &NttConfig<F>) -> Self {
        Self {
            stream: config.stream.0,
            coset_gen: config.coset_gen,
            scale_factor: config.scale_factor,
            batch_size: config.batch_size,
            columns_batch: config.columns_batch as u8,
            ordering: config.ordering as u32,
            is_async: config.is_async as u8,
        }
    }
}

impl<F: Field> TryFrom<NttConfigAbi<F>> for NttConfig<F> {
    type Error = NttError;

    fn try_from(raw: NttConfigAbi<F>) -> Result<Self, Self::Error> {
        Ok(NttConfig {
            stream: StreamHandle(raw.stream),
            coset_gen: raw.coset_gen,
            scale_factor: raw.scale_factor,
            batch_size: raw.batch_size,
            columns_batch: flag("columns_batch", raw.columns_batch)?,
            ordering: NttOrdering::try_from(raw.ordering)?,
            is_async: flag("is_async", raw.is_async)?,
        })
    }
}

/// C layout of [`NttInitDomainConfig`].
///
/// `max_log_size` is only read when `has_max_log_size` is `1`, so a
/// zero-initialized struct asks for the full order of the root under the
/// `Reuse` policy.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NttInitDomainConfigAbi {
    pub on_existing: u32,
    pub max_log_size: u32,
    pub has_max_log_size: u8,
    pub is_async: u8,
}

impl From<&NttInitDomainConfig> for NttInitDomainConfigAbi {
    fn from(config: &NttInitDomainConfig) -> Self {
        Self {
            on_existing: config.on_existing as u32,
            max_log_size: config.max_log_size.unwrap_or(0),
            has_max_log_size: config.max_log_size.is_some() as u8,
            is_async: config.is_async as u8,
        }
    }
}

impl TryFrom<NttInitDomainConfigAbi> for NttInitDomainConfig {
    type Error = NttError;

    fn try_from(raw: NttInitDomainConfigAbi) -> Result<Self, Self::Error> {
        let on_existing: OnExisting = OnExisting::try_from(raw.on_existing)?;
        let max_log_size: Option<u32> = flag("has_max_log_size", raw.has_max_log_size)?.then_some(raw.max_log_size);
        Ok(NttInitDomainConfig {
            on_existing,
            max_log_size,
            is_async: flag("is_async", raw.is_async)?,
        })
    }
}
