//! Safe typed front-end of the boundary.
//!
//! Each function lowers its arguments to the C layouts, forwards to the
//! matching entry of [`NttField::ENTRY_POINTS`] and maps the returned
//! [`ErrorCode`] to a `Result`.

use crate::{
    boundary::{NttConfigAbi, NttField, NttInitDomainConfigAbi},
    layouts::{ErrorCode, NttConfig, NttDir, NttError, NttInitDomainConfig},
};

fn check_len(what: &str, len: usize, expected: Option<usize>) -> Result<(), ErrorCode> {
    match expected {
        Some(e) if e == len => Ok(()),
        _ => Err(NttError::invalid(format!("{what} holds {len} elements, size x batch is {expected:?}")).code()),
    }
}

/// Out-of-place transform of `config.batch_size` vectors of `size` elements.
pub fn ntt<F: NttField>(
    input: &[F],
    size: usize,
    dir: NttDir,
    config: &NttConfig<F>,
    output: &mut [F],
) -> Result<(), ErrorCode> {
    let expected: Option<usize> = size.checked_mul(config.batch_size as usize);
    check_len("input", input.len(), expected)?;
    check_len("output", output.len(), expected)?;
    let config: NttConfigAbi<F> = config.into();
    unsafe { (F::ENTRY_POINTS.ntt)(input.as_ptr(), size as u64, dir as u32, &config, output.as_mut_ptr()) }.wrap()
}

/// In-place transform of `config.batch_size` vectors of `size` elements.
pub fn ntt_inplace<F: NttField>(data: &mut [F], size: usize, dir: NttDir, config: &NttConfig<F>) -> Result<(), ErrorCode> {
    check_len("data", data.len(), size.checked_mul(config.batch_size as usize))?;
    let config: NttConfigAbi<F> = config.into();
    let ptr: *mut F = data.as_mut_ptr();
    unsafe { (F::ENTRY_POINTS.ntt)(ptr, size as u64, dir as u32, &config, ptr) }.wrap()
}

pub fn initialize_domain<F: NttField>(primitive_root: F, config: &NttInitDomainConfig) -> Result<(), ErrorCode> {
    let config: NttInitDomainConfigAbi = config.into();
    unsafe { (F::ENTRY_POINTS.init_domain)(&primitive_root, &config) }.wrap()
}

pub fn release_domain<F: NttField>() -> Result<(), ErrorCode> {
    (F::ENTRY_POINTS.release_domain)().wrap()
}

pub fn get_root_of_unity<F: NttField>(max_size: u64) -> Result<F, ErrorCode> {
    let mut root: F = F::default();
    let code: ErrorCode = unsafe { (F::ENTRY_POINTS.get_root_of_unity)(max_size, &mut root) };
    code.wrap_value(root)
}

pub fn get_root_of_unity_from_domain<F: NttField>(logn: u64) -> Result<F, ErrorCode> {
    let mut root: F = F::default();
    let code: ErrorCode = unsafe { (F::ENTRY_POINTS.get_root_of_unity_from_domain)(logn, &mut root) };
    code.wrap_value(root)
}
