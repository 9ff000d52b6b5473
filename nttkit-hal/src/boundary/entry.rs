use std::{
    any::Any,
    ffi::{CStr, c_char},
    panic::{AssertUnwindSafe, catch_unwind},
};

use crate::{
    boundary::{
        NttField,
        abi::{NttConfigAbi, NttInitDomainConfigAbi, dir_from_abi},
        dispatcher,
    },
    layouts::{
        Device, ErrorCode, Field, NttBuffers, NttConfig, NttDir, NttError, NttInitDomainConfig, NttResult,
        active_device, set_device,
    },
    reference::rou::root_of_unity,
};

/// Typed function pointers of the entry points exported for `F`.
///
/// The typed API in [`crate::boundary`] goes through this table, so it
/// exercises exactly the code a foreign caller reaches.
#[derive(Clone, Copy)]
pub struct EntryPoints<F: Field> {
    pub ntt: unsafe extern "C" fn(*const F, u64, u32, *const NttConfigAbi<F>, *mut F) -> ErrorCode,
    pub init_domain: unsafe extern "C" fn(*const F, *const NttInitDomainConfigAbi) -> ErrorCode,
    pub release_domain: extern "C" fn() -> ErrorCode,
    pub get_root_of_unity: unsafe extern "C" fn(u64, *mut F) -> ErrorCode,
    pub get_root_of_unity_from_domain: unsafe extern "C" fn(u64, *mut F) -> ErrorCode,
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "<non-string panic payload>"
    }
}

/// Runs `op`, turning a panic into [`NttError::Internal`] so nothing unwinds across the ABI.
pub(crate) fn guard<F: Field, T>(op: impl FnOnce() -> NttResult<T>) -> NttResult<T> {
    catch_unwind(AssertUnwindSafe(op)).unwrap_or_else(|payload| {
        let msg: &str = panic_message(payload.as_ref());
        tracing::error!(target: "nttkit", field = F::NAME, panic = msg, "backend panicked");
        Err(NttError::Internal(format!("backend panicked: {msg}")))
    })
}

/// Rejects null and misaligned pointers before anything is read through them.
fn check_ptr<T>(what: &str, ptr: *const T) -> NttResult<()> {
    if ptr.is_null() {
        return Err(NttError::invalid(format!("{what} is a null pointer")));
    }
    if !ptr.is_aligned() {
        return Err(NttError::invalid(format!(
            "{what} = {ptr:p} is not aligned to {} bytes",
            align_of::<T>()
        )));
    }
    Ok(())
}

fn check_canonical<F: Field>(what: &str, values: &[F]) -> NttResult<()> {
    match values.iter().position(|x| !x.is_canonical()) {
        None => Ok(()),
        Some(i) => Err(NttError::invalid(format!(
            "{what}[{i}] = {} is not a canonical {} element",
            values[i].as_u64(),
            F::NAME
        ))),
    }
}

fn overlaps<F>(a: *const F, b: *const F, len: usize) -> bool {
    let bytes: usize = len * size_of::<F>();
    let (a, b) = (a as usize, b as usize);
    bytes > 0 && a < b.saturating_add(bytes) && b < a.saturating_add(bytes)
}

/// Element count of the transform buffers, rejecting counts no slice can hold.
fn buffer_len<F>(size: usize, batch: u32) -> NttResult<usize> {
    size.checked_mul(batch as usize)
        .filter(|len| len.checked_mul(size_of::<F>()).is_some_and(|bytes| bytes <= isize::MAX as usize))
        .ok_or_else(|| NttError::invalid(format!("size {size} x batch {batch} overflows the address space")))
}

/// # Safety
/// See [`crate::boundary::goldilocks_ntt`].
pub(crate) unsafe fn ntt<F: NttField>(
    input: *const F,
    size: u64,
    dir: u32,
    config: *const NttConfigAbi<F>,
    output: *mut F,
) -> NttResult<()> {
    check_ptr("input", input)?;
    check_ptr("output", output.cast_const())?;
    check_ptr("config", config)?;
    let dir: NttDir = dir_from_abi(dir)?;
    let config: NttConfig<F> = NttConfig::try_from(unsafe { config.read() })?;
    check_canonical("coset_gen", &[config.coset_gen])?;
    check_canonical("scale_factor", &[config.scale_factor])?;

    let size: usize = usize::try_from(size).map_err(|_| NttError::invalid(format!("size {size} exceeds usize")))?;
    let len: usize = buffer_len::<F>(size, config.batch_size)?;

    let buffers: NttBuffers<'_, F> = if std::ptr::eq(input, output) {
        NttBuffers::InPlace(unsafe { std::slice::from_raw_parts_mut(output, len) })
    } else if overlaps(input, output, len) {
        return Err(NttError::invalid("input and output buffers partially overlap"));
    } else {
        NttBuffers::OutOfPlace {
            input: unsafe { std::slice::from_raw_parts(input, len) },
            output: unsafe { std::slice::from_raw_parts_mut(output, len) },
        }
    };
    check_canonical("input", buffers.input())?;

    dispatcher::<F>()?.ntt(&active_device(), buffers, size, dir, &config)
}

/// # Safety
/// See [`crate::boundary::goldilocks_ntt_init_domain`].
pub(crate) unsafe fn init_domain<F: NttField>(
    primitive_root: *const F,
    config: *const NttInitDomainConfigAbi,
) -> NttResult<()> {
    check_ptr("primitive_root", primitive_root)?;
    check_ptr("config", config)?;
    let root: F = unsafe { primitive_root.read() };
    let config: NttInitDomainConfig = NttInitDomainConfig::try_from(unsafe { config.read() })?;
    check_canonical("primitive_root", &[root])?;
    dispatcher::<F>()?.init_domain(&active_device(), root, &config)
}

pub(crate) fn release_domain<F: NttField>() -> NttResult<()> {
    dispatcher::<F>()?.release_domain(&active_device())
}

/// # Safety
/// See [`crate::boundary::goldilocks_get_root_of_unity`].
pub(crate) unsafe fn get_root_of_unity<F: NttField>(max_size: u64, out: *mut F) -> NttResult<()> {
    check_ptr("out", out.cast_const())?;
    let root: F = root_of_unity::<F>(max_size)?;
    unsafe { out.write(root) };
    Ok(())
}

/// # Safety
/// See [`crate::boundary::goldilocks_get_root_of_unity_from_domain`].
pub(crate) unsafe fn get_root_of_unity_from_domain<F: NttField>(logn: u64, out: *mut F) -> NttResult<()> {
    check_ptr("out", out.cast_const())?;
    let root: F = dispatcher::<F>()?.rou_from_domain(&active_device(), logn)?;
    unsafe { out.write(root) };
    Ok(())
}

/// # Safety
/// See [`crate::boundary::nttkit_set_device`].
pub(crate) unsafe fn set_device_from_c(kind: *const c_char, id: u32) -> NttResult<()> {
    if kind.is_null() {
        return Err(NttError::invalid("device kind is a null pointer"));
    }
    let kind: &str = unsafe { CStr::from_ptr(kind) }
        .to_str()
        .map_err(|_| NttError::invalid("device kind is not valid UTF-8"))?;
    if kind.trim().is_empty() {
        return Err(NttError::invalid("device kind is empty"));
    }
    set_device(&Device::new(kind.trim(), id));
    Ok(())
}
