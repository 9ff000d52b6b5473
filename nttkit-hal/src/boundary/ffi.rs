use std::{ffi::c_char, sync::OnceLock};

use crate::{
    boundary::{
        NttField,
        abi::{NttConfigAbi, NttInitDomainConfigAbi},
        entry::{self, EntryPoints, guard},
    },
    layouts::{BabyBear, ErrorCode, Goldilocks, Proth23, reset_device},
    registry::Registry,
};

static GOLDILOCKS_REGISTRY: OnceLock<Registry<Goldilocks>> = OnceLock::new();
static BABYBEAR_REGISTRY: OnceLock<Registry<BabyBear>> = OnceLock::new();
static PROTH23_REGISTRY: OnceLock<Registry<Proth23>> = OnceLock::new();

impl NttField for Goldilocks {
    const ENTRY_POINTS: EntryPoints<Self> = EntryPoints {
        ntt: goldilocks_ntt,
        init_domain: goldilocks_ntt_init_domain,
        release_domain: goldilocks_ntt_release_domain,
        get_root_of_unity: goldilocks_get_root_of_unity,
        get_root_of_unity_from_domain: goldilocks_get_root_of_unity_from_domain,
    };

    fn registry_cell() -> &'static OnceLock<Registry<Self>> {
        &GOLDILOCKS_REGISTRY
    }
}

impl NttField for BabyBear {
    const ENTRY_POINTS: EntryPoints<Self> = EntryPoints {
        ntt: babybear_ntt,
        init_domain: babybear_ntt_init_domain,
        release_domain: babybear_ntt_release_domain,
        get_root_of_unity: babybear_get_root_of_unity,
        get_root_of_unity_from_domain: babybear_get_root_of_unity_from_domain,
    };

    fn registry_cell() -> &'static OnceLock<Registry<Self>> {
        &BABYBEAR_REGISTRY
    }
}

impl NttField for Proth23 {
    const ENTRY_POINTS: EntryPoints<Self> = EntryPoints {
        ntt: proth23_ntt,
        init_domain: proth23_ntt_init_domain,
        release_domain: proth23_ntt_release_domain,
        get_root_of_unity: proth23_get_root_of_unity,
        get_root_of_unity_from_domain: proth23_get_root_of_unity_from_domain,
    };

    fn registry_cell() -> &'static OnceLock<Registry<Self>> {
        &PROTH23_REGISTRY
    }
}

// Device selection

/// Selects the device used by the calling thread for every field, like
/// [`set_device`](crate::layouts::set_device). `kind` is the registry key
/// (`"CPU"`, `"CPU_PAR"`, ...). The kind is not required to be registered;
/// calls on an unknown device fail with `BACKEND_NOT_FOUND`.
///
/// # Safety
///
/// `kind` must be null or point to a NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nttkit_set_device(kind: *const c_char, id: u32) -> ErrorCode {
    unsafe { entry::set_device_from_c(kind, id) }.into()
}

/// Reverts the calling thread to the process default device.
#[unsafe(no_mangle)]
pub extern "C" fn nttkit_reset_device() -> ErrorCode {
    reset_device();
    ErrorCode::Success
}

// Goldilocks

/// Transforms `config.batch_size` vectors of `size` elements from `input` into `output`.
///
/// `dir` is `0` (forward) or `1` (inverse); any other value, an unknown
/// ordering or a flag other than `0`/`1` in `config` fails with
/// `INVALID_ARGUMENT`, as do null or misaligned pointers.
///
/// # Safety
///
/// - `config` must point to a readable [`NttConfigAbi`].
/// - `input` must be readable and `output` writable for `size * config.batch_size`
///   elements. Passing the same pointer for both runs the transform in place;
///   any other overlap is rejected.
/// - No other thread may access `output` during the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn goldilocks_ntt(
    input: *const Goldilocks,
    size: u64,
    dir: u32,
    config: *const NttConfigAbi<Goldilocks>,
    output: *mut Goldilocks,
) -> ErrorCode {
    guard::<Goldilocks, _>(|| unsafe { entry::ntt(input, size, dir, config, output) }).into()
}

/// Initializes the domain of the active device from `primitive_root`.
///
/// # Safety
///
/// `primitive_root` and `config` must be readable; their contents are validated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn goldilocks_ntt_init_domain(
    primitive_root: *const Goldilocks,
    config: *const NttInitDomainConfigAbi,
) -> ErrorCode {
    guard::<Goldilocks, _>(|| unsafe { entry::init_domain(primitive_root, config) }).into()
}

/// Releases the domain of the active device. Succeeds if none is active.
#[unsafe(no_mangle)]
pub extern "C" fn goldilocks_ntt_release_domain() -> ErrorCode {
    guard::<Goldilocks, _>(entry::release_domain::<Goldilocks>).into()
}

/// Writes to `out` the primitive root of unity of order `2^ceil(log2(max_size))`.
///
/// # Safety
///
/// `out` must be writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn goldilocks_get_root_of_unity(max_size: u64, out: *mut Goldilocks) -> ErrorCode {
    guard::<Goldilocks, _>(|| unsafe { entry::get_root_of_unity(max_size, out) }).into()
}

/// Writes to `out` the primitive `2^logn`-th root of unity of the active domain.
///
/// # Safety
///
/// `out` must be writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn goldilocks_get_root_of_unity_from_domain(logn: u64, out: *mut Goldilocks) -> ErrorCode {
    guard::<Goldilocks, _>(|| unsafe { entry::get_root_of_unity_from_domain(logn, out) }).into()
}

// BabyBear

/// # Safety
/// Same contract as [`goldilocks_ntt`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn babybear_ntt(
    input: *const BabyBear,
    size: u64,
    dir: u32,
    config: *const NttConfigAbi<BabyBear>,
    output: *mut BabyBear,
) -> ErrorCode {
    guard::<BabyBear, _>(|| unsafe { entry::ntt(input, size, dir, config, output) }).into()
}

/// # Safety
/// Same contract as [`goldilocks_ntt_init_domain`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn babybear_ntt_init_domain(
    primitive_root: *const BabyBear,
    config: *const NttInitDomainConfigAbi,
) -> ErrorCode {
    guard::<BabyBear, _>(|| unsafe { entry::init_domain(primitive_root, config) }).into()
}

#[unsafe(no_mangle)]
pub extern "C" fn babybear_ntt_release_domain() -> ErrorCode {
    guard::<BabyBear, _>(entry::release_domain::<BabyBear>).into()
}

/// # Safety
/// Same contract as [`goldilocks_get_root_of_unity`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn babybear_get_root_of_unity(max_size: u64, out: *mut BabyBear) -> ErrorCode {
    guard::<BabyBear, _>(|| unsafe { entry::get_root_of_unity(max_size, out) }).into()
}

/// # Safety
/// Same contract as [`goldilocks_get_root_of_unity_from_domain`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn babybear_get_root_of_unity_from_domain(logn: u64, out: *mut BabyBear) -> ErrorCode {
    guard::<BabyBear, _>(|| unsafe { entry::get_root_of_unity_from_domain(logn, out) }).into()
}

// Proth23

/// # Safety
/// Same contract as [`goldilocks_ntt`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn proth23_ntt(
    input: *const Proth23,
    size: u64,
    dir: u32,
    config: *const NttConfigAbi<Proth23>,
    output: *mut Proth23,
) -> ErrorCode {
    guard::<Proth23, _>(|| unsafe { entry::ntt(input, size, dir, config, output) }).into()
}

/// # Safety
/// Same contract as [`goldilocks_ntt_init_domain`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn proth23_ntt_init_domain(
    primitive_root: *const Proth23,
    config: *const NttInitDomainConfigAbi,
) -> ErrorCode {
    guard::<Proth23, _>(|| unsafe { entry::init_domain(primitive_root, config) }).into()
}

#[unsafe(no_mangle)]
pub extern "C" fn proth23_ntt_release_domain() -> ErrorCode {
    guard::<Proth23, _>(entry::release_domain::<Proth23>).into()
}

/// # Safety
/// Same contract as [`goldilocks_get_root_of_unity`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn proth23_get_root_of_unity(max_size: u64, out: *mut Proth23) -> ErrorCode {
    guard::<Proth23, _>(|| unsafe { entry::get_root_of_unity(max_size, out) }).into()
}

/// # Safety
/// Same contract as [`goldilocks_get_root_of_unity_from_domain`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn proth23_get_root_of_unity_from_domain(logn: u64, out: *mut Proth23) -> ErrorCode {
    guard::<Proth23, _>(|| unsafe { entry::get_root_of_unity_from_domain(logn, out) }).into()
}
