use std::sync::Once;

use nttkit_backend::{install_cpu_backends, nttkit_load_cpu_backends};
use nttkit_hal::{
    boundary::{
        NttField, NttInitDomainConfigAbi, get_root_of_unity, get_root_of_unity_from_domain, initialize_domain, is_device_available, ntt,
        ntt_inplace, release_domain,
    },
    layouts::{
        BabyBear, Device, ErrorCode, Field, Goldilocks, NttConfig, NttDir, NttInitDomainConfig, NttOrdering, OnExisting,
        Proth23, active_device, set_device,
    },
    source::Source,
};
use parking_lot::{Mutex, MutexGuard};

static SERIAL: Mutex<()> = Mutex::new(());

/// Domains are process-wide, so tests touching them run one at a time.
fn setup(device: &str) -> MutexGuard<'static, ()> {
    static INIT: Once = Once::new();
    INIT.call_once(|| install_cpu_backends().unwrap());
    let guard: MutexGuard<'static, ()> = SERIAL.lock();
    set_device(&Device::new(device, 0));
    guard
}

fn random_vec<F: Field>(seed: u8, n: usize) -> Vec<F> {
    let mut source: Source = Source::new([seed; 32]);
    let mut v: Vec<F> = vec![F::default(); n];
    source.fill_field(&mut v);
    v
}

#[test]
fn proth23_root_of_unity_limits() {
    assert!(get_root_of_unity::<Proth23>(1 << 20).is_ok());
    assert_eq!(get_root_of_unity::<Proth23>((1 << 20) + 1), Err(ErrorCode::InvalidArgument));
    assert_eq!(get_root_of_unity::<Goldilocks>(1 << 33), Err(ErrorCode::InvalidArgument));
}

#[test]
fn domain_operations_require_init() {
    for device in ["CPU", "CPU_PAR"] {
        let _guard = setup(device);
        release_domain::<BabyBear>().unwrap();

        assert_eq!(get_root_of_unity_from_domain::<BabyBear>(0), Err(ErrorCode::UninitializedDomain));
        let mut data: Vec<BabyBear> = random_vec(1, 8);
        assert_eq!(
            ntt_inplace(&mut data, 8, NttDir::Forward, &NttConfig::default()),
            Err(ErrorCode::UninitializedDomain)
        );
    }
}

#[test]
fn release_then_init_replaces_domain() {
    let _guard = setup("CPU");
    release_domain::<Goldilocks>().unwrap();

    let config: NttInitDomainConfig = NttInitDomainConfig::default().with_policy(OnExisting::Error);
    initialize_domain(get_root_of_unity::<Goldilocks>(1 << 4).unwrap(), &config).unwrap();
    assert_eq!(get_root_of_unity_from_domain::<Goldilocks>(5), Err(ErrorCode::InvalidArgument));

    release_domain::<Goldilocks>().unwrap();
    release_domain::<Goldilocks>().unwrap();

    initialize_domain(get_root_of_unity::<Goldilocks>(1 << 9).unwrap(), &config).unwrap();
    for logn in 0..=9u64 {
        assert_eq!(
            get_root_of_unity_from_domain::<Goldilocks>(logn).unwrap(),
            get_root_of_unity::<Goldilocks>(1 << logn).unwrap()
        );
    }
    release_domain::<Goldilocks>().unwrap();
}

fn roundtrip_on_device<F: NttField>(device: &str) -> Vec<F> {
    let _guard = setup(device);
    release_domain::<F>().unwrap();
    initialize_domain(get_root_of_unity::<F>(1 << 10).unwrap(), &NttInitDomainConfig::default()).unwrap();

    let n: usize = 1 << 10;
    let a: Vec<F> = random_vec(2, 2 * n);
    let config: NttConfig<F> = NttConfig::default()
        .with_batch(2, false)
        .with_ordering(NttOrdering::NR)
        .with_coset(F::generator());
    let mut a_fwd: Vec<F> = vec![F::default(); 2 * n];
    ntt(&a, n, NttDir::Forward, &config, &mut a_fwd).unwrap();

    let mut back: Vec<F> = a_fwd.clone();
    ntt_inplace(&mut back, n, NttDir::Inverse, &config.with_ordering(NttOrdering::RN)).unwrap();
    assert_eq!(back, a);

    release_domain::<F>().unwrap();
    a_fwd
}

#[test]
fn devices_agree_through_the_boundary() {
    assert_eq!(roundtrip_on_device::<Goldilocks>("CPU"), roundtrip_on_device::<Goldilocks>("CPU_PAR"));
    assert_eq!(roundtrip_on_device::<BabyBear>("CPU"), roundtrip_on_device::<BabyBear>("CPU_PAR"));
    assert_eq!(roundtrip_on_device::<Proth23>("CPU"), roundtrip_on_device::<Proth23>("CPU_PAR"));
}

#[test]
fn unknown_device() {
    let _guard = setup("GPU");
    assert!(!is_device_available::<Goldilocks>(&active_device()));
    assert!(is_device_available::<Goldilocks>(&Device::new("CPU_PAR", 0)));
    assert_eq!(
        initialize_domain(Goldilocks::omega(3).unwrap(), &NttInitDomainConfig::default()),
        Err(ErrorCode::BackendNotFound)
    );
    assert_eq!(release_domain::<Goldilocks>(), Err(ErrorCode::BackendNotFound));
    // The oracle does not depend on any backend.
    assert!(get_root_of_unity::<Goldilocks>(8).is_ok());
}

#[test]
fn entry_points_table() {
    let _guard = setup("CPU");
    let entry = Proth23::ENTRY_POINTS;
    let mut root: Proth23 = Proth23::default();
    assert_eq!(unsafe { (entry.get_root_of_unity)(1 << 6, &mut root) }, ErrorCode::Success);
    assert_eq!(root, Proth23::omega(6).unwrap());

    assert_eq!((entry.release_domain)(), ErrorCode::Success);
    // A zeroed config takes the full order of the root.
    let config: NttInitDomainConfigAbi = NttInitDomainConfigAbi::default();
    assert_eq!(unsafe { (entry.init_domain)(&root, &config) }, ErrorCode::Success);

    let mut out: Proth23 = Proth23::default();
    assert_eq!(unsafe { (entry.get_root_of_unity_from_domain)(6, &mut out) }, ErrorCode::Success);
    assert_eq!(out, root);
    assert_eq!(
        unsafe { (entry.get_root_of_unity_from_domain)(7, &mut out) },
        ErrorCode::InvalidArgument
    );
    assert_eq!((entry.release_domain)(), ErrorCode::Success);

    // An explicit order log of zero builds the trivial domain.
    let trivial: NttInitDomainConfigAbi = NttInitDomainConfigAbi {
        has_max_log_size: 1,
        ..Default::default()
    };
    assert_eq!(unsafe { (entry.init_domain)(&root, &trivial) }, ErrorCode::Success);
    assert_eq!(unsafe { (entry.get_root_of_unity_from_domain)(0, &mut out) }, ErrorCode::Success);
    assert_eq!(out, Proth23::from_u64(1));
    assert_eq!(
        unsafe { (entry.get_root_of_unity_from_domain)(1, &mut out) },
        ErrorCode::InvalidArgument
    );
    assert_eq!((entry.release_domain)(), ErrorCode::Success);
}

#[test]
fn backends_load_once() {
    let _guard = setup("CPU");
    assert_eq!(nttkit_load_cpu_backends(), ErrorCode::InvalidArgument);
    assert!(is_device_available::<BabyBear>(&Device::new("CPU_PAR", 0)));
}
