use std::{
    sync::Barrier,
    thread,
    time::Duration,
};

use nttkit_backend::{CpuPar, CpuRef};
use nttkit_hal::{
    api::{ModuleNew, Ntt, NttInitDomain, NttReleaseDomain, NttRouFromDomain},
    layouts::{BabyBear, Goldilocks, Module, NttBuffers, NttConfig, NttDir, NttError, NttInitDomainConfig, OnExisting},
    reference::{ntt::dft_naive, rou::root_of_unity},
    source::Source,
};
use rand::Rng;

const THREADS: usize = 8;

fn jitter() {
    thread::sleep(Duration::from_micros(rand::rng().random_range(0..200)));
}

#[test]
fn racing_inits_under_error_policy_have_one_winner() {
    let module: Module<CpuRef, Goldilocks> = Module::new();
    let barrier: Barrier = Barrier::new(THREADS);
    let config: NttInitDomainConfig = NttInitDomainConfig::default().with_policy(OnExisting::Error);

    let results: Vec<Result<(), NttError>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let (module, barrier, config) = (&module, &barrier, &config);
                s.spawn(move || {
                    let root: Goldilocks = root_of_unity(1 << (4 + i)).unwrap();
                    barrier.wait();
                    jitter();
                    module.ntt_init_domain(root, config)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| matches!(r, Err(NttError::InvalidArgument(_))))
    );

    // The winner's domain is fully installed.
    let winner: usize = results.iter().position(|r| r.is_ok()).unwrap();
    let max_log: u64 = 4 + winner as u64;
    assert!(module.ntt_rou_from_domain(max_log).is_ok());
    assert!(module.ntt_rou_from_domain(max_log + 1).is_err());
}

#[test]
fn racing_inits_under_reuse_policy_keep_one_domain() {
    let module: Module<CpuPar, Goldilocks> = Module::new();
    let barrier: Barrier = Barrier::new(THREADS);

    thread::scope(|s| {
        for i in 0..THREADS {
            let (module, barrier) = (&module, &barrier);
            s.spawn(move || {
                let root: Goldilocks = root_of_unity(1 << (4 + i)).unwrap();
                barrier.wait();
                jitter();
                module.ntt_init_domain(root, &NttInitDomainConfig::default()).unwrap();
            });
        }
    });

    let max_log: u64 = (4..4 + THREADS as u64)
        .filter(|l| module.ntt_rou_from_domain(*l).is_ok())
        .max()
        .unwrap();
    assert_eq!(module.ntt_rou_from_domain(max_log).unwrap(), root_of_unity(1 << max_log).unwrap());
}

#[test]
fn transforms_keep_their_domain_across_release() {
    let module: Module<CpuRef, Goldilocks> = Module::new();
    let n: usize = 1 << 12;
    module
        .ntt_init_domain(root_of_unity(n as u64).unwrap(), &NttInitDomainConfig::default())
        .unwrap();

    let mut source: Source = Source::new([5u8; 32]);
    let mut a: Vec<Goldilocks> = vec![Goldilocks::default(); n];
    source.fill_field(&mut a);
    let mut expected: Vec<Goldilocks> = vec![Goldilocks::default(); n];
    module
        .ntt(NttBuffers::OutOfPlace { input: &a, output: &mut expected }, n, NttDir::Forward, &NttConfig::default())
        .unwrap();

    thread::scope(|s| {
        for _ in 0..THREADS {
            let (module, a, expected) = (&module, &a, &expected);
            s.spawn(move || {
                let mut res: Vec<Goldilocks> = vec![Goldilocks::default(); n];
                match module.ntt(NttBuffers::OutOfPlace { input: a, output: &mut res }, n, NttDir::Forward, &NttConfig::default()) {
                    Ok(()) => assert_eq!(&res, expected),
                    Err(err) => assert!(matches!(err, NttError::UninitializedDomain { .. })),
                }
            });
        }
        s.spawn(|| {
            jitter();
            module.ntt_release_domain().unwrap();
        });
    });

    assert!(matches!(module.ntt_rou_from_domain(0), Err(NttError::UninitializedDomain { .. })));
}

#[test]
fn racing_inits_under_replace_policy_leave_a_consistent_domain() {
    let module: Module<CpuPar, BabyBear> = Module::new();
    let barrier: Barrier = Barrier::new(THREADS);
    let config: NttInitDomainConfig = NttInitDomainConfig::default().with_policy(OnExisting::Replace);
    let mut source: Source = Source::new([3u8; 32]);
    let sources: Vec<Source> = (0..THREADS).map(|_| source.branch().1).collect();

    thread::scope(|s| {
        for (i, mut source) in sources.into_iter().enumerate() {
            let (module, barrier, config) = (&module, &barrier, &config);
            s.spawn(move || {
                let root: BabyBear = root_of_unity(1 << (4 + i)).unwrap();
                barrier.wait();
                jitter();
                module.ntt_init_domain(root, config).unwrap();

                // Every competing domain contains the order-16 subgroup.
                let mut a: Vec<BabyBear> = vec![BabyBear::default(); 16];
                source.fill_field(&mut a);
                let mut res: Vec<BabyBear> = vec![BabyBear::default(); 16];
                module
                    .ntt(NttBuffers::OutOfPlace { input: &a, output: &mut res }, 16, NttDir::Forward, &NttConfig::default())
                    .unwrap();
                assert_eq!(res, dft_naive(&a, root_of_unity(16).unwrap()));
            });
        }
    });

    // One of the competing domains survived whole: roots, twiddles and inverse twiddles agree.
    let max_log: u64 = (4..4 + THREADS as u64)
        .filter(|l| module.ntt_rou_from_domain(*l).is_ok())
        .max()
        .unwrap();
    for l in 0..=max_log {
        assert_eq!(module.ntt_rou_from_domain(l).unwrap(), root_of_unity(1 << l).unwrap());
    }

    let n: usize = 1 << max_log;
    let mut a: Vec<BabyBear> = vec![BabyBear::default(); n];
    source.fill_field(&mut a);
    let mut res: Vec<BabyBear> = a.clone();
    module.ntt(NttBuffers::InPlace(&mut res), n, NttDir::Forward, &NttConfig::default()).unwrap();
    assert_eq!(res, dft_naive(&a, root_of_unity(n as u64).unwrap()));
    module.ntt(NttBuffers::InPlace(&mut res), n, NttDir::Inverse, &NttConfig::default()).unwrap();
    assert_eq!(res, a);
}

#[test]
fn init_racing_release_ends_in_one_of_two_states() {
    let module: Module<CpuRef, Goldilocks> = Module::new();
    let root: Goldilocks = root_of_unity(1 << 6).unwrap();
    let barrier: Barrier = Barrier::new(2);

    for _ in 0..32 {
        module.ntt_release_domain().unwrap();
        thread::scope(|s| {
            s.spawn(|| {
                barrier.wait();
                jitter();
                module.ntt_init_domain(root, &NttInitDomainConfig::default()).unwrap();
            });
            s.spawn(|| {
                barrier.wait();
                jitter();
                module.ntt_release_domain().unwrap();
            });
        });

        // Either the release came last and nothing is active, or the domain is the one just built.
        match module.ntt_rou_from_domain(6) {
            Ok(r) => {
                assert_eq!(r, root);
                assert!(module.ntt_rou_from_domain(7).is_err());
            }
            Err(err) => assert!(matches!(err, NttError::UninitializedDomain { .. })),
        }
    }
}
