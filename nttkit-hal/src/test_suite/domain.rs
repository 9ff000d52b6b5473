use crate::{
    api::{Ntt, NttInitDomain, NttReleaseDomain, NttRouFromDomain},
    layouts::{Backend, Field, Module, NttBuffers, NttConfig, NttDir, NttError, NttInitDomainConfig, OnExisting},
    reference::rou::root_of_unity,
    source::Source,
    test_suite::ntt::init_oracle_domain,
};

fn is_invalid<T>(res: Result<T, NttError>) -> bool {
    matches!(res, Err(NttError::InvalidArgument(_)))
}

fn is_uninitialized<T>(res: Result<T, NttError>) -> bool {
    matches!(res, Err(NttError::UninitializedDomain { .. }))
}

pub fn test_domain_uninitialized<B: Backend, F: Field>(module: &Module<B, F>)
where
    Module<B, F>: Ntt<F> + NttReleaseDomain<F> + NttRouFromDomain<F>,
{
    let mut data: Vec<F> = vec![F::default(); 4];
    assert!(is_uninitialized(module.ntt(
        NttBuffers::InPlace(&mut data),
        4,
        NttDir::Forward,
        &NttConfig::default()
    )));
    assert!(is_uninitialized(module.ntt_rou_from_domain(0)));
    // Releasing nothing is not an error.
    module.ntt_release_domain().unwrap();
    module.ntt_release_domain().unwrap();
}

pub fn test_domain_rou_matches_oracle<B: Backend, F: Field>(module: &Module<B, F>)
where
    Module<B, F>: NttInitDomain<F> + NttRouFromDomain<F>,
{
    let max_log: u32 = 10;
    init_oracle_domain(module, max_log);
    for logn in 0..=max_log as u64 {
        assert_eq!(
            module.ntt_rou_from_domain(logn).unwrap(),
            root_of_unity::<F>(1 << logn).unwrap(),
            "logn={logn}"
        );
    }
    assert!(is_invalid(module.ntt_rou_from_domain(max_log as u64 + 1)));
}

pub fn test_domain_reuse_policy<B: Backend, F: Field>(module: &Module<B, F>)
where
    Module<B, F>: Ntt<F> + NttInitDomain<F> + NttRouFromDomain<F>,
{
    init_oracle_domain(module, 4);
    // A larger root under the default policy keeps the first domain.
    init_oracle_domain(module, 6);
    assert!(module.ntt_rou_from_domain(4).is_ok());
    assert!(is_invalid(module.ntt_rou_from_domain(5)));

    let config: NttConfig<F> = NttConfig::default();
    let mut data: Vec<F> = vec![F::default(); 32];
    module.ntt(NttBuffers::InPlace(&mut data[..16]), 16, NttDir::Forward, &config).unwrap();
    assert!(is_invalid(module.ntt(NttBuffers::InPlace(&mut data), 32, NttDir::Forward, &config)));
}

pub fn test_domain_error_policy<B: Backend, F: Field>(module: &Module<B, F>)
where
    Module<B, F>: NttInitDomain<F> + NttRouFromDomain<F>,
{
    let config: NttInitDomainConfig = NttInitDomainConfig::default().with_policy(OnExisting::Error);
    let root: F = root_of_unity(1 << 4).unwrap();
    module.ntt_init_domain(root, &config).unwrap();
    assert!(is_invalid(module.ntt_init_domain(root, &config)));
    assert_eq!(module.ntt_rou_from_domain(4).unwrap(), root);
}

pub fn test_domain_replace_policy<B: Backend, F: Field>(module: &Module<B, F>)
where
    Module<B, F>: Ntt<F> + NttInitDomain<F> + NttRouFromDomain<F>,
{
    let config: NttInitDomainConfig = NttInitDomainConfig::default().with_policy(OnExisting::Replace);
    module.ntt_init_domain(root_of_unity(1 << 6).unwrap(), &config).unwrap();
    module.ntt_init_domain(root_of_unity(1 << 3).unwrap(), &config).unwrap();
    assert!(is_invalid(module.ntt_rou_from_domain(4)));

    let mut data: Vec<F> = vec![F::default(); 16];
    assert!(is_invalid(module.ntt(
        NttBuffers::InPlace(&mut data),
        16,
        NttDir::Forward,
        &NttConfig::default()
    )));
}

pub fn test_domain_release_reinit<B: Backend, F: Field>(module: &Module<B, F>)
where
    Module<B, F>: Ntt<F> + NttInitDomain<F> + NttReleaseDomain<F> + NttRouFromDomain<F>,
{
    init_oracle_domain(module, 3);
    module.ntt_release_domain().unwrap();
    assert!(is_uninitialized(module.ntt_rou_from_domain(0)));

    // The second domain is built from a root of a different order and fully
    // replaces the first one.
    init_oracle_domain(module, 7);
    assert_eq!(module.ntt_rou_from_domain(7).unwrap(), root_of_unity::<F>(1 << 7).unwrap());

    let mut source: Source = Source::new([7u8; 32]);
    let mut data: Vec<F> = vec![F::default(); 1 << 7];
    source.fill_field(&mut data);
    let orig: Vec<F> = data.clone();
    let config: NttConfig<F> = NttConfig::default();
    module.ntt(NttBuffers::InPlace(&mut data), 1 << 7, NttDir::Forward, &config).unwrap();
    module.ntt(NttBuffers::InPlace(&mut data), 1 << 7, NttDir::Inverse, &config).unwrap();
    assert_eq!(data, orig);
}

pub fn test_domain_rejects_bad_roots<B: Backend, F: Field>(module: &Module<B, F>)
where
    Module<B, F>: NttInitDomain<F> + NttRouFromDomain<F>,
{
    let config: NttInitDomainConfig = NttInitDomainConfig::default();
    // The multiplicative generator has order p - 1, never a power of two for these fields.
    assert!(is_invalid(module.ntt_init_domain(F::generator(), &config)));
    assert!(is_invalid(module.ntt_init_domain(F::default(), &config)));

    let root: F = root_of_unity(1 << 5).unwrap();
    assert!(is_invalid(module.ntt_init_domain(root, &config.with_max_log_size(6))));
    assert!(is_uninitialized(module.ntt_rou_from_domain(0)));
}

pub fn test_domain_max_log_restriction<B: Backend, F: Field>(module: &Module<B, F>)
where
    Module<B, F>: NttInitDomain<F> + NttRouFromDomain<F>,
{
    let root: F = root_of_unity(1 << 8).unwrap();
    module
        .ntt_init_domain(root, &NttInitDomainConfig::default().with_max_log_size(5))
        .unwrap();
    assert_eq!(module.ntt_rou_from_domain(5).unwrap(), root_of_unity::<F>(1 << 5).unwrap());
    assert!(is_invalid(module.ntt_rou_from_domain(6)));

    // An explicit order log of zero is honored, not read as "full order".
    let replace: NttInitDomainConfig = NttInitDomainConfig::default()
        .with_policy(OnExisting::Replace)
        .with_max_log_size(0);
    module.ntt_init_domain(root, &replace).unwrap();
    assert_eq!(module.ntt_rou_from_domain(0).unwrap(), F::one());
    assert!(is_invalid(module.ntt_rou_from_domain(1)));
}
