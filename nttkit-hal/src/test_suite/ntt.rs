
use crate::{
    api::{Ntt, NttInitDomain},
    layouts::{Backend, Field, Module, NttBuffers, NttConfig, NttDir, NttError, NttInitDomainConfig, NttOrdering},
    reference::{
        ntt::{bit_reverse_permute, dft_naive, mul_powers},
        rou::root_of_unity,
    },
    source::Source,
};

/// Domain order used by the generic transform tests.
pub const TEST_LOG: u32 = 8;

pub(crate) fn init_oracle_domain<B: Backend, F: Field>(module: &Module<B, F>, log: u32)
where
    Module<B, F>: NttInitDomain<F>,
{
    let root: F = root_of_unity(1 << log).unwrap();
    module.ntt_init_domain(root, &NttInitDomainConfig::default()).unwrap();
}

fn forward<B: Backend, F: Field>(module: &Module<B, F>, a: &[F], config: &NttConfig<F>) -> Vec<F>
where
    Module<B, F>: Ntt<F>,
{
    let n: usize = a.len() / config.batch_size as usize;
    let mut res: Vec<F> = vec![F::zero(); a.len()];
    module
        .ntt(NttBuffers::OutOfPlace { input: a, output: &mut res }, n, NttDir::Forward, config)
        .unwrap();
    res
}

fn inverse<B: Backend, F: Field>(module: &Module<B, F>, a: &[F], config: &NttConfig<F>) -> Vec<F>
where
    Module<B, F>: Ntt<F>,
{
    let n: usize = a.len() / config.batch_size as usize;
    let mut res: Vec<F> = a.to_vec();
    module
        .ntt(NttBuffers::InPlace(&mut res), n, NttDir::Inverse, config)
        .unwrap();
    res
}

fn random_vec<F: Field>(source: &mut Source, n: usize) -> Vec<F> {
    let mut v: Vec<F> = vec![F::zero(); n];
    source.fill_field(&mut v);
    v
}

pub fn test_ntt_roundtrip<B: Backend, F: Field>(module: &Module<B, F>)
where
    Module<B, F>: Ntt<F> + NttInitDomain<F>,
{
    init_oracle_domain(module, TEST_LOG);
    let mut source: Source = Source::new([0u8; 32]);
    let config: NttConfig<F> = NttConfig::default();

    for log_n in 0..=TEST_LOG {
        let a: Vec<F> = random_vec(&mut source, 1 << log_n);
        let a_fwd: Vec<F> = forward(module, &a, &config);
        assert_eq!(inverse(module, &a_fwd, &config), a, "log_n={log_n}");
    }
}

pub fn test_ntt_matches_naive<B: Backend, F: Field>(module: &Module<B, F>)
where
    Module<B, F>: Ntt<F> + NttInitDomain<F>,
{
    init_oracle_domain(module, TEST_LOG);
    let mut source: Source = Source::new([1u8; 32]);
    let config: NttConfig<F> = NttConfig::default();

    for log_n in 0..=6u32 {
        let n: usize = 1 << log_n;
        let omega: F = root_of_unity(n as u64).unwrap();
        let a: Vec<F> = random_vec(&mut source, n);
        assert_eq!(forward(module, &a, &config), dft_naive(&a, omega), "log_n={log_n}");

        let omega_inv: F = omega.inv().unwrap();
        let n_inv: F = F::from_u64(n as u64).inv().unwrap();
        let expected: Vec<F> = dft_naive(&a, omega_inv).into_iter().map(|x| x * n_inv).collect();
        assert_eq!(inverse(module, &a, &config), expected, "log_n={log_n}");
    }
}

pub fn test_ntt_orderings<B: Backend, F: Field>(module: &Module<B, F>)
where
    Module<B, F>: Ntt<F> + NttInitDomain<F>,
{
    init_oracle_domain(module, TEST_LOG);
    let mut source: Source = Source::new([2u8; 32]);
    let n: usize = 1 << 5;
    let a: Vec<F> = random_vec(&mut source, n);
    let a_fwd: Vec<F> = forward(module, &a, &NttConfig::default());

    for ordering in [NttOrdering::NN, NttOrdering::NR, NttOrdering::RN, NttOrdering::RR] {
        let config: NttConfig<F> = NttConfig::default().with_ordering(ordering);

        let mut input: Vec<F> = a.clone();
        if ordering.input_reversed() {
            bit_reverse_permute(&mut input);
        }
        let mut expected: Vec<F> = a_fwd.clone();
        if ordering.output_reversed() {
            bit_reverse_permute(&mut expected);
        }
        assert_eq!(forward(module, &input, &config), expected, "{ordering:?}");

        let mut back_in: Vec<F> = a_fwd.clone();
        if ordering.input_reversed() {
            bit_reverse_permute(&mut back_in);
        }
        let mut back_expected: Vec<F> = a.clone();
        if ordering.output_reversed() {
            bit_reverse_permute(&mut back_expected);
        }
        assert_eq!(inverse(module, &back_in, &config), back_expected, "{ordering:?}");
    }
}

pub fn test_ntt_coset<B: Backend, F: Field>(module: &Module<B, F>)
where
    Module<B, F>: Ntt<F> + NttInitDomain<F>,
{
    init_oracle_domain(module, TEST_LOG);
    let mut source: Source = Source::new([3u8; 32]);
    let n: usize = 1 << 6;
    let coset: F = F::generator();
    let config: NttConfig<F> = NttConfig::default().with_coset(coset);

    let a: Vec<F> = random_vec(&mut source, n);
    let mut shifted: Vec<F> = a.clone();
    mul_powers(&mut shifted, coset);

    let a_fwd: Vec<F> = forward(module, &a, &config);
    assert_eq!(a_fwd, dft_naive(&shifted, root_of_unity(n as u64).unwrap()));
    assert_eq!(inverse(module, &a_fwd, &config), a);
}

pub fn test_ntt_scale<B: Backend, F: Field>(module: &Module<B, F>)
where
    Module<B, F>: Ntt<F> + NttInitDomain<F>,
{
    init_oracle_domain(module, TEST_LOG);
    let mut source: Source = Source::new([4u8; 32]);
    let n: usize = 1 << 4;
    let scale: F = source.next_field_nonzero();
    let a: Vec<F> = random_vec(&mut source, n);

    let plain: Vec<F> = forward(module, &a, &NttConfig::default());
    let scaled: Vec<F> = forward(module, &a, &NttConfig::default().with_scale(scale));
    for (p, s) in plain.iter().zip(scaled.iter()) {
        assert_eq!(*p * scale, *s);
    }
}

pub fn test_ntt_batch<B: Backend, F: Field>(module: &Module<B, F>)
where
    Module<B, F>: Ntt<F> + NttInitDomain<F>,
{
    init_oracle_domain(module, TEST_LOG);
    let mut source: Source = Source::new([5u8; 32]);
    let n: usize = 1 << 5;
    let batch: usize = 3;
    let single: NttConfig<F> = NttConfig::default();

    // Rows: vectors stored one after the other.
    let rows: Vec<F> = random_vec(&mut source, n * batch);
    let rows_fwd: Vec<F> = forward(module, &rows, &single.with_batch(batch as u32, false));
    for (vec, vec_fwd) in rows.chunks_exact(n).zip(rows_fwd.chunks_exact(n)) {
        assert_eq!(forward(module, vec, &single), vec_fwd);
    }

    // Columns: element i of vector j at i * batch + j.
    let columns: Vec<F> = random_vec(&mut source, n * batch);
    let columns_config: NttConfig<F> = single.with_batch(batch as u32, true);
    let columns_fwd: Vec<F> = forward(module, &columns, &columns_config);
    for j in 0..batch {
        let col: Vec<F> = columns.iter().skip(j).step_by(batch).copied().collect();
        let col_fwd: Vec<F> = columns_fwd.iter().skip(j).step_by(batch).copied().collect();
        assert_eq!(forward(module, &col, &single), col_fwd, "column {j}");
    }
    assert_eq!(inverse(module, &columns_fwd, &columns_config), columns);
}

pub fn test_ntt_inplace<B: Backend, F: Field>(module: &Module<B, F>)
where
    Module<B, F>: Ntt<F> + NttInitDomain<F>,
{
    init_oracle_domain(module, TEST_LOG);
    let mut source: Source = Source::new([6u8; 32]);
    let n: usize = 1 << TEST_LOG;
    let config: NttConfig<F> = NttConfig::default().with_coset(F::generator());
    let a: Vec<F> = random_vec(&mut source, n);

    let out_of_place: Vec<F> = forward(module, &a, &config);
    let mut data: Vec<F> = a.clone();
    let res = module.ntt(NttBuffers::InPlace(&mut data), n, NttDir::Forward, &config);
    if B::SUPPORTS_INPLACE {
        res.unwrap();
        assert_eq!(data, out_of_place);
    } else {
        assert!(matches!(res, Err(NttError::InvalidArgument(_))));
    }
}

pub fn test_ntt_rejects_bad_arguments<B: Backend, F: Field>(module: &Module<B, F>)
where
    Module<B, F>: Ntt<F> + NttInitDomain<F>,
{
    init_oracle_domain(module, 4);
    let a: Vec<F> = vec![F::one(); 64];
    let mut res: Vec<F> = vec![F::zero(); 64];
    let config: NttConfig<F> = NttConfig::default();

    let mut call = |len: usize, size: usize, config: &NttConfig<F>| {
        module.ntt(
            NttBuffers::OutOfPlace {
                input: &a[..len],
                output: &mut res[..len],
            },
            size,
            NttDir::Forward,
            config,
        )
    };

    // Mixed radix.
    assert!(matches!(call(12, 12, &config), Err(NttError::InvalidArgument(_))));
    // Larger than the domain.
    assert!(matches!(call(32, 32, &config), Err(NttError::InvalidArgument(_))));
    // Length mismatch.
    assert!(matches!(call(16, 8, &config), Err(NttError::InvalidArgument(_))));
    assert!(matches!(
        call(16, 16, &config.with_batch(0, false)),
        Err(NttError::InvalidArgument(_))
    ));
    assert!(matches!(
        call(16, 16, &config.with_coset(F::zero())),
        Err(NttError::InvalidArgument(_))
    ));
    assert!(call(16, 16, &config).is_ok());
    assert!(call(32, 16, &config.with_batch(2, true)).is_ok());
}
