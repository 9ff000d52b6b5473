use itertools::iproduct;

use crate::{
    api::{Ntt, NttInitDomain},
    layouts::{Backend, Field, Module, NttBuffers, NttConfig, NttDir, NttOrdering},
    source::Source,
    test_suite::ntt::{TEST_LOG, init_oracle_domain},
};

/// Runs both backends on the same inputs over a grid of configurations and
/// requires identical outputs.
pub fn test_ntt_cross_backend<BR: Backend, BT: Backend, F: Field>(module_ref: &Module<BR, F>, module_test: &Module<BT, F>)
where
    Module<BR, F>: Ntt<F> + NttInitDomain<F>,
    Module<BT, F>: Ntt<F> + NttInitDomain<F>,
{
    init_oracle_domain(module_ref, TEST_LOG);
    init_oracle_domain(module_test, TEST_LOG);

    let mut source: Source = Source::new([8u8; 32]);
    let coset: F = source.next_field_nonzero();
    let scale: F = source.next_field_nonzero();

    let orderings: [NttOrdering; 4] = [NttOrdering::NN, NttOrdering::NR, NttOrdering::RN, NttOrdering::RR];
    let batches: [(u32, bool); 3] = [(1, false), (4, false), (4, true)];

    for (log_n, (batch, columns), ordering, dir) in iproduct!(
        [0u32, 1, 3, TEST_LOG],
        batches,
        orderings,
        [NttDir::Forward, NttDir::Inverse]
    ) {
        let n: usize = 1 << log_n;
        let config: NttConfig<F> = NttConfig::default()
            .with_batch(batch, columns)
            .with_ordering(ordering)
            .with_coset(coset)
            .with_scale(scale);

        let mut a: Vec<F> = vec![F::default(); n * batch as usize];
        source.fill_field(&mut a);
        let mut res_ref: Vec<F> = vec![F::default(); a.len()];
        let mut res_test: Vec<F> = vec![F::default(); a.len()];

        module_ref
            .ntt(NttBuffers::OutOfPlace { input: &a, output: &mut res_ref }, n, dir, &config)
            .unwrap();
        module_test
            .ntt(NttBuffers::OutOfPlace { input: &a, output: &mut res_test }, n, dir, &config)
            .unwrap();

        assert_eq!(res_ref, res_test, "n={n} batch={batch} columns={columns} {ordering:?} {dir:?}");
    }
}
