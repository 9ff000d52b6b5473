use std::sync::Arc;

use nttkit_hal::{
    layouts::{Domain, Field, Module, NttBuffers, NttConfig, NttDir, NttError, NttInitDomainConfig, NttOrdering, NttResult},
    oep::{NttImpl, NttInitDomainImpl, NttReleaseDomainImpl, NttRouFromDomainImpl},
    reference::{
        domain::{alloc_elements, domain_new},
        ntt::{
            NttScalars, butterfly, gather_column, ntt_dit_level, ntt_epilogue, ntt_prologue, ntt_vec, scatter_column,
            twiddles_for,
        },
    },
};
use rayon::prelude::*;

use crate::CpuPar;

/// Butterfly pairs handed to one rayon task when a level is split inside a block.
const MIN_PAIRS_PER_TASK: usize = 1 << 9;

/// One butterfly level with the pairs of the block split across tasks.
fn ntt_dit_level_par<F: Field>(block: &mut [F], twiddles: &[F], stride: usize) {
    let half: usize = block.len() >> 1;
    let (lo, hi) = block.split_at_mut(half);
    lo.par_iter_mut()
        .zip(hi.par_iter_mut())
        .enumerate()
        .with_min_len(MIN_PAIRS_PER_TASK)
        .for_each(|(j, (u, v))| butterfly(u, v, twiddles[j * stride]));
}

fn ntt_vec_par<F: Field>(
    domain: &Domain<F>,
    data: &mut [F],
    dir: NttDir,
    ordering: NttOrdering,
    scalars: &NttScalars<F>,
    min_parallel_log: u32,
) {
    let log_n: u32 = data.len().trailing_zeros();
    if log_n < min_parallel_log {
        ntt_vec(domain, data, dir, ordering, scalars);
        return;
    }

    ntt_prologue(data, dir, ordering, scalars);

    let twiddles: &[F] = twiddles_for(domain, dir);
    let threads: usize = rayon::current_num_threads();
    for log_span in 1..=log_n {
        let stride: usize = domain.twiddle_stride(log_span);
        let blocks: usize = data.len() >> log_span;
        if blocks >= threads {
            data.par_chunks_exact_mut(1 << log_span)
                .for_each(|block| ntt_dit_level(block, twiddles, stride));
        } else {
            data.chunks_exact_mut(1 << log_span)
                .for_each(|block| ntt_dit_level_par(block, twiddles, stride));
        }
    }

    ntt_epilogue(data, dir, ordering, scalars);
}

pub(crate) fn ntt_par<F: Field>(
    domain: &Domain<F>,
    buffers: NttBuffers<'_, F>,
    size: usize,
    dir: NttDir,
    config: &NttConfig<F>,
    min_parallel_log: u32,
) -> NttResult<()> {
    let scalars: NttScalars<F> = NttScalars::new(size, config)?;
    let batch: usize = config.batch_size as usize;
    let data: &mut [F] = buffers.into_working();

    if config.columns_batch && batch > 1 {
        let src: &[F] = data;
        let columns: Vec<Vec<F>> = (0..batch)
            .into_par_iter()
            .map(|col| -> NttResult<Vec<F>> {
                let mut column: Vec<F> = alloc_elements(size)?;
                gather_column(src, batch, col, &mut column);
                ntt_vec_par(domain, &mut column, dir, config.ordering, &scalars, min_parallel_log);
                Ok(column)
            })
            .collect::<NttResult<Vec<Vec<F>>>>()?;
        for (col, column) in columns.iter().enumerate() {
            scatter_column(column, batch, col, data);
        }
    } else {
        data.par_chunks_exact_mut(size)
            .for_each(|vec| ntt_vec_par(domain, vec, dir, config.ordering, &scalars, min_parallel_log));
    }
    Ok(())
}

unsafe impl<F: Field> NttImpl<Self, F> for CpuPar {
    fn ntt_impl(
        module: &Module<Self, F>,
        domain: &Domain<F>,
        buffers: NttBuffers<'_, F>,
        size: usize,
        dir: NttDir,
        config: &NttConfig<F>,
    ) -> NttResult<()> {
        ntt_par(domain, buffers, size, dir, config, module.handle().min_parallel_log())
    }
}

unsafe impl<F: Field> NttInitDomainImpl<Self, F> for CpuPar {
    fn ntt_init_domain_impl(
        _module: &Module<Self, F>,
        root: F,
        max_log: u32,
        _config: &NttInitDomainConfig,
    ) -> NttResult<Domain<F>> {
        domain_new(root, max_log)
    }
}

unsafe impl<F: Field> NttReleaseDomainImpl<Self, F> for CpuPar {
    fn ntt_release_domain_impl(_module: &Module<Self, F>, domain: Arc<Domain<F>>) -> NttResult<()> {
        drop(domain);
        Ok(())
    }
}

unsafe impl<F: Field> NttRouFromDomainImpl<Self, F> for CpuPar {
    fn ntt_rou_from_domain_impl(_module: &Module<Self, F>, domain: &Domain<F>, logn: u64) -> NttResult<F> {
        domain
            .root_of_order(logn)
            .ok_or_else(|| NttError::invalid(format!("logn {logn} exceeds domain order 2^{}", domain.max_log())))
    }
}
