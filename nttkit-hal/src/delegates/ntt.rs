
use crate::{
    api::{Ntt, NttInitDomain, NttReleaseDomain, NttRouFromDomain},
    layouts::{
        Backend, Domain, DomainInstall, Field, Module, NttBuffers, NttConfig, NttDir, NttError, NttInitDomainConfig,
        NttResult, OnExisting,
    },
    oep::{NttImpl, NttInitDomainImpl, NttReleaseDomainImpl, NttRouFromDomainImpl},
    reference::domain::domain_generator,
};

/// Argument checks that do not depend on the active domain.
fn check_ntt_args<B: Backend, F: Field>(buffers: &NttBuffers<'_, F>, size: usize, config: &NttConfig<F>) -> NttResult<()> {
    if !size.is_power_of_two() {
        return Err(NttError::invalid(format!(
            "transform size {size} is not a power of two (mixed radix is not supported)"
        )));
    }
    if config.batch_size == 0 {
        return Err(NttError::invalid("batch_size must be at least 1"));
    }
    if config.coset_gen.is_zero() {
        return Err(NttError::invalid("coset generator must be nonzero"));
    }
    let total: usize = size
        .checked_mul(config.batch_size as usize)
        .ok_or_else(|| NttError::invalid(format!("size {size} x batch {} overflows", config.batch_size)))?;
    if buffers.input_len() != total || buffers.output_len() != total {
        return Err(NttError::invalid(format!(
            "buffers hold {} input and {} output elements, expected {total}",
            buffers.input_len(),
            buffers.output_len()
        )));
    }
    if buffers.is_inplace() && !B::SUPPORTS_INPLACE {
        return Err(NttError::invalid(format!("backend {} does not support in-place transforms", B::NAME)));
    }
    Ok(())
}

fn already_initialized<B: Backend, F: Field>() -> NttError {
    NttError::invalid(format!(
        "a {} domain is already initialized on backend {} and the policy forbids re-initialization",
        F::NAME,
        B::NAME
    ))
}

/// Logs a kept domain, warning when it is smaller than the one requested so
/// that later size errors can be traced back to the reuse.
fn log_reused<B: Backend, F: Field>(module: &Module<B, F>, requested_log: Option<u32>) {
    match (module.domain_slot().active(), requested_log) {
        (Some(active), Some(requested)) if requested > active.max_log() => {
            tracing::warn!(
                target: "nttkit",
                backend = B::NAME,
                field = F::NAME,
                requested_log = requested,
                active_log = active.max_log(),
                "domain reused although a larger one was requested"
            )
        }
        _ => tracing::debug!(target: "nttkit", backend = B::NAME, field = F::NAME, "domain already active, reused"),
    }
}

impl<B, F> Ntt<F> for Module<B, F>
where
    B: Backend + NttImpl<B, F>,
    F: Field,
{
    fn ntt(&self, buffers: NttBuffers<'_, F>, size: usize, dir: NttDir, config: &NttConfig<F>) -> NttResult<()> {
        check_ntt_args::<B, F>(&buffers, size, config)?;
        let domain: std::sync::Arc<Domain<F>> = self.active_domain()?;
        if !domain.supports(size) {
            return Err(NttError::invalid(format!(
                "transform size {size} exceeds the active {} domain of size {}",
                F::NAME,
                domain.max_size()
            )));
        }
        tracing::trace!(target: "nttkit", backend = B::NAME, field = F::NAME, size, ?dir, batch = config.batch_size, "ntt");
        B::ntt_impl(self, &domain, buffers, size, dir, config)
    }
}

impl<B, F> NttInitDomain<F> for Module<B, F>
where
    B: Backend + NttInitDomainImpl<B, F>,
    F: Field,
{
    fn ntt_init_domain(&self, primitive_root: F, config: &NttInitDomainConfig) -> NttResult<()> {
        if self.domain_slot().is_active() {
            match config.on_existing {
                OnExisting::Reuse => {
                    let requested_log: Option<u32> = domain_generator(primitive_root, config).ok().map(|(_, m)| m);
                    log_reused(self, requested_log);
                    return Ok(());
                }
                OnExisting::Error => return Err(already_initialized::<B, F>()),
                OnExisting::Replace => {}
            }
        }

        let (root, max_log) = domain_generator(primitive_root, config)?;
        let domain: Domain<F> = B::ntt_init_domain_impl(self, root, max_log, config)?;

        // Another caller may have installed a domain since the check above.
        match self.domain_slot().install(domain, config.on_existing)? {
            DomainInstall::Fresh => {
                tracing::info!(target: "nttkit", backend = B::NAME, field = F::NAME, max_log, "domain initialized")
            }
            DomainInstall::Replaced => {
                tracing::info!(target: "nttkit", backend = B::NAME, field = F::NAME, max_log, "domain replaced")
            }
            DomainInstall::Reused => log_reused(self, Some(max_log)),
        }
        Ok(())
    }
}

impl<B, F> NttReleaseDomain<F> for Module<B, F>
where
    B: Backend + NttReleaseDomainImpl<B, F>,
    F: Field,
{
    fn ntt_release_domain(&self) -> NttResult<()> {
        match self.domain_slot().release() {
            Some(domain) => {
                tracing::info!(target: "nttkit", backend = B::NAME, field = F::NAME, max_log = domain.max_log(), "domain released");
                B::ntt_release_domain_impl(self, domain)
            }
            None => {
                tracing::debug!(target: "nttkit", backend = B::NAME, field = F::NAME, "no active domain to release");
                Ok(())
            }
        }
    }
}

impl<B, F> NttRouFromDomain<F> for Module<B, F>
where
    B: Backend + NttRouFromDomainImpl<B, F>,
    F: Field,
{
    fn ntt_rou_from_domain(&self, logn: u64) -> NttResult<F> {
        let domain: std::sync::Arc<Domain<F>> = self.active_domain()?;
        if logn > domain.max_log() as u64 {
            return Err(NttError::invalid(format!(
                "root of order 2^{logn} requested from a {} domain of order 2^{}",
                F::NAME,
                domain.max_log()
            )));
        }
        B::ntt_rou_from_domain_impl(self, &domain, logn)
    }
}
