use crate::config::{DomainPolicy, RhoConfig};
use crate::error::{Result, RhoError};
use crate::kernel::{calc_rho, try_calc_rho};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Policy-aware rho evaluation over scalars and slices
#[derive(Debug, Clone, Default)]
pub struct RhoCalculator {
    config: RhoConfig,
}

impl RhoCalculator {
    /// Create a new rho calculator
    pub fn new(config: RhoConfig) -> Self {
        Self { config }
    }

    /// Default configuration with the given domain policy
    pub fn with_policy(policy: DomainPolicy) -> Self {
        Self::new(RhoConfig { domain_policy: policy, ..Default::default() })
    }

    pub fn config(&self) -> &RhoConfig {
        &self.config
    }

    pub fn policy(&self) -> DomainPolicy {
        self.config.domain_policy
    }

    /// Evaluate rho for a single pair under the configured policy
    #[inline]
    pub fn rho(&self, cdot: f64, beta: f64) -> Result<f64> {
        match self.config.domain_policy {
            DomainPolicy::PropagateNan => Ok(calc_rho(cdot, beta)),
            DomainPolicy::Reject => try_calc_rho(cdot, beta),
        }
    }

    /// Elementwise rho over paired `cdots[i]`, `betas[i]`
    pub fn rho_batch(&self, cdots: &[f64], betas: &[f64]) -> Result<Vec<f64>> {
        let mut out = vec![0.0; cdots.len()];
        self.rho_into(cdots, betas, &mut out)?;
        Ok(out)
    }

    /// Elementwise rho with one `beta` broadcast across every `cdot`
    pub fn rho_batch_with_beta(&self, cdots: &[f64], beta: f64) -> Result<Vec<f64>> {
        let mut out = vec![0.0; cdots.len()];
        self.eval_into(cdots, |_| beta, &mut out)?;
        Ok(out)
    }

    /// Elementwise rho over paired inputs, written into `out`
    ///
    /// Under [`DomainPolicy::Reject`] the error names the lowest offending
    /// index and the contents of `out` are unspecified.
    pub fn rho_into(&self, cdots: &[f64], betas: &[f64], out: &mut [f64]) -> Result<()> {
        if cdots.len() != betas.len() {
            return Err(RhoError::LengthMismatch { cdots: cdots.len(), betas: betas.len() });
        }
        self.eval_into(cdots, |i| betas[i], out)
    }

    fn eval_into<F>(&self, cdots: &[f64], beta_at: F, out: &mut [f64]) -> Result<()>
    where
        F: Fn(usize) -> f64 + Sync,
    {
        if out.len() != cdots.len() {
            return Err(RhoError::OutputLengthMismatch { expected: cdots.len(), actual: out.len() });
        }

        let len = cdots.len();
        let parallel = self.config.batch.use_parallel(len);

        match self.config.domain_policy {
            DomainPolicy::PropagateNan => {
                let fill = |(i, slot): (usize, &mut f64)| *slot = calc_rho(cdots[i], beta_at(i));
                if parallel {
                    out.par_iter_mut().enumerate().for_each(fill);
                } else {
                    out.iter_mut().enumerate().for_each(fill);
                }

                let nan_count = out.iter().filter(|v| v.is_nan()).count();
                if nan_count > 0 {
                    warn!(
                        "rho batch produced {} NaN values out of {} (parallel: {})",
                        nan_count, len, parallel
                    );
                }
            }
            DomainPolicy::Reject => {
                let fill = |(i, slot): (usize, &mut f64)| {
                    match try_calc_rho(cdots[i], beta_at(i)) {
                        Ok(rho) => {
                            *slot = rho;
                            None
                        }
                        Err(e) => Some(e.at_index(i)),
                    }
                };
                // Both paths report the lowest offending index
                let failure = if parallel {
                    out.par_iter_mut().enumerate().find_map_first(fill)
                } else {
                    out.iter_mut().enumerate().find_map(fill)
                };
                if let Some(e) = failure {
                    debug!("rho batch rejected: {}", e);
                    return Err(e);
                }
            }
        }

        debug!("Evaluated rho batch of {} elements (parallel: {})", len, parallel);
        Ok(())
    }
}
