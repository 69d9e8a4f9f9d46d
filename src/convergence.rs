//! Convergence of the π estimate over a logarithmic range of sample sizes

use tracing::{debug, info};

use crate::config::StudyConfig;
use crate::estimator::{estimate_series, seeded_rng, PiEstimate};
use crate::PiError;

/// A requested milestone and the sweep point reported for it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Milestone {
    pub target: usize,
    pub estimate: PiEstimate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceStudy {
    pub seed: u64,
    /// One estimate per sample size, in sweep order
    pub estimates: Vec<PiEstimate>,
    pub milestones: Vec<Milestone>,
}

impl ConvergenceStudy {
    pub fn sample_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.estimates.iter().map(|e| e.samples)
    }

    pub fn final_estimate(&self) -> Option<&PiEstimate> {
        self.estimates.last()
    }
}

/// `count` sample sizes 10^e for e evenly spaced over `[min_exp, max_exp]`.
///
/// Values are truncated toward zero and not deduplicated, so the result is
/// non-decreasing rather than strictly increasing. A relative slack of
/// `TRUNCATION_SLACK` keeps `powf` results like 99.999... at 100.
pub fn log_spaced_sample_sizes(min_exp: f64, max_exp: f64, count: usize) -> Vec<usize> {
    crate::stats::linspace(min_exp, max_exp, count)
        .into_iter()
        .map(|e| truncate_size(10.0_f64.powf(e)))
        .collect()
}

const TRUNCATION_SLACK: f64 = 1e-12;

fn truncate_size(value: f64) -> usize {
    ((value * (1.0 + TRUNCATION_SLACK)).floor() as usize).max(1)
}

pub fn run_convergence_study(cfg: &StudyConfig) -> Result<ConvergenceStudy, PiError> {
    let sizes = log_spaced_sample_sizes(cfg.log_min_exponent, cfg.log_max_exponent, cfg.log_points);
    info!(
        points = sizes.len(),
        seed = cfg.convergence_seed,
        "running convergence study"
    );

    let mut rng = seeded_rng(cfg.convergence_seed);
    let estimates = estimate_series(&mut rng, &sizes)?;
    for e in &estimates {
        debug!(n = e.samples, estimate = e.value, error = e.abs_error(), "convergence point");
    }

    let milestones = resolve_milestones(&estimates, &cfg.milestones);
    Ok(ConvergenceStudy {
        seed: cfg.convergence_seed,
        estimates,
        milestones,
    })
}

/// For each target pick the estimate whose sample size is nearest on a log
/// scale; ties go to the smaller size.
pub fn resolve_milestones(estimates: &[PiEstimate], targets: &[usize]) -> Vec<Milestone> {
    targets
        .iter()
        .filter(|&&target| target > 0)
        .filter_map(|&target| {
            let log_target = (target as f64).log10();
            estimates
                .iter()
                .min_by(|a, b| {
                    let da = ((a.samples as f64).log10() - log_target).abs();
                    let db = ((b.samples as f64).log10() - log_target).abs();
                    da.total_cmp(&db)
                })
                .map(|&estimate| Milestone { target, estimate })
        })
        .collect()
}
