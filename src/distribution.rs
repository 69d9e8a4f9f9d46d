//! Sampling distribution of the estimator and the CLT check
//!
//! For each sample size the generator is reset to the same seed, the
//! estimator is repeated many times, and the spread of the results is
//! compared against the normal law N(π, π(4 - π)/n).

use tracing::{debug, info};

use crate::config::StudyConfig;
use crate::estimator::{repeat_estimates, seeded_rng};
use crate::qq::{normal_probability_plot, QqPlot};
use crate::shapiro::{shapiro_wilk, ShapiroWilk};
use crate::stats::{Histogram, SampleSummary, TheoreticalMoments};
use crate::PiError;

#[derive(Debug, Clone, PartialEq)]
pub struct SamplingDistribution {
    pub sample_size: usize,
    pub estimates: Vec<f64>,
    pub observed: SampleSummary,
    pub theoretical: TheoreticalMoments,
    pub histogram: Histogram,
    pub qq: QqPlot,
    pub normality: ShapiroWilk,
}

impl SamplingDistribution {
    /// Observed std relative to the CLT prediction
    pub fn std_ratio(&self) -> f64 {
        self.observed.std_dev / self.theoretical.std_dev
    }

    /// Smallest and largest estimate
    pub fn range(&self) -> (f64, f64) {
        let lo = self.estimates.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = self.estimates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (lo, hi)
    }
}

/// Repeat the estimator `repetitions` times at sample size `n` starting from
/// `seed`, and summarise the results.
pub fn sampling_distribution(
    n: usize,
    repetitions: usize,
    seed: u64,
    bins: usize,
) -> Result<SamplingDistribution, PiError> {
    let mut rng = seeded_rng(seed);
    let estimates = repeat_estimates(&mut rng, n, repetitions)?;

    let observed = SampleSummary::from_samples(&estimates)?;
    let theoretical = TheoreticalMoments::for_sample_size(n)?;
    let histogram = Histogram::from_samples(&estimates, bins)?;
    let qq = normal_probability_plot(&estimates)?;
    let normality = shapiro_wilk(&estimates)?;

    debug!(
        n,
        mean = observed.mean,
        std = observed.std_dev,
        w = normality.statistic,
        p = normality.p_value,
        "sampling distribution"
    );

    Ok(SamplingDistribution {
        sample_size: n,
        estimates,
        observed,
        theoretical,
        histogram,
        qq,
        normality,
    })
}

pub fn run_distribution_study(cfg: &StudyConfig) -> Result<Vec<SamplingDistribution>, PiError> {
    info!(
        sizes = ?cfg.distribution_sample_sizes,
        repetitions = cfg.repetitions,
        seed = cfg.distribution_seed,
        "running sampling-distribution study"
    );

    cfg.distribution_sample_sizes
        .iter()
        .map(|&n| {
            sampling_distribution(
                n,
                cfg.repetitions,
                cfg.distribution_seed,
                cfg.histogram_bins,
            )
        })
        .collect()
}
