//! Monte Carlo estimation of π
//!
//! Points are drawn uniformly from the unit square and the fraction landing
//! inside the quarter disc estimates π/4. Two studies build on the
//! estimator: a convergence sweep over logarithmically spaced sample sizes,
//! and a sampling-distribution study that checks the central limit theorem
//! with a Shapiro-Wilk test and a normal Q-Q plot.

pub mod config;
pub mod convergence;
pub mod distribution;
pub mod estimator;
pub mod logging;
pub mod plots;
pub mod qq;
pub mod report;
pub mod shapiro;
pub mod stats;

use std::f64::consts::PI;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

pub use config::StudyConfig;
pub use convergence::{run_convergence_study, ConvergenceStudy, Milestone};
pub use distribution::{run_distribution_study, sampling_distribution, SamplingDistribution};
pub use estimator::{estimate_pi, seeded_rng, PiEstimate, StudyRng};
pub use report::{ConsoleReporter, Reporter};
pub use shapiro::{shapiro_wilk, ShapiroWilk, Verdict};

#[derive(Debug, Error)]
pub enum PiError {
    #[error("sample size must be at least 1")]
    ZeroSamples,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("need at least {needed} values, got {got}")]
    InsufficientData { needed: usize, got: usize },
    #[error("at most {max} values supported, got {got}")]
    TooManySamples { max: usize, got: usize },
    #[error("all values are identical")]
    DegenerateSample,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything one full run produced
#[derive(Debug, Clone)]
pub struct AnalysisSummary {
    pub demonstration: Vec<PiEstimate>,
    pub convergence: ConvergenceStudy,
    pub distributions: Vec<SamplingDistribution>,
    pub outputs: Vec<PathBuf>,
}

/// Run the three parts in order, handing each result to `reporter`.
pub fn run_analysis(
    cfg: &StudyConfig,
    reporter: &mut dyn Reporter,
) -> anyhow::Result<AnalysisSummary> {
    cfg.validate()?;
    info!(output_dir = %cfg.output_dir.display(), "starting analysis");

    reporter.banner(PI)?;

    reporter.section("Part 1: Monte Carlo π Estimator")?;
    let mut rng = seeded_rng(cfg.convergence_seed);
    let demonstration = estimator::estimate_series(&mut rng, &cfg.demo_sample_sizes)?;
    reporter.demonstration(&demonstration)?;

    reporter.section("Part 2: Convergence with Sample Size")?;
    let convergence = run_convergence_study(cfg)?;
    reporter.convergence(&convergence)?;
    let convergence_plot = reporter.render_convergence(&convergence, cfg)?;

    reporter.section("Part 3: Sampling Distribution and Central Limit Theorem")?;
    let distributions = run_distribution_study(cfg)?;
    for dist in &distributions {
        reporter.sampling_distribution(dist, cfg.significance)?;
    }
    let distribution_plot = reporter.render_distributions(&distributions, cfg)?;

    let outputs = vec![convergence_plot, distribution_plot];
    reporter.finished(&outputs)?;
    info!(files = outputs.len(), "analysis complete");

    Ok(AnalysisSummary {
        demonstration,
        convergence,
        distributions,
        outputs,
    })
}
