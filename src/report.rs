//! Presentation of the analysis: console text and figures
//!
//! The numeric studies never print or draw; `run_analysis` hands their
//! results to a [`Reporter`].

use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::StudyConfig;
use crate::convergence::ConvergenceStudy;
use crate::distribution::SamplingDistribution;
use crate::estimator::PiEstimate;
use crate::plots::{plot_convergence, plot_sampling_distributions};

const RULE_WIDTH: usize = 50;

pub trait Reporter {
    /// Opening banner with the reference value of π
    fn banner(&mut self, true_pi: f64) -> anyhow::Result<()>;

    fn section(&mut self, title: &str) -> anyhow::Result<()>;

    /// Part 1: a handful of single estimates from one generator
    fn demonstration(&mut self, estimates: &[PiEstimate]) -> anyhow::Result<()>;

    /// Part 2: milestone errors of the convergence sweep
    fn convergence(&mut self, study: &ConvergenceStudy) -> anyhow::Result<()>;

    /// Part 3: moments and normality verdict for one sample size
    fn sampling_distribution(
        &mut self,
        dist: &SamplingDistribution,
        significance: f64,
    ) -> anyhow::Result<()>;

    /// Draw the convergence figure and return where it went.
    fn render_convergence(
        &mut self,
        study: &ConvergenceStudy,
        cfg: &StudyConfig,
    ) -> anyhow::Result<PathBuf>;

    /// Draw the histogram / Q-Q grid and return where it went.
    fn render_distributions(
        &mut self,
        dists: &[SamplingDistribution],
        cfg: &StudyConfig,
    ) -> anyhow::Result<PathBuf>;

    fn finished(&mut self, outputs: &[PathBuf]) -> anyhow::Result<()>;
}

/// Writes the report as text and renders figures with plotters.
pub struct ConsoleReporter<W: Write = Stdout> {
    out: W,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn rule(&mut self, ch: char) -> io::Result<()> {
        writeln!(self.out, "{}", ch.to_string().repeat(RULE_WIDTH))
    }

    fn saved(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "Saved: {}", path.display())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn banner(&mut self, true_pi: f64) -> anyhow::Result<()> {
        self.rule('=')?;
        writeln!(self.out, "Monte Carlo π Estimation Project")?;
        self.rule('=')?;
        writeln!(self.out, "True value of π = {true_pi:.10}")?;
        writeln!(self.out)?;
        Ok(())
    }

    fn section(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.out)?;
        self.rule('=')?;
        writeln!(self.out, "{title}")?;
        self.rule('-')?;
        Ok(())
    }

    fn demonstration(&mut self, estimates: &[PiEstimate]) -> anyhow::Result<()> {
        for e in estimates {
            writeln!(
                self.out,
                "n = {:6}: π ≈ {:.6}, |error| = {:.6}",
                e.samples,
                e.value,
                e.abs_error()
            )?;
        }
        Ok(())
    }

    fn convergence(&mut self, study: &ConvergenceStudy) -> anyhow::Result<()> {
        writeln!(
            self.out,
            "Tested {} sample sizes (seed {}); milestones:",
            study.estimates.len(),
            study.seed
        )?;
        for m in &study.milestones {
            let e = &m.estimate;
            writeln!(
                self.out,
                "n = {:7} (≈{:>7}): π ≈ {:.6}, error = {:.6}",
                e.samples,
                m.target,
                e.value,
                e.abs_error()
            )?;
        }
        Ok(())
    }

    fn sampling_distribution(
        &mut self,
        dist: &SamplingDistribution,
        significance: f64,
    ) -> anyhow::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Analyzing n = {}:", dist.sample_size)?;
        writeln!(
            self.out,
            "  Sample mean: {:.6} (theoretical: {:.6})",
            dist.observed.mean, dist.theoretical.mean
        )?;
        writeln!(
            self.out,
            "  Sample std:  {:.6} (theoretical: {:.6})",
            dist.observed.std_dev, dist.theoretical.std_dev
        )?;
        writeln!(
            self.out,
            "  Shapiro-Wilk: statistic = {:.4}, p-value = {:.4}",
            dist.normality.statistic, dist.normality.p_value
        )?;
        let verdict = dist.normality.verdict(significance);
        let condition = match verdict {
            crate::shapiro::Verdict::Reject => "≤",
            crate::shapiro::Verdict::FailToReject => ">",
        };
        writeln!(self.out, "  → {verdict} (p {condition} {significance})")?;
        Ok(())
    }

    fn render_convergence(
        &mut self,
        study: &ConvergenceStudy,
        cfg: &StudyConfig,
    ) -> anyhow::Result<PathBuf> {
        let path = cfg.convergence_plot_path();
        plot_convergence(study, cfg, &path)
            .with_context(|| format!("failed to render {}", path.display()))?;
        self.saved(&path)?;
        Ok(path)
    }

    fn render_distributions(
        &mut self,
        dists: &[SamplingDistribution],
        cfg: &StudyConfig,
    ) -> anyhow::Result<PathBuf> {
        let path = cfg.distribution_plot_path();
        plot_sampling_distributions(dists, cfg, &path)
            .with_context(|| format!("failed to render {}", path.display()))?;
        writeln!(self.out)?;
        self.saved(&path)?;
        Ok(path)
    }

    fn finished(&mut self, outputs: &[PathBuf]) -> anyhow::Result<()> {
        writeln!(self.out)?;
        self.rule('=')?;
        writeln!(self.out, "Analysis complete!")?;
        writeln!(self.out, "Generated files:")?;
        for path in outputs {
            writeln!(self.out, "  - {}", path.display())?;
        }
        self.rule('=')?;
        self.out.flush()?;
        Ok(())
    }
}
