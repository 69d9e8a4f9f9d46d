//! Descriptive statistics, density histogram and CLT moments

use std::f64::consts::PI;

use statrs::statistics::Statistics;

use crate::estimator::theoretical_std;
use crate::PiError;

/// Observed moments of an estimate series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    /// Unbiased (ddof = 1) standard deviation
    pub std_dev: f64,
}

impl SampleSummary {
    /// Needs at least two values for the unbiased spread.
    pub fn from_samples(samples: &[f64]) -> Result<Self, PiError> {
        if samples.len() < 2 {
            return Err(PiError::InsufficientData {
                needed: 2,
                got: samples.len(),
            });
        }
        Ok(Self {
            count: samples.len(),
            mean: samples.mean(),
            std_dev: samples.std_dev(),
        })
    }
}

/// Moments the CLT predicts for the estimator at sample size `n`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TheoreticalMoments {
    pub sample_size: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl TheoreticalMoments {
    pub fn for_sample_size(n: usize) -> Result<Self, PiError> {
        Ok(Self {
            sample_size: n,
            mean: PI,
            std_dev: theoretical_std(n)?,
        })
    }
}

/// `count` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Density-normalised histogram with equal-width bins
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` bin edges
    pub edges: Vec<f64>,
    /// Raw counts per bin
    pub counts: Vec<usize>,
    /// count / (total * width), so the bars integrate to one
    pub density: Vec<f64>,
}

impl Histogram {
    /// Bin `samples` over [min, max]; the last bin is closed on the right.
    pub fn from_samples(samples: &[f64], bins: usize) -> Result<Self, PiError> {
        if samples.is_empty() {
            return Err(PiError::InsufficientData { needed: 1, got: 0 });
        }
        if bins == 0 {
            return Err(PiError::InvalidConfig(
                "histogram needs at least one bin".to_string(),
            ));
        }

        let mut lo = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let edges = linspace(lo, hi, bins + 1);
        let width = (hi - lo) / bins as f64;
        let mut counts = vec![0usize; bins];
        for &x in samples {
            let idx = (((x - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let total = samples.len() as f64;
        let density = counts
            .iter()
            .map(|&c| c as f64 / (total * width))
            .collect();

        Ok(Self {
            edges,
            counts,
            density,
        })
    }

    /// `(left, right, density)` per bin
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.density)
            .map(|(edge, &d)| (edge[0], edge[1], d))
    }

    pub fn max_density(&self) -> f64 {
        self.density.iter().copied().fold(0.0, f64::max)
    }
}
