use std::path::PathBuf;

use crate::PiError;

/// Fixed parameters of the Monte Carlo π analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyConfig {
    /// Seed shared by the demonstration and the convergence run
    pub convergence_seed: u64,
    /// Sample sizes for the opening demonstration
    pub demo_sample_sizes: Vec<usize>,
    /// Lower decade of the convergence sweep (10^min)
    pub log_min_exponent: f64,
    /// Upper decade of the convergence sweep (10^max), inclusive
    pub log_max_exponent: f64,
    /// Number of log-spaced sample sizes in the sweep
    pub log_points: usize,
    /// Sample sizes reported as convergence milestones
    pub milestones: Vec<usize>,
    /// Seed used to reset the generator before each sampling-distribution run
    pub distribution_seed: u64,
    /// Sample sizes studied for the sampling distribution
    pub distribution_sample_sizes: Vec<usize>,
    /// Independent estimator trials per sample size
    pub repetitions: usize,
    /// Histogram bins per sampling distribution
    pub histogram_bins: usize,
    /// Points on the overlaid normal density curve
    pub curve_points: usize,
    /// Significance level of the normality test
    pub significance: f64,
    /// Fixed y-axis band of the convergence figure
    pub convergence_y_range: (f64, f64),
    /// Directory receiving both figures
    pub output_dir: PathBuf,
    pub convergence_plot_name: String,
    pub distribution_plot_name: String,
    /// Pixel size of the convergence figure
    pub convergence_plot_size: (u32, u32),
    /// Pixel size of the composite sampling-distribution figure
    pub distribution_plot_size: (u32, u32),
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            convergence_seed: 42,
            demo_sample_sizes: vec![100, 1_000, 10_000, 100_000],
            log_min_exponent: 2.0,
            log_max_exponent: 6.0,
            log_points: 50,
            milestones: vec![100, 1_000, 10_000, 100_000, 1_000_000],
            distribution_seed: 123,
            distribution_sample_sizes: vec![1_000, 10_000, 100_000],
            repetitions: 500,
            histogram_bins: 30,
            curve_points: 100,
            significance: 0.05,
            convergence_y_range: (2.8, 3.5),
            output_dir: PathBuf::from("."),
            convergence_plot_name: "pi_convergence.png".to_string(),
            distribution_plot_name: "sampling_distributions.png".to_string(),
            convergence_plot_size: (1500, 900),
            distribution_plot_size: (2250, 1500),
        }
    }
}

impl StudyConfig {
    pub fn validate(&self) -> Result<(), PiError> {
        if self.demo_sample_sizes.iter().any(|&n| n == 0) {
            return Err(PiError::InvalidConfig(
                "demo_sample_sizes must contain only values greater than zero".to_string(),
            ));
        }

        if !self.log_min_exponent.is_finite() || !self.log_max_exponent.is_finite() {
            return Err(PiError::InvalidConfig(
                "log_min_exponent and log_max_exponent must be finite".to_string(),
            ));
        }

        if self.log_min_exponent < 0.0 || self.log_max_exponent <= self.log_min_exponent {
            return Err(PiError::InvalidConfig(
                "log exponents must satisfy 0 <= log_min_exponent < log_max_exponent".to_string(),
            ));
        }

        if self.log_points < 2 {
            return Err(PiError::InvalidConfig(
                "log_points must be at least 2".to_string(),
            ));
        }

        if self.milestones.iter().any(|&n| n == 0) {
            return Err(PiError::InvalidConfig(
                "milestones must contain only values greater than zero".to_string(),
            ));
        }

        if self.distribution_sample_sizes.is_empty()
            || self.distribution_sample_sizes.iter().any(|&n| n == 0)
        {
            return Err(PiError::InvalidConfig(
                "distribution_sample_sizes must be non-empty and greater than zero".to_string(),
            ));
        }

        if !(3..=crate::shapiro::MAX_SAMPLES).contains(&self.repetitions) {
            return Err(PiError::InvalidConfig(format!(
                "repetitions must lie in 3..={}",
                crate::shapiro::MAX_SAMPLES
            )));
        }

        if self.histogram_bins == 0 {
            return Err(PiError::InvalidConfig(
                "histogram_bins must be greater than zero".to_string(),
            ));
        }

        if self.curve_points < 2 {
            return Err(PiError::InvalidConfig(
                "curve_points must be at least 2".to_string(),
            ));
        }

        if !(self.significance > 0.0 && self.significance < 1.0) {
            return Err(PiError::InvalidConfig(
                "significance must be in (0, 1)".to_string(),
            ));
        }

        let (y_lo, y_hi) = self.convergence_y_range;
        if !(y_lo.is_finite() && y_hi.is_finite() && y_lo < y_hi) {
            return Err(PiError::InvalidConfig(
                "convergence_y_range must be a finite, increasing pair".to_string(),
            ));
        }

        Ok(())
    }

    pub fn convergence_plot_path(&self) -> PathBuf {
        self.output_dir.join(&self.convergence_plot_name)
    }

    pub fn distribution_plot_path(&self) -> PathBuf {
        self.output_dir.join(&self.distribution_plot_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(StudyConfig::default().validate().is_ok());
    }

    #[test]
    fn default_output_names() {
        let cfg = StudyConfig::default();
        assert_eq!(
            cfg.convergence_plot_path(),
            PathBuf::from(".").join("pi_convergence.png")
        );
        assert_eq!(
            cfg.distribution_plot_path(),
            PathBuf::from(".").join("sampling_distributions.png")
        );
    }

    #[test]
    fn rejects_zero_sample_sizes() {
        let cfg = StudyConfig {
            distribution_sample_sizes: vec![1_000, 0],
            ..StudyConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(PiError::InvalidConfig(_))));

        let cfg = StudyConfig {
            demo_sample_sizes: vec![0],
            ..StudyConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(PiError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_repetitions_outside_normality_test_range() {
        for repetitions in [0, 2, 5_001] {
            let cfg = StudyConfig {
                repetitions,
                ..StudyConfig::default()
            };
            assert!(cfg.validate().is_err(), "repetitions = {repetitions}");
        }
    }

    #[test]
    fn rejects_inverted_ranges() {
        let cfg = StudyConfig {
            log_min_exponent: 4.0,
            log_max_exponent: 3.0,
            ..StudyConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = StudyConfig {
            convergence_y_range: (3.5, 2.8),
            ..StudyConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = StudyConfig {
            significance: 1.0,
            ..StudyConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
