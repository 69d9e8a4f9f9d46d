//! Normal probability (Q-Q) plot data
//!
//! Theoretical quantiles sit at the normal quantiles of Filliben's
//! uniform order-statistic medians; the reference line is the least-squares
//! fit of the ordered sample on those quantiles.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::PiError;

#[derive(Debug, Clone, PartialEq)]
pub struct QqPlot {
    /// Normal quantiles, ascending
    pub theoretical: Vec<f64>,
    /// Sample values, ascending
    pub ordered: Vec<f64>,
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation between the two axes
    pub r: f64,
}

impl QqPlot {
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.theoretical.iter().copied().zip(self.ordered.iter().copied())
    }

    /// Value of the fitted reference line at quantile `q`
    pub fn fitted(&self, q: f64) -> f64 {
        self.intercept + self.slope * q
    }

    pub fn r_squared(&self) -> f64 {
        self.r * self.r
    }
}

/// Filliben's approximation to the medians of uniform order statistics.
pub fn order_statistic_medians(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.5],
        _ => {
            let last = 0.5_f64.powf(1.0 / n as f64);
            let nf = n as f64;
            (0..n)
                .map(|i| {
                    if i == 0 {
                        1.0 - last
                    } else if i == n - 1 {
                        last
                    } else {
                        (i as f64 + 1.0 - 0.3175) / (nf + 0.365)
                    }
                })
                .collect()
        }
    }
}

pub fn normal_probability_plot(samples: &[f64]) -> Result<QqPlot, PiError> {
    let n = samples.len();
    if n < 2 {
        return Err(PiError::InsufficientData { needed: 2, got: n });
    }

    let standard = Normal::standard();
    let theoretical: Vec<f64> = order_statistic_medians(n)
        .into_iter()
        .map(|p| standard.inverse_cdf(p))
        .collect();
    let mut ordered = samples.to_vec();
    ordered.sort_by(f64::total_cmp);

    let nf = n as f64;
    let mean_x = theoretical.iter().sum::<f64>() / nf;
    let mean_y = ordered.iter().sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (&x, &y) in theoretical.iter().zip(&ordered) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if !(syy > 0.0) {
        return Err(PiError::DegenerateSample);
    }

    let slope = sxy / sxx;
    Ok(QqPlot {
        intercept: mean_y - slope * mean_x,
        slope,
        r: sxy / (sxx * syy).sqrt(),
        theoretical,
        ordered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medians_are_symmetric_and_increasing() {
        let m = order_statistic_medians(9);
        assert_eq!(m.len(), 9);
        assert!(m.windows(2).all(|w| w[0] < w[1]));
        for i in 0..9 {
            assert!((m[i] + m[8 - i] - 1.0).abs() < 1e-12, "i = {i}");
        }
        assert!((m[4] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn affine_normal_sample_recovers_scale_and_location() {
        let standard = Normal::standard();
        let quantiles: Vec<f64> = order_statistic_medians(200)
            .into_iter()
            .map(|p| standard.inverse_cdf(p))
            .collect();
        let data: Vec<f64> = quantiles.iter().rev().map(|q| 3.0 + 0.05 * q).collect();

        let qq = normal_probability_plot(&data).unwrap();
        assert!((qq.slope - 0.05).abs() < 1e-10);
        assert!((qq.intercept - 3.0).abs() < 1e-10);
        assert!((qq.r - 1.0).abs() < 1e-10);
        assert!((qq.fitted(0.0) - 3.0).abs() < 1e-10);
        // symmetric medians give antisymmetric quantiles
        let first = qq.theoretical[0];
        let last = qq.theoretical[199];
        assert!((first + last).abs() < 1e-9);
    }

    #[test]
    fn points_pair_sorted_values() {
        let qq = normal_probability_plot(&[3.0, 1.0, 2.0]).unwrap();
        let points: Vec<(f64, f64)> = qq.points().collect();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].1, 1.0);
        assert_eq!(points[2].1, 3.0);
        assert!(points[0].0 < 0.0 && points[2].0 > 0.0);
        assert!(qq.r_squared() > 0.9);
    }

    #[test]
    fn constant_or_tiny_samples_are_rejected() {
        assert!(matches!(
            normal_probability_plot(&[1.0]),
            Err(PiError::InsufficientData { .. })
        ));
        assert!(matches!(
            normal_probability_plot(&[2.0, 2.0, 2.0]),
            Err(PiError::DegenerateSample)
        ));
    }
}
