//! Shapiro-Wilk test for normality
//!
//! Coefficients and p-value approximation follow Royston (1995), algorithm
//! AS R94, which covers sample sizes 3 through 5000.

use std::f64::consts::PI;
use std::fmt;

use statrs::distribution::{ContinuousCDF, Normal};

use crate::PiError;

pub const MIN_SAMPLES: usize = 3;
pub const MAX_SAMPLES: usize = 5000;

const C1: [f64; 6] = [0.0, 0.221_157, -0.147_981, -2.071_19, 4.434_685, -2.706_056];
const C2: [f64; 6] = [0.0, 0.042_981, -0.293_762, -1.752_461, 5.682_633, -3.582_633];
const C3: [f64; 4] = [0.544, -0.399_78, 0.025_054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.778_57, 0.062_767, -0.002_032_2];
const C5: [f64; 4] = [-1.5861, -0.310_82, -0.083_751, 0.003_891_5];
const C6: [f64; 3] = [-0.4803, -0.082_676, 0.003_030_2];
const G: [f64; 2] = [-2.273, 0.459];

/// Test statistic and p-value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    pub statistic: f64,
    pub p_value: f64,
}

/// Outcome of the normality test at a given significance level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Reject,
    FailToReject,
}

impl ShapiroWilk {
    /// Normality is rejected when p <= alpha.
    pub fn verdict(&self, alpha: f64) -> Verdict {
        if self.p_value > alpha {
            Verdict::FailToReject
        } else {
            Verdict::Reject
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Reject => write!(f, "Reject normality"),
            Verdict::FailToReject => write!(f, "Fail to reject normality"),
        }
    }
}

pub fn shapiro_wilk(samples: &[f64]) -> Result<ShapiroWilk, PiError> {
    let n = samples.len();
    if n < MIN_SAMPLES {
        return Err(PiError::InsufficientData {
            needed: MIN_SAMPLES,
            got: n,
        });
    }
    if n > MAX_SAMPLES {
        return Err(PiError::TooManySamples {
            max: MAX_SAMPLES,
            got: n,
        });
    }

    let mut x = samples.to_vec();
    x.sort_by(f64::total_cmp);

    let range = x[n - 1] - x[0];
    if !(range > 0.0 && range.is_finite()) {
        return Err(PiError::DegenerateSample);
    }

    let a = coefficients(n);
    let half = n / 2;

    let mean = x.iter().sum::<f64>() / n as f64;
    let ssq: f64 = x.iter().map(|&v| (v - mean) * (v - mean)).sum();
    let num: f64 = (0..half).map(|i| a[i] * (x[n - 1 - i] - x[i])).sum();
    let w = (num * num / ssq).min(1.0);

    Ok(ShapiroWilk {
        statistic: w,
        p_value: p_value(w, n),
    })
}

/// Antisymmetric weights for the upper half of the ordered sample,
/// largest first.
fn coefficients(n: usize) -> Vec<f64> {
    let half = n / 2;
    let an = n as f64;

    if n == 3 {
        return vec![0.5_f64.sqrt()];
    }

    let standard = Normal::standard();
    let mut m: Vec<f64> = (1..=half)
        .map(|i| standard.inverse_cdf((i as f64 - 0.375) / (an + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();

    let a1 = horner(&C1, rsn) - m[0] / ssumm2;
    let (first_scaled, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + horner(&C2, rsn);
        let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
            / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
            .sqrt();
        m[1] = a2;
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
        (1, fac)
    };
    m[0] = a1;
    for v in m.iter_mut().skip(first_scaled) {
        *v = -*v / fac;
    }
    m
}

fn p_value(w: f64, n: usize) -> f64 {
    let an = n as f64;

    if n == 3 {
        let p = 6.0 / PI * (w.sqrt().asin() - 0.75_f64.sqrt().asin());
        return p.max(0.0);
    }

    let mut y = (1.0 - w).ln();
    let (m, s) = if n <= 11 {
        let gamma = horner(&G, an);
        if y >= gamma {
            return 1e-99;
        }
        y = -(gamma - y).ln();
        (horner(&C3, an), horner(&C4, an).exp())
    } else {
        let ln_n = an.ln();
        (horner(&C5, ln_n), horner(&C6, ln_n).exp())
    };

    1.0 - Normal::standard().cdf((y - m) / s)
}

/// Evaluate `c[0] + c[1] x + ... + c[k] x^k`.
fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}
