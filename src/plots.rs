//! PNG figures rendered with plotters

use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use statrs::distribution::{Continuous, Normal};

use crate::config::StudyConfig;
use crate::convergence::ConvergenceStudy;
use crate::distribution::SamplingDistribution;
use crate::stats::linspace;

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Estimates against sample size on a log axis, with the true value dashed.
pub fn plot_convergence(
    study: &ConvergenceStudy,
    cfg: &StudyConfig,
    path: &Path,
) -> anyhow::Result<()> {
    anyhow::ensure!(!study.estimates.is_empty(), "no convergence estimates to plot");
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let root = BitMapBackend::new(path, cfg.convergence_plot_size).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = sample_size_bounds(study);
    let (y_lo, y_hi) = cfg.convergence_y_range;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Convergence: π Estimates vs Sample Size",
            ("sans-serif", 34).into_font(),
        )
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d((x_min..x_max).log_scale(), y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Number of samples (n)")
        .y_desc("Estimated π")
        .x_label_formatter(&|v: &f64| format!("{v:.0}"))
        .y_label_formatter(&|v: &f64| format!("{v:.2}"))
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            study
                .estimates
                .iter()
                .map(|e| (e.samples as f64, e.value.max(y_lo).min(y_hi))),
            BLUE.mix(0.7).stroke_width(2),
        ))?
        .label("π estimates")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 25, y)], BLUE.stroke_width(3)));

    chart
        .draw_series(DashedLineSeries::new(
            vec![(x_min, PI), (x_max, PI)],
            10,
            6,
            RED.stroke_width(2),
        ))?
        .label(format!("True π = {PI:.6}"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 25, y)], RED.stroke_width(3)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

/// One column per sample size: histogram with the CLT density on top,
/// normal Q-Q plot below.
pub fn plot_sampling_distributions(
    dists: &[SamplingDistribution],
    cfg: &StudyConfig,
    path: &Path,
) -> anyhow::Result<()> {
    anyhow::ensure!(!dists.is_empty(), "no sampling distributions to plot");
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let root = BitMapBackend::new(path, cfg.distribution_plot_size).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        "Sampling Distribution of π Estimator (Central Limit Theorem)",
        ("sans-serif", 40),
    )?;

    let panels = root.split_evenly((2, dists.len()));
    let (top, bottom) = panels.split_at(dists.len());
    for ((dist, hist_area), qq_area) in dists.iter().zip(top).zip(bottom) {
        draw_histogram(hist_area, dist, cfg.curve_points)?;
        draw_qq(qq_area, dist)?;
    }

    root.present()?;
    Ok(())
}

fn draw_histogram(
    area: &Panel<'_>,
    dist: &SamplingDistribution,
    curve_points: usize,
) -> anyhow::Result<()> {
    let hist = &dist.histogram;
    let theory = &dist.theoretical;
    let (lo, hi) = dist.range();

    let clt = Normal::new(theory.mean, theory.std_dev)?;
    let curve: Vec<(f64, f64)> = linspace(lo, hi, curve_points)
        .into_iter()
        .map(|x| (x, clt.pdf(x)))
        .collect();

    let edge_lo = hist.edges.first().copied().unwrap_or(lo).min(PI);
    let edge_hi = hist.edges.last().copied().unwrap_or(hi).max(PI);
    let (x_lo, x_hi) = padded(edge_lo, edge_hi, 0.05);

    let curve_max = curve.iter().map(|&(_, y)| y).fold(0.0_f64, f64::max);
    let y_max = positive_or(hist.max_density().max(curve_max) * 1.1, 1.0);

    let mut chart = ChartBuilder::on(area)
        .caption(format!("n = {}", dist.sample_size), ("sans-serif", 26))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(65)
        .build_cartesian_2d(x_lo..x_hi, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("π estimate")
        .y_desc("Density")
        .x_labels(5)
        .x_label_formatter(&|v: &f64| format!("{v:.3}"))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(
        hist.bars()
            .map(|(l, r, d)| Rectangle::new([(l, 0.0), (r, d)], SKY_BLUE.mix(0.7).filled())),
    )?;
    chart.draw_series(
        hist.bars()
            .map(|(l, r, d)| Rectangle::new([(l, 0.0), (r, d)], BLACK.stroke_width(1))),
    )?;

    chart
        .draw_series(LineSeries::new(curve, RED.stroke_width(2)))?
        .label(format!("N({:.3}, {:.4}²)", theory.mean, theory.std_dev))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(3)));

    chart
        .draw_series(DashedLineSeries::new(
            vec![(PI, 0.0), (PI, y_max)],
            8,
            5,
            true_pi_marker(),
        ))?
        .label("True π")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], true_pi_marker()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", 14))
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    Ok(())
}

fn draw_qq(area: &Panel<'_>, dist: &SamplingDistribution) -> anyhow::Result<()> {
    let qq = &dist.qq;
    let q_lo = qq.theoretical.first().copied().unwrap_or(-1.0);
    let q_hi = qq.theoretical.last().copied().unwrap_or(1.0);
    let (x_lo, x_hi) = padded(q_lo, q_hi, 0.05);

    let line = [(q_lo, qq.fitted(q_lo)), (q_hi, qq.fitted(q_hi))];
    let (v_lo, v_hi) = qq
        .ordered
        .iter()
        .copied()
        .chain(line.iter().map(|&(_, y)| y))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let (y_lo, y_hi) = padded(v_lo, v_hi, 0.05);

    let mut chart = ChartBuilder::on(area)
        .caption(format!("Q-Q Plot (n = {})", dist.sample_size), ("sans-serif", 26))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(65)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Theoretical quantiles")
        .y_desc("Ordered Values")
        .y_label_formatter(&|v: &f64| format!("{v:.3}"))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(qq.points().map(|p| Circle::new(p, 3, BLUE.mix(0.6).filled())))?;
    chart.draw_series(LineSeries::new(line, RED.stroke_width(2)))?;

    let anchor = (
        x_lo + 0.05 * (x_hi - x_lo),
        y_hi - 0.08 * (y_hi - y_lo),
    );
    chart.draw_series(std::iter::once(Text::new(
        format!("R² = {:.4}", qq.r_squared()),
        anchor,
        ("sans-serif", 18).into_font(),
    )))?;

    Ok(())
}

/// Style of the dashed vertical line at π in each histogram panel
fn true_pi_marker() -> ShapeStyle {
    RED.mix(0.8).stroke_width(2)
}

/// Log-axis bounds for the sweep; a single size gets a decade on each side.
fn sample_size_bounds(study: &ConvergenceStudy) -> (f64, f64) {
    let (lo, hi) = study
        .sample_sizes()
        .fold((usize::MAX, 0), |(lo, hi), n| (lo.min(n), hi.max(n)));
    let (lo, hi) = (lo.max(1) as f64, hi.max(1) as f64);
    if lo < hi {
        (lo, hi)
    } else {
        (lo / 10.0, hi * 10.0)
    }
}

/// Widen `[lo, hi]` by `frac` of its width on each side; a zero-width range
/// is widened by one unit.
fn padded(lo: f64, hi: f64, frac: f64) -> (f64, f64) {
    let width = hi - lo;
    if width > 0.0 && width.is_finite() {
        (lo - frac * width, hi + frac * width)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value > 0.0 && value.is_finite() {
        value
    } else {
        fallback
    }
}
