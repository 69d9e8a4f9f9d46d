use std::path::PathBuf;

use montecarlo_pi::{
    run_analysis, ConvergenceStudy, PiEstimate, Reporter, SamplingDistribution, StudyConfig,
};

/// Records the order of report events without printing or drawing.
#[derive(Default)]
struct RecordingReporter {
    events: Vec<String>,
}

impl Reporter for RecordingReporter {
    fn banner(&mut self, true_pi: f64) -> anyhow::Result<()> {
        self.events.push(format!("banner {true_pi:.4}"));
        Ok(())
    }

    fn section(&mut self, title: &str) -> anyhow::Result<()> {
        self.events.push(format!("section {title}"));
        Ok(())
    }

    fn demonstration(&mut self, estimates: &[PiEstimate]) -> anyhow::Result<()> {
        self.events.push(format!("demonstration {}", estimates.len()));
        Ok(())
    }

    fn convergence(&mut self, study: &ConvergenceStudy) -> anyhow::Result<()> {
        self.events.push(format!("convergence {}", study.estimates.len()));
        Ok(())
    }

    fn sampling_distribution(
        &mut self,
        dist: &SamplingDistribution,
        _significance: f64,
    ) -> anyhow::Result<()> {
        self.events.push(format!("distribution {}", dist.sample_size));
        Ok(())
    }

    fn render_convergence(
        &mut self,
        _study: &ConvergenceStudy,
        cfg: &StudyConfig,
    ) -> anyhow::Result<PathBuf> {
        self.events.push("render convergence".to_string());
        Ok(cfg.convergence_plot_path())
    }

    fn render_distributions(
        &mut self,
        _dists: &[SamplingDistribution],
        cfg: &StudyConfig,
    ) -> anyhow::Result<PathBuf> {
        self.events.push("render distributions".to_string());
        Ok(cfg.distribution_plot_path())
    }

    fn finished(&mut self, outputs: &[PathBuf]) -> anyhow::Result<()> {
        self.events.push(format!("finished {}", outputs.len()));
        Ok(())
    }
}

fn small_config() -> StudyConfig {
    StudyConfig {
        demo_sample_sizes: vec![100, 1_000],
        log_max_exponent: 3.0,
        log_points: 10,
        milestones: vec![100, 1_000],
        distribution_sample_sizes: vec![200, 400],
        repetitions: 50,
        output_dir: PathBuf::from("figures"),
        ..StudyConfig::default()
    }
}

#[test]
fn parts_are_reported_in_order() {
    let cfg = small_config();
    let mut reporter = RecordingReporter::default();
    run_analysis(&cfg, &mut reporter).unwrap();

    let expected = [
        "banner 3.1416",
        "section Part 1: Monte Carlo π Estimator",
        "demonstration 2",
        "section Part 2: Convergence with Sample Size",
        "convergence 10",
        "render convergence",
        "section Part 3: Sampling Distribution and Central Limit Theorem",
        "distribution 200",
        "distribution 400",
        "render distributions",
        "finished 2",
    ];
    assert_eq!(reporter.events, expected);
}

#[test]
fn summary_collects_every_part() {
    let cfg = small_config();
    let summary = run_analysis(&cfg, &mut RecordingReporter::default()).unwrap();

    assert_eq!(summary.demonstration.len(), 2);
    assert_eq!(summary.demonstration[0].samples, 100);
    assert_eq!(summary.demonstration[0].inside, 77);
    assert!((summary.demonstration[0].value - 3.08).abs() < 1e-12);

    assert_eq!(summary.convergence.estimates.len(), 10);
    assert_eq!(summary.convergence.milestones.len(), 2);

    assert_eq!(summary.distributions.len(), 2);
    for dist in &summary.distributions {
        assert_eq!(dist.estimates.len(), 50);
    }

    assert_eq!(
        summary.outputs,
        vec![
            PathBuf::from("figures/pi_convergence.png"),
            PathBuf::from("figures/sampling_distributions.png"),
        ]
    );
}

#[test]
fn runs_are_reproducible() {
    let cfg = small_config();
    let a = run_analysis(&cfg, &mut RecordingReporter::default()).unwrap();
    let b = run_analysis(&cfg, &mut RecordingReporter::default()).unwrap();

    assert_eq!(a.demonstration, b.demonstration);
    assert_eq!(a.convergence, b.convergence);
    assert_eq!(a.distributions, b.distributions);
}

#[test]
fn invalid_config_stops_before_reporting() {
    let cfg = StudyConfig {
        repetitions: 2,
        ..small_config()
    };
    let mut reporter = RecordingReporter::default();
    let err = run_analysis(&cfg, &mut reporter).unwrap_err();

    assert!(err.to_string().contains("repetitions"));
    assert!(reporter.events.is_empty());
}
