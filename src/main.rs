use clap::Parser;
use montecarlo_pi::logging::init_tracing;
use montecarlo_pi::{run_analysis, ConsoleReporter, StudyConfig};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Monte Carlo π estimation with convergence and central limit theorem studies"
)]
struct Cli {}

fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();
    init_tracing();

    let mut reporter = ConsoleReporter::stdout();
    run_analysis(&StudyConfig::default(), &mut reporter)?;
    Ok(())
}
