use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use stimulant_pk::config::Config;
use stimulant_pk::output;
use stimulant_pk::params::Metabolism;

#[derive(Parser)]
#[command(name = "stimulant_pk")]
#[command(about = "Concentration curves for IR and ER stimulant doses")]
struct Cli {
    /// Scenario file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "results")]
    output: PathBuf,

    /// Metabolism preset: slow, medium or fast (overrides the scenario file)
    #[arg(short, long)]
    metabolism: Option<Metabolism>,

    /// Random seed for dose colours
    #[arg(short, long)]
    seed: Option<u64>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::from_file(path)
                .with_context(|| format!("loading scenario from {:?}", path))?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => Config::default(),
    };
    if let Some(metabolism) = cli.metabolism {
        config.metabolism = metabolism;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let mut session = config.build_session().context("building session")?;
    if session.doses().is_empty() {
        warn!("No doses configured, starting with the default dose");
        session.add_default_dose();
    }
    info!("{}", session.params().describe());

    let results = session.recompute();
    info!(
        "Simulated {} doses over {} time points (peak total {:.2})",
        results.per_dose.len(),
        results.times.len(),
        results.max_total()
    );

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("creating output directory {:?}", cli.output))?;
    output::save_results(&results, session.doses().list(), session.params(), &cli.output)
        .context("saving results")?;
    info!("Results saved to {:?}", cli.output);

    Ok(())
}
