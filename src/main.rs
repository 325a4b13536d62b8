//! pareto-type1 CLI entry point

use anyhow::{Context, Result};
use pareto_type1::config::cli::Cli;
use pareto_type1::config::{toml as config_file, validator, RunConfig, UniformSourceConfig};
use pareto_type1::generator::{factory_with_params_and_options, ParetoGenerator};
use pareto_type1::output;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    cli.validate()?;
    init_tracing(cli.debug);

    let config = build_config_from_cli(&cli)?;
    validator::validate_run_config(&config).context("Configuration validation failed")?;
    tracing::debug!(?config, "resolved configuration");

    let mut generator = build_generator(&config)?;
    let samples: Vec<f64> = (0..config.count).map(|_| generator.sample()).collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::write_samples(&mut out, config.format, &generator, &samples)?;

    if let Some(path) = &cli.save_state {
        output::json::save_snapshot(path, &generator)?;
    }

    Ok(())
}

/// Install the stderr subscriber; `RUST_LOG` wins over `--debug`
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Build configuration from the config file (if any) and CLI arguments
fn build_config_from_cli(cli: &Cli) -> Result<RunConfig> {
    let base = match &cli.config {
        Some(path) => config_file::parse_config_file(path)?,
        None => RunConfig::default(),
    };
    config_file::merge_cli_with_config(cli, base)
}

fn build_generator(config: &RunConfig) -> Result<ParetoGenerator> {
    let (alpha, beta) = match (config.alpha, config.beta) {
        (Some(alpha), Some(beta)) => (alpha, beta),
        _ => anyhow::bail!("alpha and beta are required"),
    };
    let options = UniformSourceConfig::Owned(config.source.clone());
    factory_with_params_and_options(alpha, beta, options).context("Failed to create generator")
}
