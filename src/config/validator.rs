//! Configuration validation

use super::*;
use crate::distribution::pareto;
use anyhow::{Context, Result};

/// Validate complete run configuration
pub fn validate_run_config(config: &RunConfig) -> Result<()> {
    let (alpha, beta) = match (config.alpha, config.beta) {
        (Some(alpha), Some(beta)) => (alpha, beta),
        (None, None) => anyhow::bail!(
            "alpha and beta are required (pass --alpha/--beta, set them in the config file, or resume with --state-file from a bound generator)"
        ),
        (Some(_), None) => anyhow::bail!("beta is required when alpha is set"),
        (None, Some(_)) => anyhow::bail!("alpha is required when beta is set"),
    };
    pareto::validate(alpha, beta).context("Invalid distribution parameters")?;

    if config.count == 0 {
        anyhow::bail!("count must be at least 1");
    }

    validate_source(&config.source)?;

    Ok(())
}

/// Validate uniform source options
///
/// State layout is checked when the generator is built; this only catches
/// option combinations that can never work.
fn validate_source(source: &OwnedOptions) -> Result<()> {
    if let Some(ref seed) = source.seed {
        seed.validate().context("Invalid seed")?;
    }
    if let Some(ref state) = source.state {
        if state.is_empty() {
            anyhow::bail!("state must not be empty");
        }
    }
    Ok(())
}
