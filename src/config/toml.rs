//! Configuration and snapshot file parsing
//!
//! Config files are TOML unless the path ends in `.json`. Both are turned into
//! the same untyped option bag, so generator options go through
//! [`OwnedOptions::from_value`] no matter which format they came from.

use super::cli::Cli;
use super::*;
use crate::generator::{PrngSnapshot, NAME, SNAPSHOT_TYPE};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Run settings that are not generator options
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    alpha: Option<f64>,
    beta: Option<f64>,
    count: Option<usize>,
    format: Option<OutputFormat>,
}

/// Parse a configuration file
pub fn parse_config_file(path: &Path) -> Result<RunConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    let result = if is_json {
        parse_json_string(&contents)
    } else {
        parse_toml_string(&contents)
    };
    result.with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<RunConfig> {
    let table: ::toml::Value =
        ::toml::from_str(contents).context("Failed to parse TOML configuration")?;
    let value = serde_json::to_value(table).context("Failed to convert TOML configuration")?;
    parse_config_value(&value)
}

/// Parse JSON configuration from string
pub fn parse_json_string(contents: &str) -> Result<RunConfig> {
    let value: Value =
        serde_json::from_str(contents).context("Failed to parse JSON configuration")?;
    parse_config_value(&value)
}

/// Build a run configuration from an untyped option bag
pub fn parse_config_value(value: &Value) -> Result<RunConfig> {
    let source = OwnedOptions::from_value(value)?;
    let settings = FileSettings::deserialize(value).context("Invalid run settings")?;

    let defaults = RunConfig::default();
    Ok(RunConfig {
        alpha: settings.alpha,
        beta: settings.beta,
        count: settings.count.unwrap_or(defaults.count),
        format: settings.format.unwrap_or(defaults.format),
        source,
    })
}

/// Read a generator snapshot written by `--save-state`
pub fn read_snapshot(path: &Path) -> Result<PrngSnapshot> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file: {}", path.display()))?;

    let snapshot: PrngSnapshot = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse state file: {}", path.display()))?;

    if snapshot.kind != SNAPSHOT_TYPE || snapshot.name != NAME {
        anyhow::bail!(
            "state file {} holds a `{}` snapshot of `{}`, expected `{}` of `{}`",
            path.display(),
            snapshot.kind,
            snapshot.name,
            SNAPSHOT_TYPE,
            NAME
        );
    }

    Ok(snapshot)
}

/// Merge CLI arguments with file configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: RunConfig) -> Result<RunConfig> {
    if let Some(path) = &cli.state_file {
        let snapshot = read_snapshot(path)?;
        config.source.state = Some(snapshot.state);
        config.source.seed = None;

        // Resume with the snapshot's parameters unless overridden below
        if let [alpha, beta] = snapshot.params.as_slice() {
            config.alpha = Some(*alpha);
            config.beta = Some(*beta);
        }
    }

    if let Some(seed) = cli.seed {
        config.source.seed = Some(Seed::Integer(seed));
        config.source.state = None;
    }

    if cli.no_copy {
        config.source.copy = false;
    }

    if let Some(alpha) = cli.alpha {
        config.alpha = Some(alpha);
    }
    if let Some(beta) = cli.beta {
        config.beta = Some(beta);
    }

    if let Some(count) = cli.count {
        config.count = count;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    Ok(config)
}
