//! CLI argument parsing using clap

use super::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// pareto-type1 - Pareto (Type I) pseudorandom number generator
#[derive(Parser, Debug)]
#[command(name = "pareto-type1")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Shape parameter (alpha > 0)
    #[arg(short = 'a', long, allow_negative_numbers = true)]
    pub alpha: Option<f64>,

    /// Scale parameter (beta > 0), also the minimum of every sample
    #[arg(short = 'b', long, allow_negative_numbers = true)]
    pub beta: Option<f64>,

    /// Seed for the Mersenne Twister uniform source
    #[arg(short = 's', long, env = "PARETO_SEED")]
    pub seed: Option<u32>,

    /// Resume from a snapshot written by --save-state
    #[arg(long, conflicts_with = "seed")]
    pub state_file: Option<PathBuf>,

    /// Adopt the loaded state buffer instead of copying it
    #[arg(long)]
    pub no_copy: bool,

    /// Number of samples to draw
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file (TOML, or JSON with a .json extension)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write the generator snapshot here after sampling
    #[arg(long)]
    pub save_state: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.alpha.is_some() != self.beta.is_some() {
            anyhow::bail!("--alpha and --beta must be given together");
        }

        if self.count == Some(0) {
            anyhow::bail!("count must be at least 1");
        }

        if self.no_copy && self.state_file.is_none() {
            anyhow::bail!("--no-copy only applies together with --state-file");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pareto-type1").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_basic() {
        let cli = parse(&["--alpha", "2", "--beta", "3", "-n", "5", "--seed", "297"]);
        assert_eq!(cli.alpha, Some(2.0));
        assert_eq!(cli.beta, Some(3.0));
        assert_eq!(cli.count, Some(5));
        assert_eq!(cli.seed, Some(297));
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_parse_format() {
        let cli = parse(&["-a", "2", "-b", "1", "--format", "json"]);
        assert_eq!(cli.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_negative_params_reach_validation() {
        let cli = parse(&["--alpha", "-1", "--beta", "2"]);
        assert_eq!(cli.alpha, Some(-1.0));
    }

    #[test]
    fn test_validate_params_together() {
        assert!(parse(&["--alpha", "2"]).validate().is_err());
        assert!(parse(&["--beta", "2"]).validate().is_err());
    }

    #[test]
    fn test_validate_count() {
        assert!(parse(&["-a", "2", "-b", "1", "-n", "0"]).validate().is_err());
    }

    #[test]
    fn test_validate_no_copy_needs_state_file() {
        assert!(parse(&["--no-copy"]).validate().is_err());
        assert!(parse(&["--no-copy", "--state-file", "s.json"]).validate().is_ok());
    }

    #[test]
    fn test_seed_conflicts_with_state_file() {
        let result = Cli::try_parse_from(["pareto-type1", "--seed", "1", "--state-file", "s.json"]);
        assert!(result.is_err());
    }
}
