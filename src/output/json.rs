//! JSON output formatting
//!
//! Sample runs are written as one document:
//!
//! ```json
//! { "generator": { "type": "PRNG", "name": "pareto-type1", "state": { "type": "Uint32Array", "data": [...] }, "params": [2.0, 3.0] },
//!   "samples": [ ... ] }
//! ```
//!
//! The `generator` entry is the snapshot taken *after* sampling, so it can be
//! fed back with `--state-file` to continue the sequence.

use crate::generator::{ParetoGenerator, PrngSnapshot};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Complete sampling report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Generator snapshot, `null` for external sources
    pub generator: Option<PrngSnapshot>,
    pub samples: Vec<f64>,
}

/// Write samples and the generator snapshot as pretty-printed JSON
pub fn write_samples<W: Write>(out: &mut W, generator: &ParetoGenerator, samples: &[f64]) -> Result<()> {
    let report = JsonReport {
        generator: generator.to_json(),
        samples: samples.to_vec(),
    };
    serde_json::to_writer_pretty(&mut *out, &report).context("Failed to serialize JSON output")?;
    writeln!(out).context("Failed to write JSON output")?;
    out.flush().context("Failed to flush output")?;
    Ok(())
}

/// Save the generator snapshot so a later run can resume from it
pub fn save_snapshot(path: &Path, generator: &ParetoGenerator) -> Result<()> {
    let snapshot = generator
        .to_json()
        .context("Generator has no exportable state (external uniform source)")?;

    let file = File::create(path)
        .with_context(|| format!("Failed to create state file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &snapshot)
        .with_context(|| format!("Failed to write state file: {}", path.display()))?;
    writer.flush().context("Failed to flush state file")?;

    tracing::debug!(path = %path.display(), "saved generator state");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml::read_snapshot;
    use crate::config::UniformSourceConfig;
    use crate::generator::factory_with_params_and_options;
    use tempfile::TempDir;

    #[test]
    fn test_write_samples_report() {
        let mut generator =
            factory_with_params_and_options(2.0, 3.0, UniformSourceConfig::seeded(1)).unwrap();
        let samples: Vec<f64> = (0..3).map(|_| generator.sample()).collect();

        let mut buf = Vec::new();
        write_samples(&mut buf, &generator, &samples).unwrap();

        let report: JsonReport = serde_json::from_slice(&buf).unwrap();
        assert_eq!(report.samples, samples);
        let snapshot = report.generator.unwrap();
        assert_eq!(snapshot.params, vec![2.0, 3.0]);
        assert_eq!(Some(snapshot.state), generator.state());
    }

    #[test]
    fn test_write_samples_external_generator() {
        let generator =
            factory_with_params_and_options(2.0, 3.0, UniformSourceConfig::external(|| 0.5)).unwrap();

        let mut buf = Vec::new();
        write_samples(&mut buf, &generator, &[1.0]).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert!(value["generator"].is_null());
    }

    #[test]
    fn test_save_and_resume() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let mut generator =
            factory_with_params_and_options(2.0, 3.0, UniformSourceConfig::seeded(8)).unwrap();
        generator.sample();
        save_snapshot(&path, &generator).unwrap();

        let snapshot = read_snapshot(&path).unwrap();
        let mut resumed = ParetoGenerator::from_json(snapshot).unwrap();
        for _ in 0..20 {
            assert_eq!(resumed.sample(), generator.sample());
        }
    }

    #[test]
    fn test_save_external_generator_fails() {
        let dir = TempDir::new().unwrap();
        let generator =
            factory_with_params_and_options(2.0, 3.0, UniformSourceConfig::external(|| 0.5)).unwrap();

        assert!(save_snapshot(&dir.path().join("state.json"), &generator).is_err());
    }
}
