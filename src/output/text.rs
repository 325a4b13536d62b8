//! Human-readable text output

use anyhow::{Context, Result};
use std::io::Write;

/// Write one sample per line
pub fn write_samples<W: Write>(out: &mut W, samples: &[f64]) -> Result<()> {
    for sample in samples {
        writeln!(out, "{}", sample).context("Failed to write sample")?;
    }
    out.flush().context("Failed to flush output")?;
    Ok(())
}
