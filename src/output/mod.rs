//! Output formatting
//!
//! - **Text**: one sample per line, for piping into other tools
//! - **JSON**: a single document holding the generator snapshot and samples

pub mod json;
pub mod text;

use crate::config::OutputFormat;
use crate::generator::ParetoGenerator;
use anyhow::Result;
use std::io::Write;

/// Write samples in the requested format
pub fn write_samples<W: Write>(
    out: &mut W,
    format: OutputFormat,
    generator: &ParetoGenerator,
    samples: &[f64],
) -> Result<()> {
    match format {
        OutputFormat::Text => text::write_samples(out, samples),
        OutputFormat::Json => json::write_samples(out, generator, samples),
    }
}
