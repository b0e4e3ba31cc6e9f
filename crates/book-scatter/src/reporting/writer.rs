//! JSON array writer for the scatter plot.

use crate::error::{Result, ResultExt};
use crate::types::{ScatterField, ScatterPoint, WriteReport};
use crate::utils::float_column;
use polars::prelude::*;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Writes the sampled table as a compact JSON array of [`ScatterPoint`]s.
#[derive(Debug, Clone)]
pub struct ScatterWriter {
    output_path: PathBuf,
    size_limit_bytes: u64,
}

impl ScatterWriter {
    pub fn new(output_path: impl Into<PathBuf>, size_limit_bytes: u64) -> Self {
        Self {
            output_path: output_path.into(),
            size_limit_bytes,
        }
    }

    /// Convert the working table into output records, preserving row order.
    pub fn points(df: &DataFrame) -> Result<Vec<ScatterPoint>> {
        let [pages, blurb, reviews, rating] =
            ScatterField::ALL.map(|field| float_column(df, field.working_column()));
        let (pages, blurb, reviews, rating) = (pages?, blurb?, reviews?, rating?);

        Ok((0..df.height())
            .map(|i| ScatterPoint {
                pages: pages[i],
                blurb: blurb[i],
                reviews: reviews[i],
                rating: rating[i],
            })
            .collect())
    }

    /// Serialize `df` to the output path and measure the result.
    ///
    /// The array is written to a temporary file next to the destination and
    /// renamed into place, so a failed write never leaves a partial file.
    pub fn write(&self, df: &DataFrame) -> Result<WriteReport> {
        let points = Self::points(df)?;

        let dir = match self.output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let tmp = NamedTempFile::new_in(dir).context("Failed to create temporary output file")?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer(&mut writer, &points)?;
            writer.flush().context("Failed to flush output")?;
        }

        let file = tmp
            .persist(&self.output_path)
            .map_err(|e| e.error)
            .context(format!(
                "Failed to write {}",
                self.output_path.display()
            ))?;
        let file_size_bytes = file.metadata().context("Failed to stat output file")?.len();

        let report = WriteReport {
            path: self.output_path.display().to_string(),
            records_written: points.len(),
            file_size_bytes,
            size_limit_bytes: self.size_limit_bytes,
        };

        info!(
            "Wrote {} records to {} ({} bytes)",
            report.records_written, report.path, report.file_size_bytes
        );
        if report.exceeds_limit() {
            warn!("{}", size_warning(&report));
        }

        Ok(report)
    }
}

/// User-facing message for an output over its size budget.
pub fn size_warning(report: &WriteReport) -> String {
    format!(
        "File size ({} bytes) exceeds {} limit.",
        report.file_size_bytes,
        format_limit(report.size_limit_bytes)
    )
}

fn format_limit(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}
