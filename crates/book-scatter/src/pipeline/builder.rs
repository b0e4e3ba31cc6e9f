//! Main scatter data pipeline module.
//!
//! This module provides the `ScatterPipeline` struct and builder that chain
//! the stages from the compressed dataset to the JSON array.

use crate::cleaner::DataCleaner;
use crate::config::ScatterConfig;
use crate::error::{Result, ScatterError};
use crate::extractor::FieldExtractor;
use crate::loader::DatasetLoader;
use crate::pipeline::outliers::OutlierClipper;
use crate::pipeline::progress::{
    ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate,
};
use crate::pipeline::sampler::RowSampler;
use crate::reporting::{size_warning, ScatterWriter};
use crate::types::RunSummary;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Warning recorded when no row survives cleaning.
pub const EMPTY_DATASET_WARNING: &str = "No rows survived cleaning; wrote an empty array.";

/// The scatter data pipeline.
///
/// Use [`ScatterPipeline::builder()`] to create a pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use book_scatter::{ScatterConfig, ScatterPipeline};
///
/// let summary = ScatterPipeline::builder()
///     .config(ScatterConfig::builder().max_rows(1000).build()?)
///     .on_progress(|update| println!("{}", update.message))
///     .build()?
///     .run()?;
///
/// println!("Final file size: {} bytes", summary.output.file_size_bytes);
/// ```
pub struct ScatterPipeline {
    config: ScatterConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    clipper: OutlierClipper,
    sampler: RowSampler,
    writer: ScatterWriter,
}

// Library users may run the pipeline on a worker thread.
static_assertions::assert_impl_all!(ScatterPipeline: Send);

impl ScatterPipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> ScatterPipelineBuilder {
        ScatterPipelineBuilder::default()
    }

    pub fn config(&self) -> &ScatterConfig {
        &self.config
    }

    /// Run every stage and write the output file.
    ///
    /// On error nothing is written at the output path.
    pub fn run(&self) -> Result<RunSummary> {
        match self.run_internal() {
            Ok(summary) => {
                self.report_progress(ProgressUpdate::complete(format!(
                    "Successfully created {}",
                    summary.output.path
                )));
                Ok(summary)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn stage_done(&self, stage: PipelineStage, rows: usize, message: impl Into<String>) {
        self.report_progress(ProgressUpdate::with_rows(stage, rows, message));
    }

    fn run_internal(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut warnings = Vec::new();

        info!(
            "Starting scatter pipeline: {} -> {}",
            self.config.input_path.display(),
            self.config.output_path.display()
        );

        // Step 1: Load
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Loading,
            format!("Loading {}...", self.config.input_path.display()),
        ));
        let raw = DatasetLoader::load(&self.config.input_path)?;
        let rows_loaded = raw.height();
        self.stage_done(PipelineStage::Loading, rows_loaded, "Dataset loaded");

        // Step 2: Extract
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Extracting,
            "Extracting fields...",
        ));
        let working = FieldExtractor::extract(&raw)?;
        drop(raw);
        self.stage_done(PipelineStage::Extracting, working.height(), "Fields extracted");

        // Step 3: Clean
        self.report_progress(ProgressUpdate::new(PipelineStage::Cleaning, "Cleaning data..."));
        let cleaned = DataCleaner::clean(&working)?;
        let rows_cleaned = cleaned.height();
        self.stage_done(PipelineStage::Cleaning, rows_cleaned, "Cleaning complete");

        if rows_cleaned == 0 {
            warn!("{}", EMPTY_DATASET_WARNING);
            warnings.push(EMPTY_DATASET_WARNING.to_string());
        }

        // Step 4: Clip
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Clipping,
            "Clipping outliers...",
        ));
        let (clipped, bounds) = self.clipper.clip(&cleaned)?;
        let rows_clipped = clipped.height();
        self.stage_done(PipelineStage::Clipping, rows_clipped, "Outliers clipped");

        // Step 5: Sample
        self.report_progress(ProgressUpdate::new(PipelineStage::Sampling, "Sampling rows..."));
        let sampled = self.sampler.sample(&clipped)?;
        self.stage_done(PipelineStage::Sampling, sampled.height(), "Sampling complete");

        // Step 6: Write
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Writing,
            format!("Writing {}...", self.config.output_path.display()),
        ));
        let output = self.writer.write(&sampled)?;
        self.stage_done(PipelineStage::Writing, output.records_written, "Output written");

        if output.exceeds_limit() {
            warnings.push(size_warning(&output));
        }

        let summary = RunSummary {
            input_path: self.config.input_path.display().to_string(),
            rows_loaded,
            rows_cleaned,
            rows_clipped,
            rows_written: output.records_written,
            bounds,
            output,
            warnings,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Pipeline complete: {} of {} rows written in {}ms",
            summary.rows_written, summary.rows_loaded, summary.duration_ms
        );
        Ok(summary)
    }
}

/// Builder for [`ScatterPipeline`].
#[derive(Default)]
pub struct ScatterPipelineBuilder {
    config: Option<ScatterConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl ScatterPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: ScatterConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a closure to receive progress updates.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> Result<ScatterPipeline> {
        let config = self.config.unwrap_or_default();
        config.validate().map_err(ScatterError::from)?;

        Ok(ScatterPipeline {
            clipper: OutlierClipper::new(config.lower_percentile, config.upper_percentile),
            sampler: RowSampler::new(config.max_rows, config.sample_seed),
            writer: ScatterWriter::new(config.output_path.clone(), config.size_limit_bytes),
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}
