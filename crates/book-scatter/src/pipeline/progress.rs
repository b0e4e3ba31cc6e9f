//! Progress reporting for the scatter data pipeline.
//!
//! The pipeline emits one update when each stage starts and one when it
//! finishes, carrying the row count at that point.
//!
//! # Example
//!
//! ```rust,ignore
//! use book_scatter::ScatterPipeline;
//!
//! let summary = ScatterPipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{}] {}", update.stage.display_name(), update.message);
//!     })
//!     .build()?
//!     .run()?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the scatter data pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Decompressing and parsing the source dataset
    Loading,
    /// Selecting working fields and deriving blurb length
    Extracting,
    /// Coercing to numbers and dropping incomplete rows
    Cleaning,
    /// Computing percentile bounds and clamping
    Clipping,
    /// Subsampling to the row cap
    Sampling,
    /// Serializing the JSON array
    Writing,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline failed with an error
    Failed,
}

impl PipelineStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Dataset",
            Self::Extracting => "Extracting Fields",
            Self::Cleaning => "Cleaning Data",
            Self::Clipping => "Clipping Outliers",
            Self::Sampling => "Sampling Rows",
            Self::Writing => "Writing Output",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }
}

/// A single progress notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current pipeline stage
    pub stage: PipelineStage,

    /// Human-readable message describing current activity
    pub message: String,

    /// Number of rows in the table at this point, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
}

impl ProgressUpdate {
    pub fn new(stage: PipelineStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
            rows: None,
        }
    }

    /// Creates an update that carries the current row count.
    pub fn with_rows(stage: PipelineStage, rows: usize, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
            rows: Some(rows),
        }
    }

    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(PipelineStage::Complete, message)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(PipelineStage::Failed, message)
    }
}

/// Trait for receiving progress updates from the pipeline.
///
/// Implementations must be `Send + Sync` so the pipeline itself stays `Send`.
pub trait ProgressReporter: Send + Sync {
    /// Called at the start and end of each stage.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_stage_display_name() {
        assert_eq!(PipelineStage::Clipping.display_name(), "Clipping Outliers");
        assert_eq!(PipelineStage::Writing.display_name(), "Writing Output");
    }

    #[test]
    fn test_update_with_rows() {
        let update = ProgressUpdate::with_rows(PipelineStage::Cleaning, 42, "Cleaned");
        assert_eq!(update.rows, Some(42));
        assert_eq!(update.stage, PipelineStage::Cleaning);
    }

    #[test]
    fn test_update_serialization() {
        let update = ProgressUpdate::new(PipelineStage::Loading, "Loading");
        let json = serde_json::to_string(&update).unwrap();
        assert!(json.contains("\"stage\":\"loading\""));
        assert!(!json.contains("rows"));
    }

    #[test]
    fn test_closure_reporter() {
        let seen = Mutex::new(Vec::new());
        let reporter = ClosureProgressReporter::new(|update: ProgressUpdate| {
            seen.lock().unwrap().push(update.stage);
        });

        reporter.report(ProgressUpdate::new(PipelineStage::Loading, "a"));
        reporter.report(ProgressUpdate::complete("b"));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![PipelineStage::Loading, PipelineStage::Complete]
        );
    }
}
