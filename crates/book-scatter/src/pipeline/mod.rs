//! Pipeline module.
//!
//! This module provides the scatter data pipeline and the stages that run
//! after cleaning: outlier clipping and row sampling.

mod builder;
pub mod outliers;
pub mod progress;
pub mod sampler;

pub use builder::{ScatterPipeline, ScatterPipelineBuilder, EMPTY_DATASET_WARNING};
pub use outliers::OutlierClipper;
pub use progress::{ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate};
pub use sampler::RowSampler;
