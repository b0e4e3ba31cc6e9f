//! Book Scatter Data Library
//!
//! Turns the GoodReads 100k books dataset into a compact JSON array of
//! points for a four-dimensional scatter plot.
//!
//! # Overview
//!
//! The pipeline runs these stages in order:
//!
//! - **Loading**: Decompress the `.xz` archive and parse it as CSV, every column as text
//! - **Extracting**: Keep `pages`, `reviews` and `rating`, and derive the blurb length from `desc`
//! - **Cleaning**: Coerce to numbers and drop every row with a missing or non-numeric field
//! - **Clipping**: Clamp each field to its 0.5th-99.5th percentile range
//! - **Sampling**: Keep at most 5000 rows, chosen with a fixed seed
//! - **Writing**: Serialize `[{"pages", "blurb", "reviews", "rating"}, ...]` and check its size
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use book_scatter::{ScatterConfig, ScatterPipeline};
//!
//! let summary = ScatterPipeline::builder()
//!     .config(ScatterConfig::default())
//!     .build()?
//!     .run()?;
//!
//! println!("Successfully created {}", summary.output.path);
//! ```
//!
//! # Configuration
//!
//! Every constant of the run can be overridden through [`ScatterConfig`]:
//!
//! ```rust,ignore
//! use book_scatter::ScatterConfig;
//!
//! let config = ScatterConfig::builder()
//!     .input_path("books.csv.xz")
//!     .output_path("points.json")
//!     .max_rows(1000)
//!     .percentiles(1.0, 99.0)
//!     .build()?;
//! ```
//!
//! # Progress Reporting
//!
//! ```rust,ignore
//! use book_scatter::ScatterPipeline;
//!
//! let summary = ScatterPipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:?}] {} ({:?} rows)", update.stage, update.message, update.rows);
//!     })
//!     .build()?
//!     .run()?;
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod pipeline;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{DataCleaner, RowValidation};
pub use config::{ConfigValidationError, ScatterConfig, ScatterConfigBuilder};
pub use error::{Result as ScatterResult, ResultExt, ScatterError};
pub use extractor::FieldExtractor;
pub use loader::{Compression, DatasetLoader};
pub use pipeline::{
    ClosureProgressReporter, OutlierClipper, PipelineStage, ProgressReporter, ProgressUpdate,
    RowSampler, ScatterPipeline, ScatterPipelineBuilder,
};
pub use reporting::ScatterWriter;
pub use types::{ClipBounds, FieldBounds, RunSummary, ScatterField, ScatterPoint, WriteReport};
pub use utils::{coerce_numeric, linear_quantile, stringified_len};
