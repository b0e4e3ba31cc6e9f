//! Output module.
//!
//! Serializes the sampled table as the scatter plot's JSON array and
//! measures the resulting file against its size budget.
//!
//! # Example
//!
//! ```rust,ignore
//! use book_scatter::reporting::ScatterWriter;
//!
//! let report = ScatterWriter::new("scatter_data.json", 2 * 1024 * 1024).write(&sampled)?;
//! println!("Final file size: {} bytes", report.file_size_bytes);
//! ```

mod writer;

pub use writer::{size_warning, ScatterWriter};
