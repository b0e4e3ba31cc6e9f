//! Dataset loading.
//!
//! Opens the source file, decompresses it when needed and parses it into a
//! `DataFrame` whose columns are all text. Type coercion is left to the
//! cleaner so that every cell goes through the same rules.

mod compression;

pub use compression::Compression;

use crate::error::{Result, ScatterError};
use crate::types::ScatterField;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::{debug, info};

/// Loads the source dataset into memory.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load the dataset at `path`.
    ///
    /// # Errors
    ///
    /// - [`ScatterError::InputNotFound`] if the file does not exist or cannot be opened.
    /// - [`ScatterError::Parse`] if the content cannot be decompressed, is not UTF-8,
    ///   is not valid CSV, or lacks one of the required columns.
    pub fn load(path: &Path) -> Result<DataFrame> {
        info!("Loading dataset from: {}", path.display());

        let file = File::open(path).map_err(|e| {
            debug!("Could not open {}: {}", path.display(), e);
            ScatterError::InputNotFound {
                path: path.to_path_buf(),
            }
        })?;

        let compression = Compression::from_path(path);
        debug!("Detected compression: {:?}", compression);

        let content = Self::read_text(compression.reader(file), path)?;
        let df = Self::parse_csv(content)?;
        Self::require_columns(&df)?;

        info!("Dataset loaded successfully: {:?}", df.shape());
        Ok(df)
    }

    /// Drain the (possibly decompressing) reader into a UTF-8 string.
    fn read_text(mut reader: Box<dyn Read>, path: &Path) -> Result<String> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(|e| {
            ScatterError::Parse(format!("could not decode {}: {}", path.display(), e))
        })?;
        debug!("Read {} decompressed bytes", bytes.len());

        String::from_utf8(bytes).map_err(|e| {
            ScatterError::Parse(format!("{} is not valid UTF-8: {}", path.display(), e))
        })
    }

    /// Parse comma-separated text with a header row, every column as text.
    pub fn parse_csv(content: String) -> Result<DataFrame> {
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
            .into_reader_with_file_handle(Cursor::new(content))
            .finish()
            .map_err(|e| ScatterError::Parse(e.to_string()))
    }

    /// Check that every source column the pipeline reads is present.
    fn require_columns(df: &DataFrame) -> Result<()> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let missing: Vec<&str> = ScatterField::ALL
            .iter()
            .map(|f| f.source_column())
            .filter(|name| !names.iter().any(|n| n == name))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ScatterError::Parse(format!(
                "required columns missing: {}",
                missing.join(", ")
            )))
        }
    }
}
