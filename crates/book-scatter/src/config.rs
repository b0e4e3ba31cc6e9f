//! Configuration types for the scatter data pipeline.
//!
//! All parameters default to the fixed constants of the original job; the
//! builder only exists so callers (and tests) can shrink or relocate them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default compressed source dataset.
pub const DEFAULT_INPUT_PATH: &str = "GoodReads_100k_books.csv.xz";

/// Default output artifact.
pub const DEFAULT_OUTPUT_PATH: &str = "scatter_data.json";

/// Maximum number of rows kept after sampling.
pub const DEFAULT_MAX_ROWS: usize = 5000;

/// Seed for the row sampler.
pub const DEFAULT_SAMPLE_SEED: u64 = 42;

/// Lower clipping percentile, in percent.
pub const DEFAULT_LOWER_PERCENTILE: f64 = 0.5;

/// Upper clipping percentile, in percent.
pub const DEFAULT_UPPER_PERCENTILE: f64 = 99.5;

/// Advisory size budget for the output file (2 MiB).
pub const DEFAULT_SIZE_LIMIT_BYTES: u64 = 2 * 1024 * 1024;

/// Configuration for the scatter data pipeline.
///
/// Use [`ScatterConfig::builder()`] to override individual values.
///
/// # Example
///
/// ```rust,ignore
/// use book_scatter::config::ScatterConfig;
///
/// let config = ScatterConfig::builder()
///     .input_path("books.csv.xz")
///     .max_rows(1000)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterConfig {
    /// Source dataset. `.xz` files are decompressed, anything else is read as plain CSV.
    /// Default: "GoodReads_100k_books.csv.xz"
    pub input_path: PathBuf,

    /// Destination of the JSON array.
    /// Default: "scatter_data.json"
    pub output_path: PathBuf,

    /// Row cap applied by the sampler.
    /// Default: 5000
    pub max_rows: usize,

    /// Seed for the sampler's random source.
    /// Default: 42
    pub sample_seed: u64,

    /// Lower clipping percentile (0.0 - 100.0).
    /// Default: 0.5
    pub lower_percentile: f64,

    /// Upper clipping percentile (0.0 - 100.0).
    /// Default: 99.5
    pub upper_percentile: f64,

    /// Output size above which a warning is emitted.
    /// Default: 2097152
    pub size_limit_bytes: u64,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            max_rows: DEFAULT_MAX_ROWS,
            sample_seed: DEFAULT_SAMPLE_SEED,
            lower_percentile: DEFAULT_LOWER_PERCENTILE,
            upper_percentile: DEFAULT_UPPER_PERCENTILE,
            size_limit_bytes: DEFAULT_SIZE_LIMIT_BYTES,
        }
    }
}

impl ScatterConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ScatterConfigBuilder {
        ScatterConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("lower_percentile", self.lower_percentile),
            ("upper_percentile", self.upper_percentile),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigValidationError::InvalidPercentile {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if self.lower_percentile > self.upper_percentile {
            return Err(ConfigValidationError::InvertedPercentiles {
                lower: self.lower_percentile,
                upper: self.upper_percentile,
            });
        }

        if self.max_rows == 0 {
            return Err(ConfigValidationError::InvalidMaxRows(self.max_rows));
        }

        if self.size_limit_bytes == 0 {
            return Err(ConfigValidationError::InvalidSizeLimit(
                self.size_limit_bytes,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid percentile for '{field}': {value} (must be between 0.0 and 100.0)")]
    InvalidPercentile { field: String, value: f64 },

    #[error("Lower percentile {lower} is above upper percentile {upper}")]
    InvertedPercentiles { lower: f64, upper: f64 },

    #[error("Invalid max rows: {0} (must be at least 1)")]
    InvalidMaxRows(usize),

    #[error("Invalid size limit: {0} bytes (must be at least 1)")]
    InvalidSizeLimit(u64),
}

/// Builder for [`ScatterConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ScatterConfigBuilder {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    max_rows: Option<usize>,
    sample_seed: Option<u64>,
    lower_percentile: Option<f64>,
    upper_percentile: Option<f64>,
    size_limit_bytes: Option<u64>,
}

impl ScatterConfigBuilder {
    /// Set the source dataset path.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the output JSON path.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Set the maximum number of rows kept after sampling.
    pub fn max_rows(mut self, rows: usize) -> Self {
        self.max_rows = Some(rows);
        self
    }

    /// Set the sampler seed.
    pub fn sample_seed(mut self, seed: u64) -> Self {
        self.sample_seed = Some(seed);
        self
    }

    /// Set the clipping percentiles.
    ///
    /// # Arguments
    /// * `lower` - Lower percentile in percent (e.g., 0.5)
    /// * `upper` - Upper percentile in percent (e.g., 99.5)
    pub fn percentiles(mut self, lower: f64, upper: f64) -> Self {
        self.lower_percentile = Some(lower);
        self.upper_percentile = Some(upper);
        self
    }

    /// Set the advisory output size budget.
    pub fn size_limit_bytes(mut self, bytes: u64) -> Self {
        self.size_limit_bytes = Some(bytes);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ScatterConfig` or an error if validation fails.
    pub fn build(self) -> Result<ScatterConfig, ConfigValidationError> {
        let config = ScatterConfig {
            input_path: self
                .input_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH)),
            output_path: self
                .output_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            max_rows: self.max_rows.unwrap_or(DEFAULT_MAX_ROWS),
            sample_seed: self.sample_seed.unwrap_or(DEFAULT_SAMPLE_SEED),
            lower_percentile: self.lower_percentile.unwrap_or(DEFAULT_LOWER_PERCENTILE),
            upper_percentile: self.upper_percentile.unwrap_or(DEFAULT_UPPER_PERCENTILE),
            size_limit_bytes: self.size_limit_bytes.unwrap_or(DEFAULT_SIZE_LIMIT_BYTES),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScatterConfig::default();
        assert_eq!(config.input_path, PathBuf::from("GoodReads_100k_books.csv.xz"));
        assert_eq!(config.output_path, PathBuf::from("scatter_data.json"));
        assert_eq!(config.max_rows, 5000);
        assert_eq!(config.sample_seed, 42);
        assert_eq!(config.lower_percentile, 0.5);
        assert_eq!(config.upper_percentile, 99.5);
        assert_eq!(config.size_limit_bytes, 2_097_152);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let built = ScatterConfig::builder().build().unwrap();
        let default = ScatterConfig::default();
        assert_eq!(built.max_rows, default.max_rows);
        assert_eq!(built.sample_seed, default.sample_seed);
        assert_eq!(built.size_limit_bytes, default.size_limit_bytes);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ScatterConfig::builder()
            .input_path("books.csv")
            .output_path("out/points.json")
            .max_rows(100)
            .sample_seed(7)
            .percentiles(1.0, 99.0)
            .size_limit_bytes(1024)
            .build()
            .unwrap();

        assert_eq!(config.input_path, PathBuf::from("books.csv"));
        assert_eq!(config.output_path, PathBuf::from("out/points.json"));
        assert_eq!(config.max_rows, 100);
        assert_eq!(config.sample_seed, 7);
        assert_eq!(config.lower_percentile, 1.0);
        assert_eq!(config.upper_percentile, 99.0);
        assert_eq!(config.size_limit_bytes, 1024);
    }

    #[test]
    fn test_validation_percentile_out_of_range() {
        let result = ScatterConfig::builder().percentiles(-1.0, 99.5).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidPercentile { .. }
        ));
    }

    #[test]
    fn test_validation_inverted_percentiles() {
        let result = ScatterConfig::builder().percentiles(60.0, 40.0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvertedPercentiles { .. }
        ));
    }

    #[test]
    fn test_validation_zero_rows() {
        let result = ScatterConfig::builder().max_rows(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidMaxRows(0)
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "input_path": "data/books.csv.xz",
            "output_path": "public/scatter.json",
            "max_rows": 2500,
            "sample_seed": 1,
            "lower_percentile": 1.0,
            "upper_percentile": 99.0,
            "size_limit_bytes": 1048576
        }"#;

        let config: ScatterConfig = serde_json::from_str(json).expect("Should deserialize");
        assert!(config.validate().is_ok());
        assert_eq!(config.max_rows, 2500);
        assert_eq!(config.output_path.to_str().unwrap(), "public/scatter.json");
    }
}
