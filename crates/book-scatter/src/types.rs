use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four plotted fields.
///
/// Each field has two names: the column it comes from in the source dataset
/// and the working column used between stages. Output keys are the field
/// names of [`ScatterPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScatterField {
    Pages,
    Blurb,
    Reviews,
    Rating,
}

impl ScatterField {
    /// All fields, in output key order.
    pub const ALL: [ScatterField; 4] = [
        ScatterField::Pages,
        ScatterField::Blurb,
        ScatterField::Reviews,
        ScatterField::Rating,
    ];

    /// Column name in the source dataset.
    pub fn source_column(&self) -> &'static str {
        match self {
            Self::Pages => "pages",
            Self::Blurb => "desc",
            Self::Reviews => "reviews",
            Self::Rating => "rating",
        }
    }

    /// Column name between the extractor and the serializer.
    pub fn working_column(&self) -> &'static str {
        match self {
            Self::Pages => "pages_val",
            Self::Blurb => "blurb_len",
            Self::Reviews => "reviews_val",
            Self::Rating => "rating_val",
        }
    }

    /// Whether the working column is derived rather than coerced from text.
    pub fn is_derived(&self) -> bool {
        matches!(self, Self::Blurb)
    }
}

impl fmt::Display for ScatterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.working_column())
    }
}

/// One output record. Field order here is the key order in the JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub pages: f64,
    pub blurb: f64,
    pub reviews: f64,
    pub rating: f64,
}

impl ScatterPoint {
    pub fn get(&self, field: ScatterField) -> f64 {
        match field {
            ScatterField::Pages => self.pages,
            ScatterField::Blurb => self.blurb,
            ScatterField::Reviews => self.reviews,
            ScatterField::Rating => self.rating,
        }
    }

    pub fn is_finite(&self) -> bool {
        ScatterField::ALL.iter().all(|f| self.get(*f).is_finite())
    }
}

/// Inclusive clipping range for a single field.
///
/// Invariant: `lower <= upper`. A column of identical values yields
/// `lower == upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub lower: f64,
    pub upper: f64,
}

impl FieldBounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// `max(lower, min(value, upper))`.
    ///
    /// Uses `f64::min`/`f64::max` rather than `clamp` so NaN bounds leave the
    /// value untouched instead of panicking; the post-clip validation pass
    /// drops whatever is still not finite.
    #[inline]
    pub fn clip(&self, value: f64) -> f64 {
        self.lower.max(value.min(self.upper))
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Per-field bounds computed once per run from the cleaned, pre-clip data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipBounds {
    pub pages: FieldBounds,
    pub blurb: FieldBounds,
    pub reviews: FieldBounds,
    pub rating: FieldBounds,
}

impl ClipBounds {
    pub fn get(&self, field: ScatterField) -> FieldBounds {
        match field {
            ScatterField::Pages => self.pages,
            ScatterField::Blurb => self.blurb,
            ScatterField::Reviews => self.reviews,
            ScatterField::Rating => self.rating,
        }
    }

    /// Whether every field of `point` lies within its bounds.
    pub fn contains(&self, point: &ScatterPoint) -> bool {
        ScatterField::ALL
            .iter()
            .all(|f| self.get(*f).contains(point.get(*f)))
    }
}

/// Outcome of writing the output file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteReport {
    pub path: String,
    pub records_written: usize,
    pub file_size_bytes: u64,
    pub size_limit_bytes: u64,
}

impl WriteReport {
    pub fn exceeds_limit(&self) -> bool {
        self.file_size_bytes > self.size_limit_bytes
    }
}

/// Summary of a completed run.
///
/// Serialized to stdout by the CLI's `--json` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub input_path: String,
    pub rows_loaded: usize,
    pub rows_cleaned: usize,
    pub rows_clipped: usize,
    pub rows_written: usize,
    /// `None` when the cleaned dataset was empty and clipping was skipped.
    pub bounds: Option<ClipBounds>,
    pub output: WriteReport,
    pub warnings: Vec<String>,
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn rows_dropped(&self) -> usize {
        self.rows_loaded.saturating_sub(self.rows_clipped)
    }
}
