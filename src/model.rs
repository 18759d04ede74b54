// Core structs: PriceRecord, CatalogLoadResult and the error taxonomy
use std::fmt;
use thiserror::Error;

/// One normalized row of a vendor price list.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub name: String,
    pub price: f64,
    pub weight: f64,
    pub source_file: String,
    /// `price / weight`, or `0.0` when the weight is not positive.
    pub price_per_kg: f64,
}

impl PriceRecord {
    pub fn new(name: String, price: f64, weight: f64, source_file: String) -> Self {
        let price_per_kg = if weight > 0.0 { price / weight } else { 0.0 };
        Self {
            name,
            price,
            weight,
            source_file,
            price_per_kg,
        }
    }

    /// False when `price_per_kg` holds the zero sentinel rather than a real ratio.
    pub fn is_ratable(&self) -> bool {
        self.weight > 0.0
    }
}

/// A file that could not be read or parsed as CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct FileError {
    pub file: String,
    pub error: String,
}

/// Row counts for a file that was parsed successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub file: String,
    pub rows_loaded: usize,
    pub rows_skipped: usize,
}

/// Outcome of one load cycle. Built once, never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogLoadResult {
    pub records: Vec<PriceRecord>,
    pub file_errors: Vec<FileError>,
    pub files: Vec<FileReport>,
}

impl CatalogLoadResult {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn skipped_rows(&self) -> usize {
        self.files.iter().map(|f| f.rows_skipped).sum()
    }

    pub fn unratable_records(&self) -> usize {
        self.records.iter().filter(|r| !r.is_ratable()).count()
    }
}

/// Logical fields a vendor row has to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Price,
    Weight,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Price => write!(f, "price"),
            Field::Weight => write!(f, "weight"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationReason {
    MissingField,
    UnparsableNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("missing {field} field")]
    MissingField { field: Field },
    #[error("unparsable {field} value {value:?}")]
    UnparsableNumber { field: Field, value: String },
}

impl NormalizationError {
    pub fn field(&self) -> Field {
        match self {
            NormalizationError::MissingField { field }
            | NormalizationError::UnparsableNumber { field, .. } => *field,
        }
    }

    pub fn reason(&self) -> NormalizationReason {
        match self {
            NormalizationError::MissingField { .. } => NormalizationReason::MissingField,
            NormalizationError::UnparsableNumber { .. } => NormalizationReason::UnparsableNumber,
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot format report: {0}")]
    Format(#[from] fmt::Error),
}
