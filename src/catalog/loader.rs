use crate::catalog::discovery::discover_price_files;
use crate::model::{CatalogError, CatalogLoadResult, FileError, FileReport, PriceRecord};
use crate::normalizer::{FieldSynonyms, header_key, normalize};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Trait defining the interface for a catalog loader.
pub trait Loader {
    /// Builds a fresh catalog from the price lists in `dir`. Never fails as a whole.
    fn load(&self, dir: &Path) -> CatalogLoadResult;
}

/// Loads CSV price lists, reconciling vendor column names through `FieldSynonyms`.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    synonyms: FieldSynonyms,
}

/// Records and row counts from one successfully parsed file.
struct ParsedFile {
    records: Vec<PriceRecord>,
    skipped: usize,
}

impl CatalogLoader {
    pub fn new(synonyms: FieldSynonyms) -> Self {
        Self { synonyms }
    }

    /// Parses one price list. The reader (and its file handle) lives only inside this call.
    fn load_file(&self, path: &Path, file_name: &str) -> Result<ParsedFile, CatalogError> {
        let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(header_key).collect();

        let mut parsed = ParsedFile {
            records: Vec::new(),
            skipped: 0,
        };
        let mut record = StringRecord::new();
        while reader.read_record(&mut record)? {
            let row: HashMap<String, String> = headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_owned))
                .collect();

            match normalize(&row, file_name, &self.synonyms) {
                Ok(price_record) => parsed.records.push(price_record),
                Err(e) => {
                    let line = record.position().map_or(0, csv::Position::line);
                    debug!("Skipping {} line {}: {}", file_name, line, e);
                    parsed.skipped += 1;
                }
            }
        }
        Ok(parsed)
    }
}

impl Loader for CatalogLoader {
    fn load(&self, dir: &Path) -> CatalogLoadResult {
        let mut result = CatalogLoadResult::default();

        let files = match discover_price_files(dir) {
            Ok(files) => files,
            Err(e) => {
                warn!("Cannot read directory {}: {}", dir.display(), e);
                result.file_errors.push(FileError {
                    file: dir.display().to_string(),
                    error: e.to_string(),
                });
                return result;
            }
        };
        info!("Found {} price list(s) in {}", files.len(), dir.display());

        for path in files {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            match self.load_file(&path, &file_name) {
                Ok(parsed) => {
                    info!(
                        "Loaded {}: {} record(s), {} row(s) skipped",
                        file_name,
                        parsed.records.len(),
                        parsed.skipped
                    );
                    result.files.push(FileReport {
                        file: file_name,
                        rows_loaded: parsed.records.len(),
                        rows_skipped: parsed.skipped,
                    });
                    result.records.extend(parsed.records);
                }
                Err(e) => {
                    warn!("Error processing file {}: {}", file_name, e);
                    result.file_errors.push(FileError {
                        file: file_name,
                        error: e.to_string(),
                    });
                }
            }
        }

        let unratable = result.unratable_records();
        if unratable > 0 {
            warn!(
                "{} record(s) have no positive weight; their price per kg is reported as 0",
                unratable
            );
        }
        info!(
            "Catalog ready: {} record(s), {} skipped row(s), {} file error(s)",
            result.records.len(),
            result.skipped_rows(),
            result.file_errors.len()
        );
        result
    }
}
