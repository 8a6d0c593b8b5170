//! Reference data
//!
//! The harmful-ingredient table loaded once at startup from a two-column
//! CSV resource, plus the fixed condition risk table. A missing or
//! malformed table is fatal: the process refuses to start without it.

mod conditions;

pub use conditions::{condition_names, risk_terms_for, CONDITION_RISKS};

use std::fs::File;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading the harmful-ingredient table.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("cannot open reference table {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read reference table: {0}")]
    Csv(#[from] csv::Error),
    #[error("reference table row {row} has {found} column(s), expected at least 2")]
    ShortRow { row: usize, found: usize },
}

/// One validated row of the harmful-ingredient table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarmfulIngredient {
    /// Ingredient name as it appears in the table.
    pub name: String,
    /// Documented effect, reported verbatim as the match reason.
    pub effect: String,
}

/// In-memory reference tables for one process lifetime.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    /// Harmful-ingredient rows in table order. Duplicate names are kept;
    /// each duplicate row produces its own match.
    pub harmful: Vec<HarmfulIngredient>,
}

impl ReferenceData {
    /// Load the harmful-ingredient table from `path`.
    ///
    /// The first row is a header and is skipped. Rows with an empty
    /// ingredient cell are skipped. Rows with fewer than two columns are
    /// rejected so malformed data fails at load time, not match time.
    pub fn load(path: &Path) -> Result<Self, ReferenceError> {
        let file = File::open(path).map_err(|source| ReferenceError::Open {
            path: path.display().to_string(),
            source,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let mut harmful = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            // 1-based data row, counting the header as row 1
            let row = idx + 2;

            let name = record.get(0).unwrap_or("").trim();
            if name.is_empty() {
                debug!(row, "skipping row with empty ingredient cell");
                continue;
            }
            if record.len() < 2 {
                return Err(ReferenceError::ShortRow {
                    row,
                    found: record.len(),
                });
            }

            harmful.push(HarmfulIngredient {
                name: name.to_string(),
                effect: record.get(1).unwrap_or("").trim().to_string(),
            });
        }

        info!(
            entries = harmful.len(),
            path = %path.display(),
            "loaded harmful-ingredient table"
        );
        Ok(Self { harmful })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_table(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_skips_header() {
        let file = write_table("ingredient,effect\nsugar,raises blood glucose\n");
        let data = ReferenceData::load(file.path()).unwrap();
        assert_eq!(data.harmful.len(), 1);
        assert_eq!(data.harmful[0].name, "sugar");
        assert_eq!(data.harmful[0].effect, "raises blood glucose");
    }

    #[test]
    fn test_load_skips_empty_ingredient_rows() {
        let file = write_table("ingredient,effect\n,orphan effect\nsugar,raises blood glucose\n");
        let data = ReferenceData::load(file.path()).unwrap();
        assert_eq!(data.harmful.len(), 1);
        assert_eq!(data.harmful[0].name, "sugar");
    }

    #[test]
    fn test_load_keeps_duplicate_rows_in_order() {
        let file =
            write_table("ingredient,effect\nsugar,first effect\nsalt,retains water\nsugar,second effect\n");
        let data = ReferenceData::load(file.path()).unwrap();
        let names: Vec<&str> = data.harmful.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["sugar", "salt", "sugar"]);
        assert_eq!(data.harmful[2].effect, "second effect");
    }

    #[test]
    fn test_load_rejects_short_rows() {
        let file = write_table("ingredient,effect\nsugar\n");
        let err = ReferenceData::load(file.path()).unwrap_err();
        match err {
            ReferenceError::ShortRow { row, found } => {
                assert_eq!(row, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = ReferenceData::load(Path::new("/nonexistent/table.csv")).unwrap_err();
        assert!(matches!(err, ReferenceError::Open { .. }));
    }
}
