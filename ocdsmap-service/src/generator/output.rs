//! CSV serialization of a finished workbook.
//!
//! Files are only written once the whole workbook has been built, so a
//! generation failure leaves no partial output behind.

use crate::generator::{GeneratorResult, Workbook};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// A sheet written to disk
#[derive(Debug, Clone)]
pub struct WrittenSheet {
    /// Output file path
    pub file: PathBuf,
    /// Localized display title of the sheet
    pub title: String,
}

/// Write every sheet of the workbook to `<dir>/<key>_mapping.csv`.
///
/// Cells containing the delimiter, quotes or newlines are quoted with
/// doubled-quote escaping (the `csv` crate's default excel-compatible
/// dialect).
///
/// # Errors
/// Fails on directory creation, file creation or CSV write errors.
pub fn write_workbook(workbook: &Workbook, dir: &Path) -> GeneratorResult<Vec<WrittenSheet>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(workbook.sheets.len());
    for sheet in &workbook.sheets {
        let file = dir.join(format!("{}_mapping.csv", sheet.key));
        let mut writer = csv::Writer::from_path(&file)?;
        for record in &sheet.records {
            writer.write_record(record)?;
        }
        writer.flush()?;
        info!(file = %file.display(), title = %sheet.title, rows = sheet.records.len(), "wrote sheet");
        written.push(WrittenSheet {
            file,
            title: sheet.title.clone(),
        });
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Sheet;
    use pretty_assertions::assert_eq;

    fn workbook() -> Workbook {
        Workbook {
            sheets: vec![Sheet {
                key: "general".to_string(),
                title: "(OCDS) 1. General (all stages)".to_string(),
                records: vec![
                    vec!["title".into(), "0".into(), "A, quoted \"cell\"".into()],
                    vec!["field".into(), "0".into(), "ocid".into()],
                ],
            }],
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_workbook(&workbook(), dir.path()).unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].file.ends_with("general_mapping.csv"));

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&written[0].file)
            .unwrap();
        let records: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        assert_eq!(records, workbook().sheets[0].records);
    }
}
