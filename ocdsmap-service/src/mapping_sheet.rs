//! Ingestion of the ocdskit mapping-sheet CSV.
//!
//! The mapping sheet is read once and used three ways: as the path to
//! extension-name lookup, as the `schema` passthrough tab, and as the
//! `schema_extensions` passthrough tab.

use crate::generator::{GeneratorError, GeneratorResult};
use indexmap::IndexMap;
use ocdsmap_core::LinkRewrite;
use std::io;
use std::path::Path;

/// An ocdskit mapping sheet: a header row plus data rows of equal width
#[derive(Debug, Clone)]
pub struct MappingSheet {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MappingSheet {
    /// Read a mapping sheet from any reader.
    ///
    /// # Errors
    /// Fails on CSV parse errors, ragged rows, or an empty document.
    pub fn load(reader: impl io::Read) -> GeneratorResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(reader);
        let mut records = csv_reader.records();
        let header: Vec<String> = records
            .next()
            .ok_or_else(|| GeneratorError::MalformedSheet("empty mapping sheet".to_string()))??
            .iter()
            .map(String::from)
            .collect();
        // The reader rejects ragged rows, so every row matches the header.
        let mut rows = Vec::new();
        for record in records {
            rows.push(record?.iter().map(String::from).collect());
        }
        Ok(Self { header, rows })
    }

    /// Read a mapping sheet from a file path
    ///
    /// # Errors
    /// Fails if the file cannot be opened or parsed.
    pub fn from_path(path: &Path) -> GeneratorResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::load(file)
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    fn extension_column(&self) -> GeneratorResult<usize> {
        self.column("extension")
            .or_else(|| self.header.len().checked_sub(1))
            .ok_or_else(|| GeneratorError::MalformedSheet("header is empty".to_string()))
    }

    /// Build the path to extension-name lookup.
    ///
    /// Rows with an empty `path` or `extension` cell are core schema rows
    /// and do not participate.
    ///
    /// # Errors
    /// Fails if the sheet has no `path` column.
    pub fn extension_map(&self) -> GeneratorResult<IndexMap<String, String>> {
        let path_col = self.column("path").ok_or_else(|| {
            GeneratorError::MalformedSheet("mapping sheet has no 'path' column".to_string())
        })?;
        let ext_col = self.extension_column()?;
        let mut map = IndexMap::new();
        for row in &self.rows {
            let path = &row[path_col];
            let extension = &row[ext_col];
            if !path.is_empty() && !extension.is_empty() {
                map.insert(path.clone(), extension.clone());
            }
        }
        Ok(map)
    }

    /// Split into the `schema` and `schema_extensions` passthrough tabs.
    ///
    /// Core rows keep their order with the extension column dropped.
    /// Extension rows move the extension column to the front, drop the
    /// leading section column, and are stable-sorted by their first two
    /// columns. Both tabs get a matching header row, and the `links` column
    /// (if present) undergoes the configured version rewrite.
    ///
    /// # Errors
    /// Fails if the header has fewer than two columns.
    pub fn schema_tabs(
        &self,
        rewrite: Option<&LinkRewrite>,
    ) -> GeneratorResult<(Vec<Vec<String>>, Vec<Vec<String>>)> {
        if self.header.len() < 2 {
            return Err(GeneratorError::MalformedSheet(
                "mapping sheet needs at least two columns".to_string(),
            ));
        }
        let ext_col = self.extension_column()?;
        let links_col = self.column("links");

        let rewrite_links = |mut row: Vec<String>| -> Vec<String> {
            if let (Some(col), Some(rule)) = (links_col, rewrite) {
                row[col] = row[col].replace(&rule.from, &rule.to);
            }
            row
        };
        let drop_extension = |row: &[String]| -> Vec<String> {
            row.iter()
                .enumerate()
                .filter(|(i, _)| *i != ext_col)
                .map(|(_, cell)| cell.clone())
                .collect()
        };
        // Extension to the front, section column dropped
        let reorder = |row: &[String]| -> Vec<String> {
            let mut out = vec![row[ext_col].clone()];
            out.extend(
                row.iter()
                    .enumerate()
                    .skip(1)
                    .filter(|(i, _)| *i != ext_col)
                    .map(|(_, cell)| cell.clone()),
            );
            out
        };

        let mut schema = vec![drop_extension(&self.header)];
        let mut extensions = Vec::new();
        for row in &self.rows {
            let row = rewrite_links(row.clone());
            if row[ext_col].is_empty() {
                schema.push(drop_extension(&row));
            } else {
                extensions.push(reorder(&row));
            }
        }

        extensions.sort_by(|a, b| a[0].cmp(&b[0]).then_with(|| a[1].cmp(&b[1])));
        extensions.insert(0, reorder(&self.header));
        Ok((schema, extensions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SHEET: &str = "\
section,path,title,links,extension
tender,tender/id,Tender ID,https://standard/1.1-dev/tender,
tender,tender/lots,Lots,https://standard/1.1-dev/lots,Lots
planning,planning/budget,Budget,https://standard/1.1-dev/budget,
awards,awards/bids,Bids,https://standard/1.1-dev/bids,Bids
tender,tender/enquiries,Enquiries,https://standard/1.1-dev/enq,Bids
";

    fn sheet() -> MappingSheet {
        MappingSheet::load(SHEET.as_bytes()).unwrap()
    }

    #[test]
    fn test_extension_map() {
        let map = sheet().extension_map().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("tender/lots").map(String::as_str), Some("Lots"));
        assert_eq!(map.get("tender/id"), None);
    }

    #[test]
    fn test_schema_tab_drops_extension_column_and_rewrites_links() {
        let rewrite = LinkRewrite::default();
        let (schema, _) = sheet().schema_tabs(Some(&rewrite)).unwrap();
        assert_eq!(schema[0], vec!["section", "path", "title", "links"]);
        assert_eq!(
            schema[1],
            vec!["tender", "tender/id", "Tender ID", "https://standard/1.1.5/tender"]
        );
        // Only core rows
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn test_schema_extensions_sorted_stably() {
        let (_, extensions) = sheet().schema_tabs(None).unwrap();
        assert_eq!(extensions[0], vec!["extension", "path", "title", "links"]);
        let keys: Vec<(&str, &str)> = extensions[1..]
            .iter()
            .map(|r| (r[0].as_str(), r[1].as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Bids", "awards/bids"),
                ("Bids", "tender/enquiries"),
                ("Lots", "tender/lots"),
            ]
        );
    }

    #[test]
    fn test_ragged_row_is_fatal() {
        let result = MappingSheet::load("a,b\n1,2,3\n".as_bytes());
        assert!(result.is_err());
    }
}
