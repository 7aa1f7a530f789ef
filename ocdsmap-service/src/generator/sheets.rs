//! Field classification and sheet assembly.
//!
//! One forward pass over the flattened field list routes every
//! non-deprecated field to a stage sheet body, a per-sheet extension bucket,
//! or the parties template; assembly then stitches headers, the organization
//! reference repetitions, extension sections and placeholder rows into the
//! final workbook.

use crate::generator::{GeneratorError, GeneratorResult};
use indexmap::IndexMap;
use ocdsmap_core::prelude::*;
use serde_json::Value;
use tracing::debug;

/// String table keys for the column header row, in column order
const COLUMN_HEADER_KEYS: [&str; 6] = [
    "path_header",
    "title_header",
    "description_header",
    "mapping_header",
    "example_header",
    "notes_header",
];

/// A finished sheet: its file key, localized display title, and records
/// ready for CSV serialization.
#[derive(Debug, Clone)]
pub struct Sheet {
    /// Sheet key, used for the output filename
    pub key: String,
    /// Localized display title
    pub title: String,
    /// String records; within a stage sheet all records have equal width
    pub records: Vec<Vec<String>>,
}

/// The full set of generated sheets, in output order
#[derive(Debug, Clone)]
pub struct Workbook {
    /// Stage sheets followed by the schema passthrough tabs
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Look up a sheet by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.key == key)
    }
}

/// Builds the mapping sheet workbook from flattened schema fields.
///
/// All lookup tables are borrowed immutable parameters; the builder holds no
/// state across invocations.
pub struct SheetBuilder<'a> {
    strings: &'a Strings,
    config: &'a MappingConfig,
    /// Field path to owning extension name; absent or empty means core
    extensions: &'a IndexMap<String, String>,
    /// Extension name to one-line description
    descriptions: &'a IndexMap<String, String>,
}

impl<'a> SheetBuilder<'a> {
    /// Create a builder over the given lookup tables
    #[must_use]
    pub fn new(
        strings: &'a Strings,
        config: &'a MappingConfig,
        extensions: &'a IndexMap<String, String>,
        descriptions: &'a IndexMap<String, String>,
    ) -> Self {
        Self {
            strings,
            config,
            extensions,
            descriptions,
        }
    }

    /// Build the workbook.
    ///
    /// `schema_tab` and `schema_extensions_tab` are passed through as-is;
    /// see [`crate::mapping_sheet::MappingSheet::schema_tabs`].
    ///
    /// # Errors
    /// Fails on a malformed schema fragment, a string table miss, or an
    /// extension without a registered description. No partial output exists:
    /// the caller only writes files after this returns.
    pub fn build(
        &self,
        fields: &[SchemaField],
        schema_tab: Vec<Vec<String>>,
        schema_extensions_tab: Vec<Vec<String>>,
    ) -> GeneratorResult<Workbook> {
        let width = 2 + COLUMN_HEADER_KEYS.len();
        let standard_name = self.strings.get("standard_name")?;
        let org_id_title = self.strings.get("organization_reference_id_title")?;

        let mut headers: IndexMap<Stage, Vec<Row>> = IndexMap::new();
        let mut bodies: IndexMap<Stage, Vec<Row>> = IndexMap::new();
        let mut buckets: IndexMap<Stage, IndexMap<String, Vec<Row>>> = IndexMap::new();
        let mut parties_rows: Vec<Row> = Vec::new();
        let mut org_refs: Vec<Row> = Vec::new();
        let mut org_refs_ext: IndexMap<String, Vec<Row>> = IndexMap::new();

        for field in fields {
            if field.deprecated {
                continue;
            }

            let extension = self
                .extensions
                .get(&field.path)
                .filter(|name| !name.is_empty());
            let emphasis = if extension.is_some() {
                Emphasis::Extension
            } else if field.required {
                Emphasis::Required
            } else {
                Emphasis::Plain
            };
            let destination = Destination::for_path(&field.path);

            if field.is_stage_root() {
                // Stage roots become the sheet's title and subtitle, never a
                // body row.
                let Destination::Stage(stage) = destination else {
                    continue;
                };
                let header = headers.entry(stage).or_default();
                header.push(Row::text(
                    RowFormat::Title,
                    0,
                    format!("{standard_name}: {}", field.title()?),
                ));
                header.push(Row::text(
                    RowFormat::Subtitle,
                    0,
                    strip_markdown_links(field.description()?),
                ));
                continue;
            }

            let format = RowFormat::for_field(field.is_container(), emphasis);

            if destination != Destination::Parties && self.is_org_reference(field, org_id_title) {
                // Deferred: the reference row and its parties template copy
                // are emitted in the repetition step, not here.
                debug!(path = %field.path, "organization reference");
                let row = Row::text(format, 1, field.path.clone());
                match extension {
                    Some(name) => org_refs_ext.entry(name.clone()).or_default().push(row),
                    None => org_refs.push(row),
                }
                continue;
            }

            let row = Row::text(format, 0, field.path.clone());
            match destination {
                Destination::Parties => parties_rows.push(row),
                Destination::Stage(stage) => match extension {
                    Some(name) => buckets
                        .entry(stage)
                        .or_default()
                        .entry(name.clone())
                        .or_default()
                        .push(row),
                    None => bodies.entry(stage).or_default().push(row),
                },
            }
        }

        // The general sheet has no stage root; it gets a static header.
        let general_header = headers.entry(Stage::General).or_default();
        general_header.push(Row::text(
            RowFormat::Title,
            0,
            format!("{standard_name}: {}", self.strings.get("general_title")?),
        ));
        general_header.push(Row::text(
            RowFormat::Subtitle,
            0,
            self.strings.get("general_help_text")?,
        ));

        let column_headers = self.column_headers()?;
        let mut sheets: IndexMap<Stage, Vec<Row>> = IndexMap::new();
        for stage in Stage::ALL {
            let mut rows = headers.shift_remove(&stage).unwrap_or_default();
            rows.push(column_headers.clone());
            rows.extend(bodies.shift_remove(&stage).unwrap_or_default());
            sheets.insert(stage, rows);
        }

        // Every organization reference gets the parties template repeated
        // beneath it, minus the template's own leading row.
        let template: Vec<Row> = parties_rows.get(1..).unwrap_or_default().to_vec();
        if let Some(general) = sheets.get_mut(&Stage::General) {
            general.push(Row::text(
                RowFormat::Subtitle,
                0,
                self.strings.get("parties_description")?,
            ));
            for mut reference in org_refs {
                reference.format = RowFormat::RefSpan;
                general.push(reference);
                general.extend(template.iter().cloned());
            }
        }

        // Extension-owned references land in the general sheet's bucket,
        // each followed by an extension-labeled template copy.
        let extension_template: Vec<Row> = template
            .iter()
            .cloned()
            .map(|mut row| {
                row.format = row.format.with_extension_emphasis();
                row
            })
            .collect();
        for (name, references) in org_refs_ext {
            let bucket = buckets
                .entry(Stage::General)
                .or_default()
                .entry(name)
                .or_default();
            for reference in references {
                bucket.push(reference);
                bucket.extend(extension_template.iter().cloned());
            }
        }

        for stage in Stage::ALL {
            let Some(rows) = sheets.get_mut(&stage) else {
                continue;
            };
            let stage_buckets = buckets.shift_remove(&stage).unwrap_or_default();
            if !stage_buckets.is_empty() {
                rows.push(Row::text(
                    RowFormat::Section,
                    0,
                    self.strings.get("extension_section")?,
                ));
                for (name, bucket) in stage_buckets {
                    let description = self
                        .descriptions
                        .get(&name)
                        .ok_or_else(|| GeneratorError::UnknownExtension(name.clone()))?;
                    rows.push(Row::text(
                        RowFormat::Extension,
                        0,
                        format!("{name}: {description}"),
                    ));
                    rows.extend(bucket);
                }
            }

            rows.push(Row::text(
                RowFormat::Section,
                0,
                self.strings.get("additional_fields_note")?,
            ));
            for _ in 0..self.config.additional_field_rows {
                rows.push(Row::blank(RowFormat::AdditionalField, 0));
            }
        }

        let mut out = Vec::with_capacity(Stage::ALL.len() + 2);
        for stage in Stage::ALL {
            let rows = sheets.shift_remove(&stage).unwrap_or_default();
            out.push(Sheet {
                key: stage.key().to_string(),
                title: self.sheet_title(stage.key())?,
                records: rows.iter().map(|row| row.padded(width)).collect(),
            });
        }
        out.push(Sheet {
            key: "schema".to_string(),
            title: self.sheet_title("schema")?,
            records: schema_tab,
        });
        out.push(Sheet {
            key: "schema_extensions".to_string(),
            title: self.sheet_title("schema_extensions")?,
            records: schema_extensions_tab,
        });
        Ok(Workbook { sheets: out })
    }

    fn column_headers(&self) -> GeneratorResult<Row> {
        let cells: Result<Vec<String>> = COLUMN_HEADER_KEYS
            .iter()
            .copied()
            .map(|key| self.strings.get(key).map(String::from))
            .collect();
        Ok(Row::new(RowFormat::ColumnHeaders, 0, cells?))
    }

    fn sheet_title(&self, key: &str) -> GeneratorResult<String> {
        Ok(self.strings.get(&format!("{key}_sheetname"))?.to_string())
    }

    /// Detect an organization reference.
    ///
    /// The retained `$ref` marker is checked first (stable across languages);
    /// the localized "Organization ID" title heuristic is a fallback for
    /// schemas resolved upstream without markers. The heuristic ties
    /// detection to a display string and is a known fragility.
    fn is_org_reference(&self, field: &SchemaField, org_id_title: &str) -> bool {
        let marker = format!("/{}", self.config.org_ref_definition);
        let items = field.schema.get("items");
        if ref_target(&field.schema).is_some_and(|p| p.ends_with(&marker))
            || items.and_then(ref_target).is_some_and(|p| p.ends_with(&marker))
        {
            return true;
        }
        id_title(&field.schema) == Some(org_id_title)
            || items.and_then(id_title) == Some(org_id_title)
    }
}

fn ref_target(fragment: &Value) -> Option<&str> {
    fragment.get("$ref")?.as_str()
}

fn id_title(fragment: &Value) -> Option<&str> {
    fragment.get("properties")?.get("id")?.get("title")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn field(path: &str, schema: Value, required: bool) -> SchemaField {
        SchemaField::new(path, schema, required, false)
    }

    fn leaf(path: &str) -> SchemaField {
        field(path, json!({"type": "string"}), false)
    }

    fn build(
        fields: &[SchemaField],
        extensions: &[(&str, &str)],
        descriptions: &[(&str, &str)],
    ) -> Workbook {
        let strings = Strings::builtin("en");
        let config = MappingConfig::default();
        let extensions: IndexMap<String, String> = extensions
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let descriptions: IndexMap<String, String> = descriptions
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        SheetBuilder::new(&strings, &config, &extensions, &descriptions)
            .build(fields, Vec::new(), Vec::new())
            .expect("build should succeed")
    }

    fn formats(sheet: &Sheet) -> Vec<&str> {
        sheet.records.iter().map(|r| r[0].as_str()).collect()
    }

    #[test]
    fn test_stage_root_becomes_title_and_subtitle() {
        let fields = vec![
            field(
                "tender",
                json!({"type": "object", "title": "Tender", "description": "The tender."}),
                false,
            ),
            leaf("tender/id"),
        ];
        let workbook = build(&fields, &[], &[]);
        let tender = workbook.get("tender").unwrap();
        assert_eq!(tender.records[0][0], "title");
        assert_eq!(tender.records[0][2], "Open Contracting Data Standard: Tender");
        assert_eq!(tender.records[1][0], "subtitle");
        assert_eq!(tender.records[2][0], "column_headers");
        // The root never appears as a body row
        assert!(!tender.records.iter().any(|r| r[2] == "tender"));
        assert!(tender.records.iter().any(|r| r[2] == "tender/id"));
    }

    #[test]
    fn test_deprecated_fields_are_skipped() {
        let mut deprecated = leaf("ocid");
        deprecated.deprecated = true;
        let workbook = build(&[deprecated], &[], &[]);
        let general = workbook.get("general").unwrap();
        assert!(!general.records.iter().any(|r| r[2] == "ocid"));
    }

    #[test]
    fn test_extension_fields_go_to_bucket_not_body() {
        let fields = vec![leaf("tender/id"), leaf("tender/lots")];
        let workbook = build(
            &fields,
            &[("tender/lots", "Lots")],
            &[("Lots", "A tender may be divided into lots.")],
        );
        let tender = workbook.get("tender").unwrap();
        let keys = formats(tender);
        // section + extension label precede the bucketed row
        let section_at = keys.iter().position(|k| *k == "section").unwrap();
        let lots_at = tender
            .records
            .iter()
            .position(|r| r[2] == "tender/lots")
            .unwrap();
        let id_at = tender
            .records
            .iter()
            .position(|r| r[2] == "tender/id")
            .unwrap();
        assert!(id_at < section_at);
        assert!(section_at < lots_at);
        assert_eq!(tender.records[lots_at][0], "extension_field");
        assert!(tender
            .records
            .iter()
            .any(|r| r[0] == "extension" && r[2] == "Lots: A tender may be divided into lots."));
    }

    #[test]
    fn test_missing_extension_description_is_fatal() {
        let strings = Strings::builtin("en");
        let config = MappingConfig::default();
        let extensions: IndexMap<String, String> =
            std::iter::once(("tender/lots".to_string(), "Lots".to_string())).collect();
        let descriptions = IndexMap::new();
        let result = SheetBuilder::new(&strings, &config, &extensions, &descriptions).build(
            &[leaf("tender/lots")],
            Vec::new(),
            Vec::new(),
        );
        assert!(matches!(result, Err(GeneratorError::UnknownExtension(_))));
    }

    #[test]
    fn test_no_extensions_no_section_but_placeholders_remain() {
        let workbook = build(&[leaf("tender/id")], &[], &[]);
        for key in ["general", "planning", "tender", "awards", "contracts", "implementation"] {
            let sheet = workbook.get(key).unwrap();
            let keys = formats(sheet);
            assert!(!keys.contains(&"extension"));
            assert_eq!(
                keys.iter().filter(|k| **k == "additional_field").count(),
                4,
                "sheet {key} should reserve four placeholder rows"
            );
            // exactly one section row: the additional-fields note
            assert_eq!(keys.iter().filter(|k| **k == "section").count(), 1);
        }
    }

    #[test]
    fn test_org_reference_detected_by_marker() {
        let strings = Strings::builtin("en");
        let config = MappingConfig::default();
        let extensions = IndexMap::new();
        let descriptions = IndexMap::new();
        let builder = SheetBuilder::new(&strings, &config, &extensions, &descriptions);
        let by_marker = field(
            "buyer",
            json!({"type": "object", "$ref": "#/definitions/OrganizationReference"}),
            false,
        );
        assert!(builder.is_org_reference(&by_marker, "Organization ID"));

        let by_title = field(
            "awards/suppliers",
            json!({"type": "array", "items": {"properties": {"id": {"title": "Organization ID"}}}}),
            false,
        );
        assert!(builder.is_org_reference(&by_title, "Organization ID"));

        let plain = field("tender/value", json!({"type": "object"}), false);
        assert!(!builder.is_org_reference(&plain, "Organization ID"));
    }

    #[test]
    fn test_all_rows_have_uniform_width() {
        let fields = vec![
            field(
                "planning",
                json!({"type": "object", "title": "Planning", "description": "d"}),
                false,
            ),
            leaf("planning/rationale"),
            leaf("ocid"),
        ];
        let workbook = build(&fields, &[], &[]);
        for key in ["general", "planning", "tender"] {
            let sheet = workbook.get(key).unwrap();
            assert!(sheet.records.iter().all(|r| r.len() == 8), "{key}");
        }
    }
}
