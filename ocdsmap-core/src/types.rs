//! Type definitions for schema fields, output rows and sheet routing

use crate::error::{MappingError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Paths whose fields form the top of an OCDS stage. A stage root never
/// appears as an ordinary row; it becomes a sheet title instead.
pub const STAGE_ROOTS: [&str; 5] = [
    "planning",
    "tender",
    "awards",
    "contracts",
    "contracts/implementation",
];

/// A single field from the flattened release schema.
///
/// The `schema` value is the JSON Schema fragment at `path`, with internal
/// references already resolved inline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaField {
    /// `/`-delimited path of the field, unique per schema position
    pub path: String,
    /// The JSON Schema fragment at this path
    pub schema: Value,
    /// Whether the parent schema lists this field as required
    pub required: bool,
    /// Whether this field (or an ancestor) is deprecated
    pub deprecated: bool,
}

impl SchemaField {
    /// Create a new schema field record
    #[must_use]
    pub fn new(path: impl Into<String>, schema: Value, required: bool, deprecated: bool) -> Self {
        Self {
            path: path.into(),
            schema,
            required,
            deprecated,
        }
    }

    /// The field's title.
    ///
    /// # Errors
    /// Returns [`MappingError::MissingKey`] if the fragment has no string
    /// `title`. Malformed fragments abort the run; there is no substitution.
    pub fn title(&self) -> Result<&str> {
        self.schema
            .get("title")
            .and_then(Value::as_str)
            .ok_or_else(|| MappingError::missing_key(&self.path, "title"))
    }

    /// The field's description.
    ///
    /// # Errors
    /// Returns [`MappingError::MissingKey`] if the fragment has no string
    /// `description`.
    pub fn description(&self) -> Result<&str> {
        self.schema
            .get("description")
            .and_then(Value::as_str)
            .ok_or_else(|| MappingError::missing_key(&self.path, "description"))
    }

    /// Whether the field is a container (`object` or `array` type).
    ///
    /// OCDS types may be a single string or an array such as
    /// `["array", "null"]`; either form is recognized.
    #[must_use]
    pub fn is_container(&self) -> bool {
        match self.schema.get("type") {
            Some(Value::String(t)) => t == "object" || t == "array",
            Some(Value::Array(types)) => types
                .iter()
                .filter_map(Value::as_str)
                .any(|t| t == "object" || t == "array"),
            _ => false,
        }
    }

    /// Whether the path is one of the five stage roots
    #[must_use]
    pub fn is_stage_root(&self) -> bool {
        STAGE_ROOTS.contains(&self.path.as_str())
    }

    /// The path segment before the first `/` (the whole path if none)
    #[must_use]
    pub fn section(&self) -> &str {
        self.path.split('/').next().unwrap_or(&self.path)
    }
}

/// Emphasis applied to a `field`/`span` format key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emphasis {
    /// Core, optional field
    Plain,
    /// Core field listed in the parent's `required` array
    Required,
    /// Field contributed by an extension
    Extension,
}

/// Formatting key stored in the first column of every row, consumed by the
/// spreadsheet formatting script downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowFormat {
    /// Sheet title ("Standard name: stage title")
    Title,
    /// Sheet or section subtitle
    Subtitle,
    /// Section divider with explanatory text
    Section,
    /// Extension name and description line
    Extension,
    /// The column header row
    ColumnHeaders,
    /// Blank placeholder for publisher-added fields
    AdditionalField,
    /// Organization reference with the parties template repeated beneath it
    RefSpan,
    /// Leaf field
    Field(Emphasis),
    /// Container field spanning the rows of its children
    Span(Emphasis),
}

impl RowFormat {
    /// Base key for a field's schema type, before emphasis is applied
    #[must_use]
    pub fn for_field(container: bool, emphasis: Emphasis) -> Self {
        if container {
            Self::Span(emphasis)
        } else {
            Self::Field(emphasis)
        }
    }

    /// The string written to the first CSV column
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::Section => "section",
            Self::Extension => "extension",
            Self::ColumnHeaders => "column_headers",
            Self::AdditionalField => "additional_field",
            Self::RefSpan => "ref_span",
            Self::Field(Emphasis::Plain) => "field",
            Self::Field(Emphasis::Required) => "required_field",
            Self::Field(Emphasis::Extension) => "extension_field",
            Self::Span(Emphasis::Plain) => "span",
            Self::Span(Emphasis::Required) => "required_span",
            Self::Span(Emphasis::Extension) => "extension_span",
        }
    }

    /// Relabel a `field`/`span` row for an extension section.
    ///
    /// Idempotent: a row that already carries extension emphasis is
    /// unchanged. Non-field rows pass through untouched.
    #[must_use]
    pub fn with_extension_emphasis(self) -> Self {
        match self {
            Self::Field(_) => Self::Field(Emphasis::Extension),
            Self::Span(_) => Self::Span(Emphasis::Extension),
            other => other,
        }
    }
}

impl std::fmt::Display for RowFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single output row: format key, grouping depth, and content cells.
///
/// Rows are padded to a uniform width when serialized; see [`Row::padded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Formatting key for the spreadsheet script
    pub format: RowFormat,
    /// Grouping depth (0 normally, 1 for organization references)
    pub depth: u8,
    /// Content cells following the format and depth columns
    pub cells: Vec<String>,
}

impl Row {
    /// Create a row from content cells
    #[must_use]
    pub fn new(format: RowFormat, depth: u8, cells: Vec<String>) -> Self {
        Self {
            format,
            depth,
            cells,
        }
    }

    /// Create a row with a single text cell
    #[must_use]
    pub fn text(format: RowFormat, depth: u8, text: impl Into<String>) -> Self {
        Self::new(format, depth, vec![text.into()])
    }

    /// Create a row with no content cells
    #[must_use]
    pub fn blank(format: RowFormat, depth: u8) -> Self {
        Self::new(format, depth, Vec::new())
    }

    /// Serialize to a record of exactly `width` string cells, padding with
    /// empty strings. The downstream CSV parsing script requires every row
    /// in a sheet to have the same column count.
    #[must_use]
    pub fn padded(&self, width: usize) -> Vec<String> {
        let mut record = Vec::with_capacity(width);
        record.push(self.format.as_str().to_string());
        record.push(self.depth.to_string());
        record.extend(self.cells.iter().cloned());
        while record.len() < width {
            record.push(String::new());
        }
        record
    }
}

/// One of the OCDS process stages, each backed by its own mapping sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Release-level fields not belonging to any stage
    General,
    /// Planning stage
    Planning,
    /// Tender stage
    Tender,
    /// Awards stage
    Awards,
    /// Contracts stage
    Contracts,
    /// Contract implementation
    Implementation,
}

impl Stage {
    /// All stages in output order
    pub const ALL: [Stage; 6] = [
        Stage::General,
        Stage::Planning,
        Stage::Tender,
        Stage::Awards,
        Stage::Contracts,
        Stage::Implementation,
    ];

    /// The sheet key, also used as the string table prefix
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Planning => "planning",
            Self::Tender => "tender",
            Self::Awards => "awards",
            Self::Contracts => "contracts",
            Self::Implementation => "implementation",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Where a field's row is routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Directly onto a stage sheet (or its extension bucket)
    Stage(Stage),
    /// Into the parties template, repeated under organization references
    Parties,
}

impl Destination {
    /// Route a field path to its destination sheet.
    ///
    /// `planning`, `tender` and `awards` map to same-named sheets;
    /// `contracts` splits on `contracts/implementation`; `parties` is
    /// diverted to the repeatable template; everything else is `general`.
    #[must_use]
    pub fn for_path(path: &str) -> Self {
        let section = path.split('/').next().unwrap_or(path);
        match section {
            "planning" => Self::Stage(Stage::Planning),
            "tender" => Self::Stage(Stage::Tender),
            "awards" => Self::Stage(Stage::Awards),
            "contracts" => {
                if path.contains("contracts/implementation") {
                    Self::Stage(Stage::Implementation)
                } else {
                    Self::Stage(Stage::Contracts)
                }
            }
            "parties" => Self::Parties,
            _ => Self::Stage(Stage::General),
        }
    }
}
