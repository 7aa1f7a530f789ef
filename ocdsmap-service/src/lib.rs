//! # `ocdsmap` Service
//!
//! Generates OCDS field-level mapping sheets from a patched release schema.
//!
//! The pipeline is a single pass: resolve internal references in the schema,
//! flatten it to an ordered field list, classify each field onto a stage
//! sheet (tracking extension ownership and organization references), and
//! serialize the assembled workbook to one CSV file per sheet.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Command-line interface
pub mod cli;

/// Schema retrieval from a file or URL
pub mod fetch;

/// Sheet building and CSV output
pub mod generator;

/// Ingestion of the ocdskit mapping-sheet CSV
pub mod mapping_sheet;

/// Reference resolution and schema flattening
pub mod schema;

pub use generator::{GeneratorError, GeneratorResult, Sheet, SheetBuilder, Workbook};
pub use mapping_sheet::MappingSheet;
