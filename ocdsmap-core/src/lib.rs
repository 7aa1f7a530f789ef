//! # `ocdsmap` Core
//!
//! Core types for generating OCDS field-level mapping sheets.
//!
//! This crate provides the building blocks shared by the mapping sheet
//! generator: the flattened schema-field record, row and format-key types,
//! the localized string table, error handling, and configuration.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Core error types for mapping sheet operations
pub mod error;

/// Type definitions for schema fields, rows and sheet routing
pub mod types;

/// Localized string tables for sheet headers and section text
pub mod strings;

/// Configuration for the mapping sheet generator
pub mod config;

/// Utility functions and helpers
pub mod utils;

// Re-export commonly used types
pub use config::{LinkRewrite, MappingConfig};
pub use error::{MappingError, Result};
pub use serde_json::Value;
pub use strings::Strings;
pub use types::{Destination, Emphasis, Row, RowFormat, SchemaField, Stage};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{LinkRewrite, MappingConfig};
    pub use crate::error::{MappingError, Result};
    pub use crate::strings::Strings;
    pub use crate::types::*;
    pub use crate::utils::strip_markdown_links;
}
