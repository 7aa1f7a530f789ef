//! Schema ingestion: internal reference resolution and field flattening.
//!
//! The release schema arrives already patched with extension schemas; this
//! module inlines its internal `$ref` pointers and walks the result into the
//! ordered [`SchemaField`](ocdsmap_core::SchemaField) sequence consumed by
//! the sheet builder.

mod deref;
mod fields;

pub use deref::resolve_refs;
pub use fields::schema_fields;
