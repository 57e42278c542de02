//! Rendering module for schema_docgen
//!
//! Turns the extracted registry into the three output artifacts: the JSON
//! schema export, the Markdown document and the SQL DDL script.

pub mod ddl;
pub mod document;
pub mod export;

// Re-export key types
pub use ddl::DdlRenderer;
pub use document::DocumentRenderer;
pub use export::{ExportMetadata, SchemaExport};
