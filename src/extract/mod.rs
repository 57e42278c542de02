//! Extraction module for schema_docgen
//!
//! Turns annotated entity source units into schema model tables.

pub mod extractor;
pub mod mapping;

// Re-export key types
pub use extractor::EntityExtractor;
pub use mapping::sql_type_for;
