//! Naming utilities for schema_docgen
//!
//! This module provides the naming transforms shared by the extractor and
//! the renderers.

/// Convert a class or field identifier to its snake_case database name.
///
/// Inserts an underscore before every uppercase letter that is not the
/// first character, then lowercases the whole string. Total and
/// deterministic over identifier strings; used for both default table
/// names and default column names.
pub fn class_to_table(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);

    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            result.push('_');
        }
        result.extend(c.to_lowercase());
    }

    result
}

/// Get a foreign key constraint name for a table and join column.
pub fn foreign_key_name(table_name: &str, join_column: &str) -> String {
    format!("fk_{}_{}", table_name, join_column)
}

/// Get a synthesized unique constraint name for a table (1-based ordinal).
pub fn unique_constraint_name(table_name: &str, ordinal: usize) -> String {
    format!("uk_{}_{}", table_name, ordinal)
}

/// Get the Markdown anchor for a table heading.
pub fn table_anchor(table_name: &str) -> String {
    table_name.replace('_', "-")
}
