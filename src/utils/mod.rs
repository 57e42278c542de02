//! Utilities for schema_docgen
//!
//! This module provides utility functions used across the library.

pub mod logging;
pub mod naming;

// Re-export key utility functions
pub use naming::{class_to_table, foreign_key_name, unique_constraint_name};
