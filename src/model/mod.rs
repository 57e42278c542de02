//! Schema model for schema_docgen
//!
//! Shared data structures describing the extracted relational schema.

pub mod registry;
pub mod types;

/// Superclass name whose inheritance injects the standard audit columns
/// and the tenant foreign key.
pub const AUDIT_BASE_ENTITY: &str = "AuditableEntity";

/// Referenced table of the tenant foreign key. This is the historical
/// plural name, not the class-name transform of any entity.
pub const TENANT_TABLE: &str = "universidades";

// Re-export key types
pub use registry::SchemaRegistry;
pub use types::{
    Constraint, ConstraintKind, FetchMode, Field, Index, Module, Relation, RelationKind, Table,
};
