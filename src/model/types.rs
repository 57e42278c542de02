//! Type definitions for the extracted schema model
//!
//! These types are serialized as the JSON schema export, which is the
//! contract consumed by the DDL renderer and external viewers. Every
//! optional attribute serializes as `null` when absent so the export
//! round-trips losslessly.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::utils::naming::class_to_table;

/// Functional module a table belongs to, derived from the source unit's
/// storage path. Variants are declared in alphabetical order so the derived
/// ordering matches the sorted document/DDL sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Academic,
    Catalog,
    Finance,
    Security,
    #[default]
    Shared,
}

impl Module {
    /// Resolve a path segment to a known module, if any
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "academic" => Some(Module::Academic),
            "catalog" => Some(Module::Catalog),
            "finance" => Some(Module::Finance),
            "security" => Some(Module::Security),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Academic => "academic",
            Module::Catalog => "catalog",
            Module::Finance => "finance",
            Module::Security => "security",
            Module::Shared => "shared",
        }
    }
}

/// Represents one column extracted from an entity field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub java_type: String,
    pub sql_type: String,
    pub nullable: bool,
    pub unique: bool,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub column_name: String,
    pub example: String,
    pub possible_values: Vec<String>,
}

impl Field {
    /// Create a new field. The column name is fixed here: the explicit
    /// annotation value when given, otherwise the snake_case transform of
    /// the declared identifier.
    pub fn new(name: &str, java_type: &str, sql_type: &str, column_name: Option<&str>) -> Self {
        let column_name = match column_name {
            Some(explicit) => explicit.to_string(),
            None => class_to_table(name),
        };

        Self {
            name: name.to_string(),
            java_type: java_type.to_string(),
            sql_type: sql_type.to_string(),
            nullable: true,
            unique: false,
            length: None,
            precision: None,
            scale: None,
            column_name,
            example: String::new(),
            possible_values: Vec::new(),
        }
    }

    /// Render the SQL type with its length or precision/scale parameters
    pub fn sql_type_display(&self) -> String {
        if let Some(length) = self.length {
            format!("{}({})", self.sql_type, length)
        } else if let Some(precision) = self.precision {
            format!("{}({},{})", self.sql_type, precision, self.scale.unwrap_or(0))
        } else {
            self.sql_type.clone()
        }
    }
}

/// Cardinality of a relation between two entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationKind {
    ManyToOne,
    OneToMany,
    ManyToMany,
    OneToOne,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::ManyToOne => "ManyToOne",
            RelationKind::OneToMany => "OneToMany",
            RelationKind::ManyToMany => "ManyToMany",
            RelationKind::OneToOne => "OneToOne",
        }
    }
}

/// Fetch strategy declared on a relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum FetchMode {
    #[default]
    Lazy,
    Eager,
}

/// Represents a relation edge from the owning table to a destination entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub kind: RelationKind,
    pub target_entity: String,
    pub field_name: String,
    pub cascade_rules: Vec<String>,
    pub fetch_mode: FetchMode,
    /// Set only when this relation is the inverse side
    pub mapped_by: Option<String>,
    /// Set only when this relation owns the foreign key
    pub join_column: Option<String>,
}

impl Relation {
    pub fn new(kind: RelationKind, target_entity: &str, field_name: &str) -> Self {
        Self {
            kind,
            target_entity: target_entity.to_string(),
            field_name: field_name.to_string(),
            cascade_rules: Vec::new(),
            fetch_mode: FetchMode::default(),
            mapped_by: None,
            join_column: None,
        }
    }
}

/// Kind of a table-level constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConstraintKind {
    Unique,
    Check,
    Index,
}

/// Represents a table-level constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub kind: ConstraintKind,
    /// Ordered, non-empty column list
    pub columns: Vec<String>,
    pub name: Option<String>,
}

/// Represents a declared index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    pub name: String,
    pub columns: Vec<String>,
}

/// Represents one schema entity extracted from a source unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub table_name: String,
    pub source_entity_name: String,
    pub module: Module,
    pub functional_description: String,
    /// Single-level inheritance parent, if any
    pub parent_entity: Option<String>,
    /// Declaration order is preserved
    pub fields: Vec<Field>,
    pub relations: Vec<Relation>,
    pub constraints: Vec<Constraint>,
    pub indices: Vec<Index>,
    /// Heuristically extracted, capped at 5
    pub business_rules: Vec<String>,
    /// Example values for the first 10 fields, keyed by column name
    pub sample_row: IndexMap<String, String>,
}

impl Table {
    /// Create a new table for a source entity
    pub fn new(table_name: &str, source_entity_name: &str, module: Module) -> Self {
        Self {
            table_name: table_name.to_string(),
            source_entity_name: source_entity_name.to_string(),
            module,
            functional_description: String::new(),
            parent_entity: None,
            fields: Vec::new(),
            relations: Vec::new(),
            constraints: Vec::new(),
            indices: Vec::new(),
            business_rules: Vec::new(),
            sample_row: IndexMap::new(),
        }
    }

    /// Whether this table inherits the fixed audit base entity
    pub fn is_audited(&self) -> bool {
        self.parent_entity.as_deref() == Some(crate::model::AUDIT_BASE_ENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_column_name_defaults_to_snake_case() {
        let field = Field::new("nombrePrograma", "String", "VARCHAR", None);
        assert_eq!(field.column_name, "nombre_programa");
        assert!(field.nullable);
        assert!(!field.unique);
    }

    #[test]
    fn test_field_column_name_explicit_override() {
        let field = Field::new("nombrePrograma", "String", "VARCHAR", Some("nombre"));
        assert_eq!(field.column_name, "nombre");
    }

    #[test]
    fn test_sql_type_display() {
        let mut field = Field::new("nombre", "String", "VARCHAR", None);
        assert_eq!(field.sql_type_display(), "VARCHAR");

        field.length = Some(150);
        assert_eq!(field.sql_type_display(), "VARCHAR(150)");

        let mut decimal = Field::new("monto", "BigDecimal", "DECIMAL", None);
        decimal.precision = Some(10);
        decimal.scale = Some(2);
        assert_eq!(decimal.sql_type_display(), "DECIMAL(10,2)");

        decimal.scale = None;
        assert_eq!(decimal.sql_type_display(), "DECIMAL(10,0)");
    }

    #[test]
    fn test_module_ordering_is_alphabetical() {
        let mut modules = vec![
            Module::Shared,
            Module::Academic,
            Module::Security,
            Module::Catalog,
            Module::Finance,
        ];
        modules.sort();

        let names: Vec<&str> = modules.iter().map(|m| m.as_str()).collect();
        assert_eq!(
            names,
            vec!["academic", "catalog", "finance", "security", "shared"]
        );
    }

    #[test]
    fn test_module_from_segment() {
        assert_eq!(Module::from_segment("academic"), Some(Module::Academic));
        assert_eq!(Module::from_segment("domain"), None);
    }

    #[test]
    fn test_audited_table() {
        let mut table = Table::new("persona", "Persona", Module::Shared);
        assert!(!table.is_audited());

        table.parent_entity = Some("AuditableEntity".to_string());
        assert!(table.is_audited());

        table.parent_entity = Some("PanacheEntity".to_string());
        assert!(!table.is_audited());
    }

    #[test]
    fn test_serde_camel_case_contract() {
        let field = Field::new("nombrePrograma", "String", "VARCHAR", None);
        let json = serde_json::to_value(&field).unwrap();

        assert_eq!(json["columnName"], "nombre_programa");
        assert_eq!(json["javaType"], "String");
        assert_eq!(json["sqlType"], "VARCHAR");
        // Absent optionals are explicit nulls, not omitted keys
        assert!(json.as_object().unwrap().contains_key("length"));
        assert!(json["length"].is_null());
    }

    #[test]
    fn test_relation_kind_serializes_as_pascal_case() {
        let relation = Relation::new(RelationKind::ManyToOne, "Universidad", "universidad");
        let json = serde_json::to_value(&relation).unwrap();

        assert_eq!(json["kind"], "ManyToOne");
        assert_eq!(json["fetchMode"], "LAZY");
        assert!(json["mappedBy"].is_null());
    }
}
