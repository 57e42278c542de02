//! DDL renderer
//!
//! Emits a PostgreSQL CREATE TABLE script from the JSON schema export.
//! This stage deliberately consumes the export artifact instead of the
//! live registry, so the export stays the authoritative contract.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::{ConstraintKind, Module, RelationKind, Table, AUDIT_BASE_ENTITY, TENANT_TABLE};
use crate::render::export::SchemaExport;
use crate::utils::naming::{class_to_table, foreign_key_name, unique_constraint_name};

const BANNER: &str = "-- ============================================================================";

/// Renders the SQL DDL script from a schema export
pub struct DdlRenderer<'a> {
    export: &'a SchemaExport,
}

impl<'a> DdlRenderer<'a> {
    pub fn new(export: &'a SchemaExport) -> Self {
        Self { export }
    }

    /// Render the complete DDL script: per-module CREATE TABLE blocks,
    /// then one trailing foreign-key section over all tables.
    pub fn render(&self) -> String {
        let mut sql = String::new();

        let _ = writeln!(sql, "{}", BANNER);
        let _ = writeln!(sql, "-- SISTEMA DE GESTIÓN UNIVERSITARIA - DDL COMPLETO");
        let _ = writeln!(sql, "{}", BANNER);
        let _ = writeln!(sql, "-- Generado automáticamente");
        let _ = writeln!(sql, "-- Total de tablas: {}", self.export.tables.len());
        let _ = writeln!(sql, "{}", BANNER);
        sql.push('\n');

        // Group by module, modules alphabetical, tables by table name
        let mut modules: BTreeMap<Module, Vec<&Table>> = BTreeMap::new();
        for (_, table) in self.export.tables() {
            modules.entry(table.module).or_default().push(table);
        }

        for (module, mut tables) in modules {
            tables.sort_by(|a, b| a.table_name.cmp(&b.table_name));

            let _ = writeln!(sql, "\n{}", BANNER);
            let _ = writeln!(sql, "-- MÓDULO: {}", module.as_str().to_uppercase());
            let _ = writeln!(sql, "{}", BANNER);
            sql.push('\n');

            for table in tables {
                sql.push_str(&self.render_table(table));
                sql.push_str("\n\n");
            }
        }

        let _ = writeln!(sql, "\n{}", BANNER);
        let _ = writeln!(sql, "-- FOREIGN KEYS");
        let _ = writeln!(sql, "{}", BANNER);
        sql.push('\n');

        // Foreign keys follow export order, not the sorted order above
        for (_, table) in self.export.tables() {
            let fks = self.render_foreign_keys(table);
            if !fks.is_empty() {
                sql.push_str(&fks);
                sql.push('\n');
            }
        }

        sql
    }

    /// Render and write the script, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render())?;
        Ok(())
    }

    fn render_table(&self, table: &Table) -> String {
        let mut ddl: Vec<String> = Vec::new();

        ddl.push(format!("-- {}", table.table_name));
        if !table.functional_description.is_empty() {
            ddl.push(format!("-- {}", table.functional_description));
        }
        ddl.push(String::new());

        ddl.push(format!("CREATE TABLE {} (", table.table_name));

        let mut columns: Vec<String> = Vec::new();

        // Synthetic primary key first, unless the audit base supplies it
        if !table.is_audited() {
            columns.push("    id BIGSERIAL PRIMARY KEY".to_string());
        }

        for field in &table.fields {
            let mut parts = vec![format!("    {}", field.column_name), field.sql_type_display()];
            if !field.nullable {
                parts.push("NOT NULL".to_string());
            }
            if field.unique {
                parts.push("UNIQUE".to_string());
            }
            columns.push(parts.join(" "));
        }

        // Audited tables append the audit block after declared fields,
        // which intentionally puts id after the declared columns
        if table.is_audited() {
            columns.extend(
                [
                    "    id BIGSERIAL PRIMARY KEY",
                    "    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP",
                    "    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP",
                    "    created_by VARCHAR(100)",
                    "    updated_by VARCHAR(100)",
                    "    active BOOLEAN DEFAULT TRUE",
                    "    universidad_id BIGINT",
                ]
                .map(String::from),
            );
        }

        ddl.push(columns.join(",\n"));
        ddl.push(");".to_string());

        if !table.indices.is_empty() {
            ddl.push(String::new());
            for index in &table.indices {
                ddl.push(format!(
                    "CREATE INDEX {} ON {} ({});",
                    index.name,
                    table.table_name,
                    index.columns.join(", ")
                ));
            }
        }

        if !table.constraints.is_empty() {
            ddl.push(String::new());
            for (i, constraint) in table.constraints.iter().enumerate() {
                if constraint.kind != ConstraintKind::Unique {
                    continue;
                }
                let name = match &constraint.name {
                    Some(explicit) => explicit.clone(),
                    None => unique_constraint_name(&table.table_name, i + 1),
                };
                ddl.push(format!(
                    "ALTER TABLE {} ADD CONSTRAINT {} UNIQUE ({});",
                    table.table_name,
                    name,
                    constraint.columns.join(", ")
                ));
            }
        }

        ddl.join("\n")
    }

    fn render_foreign_keys(&self, table: &Table) -> String {
        let mut fks: Vec<String> = Vec::new();

        for relation in &table.relations {
            if !matches!(
                relation.kind,
                RelationKind::ManyToOne | RelationKind::OneToOne
            ) {
                continue;
            }
            let Some(join_column) = &relation.join_column else {
                continue;
            };

            let target_table = class_to_table(&relation.target_entity);
            fks.push(format!(
                "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {}(id);",
                table.table_name,
                foreign_key_name(&table.table_name, join_column),
                join_column,
                target_table
            ));
        }

        // Tenant FK for audited tables. The referenced table keeps its
        // historical plural name rather than the class-name transform.
        if table.parent_entity.as_deref() == Some(AUDIT_BASE_ENTITY) {
            fks.push(format!(
                "ALTER TABLE {} ADD CONSTRAINT fk_{}_universidad FOREIGN KEY (universidad_id) REFERENCES {}(id);",
                table.table_name, table.table_name, TENANT_TABLE
            ));
        }

        fks.join("\n")
    }
}
