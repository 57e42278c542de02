//! Document renderer
//!
//! Renders the registry into a single Markdown document: header, index,
//! Mermaid ER diagram, module summaries, per-table detail sections and the
//! closing data dictionary. All sections except the diagram are sorted by
//! (module, table name); the diagram intentionally follows registry
//! population order.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::Local;

use crate::error::Result;
use crate::model::{Module, RelationKind, SchemaRegistry, Table};
use crate::utils::naming::{class_to_table, table_anchor};

/// Renders the Markdown schema document from a registry
pub struct DocumentRenderer<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> DocumentRenderer<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Render the complete document in its fixed section order
    pub fn render(&self) -> String {
        let mut doc = String::new();

        doc.push_str(&self.render_header());
        doc.push_str(&self.render_index());
        doc.push_str(&self.render_er_diagram());
        doc.push_str(&self.render_module_summary());
        doc.push_str(&self.render_table_details());
        doc.push_str(&self.render_data_dictionary());

        doc
    }

    /// Render and write the document, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render())?;
        Ok(())
    }

    fn render_header(&self) -> String {
        format!(
            "# 📊 Documentación de Base de Datos\n\
             ## Sistema de Gestión Universitaria - SaaS Multitenancy\n\n\
             **Fecha de generación:** {}  \n\
             **Total de tablas:** {}  \n\
             **Framework:** Quarkus 3.x + Hibernate Panache  \n\
             **Base de datos:** PostgreSQL 14+\n\n\
             ---\n\n",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            self.registry.len()
        )
    }

    fn render_index(&self) -> String {
        let mut doc = String::from("## 📑 Índice de Contenidos\n\n");

        for (module, tables) in self.tables_by_module() {
            let _ = writeln!(doc, "### Módulo: {}", module.as_str().to_uppercase());
            for table in tables {
                let _ = writeln!(
                    doc,
                    "- [{}](#{}) - {}...",
                    table.table_name,
                    table_anchor(&table.table_name),
                    teaser(&table.functional_description, 60)
                );
            }
            doc.push('\n');
        }

        doc.push_str("---\n\n");
        doc
    }

    fn render_er_diagram(&self) -> String {
        let mut doc = String::from("## 🗺️ Diagrama Entidad-Relación (ERD)\n\n");
        doc.push_str("```mermaid\nerDiagram\n");

        // Entity blocks in registry population order
        for table in self.registry.tables() {
            let _ = writeln!(doc, "    {} {{", table.table_name);

            for field in table.fields.iter().take(8) {
                let mut markers = Vec::new();
                if !field.nullable {
                    markers.push("NOT NULL");
                }
                if field.unique {
                    markers.push("UNIQUE");
                }
                let markers = if markers.is_empty() {
                    String::new()
                } else {
                    format!(" {}", markers.join(" "))
                };

                let _ = writeln!(
                    doc,
                    "        {} {}{}",
                    field.sql_type_display(),
                    field.column_name,
                    markers
                );
            }

            if table.fields.len() > 8 {
                let _ = writeln!(doc, "        ... {} campos más", table.fields.len() - 8);
            }

            doc.push_str("    }\n\n");
        }

        // Relation edges, same order
        for table in self.registry.tables() {
            for relation in &table.relations {
                let symbol = match relation.kind {
                    RelationKind::ManyToOne => "}o--||",
                    RelationKind::OneToMany => "||--o{",
                    RelationKind::ManyToMany => "}o--o{",
                    RelationKind::OneToOne => "||--||",
                };
                let target_table = class_to_table(&relation.target_entity);

                let _ = writeln!(
                    doc,
                    "    {} {} {} : \"{}\"",
                    table.table_name, symbol, target_table, relation.field_name
                );
            }
        }

        doc.push_str("```\n\n---\n\n");
        doc
    }

    fn render_module_summary(&self) -> String {
        let mut doc = String::from("## 📦 Resumen por Módulos\n\n");

        for (module, tables) in self.tables_by_module() {
            let _ = writeln!(doc, "### {}\n", module_description(module));
            let _ = writeln!(doc, "**Total de tablas:** {}\n", tables.len());

            doc.push_str("| Tabla | Descripción | Campos | Relaciones |\n");
            doc.push_str("|-------|-------------|--------|------------|\n");

            for table in tables {
                let _ = writeln!(
                    doc,
                    "| `{}` | {} | {} | {} |",
                    table.table_name,
                    teaser(&table.functional_description, 50),
                    table.fields.len(),
                    table.relations.len()
                );
            }

            doc.push('\n');
        }

        doc.push_str("---\n\n");
        doc
    }

    fn render_table_details(&self) -> String {
        let mut doc = String::from("## 📋 Detalle de Tablas\n\n");

        let mut tables: Vec<&Table> = self.registry.tables().collect();
        tables.sort_by(|a, b| {
            (a.module, &a.table_name).cmp(&(b.module, &b.table_name))
        });

        for table in tables {
            let _ = writeln!(doc, "### {}\n", table.table_name);
            let _ = writeln!(doc, "**Clase Java:** `{}`  ", table.source_entity_name);
            let _ = writeln!(doc, "**Módulo:** `{}`  ", table.module.as_str());

            if let Some(parent) = &table.parent_entity {
                let _ = writeln!(doc, "**Hereda de:** `{}`  ", parent);
            }

            let _ = writeln!(
                doc,
                "\n**Funcionalidad:**  \n{}\n",
                table.functional_description
            );

            doc.push_str("#### Campos\n\n");
            doc.push_str("| Campo | Tipo SQL | Tipo Java | Null | Único | Ejemplo |\n");
            doc.push_str("|-------|----------|-----------|------|-------|----------|\n");

            for field in &table.fields {
                let nullable = if field.nullable { "✅" } else { "❌" };
                let unique = if field.unique { "✅" } else { "" };

                let _ = writeln!(
                    doc,
                    "| `{}` | {} | {} | {} | {} | {} |",
                    field.column_name,
                    field.sql_type_display(),
                    field.java_type,
                    nullable,
                    unique,
                    field.example
                );
            }
            doc.push('\n');

            if !table.relations.is_empty() {
                doc.push_str("#### Relaciones\n\n");
                doc.push_str("| Tipo | Entidad Destino | Campo | Descripción |\n");
                doc.push_str("|------|-----------------|-------|-------------|\n");

                for relation in &table.relations {
                    let _ = write!(
                        doc,
                        "| {} | `{}` | `{}` | ",
                        relation.kind.as_str(),
                        relation.target_entity,
                        relation.field_name
                    );
                    if let Some(mapped_by) = &relation.mapped_by {
                        let _ = write!(doc, "Mapeado por `{}` ", mapped_by);
                    }
                    if let Some(join_column) = &relation.join_column {
                        let _ = write!(doc, "Join: `{}`", join_column);
                    }
                    doc.push_str("|\n");
                }
                doc.push('\n');
            }

            if !table.constraints.is_empty() {
                doc.push_str("#### Restricciones\n\n");
                for constraint in &table.constraints {
                    let columns: Vec<String> = constraint
                        .columns
                        .iter()
                        .map(|c| format!("`{}`", c))
                        .collect();
                    let kind = match constraint.kind {
                        crate::model::ConstraintKind::Unique => "UNIQUE",
                        crate::model::ConstraintKind::Check => "CHECK",
                        crate::model::ConstraintKind::Index => "INDEX",
                    };
                    let _ = writeln!(doc, "- **{}**: {}", kind, columns.join(", "));
                }
                doc.push('\n');
            }

            if !table.indices.is_empty() {
                doc.push_str("#### Índices\n\n");
                for index in &table.indices {
                    let columns: Vec<String> =
                        index.columns.iter().map(|c| format!("`{}`", c)).collect();
                    let _ = writeln!(doc, "- **{}**: {}", index.name, columns.join(", "));
                }
                doc.push('\n');
            }

            if !table.business_rules.is_empty() {
                doc.push_str("#### Reglas de Negocio\n\n");
                for rule in &table.business_rules {
                    let _ = writeln!(doc, "- {}", rule);
                }
                doc.push('\n');
            }

            if !table.sample_row.is_empty() {
                doc.push_str("#### Ejemplo de Registro\n\n");
                doc.push_str("```json\n");
                doc.push_str(
                    &serde_json::to_string_pretty(&table.sample_row)
                        .unwrap_or_else(|_| "{}".to_string()),
                );
                doc.push_str("\n```\n\n");
            }

            doc.push_str("---\n\n");
        }

        doc
    }

    fn render_data_dictionary(&self) -> String {
        let mut doc = String::from("## 📖 Diccionario de Datos\n\n");

        doc.push_str("### Campos Comunes en Todas las Tablas (AuditableEntity)\n\n");
        doc.push_str("| Campo | Tipo | Descripción |\n");
        doc.push_str("|-------|------|-------------|\n");
        doc.push_str("| `id` | BIGINT | Identificador único (PK) |\n");
        doc.push_str("| `created_at` | TIMESTAMP | Fecha de creación |\n");
        doc.push_str("| `updated_at` | TIMESTAMP | Fecha de última modificación |\n");
        doc.push_str("| `created_by` | VARCHAR(100) | Usuario que creó el registro |\n");
        doc.push_str("| `updated_by` | VARCHAR(100) | Usuario que modificó el registro |\n");
        doc.push_str("| `active` | BOOLEAN | Estado lógico (borrado lógico) |\n");
        doc.push_str("| `universidad_id` | BIGINT | FK Universidad (multitenancy) |\n");
        doc.push('\n');

        doc.push_str("### Convenciones de Nombrado\n\n");
        doc.push_str("- **Tablas**: `snake_case` (ej: `programa_academico`)\n");
        doc.push_str("- **Columnas**: `snake_case` (ej: `fecha_nacimiento`)\n");
        doc.push_str("- **Foreign Keys**: `<tabla>_id` (ej: `persona_id`)\n");
        doc.push_str("- **Índices**: `idx_<tabla>_<campo>` (ej: `idx_estudiante_codigo`)\n");
        doc.push_str("- **Constraints**: `uk_<tabla>_<campos>` (ej: `uk_persona_documento_universidad`)\n");
        doc.push('\n');

        doc.push_str("### Estados Comunes\n\n");
        doc.push_str("- **ACTIVO**: Registro en uso normal\n");
        doc.push_str("- **INACTIVO**: Temporalmente deshabilitado\n");
        doc.push_str("- **SUSPENDIDO**: Bloqueado por incumplimiento\n");
        doc.push_str("- **EGRESADO**: Completó el programa (estudiantes)\n");
        doc.push_str("- **GRADUADO**: Obtuvo el título (estudiantes)\n");
        doc.push_str("- **RETIRADO**: Dio de baja voluntaria\n");
        doc.push_str("- **PENDIENTE**: En proceso de aprobación\n");
        doc.push_str("- **APROBADO**: Validado y autorizado\n");
        doc.push_str("- **RECHAZADO**: No cumple requisitos\n");
        doc.push('\n');

        doc
    }

    /// Group tables by module, modules alphabetical, tables sorted by name
    fn tables_by_module(&self) -> BTreeMap<Module, Vec<&Table>> {
        let mut modules: BTreeMap<Module, Vec<&Table>> = BTreeMap::new();

        for table in self.registry.tables() {
            modules.entry(table.module).or_default().push(table);
        }
        for tables in modules.values_mut() {
            tables.sort_by(|a, b| a.table_name.cmp(&b.table_name));
        }

        modules
    }
}

/// Truncate a description to a character count (UTF-8 safe)
fn teaser(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn module_description(module: Module) -> &'static str {
    match module {
        Module::Academic => {
            "🎓 **Módulo Académico**: Gestión de estudiantes, profesores, cursos, matrículas y evaluaciones."
        }
        Module::Security => {
            "🔐 **Módulo de Seguridad**: Autenticación, autorización, usuarios y permisos."
        }
        Module::Finance => {
            "💰 **Módulo Financiero**: Pagos, cuentas corrientes y gestión económica."
        }
        Module::Catalog => {
            "📚 **Módulo de Catálogos**: Tipos y categorías para uso transversal."
        }
        Module::Shared => {
            "🔧 **Módulo Compartido**: Entidades base y utilidades comunes."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FetchMode, Field, Relation};

    fn registry_with_two_modules() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();

        let mut pago = Table::new("pago", "Pago", Module::Finance);
        pago.functional_description = "Registro de pagos realizados.".to_string();
        let mut monto = Field::new("monto", "BigDecimal", "DECIMAL", None);
        monto.precision = Some(10);
        monto.scale = Some(2);
        monto.nullable = false;
        pago.fields.push(monto);
        let mut rel = Relation::new(RelationKind::ManyToOne, "Estudiante", "estudiante");
        rel.join_column = Some("estudiante_id".to_string());
        rel.fetch_mode = FetchMode::Lazy;
        pago.relations.push(rel);
        pago.sample_row.insert("monto".to_string(), "0.00".to_string());
        registry.insert(pago);

        let mut curso = Table::new("curso", "Curso", Module::Academic);
        curso.functional_description = "Asignaturas del catálogo académico.".to_string();
        let mut nombre = Field::new("nombre", "String", "VARCHAR", None);
        nombre.length = Some(100);
        nombre.unique = true;
        curso.fields.push(nombre);
        registry.insert(curso);

        registry
    }

    #[test]
    fn test_section_order_is_fixed() {
        let registry = registry_with_two_modules();
        let doc = DocumentRenderer::new(&registry).render();

        let header = doc.find("# 📊 Documentación de Base de Datos").unwrap();
        let index = doc.find("## 📑 Índice de Contenidos").unwrap();
        let diagram = doc.find("## 🗺️ Diagrama Entidad-Relación").unwrap();
        let summary = doc.find("## 📦 Resumen por Módulos").unwrap();
        let details = doc.find("## 📋 Detalle de Tablas").unwrap();
        let dictionary = doc.find("## 📖 Diccionario de Datos").unwrap();

        assert!(header < index);
        assert!(index < diagram);
        assert!(diagram < summary);
        assert!(summary < details);
        assert!(details < dictionary);
    }

    #[test]
    fn test_sorted_sections_order_modules_alphabetically() {
        let registry = registry_with_two_modules();
        let doc = DocumentRenderer::new(&registry).render();

        // academic sorts before finance even though Pago was inserted first
        let index = doc.find("## 📑 Índice de Contenidos").unwrap();
        let diagram = doc.find("```mermaid").unwrap();
        let academic = doc.find("### Módulo: ACADEMIC").unwrap();
        let finance = doc.find("### Módulo: FINANCE").unwrap();
        assert!(index < academic && academic < finance && finance < diagram);
    }

    #[test]
    fn test_diagram_follows_registry_order() {
        let registry = registry_with_two_modules();
        let doc = DocumentRenderer::new(&registry).render();

        let diagram_start = doc.find("```mermaid").unwrap();
        let pago_block = doc[diagram_start..].find("    pago {").unwrap();
        let curso_block = doc[diagram_start..].find("    curso {").unwrap();
        assert!(pago_block < curso_block);
    }

    #[test]
    fn test_diagram_field_markers_and_edge_symbols() {
        let registry = registry_with_two_modules();
        let doc = DocumentRenderer::new(&registry).render();

        assert!(doc.contains("        DECIMAL(10,2) monto NOT NULL\n"));
        assert!(doc.contains("        VARCHAR(100) nombre UNIQUE\n"));
        assert!(doc.contains("    pago }o--|| estudiante : \"estudiante\"\n"));
    }

    #[test]
    fn test_diagram_truncates_after_eight_fields() {
        let mut registry = SchemaRegistry::new();
        let mut table = Table::new("grande", "Grande", Module::Shared);
        for i in 0..11 {
            table
                .fields
                .push(Field::new(&format!("campo{}", i), "String", "VARCHAR", None));
        }
        registry.insert(table);

        let doc = DocumentRenderer::new(&registry).render();
        let diagram_start = doc.find("```mermaid").unwrap();
        let diagram_end = diagram_start + doc[diagram_start..].find("\n---").unwrap();
        let diagram = &doc[diagram_start..diagram_end];

        assert!(diagram.contains("        ... 3 campos más\n"));
        assert!(diagram.contains("campo7"));
        assert!(!diagram.contains("campo8"));
    }

    #[test]
    fn test_detail_section_contents() {
        let registry = registry_with_two_modules();
        let doc = DocumentRenderer::new(&registry).render();

        assert!(doc.contains("**Clase Java:** `Pago`"));
        assert!(doc.contains("| `monto` | DECIMAL(10,2) | BigDecimal | ❌ |  | "));
        assert!(doc.contains("| ManyToOne | `Estudiante` | `estudiante` | Join: `estudiante_id`|"));
        assert!(doc.contains("\"monto\": \"0.00\""));
    }
}
