//! Entity extractor
//!
//! Pattern-matching extraction of annotated JPA entity sources into the
//! schema model. This is a best-effort scanner over a constrained,
//! well-formed annotation subset, not a Java parser: each source unit
//! yields at most one table, and units that are not entities are skipped.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::extract::mapping::{example_for, functional_description, sql_type_for};
use crate::model::{
    Constraint, ConstraintKind, FetchMode, Field, Index, Module, Relation, RelationKind,
    SchemaRegistry, Table,
};
use crate::utils::naming::class_to_table;

static CLASS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"public\s+class\s+(\w+)").unwrap());
static TABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"@Table\s*\(\s*name\s*=\s*"([^"]+)""#).unwrap());
static EXTENDS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"extends\s+(\w+)").unwrap());

static COLUMN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)@Column[^;]*?private\s+(\w+(?:<[^>]+>)?)\s+(\w+);").unwrap());
static NULLABLE_FALSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"nullable\s*=\s*false").unwrap());
static UNIQUE_TRUE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"unique\s*=\s*true").unwrap());
static LENGTH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"length\s*=\s*(\d+)").unwrap());
static PRECISION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"precision\s*=\s*(\d+)").unwrap());
static SCALE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"scale\s*=\s*(\d+)").unwrap());
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"name\s*=\s*"([^"]+)""#).unwrap());

static MANY_TO_ONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)@ManyToOne[^;]*?private\s+(\w+)\s+(\w+);").unwrap());
static ONE_TO_MANY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)@OneToMany[^;]*?private\s+\w+<(\w+)>\s+(\w+);").unwrap());
static MANY_TO_MANY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)@ManyToMany[^;]*?private\s+\w+<(\w+)>\s+(\w+);").unwrap());
static ONE_TO_ONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)@OneToOne[^;]*?private\s+(\w+)\s+(\w+);").unwrap());

static EAGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"fetch\s*=\s*FetchType\.EAGER").unwrap());
static MAPPED_BY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"mappedBy\s*=\s*"([^"]+)""#).unwrap());
static JOIN_COLUMN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"@JoinColumn[^)]*name\s*=\s*"([^"]+)""#).unwrap());
static CASCADE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"CascadeType\.(\w+)").unwrap());

static UNIQUE_CONSTRAINT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@UniqueConstraint\s*\(\s*columnNames\s*=\s*\{([^}]+)\}").unwrap());
static INDEX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"@Index\s*\([^)]*name\s*=\s*"([^"]+)"[^)]*columnList\s*=\s*"([^"]+)""#).unwrap()
});

static LINE_COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"//\s*(.+)").unwrap());

/// Keywords that mark a line comment as a business rule
const RULE_KEYWORDS: &[&str] = &["validar", "debe", "no puede", "solo", "regla"];

/// Maximum number of business rules retained per table
const MAX_BUSINESS_RULES: usize = 5;

/// Number of fields included in the sample row
const SAMPLE_ROW_FIELDS: usize = 10;

/// Extracts schema tables from annotated entity source units
#[derive(Debug, Default)]
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Scan an input root for entity sources and extract every table into
    /// a fresh registry.
    ///
    /// A unit that fails extraction is logged and skipped; the rest of the
    /// corpus is still processed.
    pub fn scan_corpus(&self, root: &Path) -> Result<SchemaRegistry> {
        if !root.exists() {
            return Err(Error::ExtractionError {
                unit: root.display().to_string(),
                message: "input directory does not exist".to_string(),
            });
        }

        let mut registry = SchemaRegistry::new();

        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !is_entity_candidate(path) {
                continue;
            }

            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(unit = %path.display(), error = %e, "Failed to read source unit");
                    continue;
                }
            };

            match self.extract_unit(path, &content) {
                Ok(Some(table)) => {
                    tracing::debug!(
                        entity = %table.source_entity_name,
                        table = %table.table_name,
                        module = table.module.as_str(),
                        "Extracted entity"
                    );
                    registry.insert(table);
                }
                Ok(None) => {
                    tracing::debug!(unit = %path.display(), "Skipped unit: not an annotated entity");
                }
                Err(e) => {
                    tracing::warn!(unit = %path.display(), error = %e, "Extraction failed, unit skipped");
                }
            }
        }

        Ok(registry)
    }

    /// Extract zero or one table from a single source unit.
    ///
    /// Returns `None` when the unit carries no `@Entity` marker or no
    /// recognizable class declaration; both are skips, not errors.
    pub fn extract_unit(&self, unit_path: &Path, content: &str) -> Result<Option<Table>> {
        if !content.contains("@Entity") {
            return Ok(None);
        }

        let entity_name = match CLASS_RE.captures(content) {
            Some(caps) => caps[1].to_string(),
            None => return Ok(None),
        };

        let module = module_from_path(unit_path);

        let table_name = match TABLE_RE.captures(content) {
            Some(caps) => caps[1].to_string(),
            None => class_to_table(&entity_name),
        };

        let mut table = Table::new(&table_name, &entity_name, module);
        table.functional_description = functional_description(&entity_name).to_string();

        if let Some(caps) = EXTENDS_RE.captures(content) {
            table.parent_entity = Some(caps[1].to_string());
        }

        self.extract_fields(unit_path, content, &mut table)?;
        self.extract_relations(content, &mut table);
        self.extract_constraints(content, &mut table);
        self.extract_business_rules(content, &mut table);

        for field in table.fields.iter().take(SAMPLE_ROW_FIELDS) {
            table
                .sample_row
                .insert(field.column_name.clone(), field.example.clone());
        }

        Ok(Some(table))
    }

    /// Extract column-annotated field declarations
    fn extract_fields(&self, unit_path: &Path, content: &str, table: &mut Table) -> Result<()> {
        for caps in COLUMN_RE.captures_iter(content) {
            let java_type = caps[1].trim().to_string();
            let field_name = caps[2].trim().to_string();
            let annotation_block = &caps[0];

            let explicit_name = NAME_RE
                .captures(annotation_block)
                .map(|c| c[1].to_string());

            let mut field = Field::new(
                &field_name,
                &java_type,
                sql_type_for(&java_type),
                explicit_name.as_deref(),
            );

            field.nullable = !NULLABLE_FALSE_RE.is_match(annotation_block);
            field.unique = UNIQUE_TRUE_RE.is_match(annotation_block);
            field.length = parse_numeric_attr(unit_path, &LENGTH_RE, annotation_block)?;
            field.precision = parse_numeric_attr(unit_path, &PRECISION_RE, annotation_block)?;
            field.scale = parse_numeric_attr(unit_path, &SCALE_RE, annotation_block)?;
            field.example = example_for(&field.column_name, &java_type);

            table.fields.push(field);
        }

        Ok(())
    }

    /// Extract the four relation kinds, one pattern each
    fn extract_relations(&self, content: &str, table: &mut Table) {
        let patterns: [(&Regex, RelationKind); 4] = [
            (&MANY_TO_ONE_RE, RelationKind::ManyToOne),
            (&ONE_TO_MANY_RE, RelationKind::OneToMany),
            (&MANY_TO_MANY_RE, RelationKind::ManyToMany),
            (&ONE_TO_ONE_RE, RelationKind::OneToOne),
        ];

        for (pattern, kind) in patterns {
            for caps in pattern.captures_iter(content) {
                let target_entity = caps[1].trim().to_string();
                let field_name = caps[2].trim().to_string();
                let annotation_block = &caps[0];

                let mut relation = Relation::new(kind, &target_entity, &field_name);

                if EAGER_RE.is_match(annotation_block) {
                    relation.fetch_mode = FetchMode::Eager;
                }
                if let Some(mapped) = MAPPED_BY_RE.captures(annotation_block) {
                    relation.mapped_by = Some(mapped[1].to_string());
                }
                if let Some(join) = JOIN_COLUMN_RE.captures(annotation_block) {
                    relation.join_column = Some(join[1].to_string());
                }
                relation.cascade_rules = CASCADE_RE
                    .captures_iter(annotation_block)
                    .map(|c| c[1].to_string())
                    .collect();

                table.relations.push(relation);
            }
        }
    }

    /// Extract table-level unique constraints and declared indices
    fn extract_constraints(&self, content: &str, table: &mut Table) {
        for caps in UNIQUE_CONSTRAINT_RE.captures_iter(content) {
            let columns: Vec<String> = caps[1]
                .split(',')
                .map(|c| c.trim().trim_matches('"').to_string())
                .filter(|c| !c.is_empty())
                .collect();

            if columns.is_empty() {
                continue;
            }

            table.constraints.push(Constraint {
                kind: ConstraintKind::Unique,
                columns,
                name: None,
            });
        }

        for caps in INDEX_RE.captures_iter(content) {
            let name = caps[1].to_string();
            let columns = caps[2].split(',').map(|c| c.trim().to_string()).collect();

            table.indices.push(Index { name, columns });
        }
    }

    /// Collect business rules from line comments containing any of the
    /// rule keywords. Deduplicated preserving first occurrence so repeated
    /// runs produce identical output, capped at 5.
    fn extract_business_rules(&self, content: &str, table: &mut Table) {
        let mut rules: Vec<String> = Vec::new();

        for caps in LINE_COMMENT_RE.captures_iter(content) {
            let text = caps[1].trim().to_string();
            let lower = text.to_lowercase();

            if RULE_KEYWORDS.iter().any(|kw| lower.contains(kw)) && !rules.contains(&text) {
                rules.push(text);
                if rules.len() == MAX_BUSINESS_RULES {
                    break;
                }
            }
        }

        table.business_rules = rules;
    }
}

/// Parse an optional numeric annotation attribute
fn parse_numeric_attr(unit_path: &Path, pattern: &Regex, block: &str) -> Result<Option<u32>> {
    match pattern.captures(block) {
        Some(caps) => caps[1]
            .parse::<u32>()
            .map(Some)
            .map_err(|e| Error::ExtractionError {
                unit: unit_path.display().to_string(),
                message: format!("invalid numeric annotation attribute: {}", e),
            }),
        None => Ok(None),
    }
}

/// Whether a path looks like an entity source unit: a `.java` file under
/// an `entities` directory.
fn is_entity_candidate(path: &Path) -> bool {
    path.is_file()
        && path.extension().map_or(false, |ext| ext == "java")
        && path
            .components()
            .any(|c| c.as_os_str() == "entities")
}

/// Derive the module from the unit's storage path: the first path
/// component that names a known module wins, otherwise shared.
fn module_from_path(path: &Path) -> Module {
    path.components()
        .filter_map(|c| c.as_os_str().to_str())
        .find_map(Module::from_segment)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PROGRAMA_ACADEMICO: &str = r#"
        package upeu.edu.pe.academic.domain.entities;

        import jakarta.persistence.*;

        @Entity
        @Table(name = "programa_academico")
        public class ProgramaAcademico extends AuditableEntity {

            // Regla: el codigo debe ser unico por universidad
            @ManyToOne(fetch = FetchType.LAZY, cascade = CascadeType.PERSIST)
            @JoinColumn(name = "universidad_id", nullable = false)
            private Universidad universidad;

            @Column(name = "nombre_programa", nullable = false, length = 150)
            private String nombrePrograma;

            @Column(unique = true, length = 20)
            private String codigo;

            @Column(precision = 10, scale = 2)
            private BigDecimal costoCredito;

            @Column
            private Integer duracionSemestres;

            @OneToMany(mappedBy = "programaAcademico")
            private List<PlanAcademico> planes;
        }
    "#;

    fn extract(content: &str, path: &str) -> Option<Table> {
        EntityExtractor::new()
            .extract_unit(Path::new(path), content)
            .unwrap()
    }

    fn programa() -> Table {
        extract(
            PROGRAMA_ACADEMICO,
            "src/main/java/upeu/edu/pe/academic/domain/entities/ProgramaAcademico.java",
        )
        .unwrap()
    }

    #[test]
    fn test_non_entity_unit_is_skipped() {
        let result = extract("public class Helper {}", "src/Helper.java");
        assert!(result.is_none());
    }

    #[test]
    fn test_entity_without_class_declaration_is_skipped() {
        let result = extract("@Entity\ninterface Marker {}", "src/Marker.java");
        assert!(result.is_none());
    }

    #[test]
    fn test_table_name_from_annotation() {
        let table = programa();
        assert_eq!(table.table_name, "programa_academico");
        assert_eq!(table.source_entity_name, "ProgramaAcademico");
    }

    #[test]
    fn test_table_name_defaults_to_class_transform() {
        let table = extract(
            "@Entity\npublic class CursoOfertado {}",
            "src/main/java/entities/CursoOfertado.java",
        )
        .unwrap();
        assert_eq!(table.table_name, "curso_ofertado");
    }

    #[test]
    fn test_module_from_path() {
        assert_eq!(programa().module, Module::Academic);

        let shared = extract(
            "@Entity\npublic class Category {}",
            "src/main/java/upeu/edu/pe/shared/entities/Category.java",
        )
        .unwrap();
        assert_eq!(shared.module, Module::Shared);

        let security = extract(
            "@Entity\npublic class Rol {}",
            "src/main/java/upeu/edu/pe/security/domain/entities/Rol.java",
        )
        .unwrap();
        assert_eq!(security.module, Module::Security);
    }

    #[test]
    fn test_inheritance_detection() {
        let table = programa();
        assert_eq!(table.parent_entity.as_deref(), Some("AuditableEntity"));
        assert!(table.is_audited());
    }

    #[test]
    fn test_field_extraction_with_attributes() {
        let table = programa();
        assert_eq!(table.fields.len(), 4);

        let nombre = &table.fields[0];
        assert_eq!(nombre.name, "nombrePrograma");
        assert_eq!(nombre.column_name, "nombre_programa");
        assert_eq!(nombre.sql_type, "VARCHAR");
        assert_eq!(nombre.length, Some(150));
        assert!(!nombre.nullable);

        let codigo = &table.fields[1];
        assert_eq!(codigo.column_name, "codigo");
        assert!(codigo.unique);
        assert_eq!(codigo.length, Some(20));
        assert!(codigo.nullable);

        let costo = &table.fields[2];
        assert_eq!(costo.sql_type, "DECIMAL");
        assert_eq!(costo.precision, Some(10));
        assert_eq!(costo.scale, Some(2));

        let duracion = &table.fields[3];
        assert_eq!(duracion.column_name, "duracion_semestres");
        assert_eq!(duracion.sql_type, "INTEGER");
        assert!(duracion.nullable);
        assert!(duracion.length.is_none());
    }

    #[test]
    fn test_relation_extraction() {
        let table = programa();
        assert_eq!(table.relations.len(), 2);

        let many_to_one = &table.relations[0];
        assert_eq!(many_to_one.kind, RelationKind::ManyToOne);
        assert_eq!(many_to_one.target_entity, "Universidad");
        assert_eq!(many_to_one.field_name, "universidad");
        assert_eq!(many_to_one.join_column.as_deref(), Some("universidad_id"));
        assert_eq!(many_to_one.fetch_mode, FetchMode::Lazy);
        assert_eq!(many_to_one.cascade_rules, vec!["PERSIST"]);
        assert!(many_to_one.mapped_by.is_none());

        let one_to_many = &table.relations[1];
        assert_eq!(one_to_many.kind, RelationKind::OneToMany);
        assert_eq!(one_to_many.target_entity, "PlanAcademico");
        assert_eq!(one_to_many.field_name, "planes");
        assert_eq!(one_to_many.mapped_by.as_deref(), Some("programaAcademico"));
        assert!(one_to_many.join_column.is_none());
    }

    #[test]
    fn test_eager_fetch_mode() {
        let content = r#"
            @Entity
            public class Matricula {
                @ManyToOne(fetch = FetchType.EAGER)
                private Estudiante estudiante;
            }
        "#;
        let table = extract(content, "src/entities/Matricula.java").unwrap();
        assert_eq!(table.relations[0].fetch_mode, FetchMode::Eager);
    }

    #[test]
    fn test_unique_constraints_and_indices() {
        let content = r#"
            @Entity
            @Table(name = "persona", uniqueConstraints = {
                @UniqueConstraint(columnNames = {"numero_documento", "universidad_id"})
            }, indexes = {
                @Index(name = "idx_persona_documento", columnList = "numero_documento"),
                @Index(name = "idx_persona_nombres", columnList = "nombres, apellido_paterno")
            })
            public class Persona {
            }
        "#;
        let table = extract(content, "src/entities/Persona.java").unwrap();

        assert_eq!(table.constraints.len(), 1);
        let constraint = &table.constraints[0];
        assert_eq!(constraint.kind, ConstraintKind::Unique);
        assert_eq!(constraint.columns, vec!["numero_documento", "universidad_id"]);
        assert!(constraint.name.is_none());

        assert_eq!(table.indices.len(), 2);
        assert_eq!(table.indices[0].name, "idx_persona_documento");
        assert_eq!(
            table.indices[1].columns,
            vec!["nombres", "apellido_paterno"]
        );
    }

    #[test]
    fn test_business_rules_capped_at_five_membership() {
        let comments: Vec<String> = (1..=7)
            .map(|i| format!("            // Regla {}: el campo debe validarse", i))
            .collect();
        let content = format!(
            "@Entity\npublic class Curso {{\n{}\n}}",
            comments.join("\n")
        );
        let table = extract(&content, "src/entities/Curso.java").unwrap();

        assert_eq!(table.business_rules.len(), 5);
        for rule in &table.business_rules {
            assert!(comments.iter().any(|c| c.contains(rule.as_str())));
        }
    }

    #[test]
    fn test_business_rules_deduplicated() {
        let content = r#"
            @Entity
            public class Pago {
                // El monto debe ser positivo
                // El monto debe ser positivo
                // comentario sin palabras clave
            }
        "#;
        let table = extract(content, "src/entities/Pago.java").unwrap();
        assert_eq!(table.business_rules, vec!["El monto debe ser positivo"]);
    }

    #[test]
    fn test_sample_row_uses_first_ten_fields() {
        let fields: Vec<String> = (0..12)
            .map(|i| format!("    @Column\n    private String campo{};", i))
            .collect();
        let content = format!(
            "@Entity\npublic class Grande {{\n{}\n}}",
            fields.join("\n")
        );
        let table = extract(&content, "src/entities/Grande.java").unwrap();

        assert_eq!(table.fields.len(), 12);
        assert_eq!(table.sample_row.len(), 10);
        assert!(table.sample_row.contains_key("campo0"));
        assert!(!table.sample_row.contains_key("campo10"));
    }

    #[test]
    fn test_functional_description_attached() {
        assert_eq!(
            programa().functional_description,
            "Carreras profesionales ofrecidas por la universidad."
        );
    }

    #[test]
    fn test_duplicate_entities_last_write_wins() {
        let extractor = EntityExtractor::new();
        let mut registry = SchemaRegistry::new();

        let first = extractor
            .extract_unit(
                Path::new("a/entities/X.java"),
                "@Entity\n@Table(name = \"x_old\")\npublic class X {}",
            )
            .unwrap()
            .unwrap();
        let second = extractor
            .extract_unit(
                Path::new("b/entities/X.java"),
                "@Entity\n@Table(name = \"x_new\")\npublic class X {}",
            )
            .unwrap()
            .unwrap();

        registry.insert(first);
        registry.insert(second);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("X").unwrap().table_name, "x_new");
    }
}
