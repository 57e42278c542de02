//! schema_docgen: extracts a relational schema from annotated JPA entity
//! sources and renders documentation artifacts.
//!
//! The pipeline is a one-shot batch job: source units are scanned into a
//! [`model::SchemaRegistry`], the registry is serialized as the JSON schema
//! export, and the Markdown document and SQL DDL script are rendered from
//! it. The JSON export is the sole contract between extraction and every
//! downstream consumer (the DDL stage and external viewers).

pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;
pub mod utils;

// Re-export main types for easier access
pub use config::Config;
pub use error::{Error, Result};
pub use extract::EntityExtractor;
pub use model::SchemaRegistry;
pub use render::{DdlRenderer, DocumentRenderer, SchemaExport};

use std::path::Path;

/// The extraction stage client: scans a corpus and writes the document
/// and JSON export artifacts.
pub struct ExtractionPipeline {
    config: Config,
    registry: SchemaRegistry,
}

impl ExtractionPipeline {
    /// Create a new pipeline from configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            registry: SchemaRegistry::new(),
        }
    }

    /// Scan the input root for entity sources and populate the registry.
    /// Returns the number of extracted tables.
    pub fn extract_corpus(&mut self, input_root: &Path) -> Result<usize> {
        let extractor = EntityExtractor::new();
        self.registry = extractor.scan_corpus(input_root)?;

        tracing::info!(tables = self.registry.len(), "Extraction complete");
        Ok(self.registry.len())
    }

    /// The accumulated registry
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Write the document and JSON export under the configured output
    /// directory. A run with zero extracted entities writes nothing.
    pub fn write_artifacts(&self, input_root: &Path) -> Result<()> {
        if self.registry.is_empty() {
            tracing::warn!("No entities extracted, no artifacts written");
            return Ok(());
        }

        let export = SchemaExport::from_registry(&self.registry);
        let export_path = self.config.output.export_path(input_root);
        export.write_to(&export_path)?;
        tracing::info!(path = %export_path.display(), "Schema export written");

        let document_path = self.config.output.document_path(input_root);
        DocumentRenderer::new(&self.registry).write_to(&document_path)?;
        tracing::info!(path = %document_path.display(), "Document written");

        Ok(())
    }
}

/// The DDL stage: load a schema export and write the SQL script.
pub fn generate_ddl(export_path: &Path, output_path: &Path) -> Result<()> {
    let export = SchemaExport::load(export_path)?;
    DdlRenderer::new(&export).write_to(output_path)?;

    tracing::info!(
        tables = export.tables.len(),
        path = %output_path.display(),
        "DDL script written"
    );
    Ok(())
}
