//! JSON schema export
//!
//! The export is the sole boundary artifact: the DDL renderer and any
//! external viewer consume this file, never the live registry.

use std::fs;
use std::path::Path;

use chrono::Local;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{SchemaRegistry, Table};

/// Export metadata header
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub generated_at: String,
    pub total_tables: usize,
}

/// The serialized form of a run's registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaExport {
    pub metadata: ExportMetadata,
    pub tables: IndexMap<String, Table>,
}

impl SchemaExport {
    /// Build an export snapshot from the registry, stamped with the
    /// current local time.
    pub fn from_registry(registry: &SchemaRegistry) -> Self {
        let tables: IndexMap<String, Table> = registry
            .iter()
            .map(|(name, table)| (name.clone(), table.clone()))
            .collect();

        Self {
            metadata: ExportMetadata {
                generated_at: Local::now().to_rfc3339(),
                total_tables: tables.len(),
            },
            tables,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the export to a file, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Load an export file produced by a previous extraction run.
    ///
    /// A missing file is fatal and names the command that produces it; a
    /// present but unparseable file is fatal with the parse error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::MissingInputArtifact {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| Error::MalformedInputArtifact(e.to_string()))
    }

    /// Tables in export order (registry population order)
    pub fn tables(&self) -> impl Iterator<Item = (&String, &Table)> {
        self.tables.iter()
    }
}
