use super::documents::{self, DocumentFormat};
use crate::ports::outbound::{InputSource, ThreatModelReader};
use crate::shared::error::TmacError;
use crate::shared::security::validate_input_file;
use crate::shared::Result;
use crate::threat_model::domain::{
    ModelDescription, ResourceCatalog, ResourceDefaults, SecurityRule,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// FileSystemReader adapter for reading input documents
///
/// Implements the ThreatModelReader port. Files are read with security
/// checks (no symlinks, regular files only, size limit) and parsed as YAML,
/// JSON or TOML depending on their extension. Embedded documents go through
/// the same parsing.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemReader {
    /// Safely read a file after validating it
    fn safe_read_file(&self, path: &Path, file_type: &str) -> Result<String> {
        validate_input_file(path, file_type).map_err(|e| TmacError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        fs::read_to_string(path).map_err(|e| {
            TmacError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    /// Reads and parses a source into a generic document tree
    fn load(&self, source: &InputSource, file_type: &str) -> Result<Value> {
        let content = match source {
            InputSource::Path(path) => self.safe_read_file(path, file_type)?,
            InputSource::Embedded { content, .. } => content.to_string(),
        };

        let format = DocumentFormat::from_file_name(&source.format_hint());
        let document = format.parse(&content).map_err(|details| TmacError::FileParseError {
            path: match source {
                InputSource::Path(path) => path.clone(),
                InputSource::Embedded { name, .. } => PathBuf::from(name),
            },
            details,
        })?;

        tracing::debug!(source = %source, ?format, "parsed {}", file_type);
        Ok(document)
    }
}

impl ThreatModelReader for FileSystemReader {
    fn read_model_description(&self, source: &InputSource) -> Result<ModelDescription> {
        documents::model_description(&self.load(source, "config file")?)
    }

    fn read_catalog(&self, source: &InputSource) -> Result<ResourceCatalog> {
        documents::catalog(&self.load(source, "resources file")?)
    }

    fn read_defaults(&self, source: &InputSource) -> Result<ResourceDefaults> {
        documents::defaults(&self.load(source, "defaults file")?)
    }

    fn read_security_rules(&self, source: &InputSource) -> Result<Vec<SecurityRule>> {
        documents::security_rules(&self.load(source, "security checks file")?)
    }

    fn read_endpoint_document(&self, source: &InputSource) -> Result<Value> {
        self.load(source, "endpoint document")
    }
}
