use crate::shared::Result;
use crate::threat_model::domain::{
    ModelDescription, ResourceCatalog, ResourceDefaults, SecurityRule,
};
use std::fmt;
use std::path::PathBuf;

/// Where an input document comes from
///
/// Embedded documents are compiled into the binary (demo inputs and the
/// default rule set); their `name` carries an extension so the format can be
/// chosen the same way as for files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Path(PathBuf),
    Embedded {
        name: &'static str,
        content: &'static str,
    },
}

impl InputSource {
    /// File name used to pick the document format
    pub fn format_hint(&self) -> String {
        match self {
            InputSource::Path(path) => path.to_string_lossy().into_owned(),
            InputSource::Embedded { name, .. } => name.to_string(),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Path(path) => write!(f, "{}", path.display()),
            InputSource::Embedded { name, .. } => write!(f, "{} (built-in)", name),
        }
    }
}

/// ThreatModelReader port for loading the input documents
///
/// Implementations parse and structurally validate each document, returning
/// domain values. Null or missing category lists come back as empty lists.
pub trait ThreatModelReader {
    /// Reads the project description (title, description, endpoint import settings)
    ///
    /// # Errors
    /// Returns an error if the document cannot be read or parsed, or a
    /// required key is missing
    fn read_model_description(&self, source: &InputSource) -> Result<ModelDescription>;

    /// Reads the declared resources and relationships
    ///
    /// # Errors
    /// Returns an error if a required category block is missing or a resource
    /// lacks its name, network or description
    fn read_catalog(&self, source: &InputSource) -> Result<ResourceCatalog>;

    /// Reads the per-category default attributes
    ///
    /// # Errors
    /// Returns an error if a required category block is missing
    fn read_defaults(&self, source: &InputSource) -> Result<ResourceDefaults>;

    /// Reads the security checks in document order
    ///
    /// # Errors
    /// Returns an error if a check is incomplete or its query does not parse
    fn read_security_rules(&self, source: &InputSource) -> Result<Vec<SecurityRule>>;

    /// Reads an OpenAPI / Swagger document as a generic tree
    ///
    /// # Errors
    /// Returns an error if the document cannot be read or parsed
    fn read_endpoint_document(&self, source: &InputSource) -> Result<serde_json::Value>;
}

impl<T: ThreatModelReader + ?Sized> ThreatModelReader for &T {
    fn read_model_description(&self, source: &InputSource) -> Result<ModelDescription> {
        (**self).read_model_description(source)
    }

    fn read_catalog(&self, source: &InputSource) -> Result<ResourceCatalog> {
        (**self).read_catalog(source)
    }

    fn read_defaults(&self, source: &InputSource) -> Result<ResourceDefaults> {
        (**self).read_defaults(source)
    }

    fn read_security_rules(&self, source: &InputSource) -> Result<Vec<SecurityRule>> {
        (**self).read_security_rules(source)
    }

    fn read_endpoint_document(&self, source: &InputSource) -> Result<serde_json::Value> {
        (**self).read_endpoint_document(source)
    }
}
