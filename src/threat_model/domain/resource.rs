use super::{AttributeMap, ResourceCategory};
use crate::shared::Result;

/// Maximum length for resource names (security limit)
const MAX_RESOURCE_NAME_LENGTH: usize = 255;

/// NewType wrapper for resource name with validation
///
/// Names are free-form because imported endpoints use their URL path
/// (`/api/user/{id}`) as the name; only emptiness, length and control
/// characters are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceName(String);

impl ResourceName {
    pub fn new(name: String) -> Result<Self> {
        if name.trim().is_empty() {
            anyhow::bail!("Resource name cannot be empty");
        }

        if name.len() > MAX_RESOURCE_NAME_LENGTH {
            anyhow::bail!(
                "Resource name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_RESOURCE_NAME_LENGTH
            );
        }

        if name.chars().any(char::is_control) {
            anyhow::bail!("Resource name '{}' contains control characters", name.escape_debug());
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A declared resource together with its sparse override map
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceInstance {
    name: ResourceName,
    category: ResourceCategory,
    network: Option<String>,
    description: String,
    overrides: AttributeMap,
}

impl ResourceInstance {
    /// Creates a resource with no overrides.
    ///
    /// # Errors
    /// Fails if the name is invalid, if a non-network resource has no network,
    /// or if a network resource names a parent network.
    pub fn new(
        name: String,
        category: ResourceCategory,
        network: Option<String>,
        description: String,
    ) -> Result<Self> {
        let name = ResourceName::new(name)?;
        let network = network.filter(|n| !n.trim().is_empty());

        match (category.requires_network(), &network) {
            (true, None) => anyhow::bail!(
                "{} resource '{}' must name the network it belongs to",
                category,
                name
            ),
            (false, Some(parent)) => anyhow::bail!(
                "network '{}' cannot itself belong to network '{}'",
                name,
                parent
            ),
            _ => {}
        }

        Ok(Self {
            name,
            category,
            network,
            description,
            overrides: AttributeMap::new(),
        })
    }

    pub fn with_overrides(mut self, overrides: AttributeMap) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn category(&self) -> ResourceCategory {
        self.category
    }

    pub fn network(&self) -> Option<&str> {
        self.network.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn overrides(&self) -> &AttributeMap {
        &self.overrides
    }
}

/// A directed, described relationship between two resources referenced by name.
/// Endpoints are not required to resolve; that is a rendering concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipEdge {
    pub source: String,
    pub destination: String,
    pub description: String,
}

impl RelationshipEdge {
    pub fn new(source: String, destination: String, description: String) -> Self {
        Self {
            source,
            destination,
            description,
        }
    }
}
