use crate::shared::error::TmacError;
use crate::shared::Result;
use crate::threat_model::domain::{ResourceCatalog, ResourceCategory};
use std::collections::{HashMap, HashSet};

/// Maximum number of declared resources accepted in one run
const MAX_RESOURCES: usize = 50_000;

/// Non-fatal problems found while validating a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// CatalogValidator service for cross-resource checks
///
/// Per-resource shape (names, required networks) is enforced when instances
/// are built. This service checks what only the whole catalog can show.
pub struct CatalogValidator;

impl CatalogValidator {
    /// Validates the catalog as a whole
    ///
    /// # Returns
    /// A report of dangling references: resources whose network is not a
    /// declared network and relationship endpoints that name no resource.
    /// These are rendered outside any boundary and never fail the run.
    ///
    /// # Errors
    /// Returns [`TmacError::ConfigStructure`] when a resource name is declared
    /// more than once, in the same or in different categories
    pub fn validate(catalog: &ResourceCatalog) -> Result<ValidationReport> {
        if catalog.resource_count() > MAX_RESOURCES {
            return Err(TmacError::ConfigStructure {
                document: "resources".to_string(),
                reason: format!(
                    "too many resources ({}). Maximum allowed: {}",
                    catalog.resource_count(),
                    MAX_RESOURCES
                ),
            }
            .into());
        }

        let mut declared: HashMap<&str, ResourceCategory> = HashMap::new();
        for resource in catalog.all_resources() {
            if let Some(first) = declared.insert(resource.name(), resource.category()) {
                return Err(TmacError::ConfigStructure {
                    document: "resources".to_string(),
                    reason: format!(
                        "duplicate resource name '{}' (declared in {} and {}); names must be unique across all categories",
                        resource.name(),
                        first,
                        resource.category()
                    ),
                }
                .into());
            }
        }

        let networks: HashSet<&str> = catalog
            .resources(ResourceCategory::Network)
            .iter()
            .map(|n| n.name())
            .collect();

        let mut report = ValidationReport::default();

        for resource in catalog.all_resources() {
            if let Some(network) = resource.network() {
                if !networks.contains(network) {
                    report.warnings.push(format!(
                        "{} resource '{}' references undeclared network '{}'",
                        resource.category(),
                        resource.name(),
                        network
                    ));
                }
            }
        }

        for edge in catalog.relationships() {
            for endpoint in [&edge.source, &edge.destination] {
                if !declared.contains_key(endpoint.as_str()) {
                    report.warnings.push(format!(
                        "relationship '{}' -> '{}' references undeclared resource '{}'",
                        edge.source, edge.destination, endpoint
                    ));
                }
            }
        }

        for warning in &report.warnings {
            tracing::warn!("{}", warning);
        }

        Ok(report)
    }
}
