use crate::shared::error::TmacError;
use crate::shared::Result;
use crate::threat_model::domain::{
    AttributeMap, ResolvedResource, ResourceCatalog, ResourceDefaults, ResourceInstance, Snapshot,
};
use std::collections::BTreeMap;

/// PostureMerger service for building the resolved security posture
///
/// Overlays each resource's sparse override map onto its category's default
/// attributes. Pure business logic: inputs are borrowed immutably and every
/// resolved map is an owned copy.
pub struct PostureMerger;

impl PostureMerger {
    /// Builds the snapshot for every declared resource
    ///
    /// # Arguments
    /// * `catalog` - The declared resources, already structurally validated
    /// * `defaults` - Per-category default attributes
    ///
    /// # Returns
    /// A Snapshot holding one resolved entry per declared resource, in
    /// declaration order
    ///
    /// # Errors
    /// Returns [`TmacError::MissingDefaults`] when a category that has at least
    /// one declared resource has no defaults entry
    pub fn merge(catalog: &ResourceCatalog, defaults: &ResourceDefaults) -> Result<Snapshot> {
        let mut categories = BTreeMap::new();

        for (category, instances) in catalog.iter() {
            if instances.is_empty() {
                continue;
            }

            let category_defaults =
                defaults
                    .get(category)
                    .ok_or_else(|| TmacError::MissingDefaults {
                        category: category.key().to_string(),
                    })?;

            let resolved = instances
                .iter()
                .map(|instance| ResolvedResource {
                    name: instance.name().to_string(),
                    category,
                    attributes: Self::resolve(category_defaults, instance),
                })
                .collect::<Vec<_>>();

            tracing::debug!(
                category = category.key(),
                resources = resolved.len(),
                "resolved category posture"
            );
            categories.insert(category, resolved);
        }

        Ok(Snapshot::from_categories(categories))
    }

    /// Resolves one instance: a copy of the defaults with every override
    /// applied on top. Override keys absent from the defaults are added.
    pub fn resolve(defaults: &AttributeMap, instance: &ResourceInstance) -> AttributeMap {
        let mut resolved = defaults.clone();

        for (key, value) in instance.overrides() {
            match resolved.insert(key.clone(), value.clone()) {
                Some(previous) if previous != *value => tracing::debug!(
                    resource = instance.name(),
                    attribute = key.as_str(),
                    from = %previous,
                    to = %value,
                    "override applied"
                ),
                Some(_) => {}
                None => tracing::debug!(
                    resource = instance.name(),
                    attribute = key.as_str(),
                    value = %value,
                    "override adds attribute not present in defaults"
                ),
            }
        }

        resolved
    }
}
