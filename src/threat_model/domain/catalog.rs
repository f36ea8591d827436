use super::{RelationshipEdge, ResourceCategory, ResourceInstance};
use std::collections::BTreeMap;

/// The declared inventory: one ordered, possibly empty list of instances per
/// category plus the relationship edges between them.
///
/// Every category is always present, so a missing or null block in the
/// source document and an empty list are the same thing here.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceCatalog {
    resources: BTreeMap<ResourceCategory, Vec<ResourceInstance>>,
    relationships: Vec<RelationshipEdge>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self {
            resources: ResourceCategory::ALL
                .iter()
                .map(|category| (*category, Vec::new()))
                .collect(),
            relationships: Vec::new(),
        }
    }

    /// Appends an instance to the end of its category's list
    pub fn add_resource(&mut self, resource: ResourceInstance) {
        self.resources
            .entry(resource.category())
            .or_default()
            .push(resource);
    }

    /// Appends instances to a category, preserving their order.
    /// An empty category simply becomes the given list.
    pub fn extend_category(
        &mut self,
        category: ResourceCategory,
        resources: impl IntoIterator<Item = ResourceInstance>,
    ) {
        self.resources.entry(category).or_default().extend(resources);
    }

    pub fn add_relationship(&mut self, edge: RelationshipEdge) {
        self.relationships.push(edge);
    }

    pub fn resources(&self, category: ResourceCategory) -> &[ResourceInstance] {
        self.resources
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn relationships(&self) -> &[RelationshipEdge] {
        &self.relationships
    }

    /// Iterates categories in canonical order together with their instances
    pub fn iter(&self) -> impl Iterator<Item = (ResourceCategory, &[ResourceInstance])> {
        ResourceCategory::ALL
            .into_iter()
            .map(move |category| (category, self.resources(category)))
    }

    /// Every declared instance, category by category
    pub fn all_resources(&self) -> impl Iterator<Item = &ResourceInstance> {
        self.iter().flat_map(|(_, resources)| resources.iter())
    }

    /// Finds the first instance with the given name in any category
    pub fn find(&self, name: &str) -> Option<&ResourceInstance> {
        self.all_resources().find(|r| r.name() == name)
    }

    /// Resources whose `network` names the given network, in category order
    pub fn members_of<'a>(
        &'a self,
        network: &'a str,
    ) -> impl Iterator<Item = &'a ResourceInstance> + 'a {
        self.all_resources()
            .filter(move |r| r.network() == Some(network))
    }

    pub fn resource_count(&self) -> usize {
        self.resources.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.resource_count() == 0
    }
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self::new()
    }
}
