use super::{AttributeMap, ResourceCategory};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, HashSet};

/// A resource's fully resolved posture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    pub name: String,
    pub category: ResourceCategory,
    pub attributes: AttributeMap,
}

/// Resolved postures for every declared resource of one run.
///
/// Declaration order is kept within each category; every category is present
/// even when empty. Serializes as `category -> name -> attributes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    categories: BTreeMap<ResourceCategory, Vec<ResolvedResource>>,
}

impl Snapshot {
    pub(crate) fn from_categories(
        mut categories: BTreeMap<ResourceCategory, Vec<ResolvedResource>>,
    ) -> Self {
        for category in ResourceCategory::ALL {
            categories.entry(category).or_default();
        }
        Self { categories }
    }

    pub fn resources(&self, category: ResourceCategory) -> &[ResolvedResource] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Looks up a resolved posture by category and name
    pub fn get(&self, category: ResourceCategory, name: &str) -> Option<&AttributeMap> {
        self.resources(category)
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.attributes)
    }

    /// Union of the given categories, in scope order then declaration order.
    /// A name already seen earlier in the walk is skipped.
    pub fn scope(&self, categories: &[ResourceCategory]) -> Vec<&ResolvedResource> {
        let mut seen = HashSet::new();
        categories
            .iter()
            .flat_map(|category| self.resources(*category).iter())
            .filter(|resource| seen.insert(resource.name.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct CategoryView<'a>(&'a [ResolvedResource]);

impl Serialize for CategoryView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for resource in self.0 {
            map.serialize_entry(&resource.name, &resource.attributes)?;
        }
        map.end()
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ResourceCategory::ALL.len()))?;
        for category in ResourceCategory::ALL {
            map.serialize_entry(category.key(), &CategoryView(self.resources(category)))?;
        }
        map.end()
    }
}
