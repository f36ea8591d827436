use super::{AttributeMap, ResourceCategory};
use std::collections::BTreeMap;

/// Per-category default posture. Pure data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceDefaults {
    by_category: BTreeMap<ResourceCategory, AttributeMap>,
}

impl ResourceDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used mostly by tests and the document loader
    pub fn with(mut self, category: ResourceCategory, attributes: AttributeMap) -> Self {
        self.insert(category, attributes);
        self
    }

    pub fn insert(&mut self, category: ResourceCategory, attributes: AttributeMap) {
        self.by_category.insert(category, attributes);
    }

    pub fn get(&self, category: ResourceCategory) -> Option<&AttributeMap> {
        self.by_category.get(&category)
    }

    pub fn contains(&self, category: ResourceCategory) -> bool {
        self.by_category.contains_key(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = ResourceCategory> + '_ {
        self.by_category.keys().copied()
    }
}
