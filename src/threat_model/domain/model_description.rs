use super::ResourceCategory;

/// Where imported endpoints go and which network they join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointImportSettings {
    pub target_category: ResourceCategory,
    pub default_network: String,
}

/// Report title, description paragraphs and endpoint import settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescription {
    pub title: String,
    pub description: Vec<String>,
    pub endpoint_import: Option<EndpointImportSettings>,
}

impl ModelDescription {
    pub fn new(title: String, description: Vec<String>) -> Self {
        Self {
            title,
            description,
            endpoint_import: None,
        }
    }

    pub fn with_endpoint_import(mut self, settings: EndpointImportSettings) -> Self {
        self.endpoint_import = Some(settings);
        self
    }
}
