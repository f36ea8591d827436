pub mod attribute;
pub mod catalog;
pub mod defaults;
pub mod finding;
pub mod model_description;
pub mod resource;
pub mod resource_category;
pub mod security_rule;
pub mod snapshot;

pub use attribute::{AttributeMap, AttributeValue};
pub use catalog::ResourceCatalog;
pub use defaults::ResourceDefaults;
pub use finding::Finding;
pub use model_description::{EndpointImportSettings, ModelDescription};
pub use resource::{RelationshipEdge, ResourceInstance, ResourceName};
pub use resource_category::ResourceCategory;
pub use security_rule::{SecurityRule, Severity};
pub use snapshot::{ResolvedResource, Snapshot};
