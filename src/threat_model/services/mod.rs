mod catalog_validator;
mod endpoint_importer;
mod posture_merger;
mod rule_evaluator;

pub use catalog_validator::{CatalogValidator, ValidationReport};
pub use endpoint_importer::EndpointImporter;
pub use posture_merger::PostureMerger;
pub use rule_evaluator::RuleEvaluator;
