use super::{ResourceCategory, SecurityRule, Severity};
use serde::Serialize;

/// One (rule, resource) pair whose predicate held
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule_id: String,
    pub rule_name: String,
    pub resource_name: String,
    pub resource_category: ResourceCategory,
    pub description: String,
    pub remediation: String,
    pub severity: Severity,
    pub predicate_text: String,
}

impl Finding {
    pub fn new(rule: &SecurityRule, resource_name: &str, category: ResourceCategory) -> Self {
        Self {
            rule_id: rule.id().to_string(),
            rule_name: rule.name().to_string(),
            resource_name: resource_name.to_string(),
            resource_category: category,
            description: rule.description().to_string(),
            remediation: rule.remediation().to_string(),
            severity: rule.severity(),
            predicate_text: rule.predicate_text().to_string(),
        }
    }
}
