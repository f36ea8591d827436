use super::ResourceCategory;
use crate::shared::error::TmacError;
use crate::shared::Result;
use crate::threat_model::predicate::Predicate;
use serde::Serialize;
use std::fmt;

/// Finding severity, 1 (most severe) through 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Severity(u8);

impl Severity {
    pub const CRITICAL: Severity = Severity(1);
    pub const HIGH: Severity = Severity(2);
    pub const MEDIUM: Severity = Severity(3);
    pub const LOW: Severity = Severity(4);

    pub const ALL: [Severity; 4] = [Self::CRITICAL, Self::HIGH, Self::MEDIUM, Self::LOW];

    pub fn new(level: i64) -> Result<Self> {
        if !(1..=4).contains(&level) {
            anyhow::bail!(
                "Invalid severity {}: expected 1 (critical) through 4 (low)",
                level
            );
        }
        Ok(Self(level as u8))
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Critical",
            2 => "High",
            3 => "Medium",
            _ => "Low",
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, scoped security check
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityRule {
    id: String,
    name: String,
    description: String,
    remediation: String,
    severity: Severity,
    resource_scope: Vec<ResourceCategory>,
    predicate: Predicate,
}

impl SecurityRule {
    /// Builds a rule, parsing its check query.
    ///
    /// # Errors
    /// Returns [`TmacError::RuleDefinition`] when the id is blank, the scope is
    /// empty or the query does not parse.
    pub fn new(
        id: String,
        name: String,
        description: String,
        remediation: String,
        severity: Severity,
        resource_scope: Vec<ResourceCategory>,
        check_query: &str,
    ) -> Result<Self> {
        if id.trim().is_empty() {
            return Err(TmacError::RuleDefinition {
                rule: id,
                reason: "rule id cannot be empty".to_string(),
            }
            .into());
        }

        let mut scope: Vec<ResourceCategory> = Vec::with_capacity(resource_scope.len());
        for category in resource_scope {
            if !scope.contains(&category) {
                scope.push(category);
            }
        }
        if scope.is_empty() {
            return Err(TmacError::RuleDefinition {
                rule: id,
                reason: "resource_scope must name at least one category".to_string(),
            }
            .into());
        }

        let predicate = Predicate::parse(check_query).map_err(|e| TmacError::RuleDefinition {
            rule: id.clone(),
            reason: format!("check_query '{}': {}", check_query.trim(), e),
        })?;

        Ok(Self {
            id,
            name,
            description,
            remediation,
            severity,
            resource_scope: scope,
            predicate,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn remediation(&self) -> &str {
        &self.remediation
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn resource_scope(&self) -> &[ResourceCategory] {
        &self.resource_scope
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn predicate_text(&self) -> &str {
        self.predicate.source()
    }
}
