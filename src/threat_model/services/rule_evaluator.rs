use crate::shared::error::TmacError;
use crate::shared::Result;
use crate::threat_model::domain::{Finding, SecurityRule, Snapshot};
use crate::threat_model::predicate::MissingAttributePolicy;

/// RuleEvaluator service for running security checks against a snapshot
///
/// Every rule is evaluated against every resource in its scope; a resource
/// whose posture satisfies the rule's predicate is non-compliant and yields
/// a finding. The pass is a pure fold with no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEvaluator {
    missing_attribute_policy: MissingAttributePolicy,
}

impl RuleEvaluator {
    pub fn new(missing_attribute_policy: MissingAttributePolicy) -> Self {
        Self {
            missing_attribute_policy,
        }
    }

    /// Evaluates all rules and returns the findings ranked by severity
    ///
    /// # Arguments
    /// * `snapshot` - Resolved postures of the run
    /// * `rules` - Security rules in document order
    ///
    /// # Returns
    /// Findings sorted by ascending severity; ties keep rule order, then
    /// resource order within the rule's scope
    ///
    /// # Errors
    /// Returns [`TmacError::PredicateEvaluation`] for the first (rule, resource)
    /// pair whose predicate cannot be evaluated. No partial list is returned.
    pub fn evaluate(&self, snapshot: &Snapshot, rules: &[SecurityRule]) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for rule in rules {
            let scope = snapshot.scope(rule.resource_scope());
            let mut triggered = 0usize;

            for resource in &scope {
                let non_compliant = rule
                    .predicate()
                    .evaluate(&resource.attributes, self.missing_attribute_policy)
                    .map_err(|failure| TmacError::PredicateEvaluation {
                        rule: rule.id().to_string(),
                        resource: resource.name.clone(),
                        reason: failure.to_string(),
                    })?;

                if non_compliant {
                    tracing::debug!(
                        rule = rule.id(),
                        resource = resource.name.as_str(),
                        severity = rule.severity().level(),
                        "finding"
                    );
                    findings.push(Finding::new(rule, &resource.name, resource.category));
                    triggered += 1;
                }
            }

            tracing::info!(
                rule = rule.id(),
                evaluated = scope.len(),
                findings = triggered,
                "security check evaluated"
            );
        }

        Self::sort_by_severity(&mut findings);
        Ok(findings)
    }

    /// Stable sort, most severe first. Equal severities keep production order.
    pub fn sort_by_severity(findings: &mut [Finding]) {
        findings.sort_by_key(|finding| finding.severity);
    }
}
