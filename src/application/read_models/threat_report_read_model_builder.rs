//! Builder for constructing ThreatReportReadModel from a use case response

use super::threat_report_read_model::{
    BoundaryView, DiagramView, EdgeView, FindingView, NodeView, SeveritySummaryView,
    ThreatReportReadModel,
};
use crate::application::dto::ReportResponse;
use crate::threat_model::domain::{
    Finding, ResourceCatalog, ResourceCategory, ResourceInstance, Severity,
};
use std::collections::HashSet;

/// Builder for constructing ThreatReportReadModel from domain objects
pub struct ThreatReportReadModelBuilder;

impl ThreatReportReadModelBuilder {
    /// Builds the read model
    ///
    /// # Arguments
    /// * `response` - Result of the report generation use case
    /// * `diagram_image` - Image file name to link, if one will be rendered
    pub fn build(response: &ReportResponse, diagram_image: Option<String>) -> ThreatReportReadModel {
        ThreatReportReadModel {
            report_name: response.report_name.clone(),
            title: response.model.title.clone(),
            description: response.model.description.clone(),
            diagram: Self::build_diagram(&response.catalog),
            diagram_image,
            findings: response.findings.iter().map(Self::build_finding).collect(),
            severity_summary: Self::build_summary(&response.findings),
            snapshot: response.snapshot.clone(),
        }
    }

    /// Groups resources under their network's boundary
    pub fn build_diagram(catalog: &ResourceCatalog) -> DiagramView {
        let networks = catalog.resources(ResourceCategory::Network);
        let declared: HashSet<&str> = networks.iter().map(|n| n.name()).collect();

        let boundaries = networks
            .iter()
            .map(|network| BoundaryView {
                network: network.name().to_string(),
                members: catalog.members_of(network.name()).map(Self::node).collect(),
            })
            .collect();

        let unbounded = catalog
            .all_resources()
            .filter(|r| r.category() != ResourceCategory::Network)
            .filter(|r| r.network().map_or(true, |n| !declared.contains(n)))
            .map(Self::node)
            .collect();

        let relationships = catalog
            .relationships()
            .iter()
            .map(|edge| EdgeView {
                source: edge.source.clone(),
                destination: edge.destination.clone(),
                description: edge.description.clone(),
            })
            .collect();

        DiagramView {
            boundaries,
            unbounded,
            relationships,
        }
    }

    fn node(resource: &ResourceInstance) -> NodeView {
        NodeView {
            name: resource.name().to_string(),
            category: resource.category(),
            description: resource.description().to_string(),
        }
    }

    fn build_finding(finding: &Finding) -> FindingView {
        FindingView {
            name: finding.rule_name.clone(),
            resource: finding.resource_name.clone(),
            finding: finding.description.clone(),
            remediation: finding.remediation.clone(),
            query: finding.predicate_text.clone(),
            severity: finding.severity.level(),
        }
    }

    fn build_summary(findings: &[Finding]) -> Vec<SeveritySummaryView> {
        Severity::ALL
            .iter()
            .map(|severity| SeveritySummaryView {
                severity: severity.level(),
                label: severity.label(),
                count: findings.iter().filter(|f| f.severity == *severity).count(),
            })
            .collect()
    }
}
