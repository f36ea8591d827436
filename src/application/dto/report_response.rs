use crate::threat_model::domain::{
    Finding, ModelDescription, ResourceCatalog, Severity, Snapshot,
};

/// ReportResponse - Internal response DTO from the report generation use case
///
/// Holds everything the formatters need. Produced only when every rule was
/// evaluated against every resource in scope.
#[derive(Debug, Clone)]
pub struct ReportResponse {
    /// Base name of the artefacts, e.g. `report-2024-05-01`
    pub report_name: String,
    /// Title, description and endpoint settings
    pub model: ModelDescription,
    /// Catalog after endpoint import
    pub catalog: ResourceCatalog,
    /// Resolved postures
    pub snapshot: Snapshot,
    /// Findings ranked by severity
    pub findings: Vec<Finding>,
    /// Non-fatal problems found while validating the catalog
    pub warnings: Vec<String>,
    /// Number of resources imported from the endpoint document
    pub imported_endpoints: usize,
}

impl ReportResponse {
    /// Most severe finding level, if any finding was produced
    pub fn highest_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).min()
    }

    /// True if any finding is at least as severe as the threshold
    pub fn has_findings_at_or_above(&self, threshold: Severity) -> bool {
        self.highest_severity()
            .map(|severity| severity <= threshold)
            .unwrap_or(false)
    }
}
