use crate::ports::outbound::InputSource;
use crate::threat_model::predicate::MissingAttributePolicy;
use chrono::NaiveDate;

/// ReportRequest - Internal request DTO for the report generation use case
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Project description (title, description, endpoint import settings)
    pub config: InputSource,
    /// Declared resources and relationships
    pub resources: InputSource,
    /// Per-category default attributes
    pub defaults: InputSource,
    /// Security checks
    pub security_checks: InputSource,
    /// Optional OpenAPI / Swagger document to import endpoints from
    pub endpoints: Option<InputSource>,
    /// How checks treat attributes a resource does not define
    pub missing_attribute_policy: MissingAttributePolicy,
    /// Date the report is stamped with
    pub report_date: NaiveDate,
}

impl ReportRequest {
    pub fn new(
        config: InputSource,
        resources: InputSource,
        defaults: InputSource,
        security_checks: InputSource,
        report_date: NaiveDate,
    ) -> Self {
        Self {
            config,
            resources,
            defaults,
            security_checks,
            endpoints: None,
            missing_attribute_policy: MissingAttributePolicy::default(),
            report_date,
        }
    }

    pub fn with_endpoints(mut self, endpoints: Option<InputSource>) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_missing_attribute_policy(mut self, policy: MissingAttributePolicy) -> Self {
        self.missing_attribute_policy = policy;
        self
    }

    /// Base name shared by every artefact of the run, e.g. `report-2024-05-01`
    pub fn report_name(&self) -> String {
        format!("report-{}", self.report_date.format("%Y-%m-%d"))
    }
}
