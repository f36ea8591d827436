use crate::application::dto::{ReportRequest, ReportResponse};
use crate::ports::outbound::{InputSource, ProgressReporter, ThreatModelReader};
use crate::shared::error::TmacError;
use crate::shared::Result;
use crate::threat_model::domain::{
    ModelDescription, ResourceCatalog, ResourceDefaults, SecurityRule,
};
use crate::threat_model::services::{
    CatalogValidator, EndpointImporter, PostureMerger, RuleEvaluator,
};

/// Number of input documents always loaded (config, resources, defaults, checks)
const REQUIRED_DOCUMENTS: usize = 4;

/// The four documents every run needs
struct LoadedInputs {
    model: ModelDescription,
    catalog: ResourceCatalog,
    defaults: ResourceDefaults,
    rules: Vec<SecurityRule>,
}

/// GenerateReportUseCase - Core use case for threat report generation
///
/// Orchestrates load → validate → import → merge → evaluate using generic
/// dependency injection for the infrastructure it touches. Nothing is
/// written here: the caller formats and persists the response, so a failed
/// run never leaves partial artefacts behind.
///
/// # Type Parameters
/// * `R` - ThreatModelReader implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateReportUseCase<R, PR> {
    reader: R,
    progress_reporter: PR,
}

impl<R, PR> GenerateReportUseCase<R, PR>
where
    R: ThreatModelReader,
    PR: ProgressReporter,
{
    /// Creates a new GenerateReportUseCase with injected dependencies
    pub fn new(reader: R, progress_reporter: PR) -> Self {
        Self {
            reader,
            progress_reporter,
        }
    }

    /// Executes the report generation use case
    ///
    /// # Arguments
    /// * `request` - Input sources and evaluation options
    ///
    /// # Returns
    /// ReportResponse with the snapshot and ranked findings
    ///
    /// # Errors
    /// Any loading, validation, import, merge or evaluation error aborts the
    /// run and is returned unchanged
    pub fn execute(&self, request: ReportRequest) -> Result<ReportResponse> {
        // Step 1: Load the input documents
        let LoadedInputs {
            model,
            mut catalog,
            defaults,
            rules,
        } = self.load_inputs(&request)?;

        // Step 2: Import endpoints before anything looks at the catalog
        let imported_endpoints =
            self.import_endpoints_if_requested(&request, &model, &mut catalog)?;

        // Step 3: Cross-resource validation
        let report = CatalogValidator::validate(&catalog)?;
        for warning in &report.warnings {
            self.progress_reporter
                .report_error(&format!("⚠️  Warning: {}", warning));
        }

        // Step 4: Resolve postures
        self.progress_reporter.report(&format!(
            "🧩 Resolving security posture for {} resource(s)...",
            catalog.resource_count()
        ));
        let snapshot = PostureMerger::merge(&catalog, &defaults)?;

        // Step 5: Evaluate security checks
        self.progress_reporter.report(&format!(
            "🔍 Evaluating {} security check(s)...",
            rules.len()
        ));
        let findings =
            RuleEvaluator::new(request.missing_attribute_policy).evaluate(&snapshot, &rules)?;

        self.progress_reporter.report_completion(&format!(
            "Evaluation complete: {} finding(s)",
            findings.len()
        ));

        Ok(ReportResponse {
            report_name: request.report_name(),
            model,
            catalog,
            snapshot,
            findings,
            warnings: report.warnings,
            imported_endpoints,
        })
    }

    /// Reads the four required documents, reporting progress
    fn load_inputs(&self, request: &ReportRequest) -> Result<LoadedInputs> {
        self.progress_reporter.report("📖 Loading threat model inputs...");

        self.report_loading(1, &request.config);
        let model = self.reader.read_model_description(&request.config)?;

        self.report_loading(2, &request.resources);
        let catalog = self.reader.read_catalog(&request.resources)?;

        self.report_loading(3, &request.defaults);
        let defaults = self.reader.read_defaults(&request.defaults)?;

        self.report_loading(4, &request.security_checks);
        let rules = self.reader.read_security_rules(&request.security_checks)?;

        self.progress_reporter.report(&format!(
            "✅ Loaded {} resource(s), {} relationship(s) and {} security check(s)",
            catalog.resource_count(),
            catalog.relationships().len(),
            rules.len()
        ));

        Ok(LoadedInputs {
            model,
            catalog,
            defaults,
            rules,
        })
    }

    fn report_loading(&self, current: usize, source: &InputSource) {
        self.progress_reporter.report_progress(
            current,
            REQUIRED_DOCUMENTS,
            Some(&source.to_string()),
        );
    }

    /// Imports endpoints into the catalog when an endpoint document was given
    ///
    /// # Returns
    /// Number of imported resources (0 when no document was given)
    ///
    /// # Errors
    /// Returns [`TmacError::ConfigStructure`] if the project config lacks the
    /// import settings, or [`TmacError::Import`] if the document is malformed.
    /// The catalog is untouched on error.
    fn import_endpoints_if_requested(
        &self,
        request: &ReportRequest,
        model: &ModelDescription,
        catalog: &mut ResourceCatalog,
    ) -> Result<usize> {
        let Some(source) = &request.endpoints else {
            return Ok(0);
        };

        let settings = model
            .endpoint_import
            .as_ref()
            .ok_or_else(|| TmacError::ConfigStructure {
                document: "config".to_string(),
                reason: "swagger_resource_type and swagger_default_network are required when an endpoint document is given".to_string(),
            })?;

        self.progress_reporter
            .report(&format!("🌐 Importing endpoints from: {}", source));

        let document = self.reader.read_endpoint_document(source)?;
        let resources = EndpointImporter::import(&document, &source.to_string(), settings)?;
        let count = resources.len();
        EndpointImporter::apply(catalog, settings, resources);

        self.progress_reporter.report(&format!(
            "✅ Imported {} endpoint(s) as {}",
            count, settings.target_category
        ));

        Ok(count)
    }
}
