use crate::application::read_models::ThreatReportReadModel;
use crate::shared::Result;

/// ReportFormatter port for rendering report artefacts
///
/// This port abstracts the formatting of the human-readable report and the
/// machine-readable snapshot file.
pub trait ReportFormatter {
    /// Formats the report using the read model
    ///
    /// # Arguments
    /// * `model` - Title, description, diagram, snapshot and ranked findings
    ///
    /// # Returns
    /// Formatted content as a string
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, model: &ThreatReportReadModel) -> Result<String>;
}
