use crate::adapters::outbound::formatters::{MarkdownFormatter, SnapshotFormatter};
use crate::application::dto::SnapshotFormat;
use crate::ports::outbound::ReportFormatter;

/// Artefact a formatter produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatterType {
    /// Markdown report with the embedded data-flow diagram
    Report,
    /// Resolved posture snapshot
    Snapshot(SnapshotFormat),
}

/// Factory for creating report formatters
///
/// This factory encapsulates the creation logic for different formatter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified artefact
    ///
    /// # Arguments
    /// * `formatter_type` - The artefact to create a formatter for
    ///
    /// # Returns
    /// A boxed ReportFormatter trait object appropriate for the artefact
    ///
    /// # Examples
    /// ```
    /// use tmac::application::dto::SnapshotFormat;
    /// use tmac::application::factories::{FormatterFactory, FormatterType};
    ///
    /// let formatter = FormatterFactory::create(FormatterType::Snapshot(SnapshotFormat::Json));
    /// ```
    pub fn create(formatter_type: FormatterType) -> Box<dyn ReportFormatter> {
        match formatter_type {
            FormatterType::Report => Box::new(MarkdownFormatter::new()),
            FormatterType::Snapshot(format) => Box::new(SnapshotFormatter::new(format)),
        }
    }

    /// Returns the progress message for the specified artefact
    ///
    /// # Examples
    /// ```
    /// use tmac::application::factories::{FormatterFactory, FormatterType};
    ///
    /// let message = FormatterFactory::progress_message(FormatterType::Report);
    /// assert_eq!(message, "📝 Generating Markdown report...");
    /// ```
    pub fn progress_message(formatter_type: FormatterType) -> &'static str {
        match formatter_type {
            FormatterType::Report => "📝 Generating Markdown report...",
            FormatterType::Snapshot(SnapshotFormat::Yaml) => "📝 Generating YAML snapshot...",
            FormatterType::Snapshot(SnapshotFormat::Json) => "📝 Generating JSON snapshot...",
        }
    }
}
