use super::plantuml_diagram::PlantUmlDiagram;
use crate::application::read_models::{FindingView, SeveritySummaryView, ThreatReportReadModel};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Markdown table header for findings
const FINDINGS_TABLE_HEADER: &str =
    "| Name | Resource | Finding | Remediation | Query | Severity |\n";

/// Markdown table separator line for findings
const FINDINGS_TABLE_SEPARATOR: &str = "|-----|-----|-----|-----|-----|-----|\n";

/// MarkdownFormatter adapter for generating the threat model report
///
/// This adapter implements the ReportFormatter port. The report embeds the
/// data-flow diagram as a fenced `plantuml` block so that a PlantUML
/// renderer pointed at the report file can produce the image it links.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    /// Renders the title and description paragraphs
    fn render_header(&self, output: &mut String, model: &ThreatReportReadModel) {
        output.push_str(&format!("# {}\n", model.title));
        for paragraph in &model.description {
            output.push_str(paragraph);
            output.push_str("\n\n");
        }
    }

    /// Renders the data-flow diagram section
    fn render_diagram(&self, output: &mut String, model: &ThreatReportReadModel) {
        output.push_str("# Data Flow Diagram\n");
        output.push_str("```plantuml\n");
        output.push_str(&PlantUmlDiagram::render(&model.report_name, &model.diagram));
        output.push_str("```\n\n");

        if let Some(image) = &model.diagram_image {
            output.push_str(&format!("![Diagram](./{})\n\n", image));
        }
    }

    /// Renders the findings table, or a placeholder when nothing matched
    fn render_findings(&self, output: &mut String, findings: &[FindingView]) {
        output.push_str("# Findings\n\n");

        if findings.is_empty() {
            output.push_str("*No findings*\n\n");
            return;
        }

        output.push_str(FINDINGS_TABLE_HEADER);
        output.push_str(FINDINGS_TABLE_SEPARATOR);
        for finding in findings {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&finding.name),
                Self::escape_markdown_table_cell(&finding.resource),
                Self::escape_markdown_table_cell(&finding.finding),
                Self::escape_markdown_table_cell(&finding.remediation),
                Self::escape_markdown_table_cell(&finding.query),
                finding.severity
            ));
        }
        output.push('\n');
    }

    /// Renders the per-severity summary line
    fn render_summary(&self, output: &mut String, summary: &[SeveritySummaryView]) {
        let total: usize = summary.iter().map(|s| s.count).sum();
        let breakdown = summary
            .iter()
            .map(|s| format!("{} {}", s.count, s.label.to_lowercase()))
            .collect::<Vec<_>>()
            .join(", ");

        output.push_str(&format!(
            "**Found {} {}: {}.**\n",
            total,
            if total == 1 { "finding" } else { "findings" },
            breakdown
        ));
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, model: &ThreatReportReadModel) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, model);
        self.render_diagram(&mut output, model);
        self.render_findings(&mut output, &model.findings);
        self.render_summary(&mut output, &model.severity_summary);

        Ok(output)
    }
}
