use crate::application::dto::SnapshotFormat;
use crate::application::read_models::ThreatReportReadModel;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use anyhow::Context;

/// SnapshotFormatter adapter for persisting resolved postures
///
/// This adapter implements the ReportFormatter port by serializing the
/// snapshot as nested `category -> name -> attributes`, in YAML or JSON.
pub struct SnapshotFormatter {
    format: SnapshotFormat,
}

impl SnapshotFormatter {
    pub fn new(format: SnapshotFormat) -> Self {
        Self { format }
    }
}

impl ReportFormatter for SnapshotFormatter {
    fn format(&self, model: &ThreatReportReadModel) -> Result<String> {
        match self.format {
            SnapshotFormat::Yaml => serde_yaml_ng::to_string(&model.snapshot)
                .context("Failed to serialize snapshot to YAML"),
            SnapshotFormat::Json => {
                let mut json = serde_json::to_string_pretty(&model.snapshot)
                    .context("Failed to serialize snapshot to JSON")?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}
