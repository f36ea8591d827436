/// Formatter adapters for the report artefacts
mod markdown_formatter;
mod plantuml_diagram;
mod snapshot_formatter;

pub use markdown_formatter::MarkdownFormatter;
pub use plantuml_diagram::PlantUmlDiagram;
pub use snapshot_formatter::SnapshotFormatter;
