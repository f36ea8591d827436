//! Read models for CQRS-lite pattern
//!
//! View-optimized structs giving formatters a denormalized representation
//! of a run.

mod threat_report_read_model;
mod threat_report_read_model_builder;

pub use threat_report_read_model::{
    BoundaryView, DiagramView, EdgeView, FindingView, NodeView, SeveritySummaryView,
    ThreatReportReadModel,
};
pub use threat_report_read_model_builder::ThreatReportReadModelBuilder;
