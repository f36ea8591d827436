//! Threat report read model for formatters
//!
//! A denormalized view of one run: what the report says, what the diagram
//! draws and the snapshot to persist.

use crate::threat_model::domain::{ResourceCategory, Snapshot};

/// Main read model for a threat report
#[derive(Debug, Clone)]
pub struct ThreatReportReadModel {
    /// Base name of the artefacts, also the diagram name
    pub report_name: String,
    pub title: String,
    /// Description paragraphs
    pub description: Vec<String>,
    pub diagram: DiagramView,
    /// Image file name to link from the report, when a renderer will run
    pub diagram_image: Option<String>,
    /// Findings in ranked order
    pub findings: Vec<FindingView>,
    /// Finding count per severity, most severe first; zero counts included
    pub severity_summary: Vec<SeveritySummaryView>,
    pub snapshot: Snapshot,
}

/// One row of the findings table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingView {
    pub name: String,
    pub resource: String,
    pub finding: String,
    pub remediation: String,
    pub query: String,
    pub severity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeveritySummaryView {
    pub severity: u8,
    pub label: &'static str,
    pub count: usize,
}

/// Resource traversal feeding the data-flow diagram
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramView {
    /// One boundary per declared network, in declaration order
    pub boundaries: Vec<BoundaryView>,
    /// Resources whose network is not a declared network
    pub unbounded: Vec<NodeView>,
    pub relationships: Vec<EdgeView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryView {
    pub network: String,
    pub members: Vec<NodeView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    pub name: String,
    pub category: ResourceCategory,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeView {
    pub source: String,
    pub destination: String,
    pub description: String,
}
