//! tmac - programmatic threat modelling
//!
//! This library resolves the security posture of every declared resource by
//! laying per-resource overrides over per-category defaults, evaluates
//! security checks against the resolved postures and produces a Markdown
//! report with a C4-PlantUML data-flow diagram.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`threat_model`): resources, postures, the predicate
//!   language, and the merge and evaluation services
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use tmac::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let use_case = GenerateReportUseCase::new(
//!     FileSystemReader::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = ReportRequest::new(
//!     InputSource::Path(PathBuf::from("config.yaml")),
//!     InputSource::Path(PathBuf::from("resources.yaml")),
//!     InputSource::Path(PathBuf::from("defaults.yaml")),
//!     InputSource::Path(PathBuf::from("security_checks.yaml")),
//!     chrono::Local::now().date_naive(),
//! );
//! let response = use_case.execute(request)?;
//!
//! let model = ThreatReportReadModelBuilder::build(&response, None);
//! println!("{}", MarkdownFormatter::new().format(&model)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod builtin;
pub mod cli;
pub mod config;
pub mod logging;
pub mod ports;
pub mod shared;
pub mod threat_model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        MarkdownFormatter, PlantUmlDiagram, SnapshotFormatter,
    };
    pub use crate::adapters::outbound::renderer::PlantUmlRenderer;
    pub use crate::application::dto::{ReportRequest, ReportResponse, SnapshotFormat};
    pub use crate::application::read_models::{
        ThreatReportReadModel, ThreatReportReadModelBuilder,
    };
    pub use crate::application::use_cases::GenerateReportUseCase;
    pub use crate::ports::outbound::{
        DiagramRenderer, InputSource, OutputPresenter, ProgressReporter, ReportFormatter,
        ThreatModelReader,
    };
    pub use crate::shared::error::{ExitCode, TmacError};
    pub use crate::shared::Result;
    pub use crate::threat_model::domain::{
        AttributeMap, AttributeValue, EndpointImportSettings, Finding, ModelDescription, RelationshipEdge,
        ResourceCatalog, ResourceCategory, ResourceDefaults, ResourceInstance, SecurityRule,
        Severity, Snapshot,
    };
    pub use crate::threat_model::predicate::{MissingAttributePolicy, Predicate};
    pub use crate::threat_model::services::{
        CatalogValidator, EndpointImporter, PostureMerger, RuleEvaluator,
    };
}
