/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod report_request;
mod report_response;
mod snapshot_format;

pub use report_request::ReportRequest;
pub use report_response::ReportResponse;
pub use snapshot_format::SnapshotFormat;
