/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_threat_model_reader;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_threat_model_reader::MockThreatModelReader;
