use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a clean run,
/// a run whose findings crossed the configured severity gate, and failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no findings, or all findings below the severity gate
    Success = 0,
    /// Findings at or above the `--fail-on-severity` level were produced
    FindingsDetected = 1,
    /// Invalid command-line arguments (clap parsing errors, missing inputs)
    InvalidArguments = 2,
    /// Application error (invalid configuration, predicate failure, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::FindingsDetected => write!(f, "Findings Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for threat model generation.
///
/// Every variant aborts the run: there are no local recovery paths, and no
/// report artefacts are written once one of these has been raised.
#[derive(Debug, Error)]
pub enum TmacError {
    #[error("Invalid {document} structure: {reason}\n\n💡 Hint: Check the {document} file against the documented layout")]
    ConfigStructure { document: String, reason: String },

    #[error("No defaults defined for resource category '{category}'\n\n💡 Hint: Add a '{category}' block to the defaults file")]
    MissingDefaults { category: String },

    #[error("Security check '{rule}' failed on resource '{resource}': {reason}\n\n💡 Hint: Define the attribute in the defaults file or in the resource's config overrides")]
    PredicateEvaluation {
        rule: String,
        resource: String,
        reason: String,
    },

    #[error("Invalid security check '{rule}': {reason}\n\n💡 Hint: check_query accepts attribute names joined with and/or/not and parentheses")]
    RuleDefinition { rule: String, reason: String },

    #[error("Failed to import endpoints from {source_name}: {reason}\n\n💡 Hint: Every path needs at least one operation with a description")]
    Import { source_name: String, reason: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to parse file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file contains valid YAML, JSON or TOML")]
    FileParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid output directory: {path}\nReason: {reason}\n\n💡 Hint: Please specify an existing directory with --output-dir")]
    InvalidOutputDir { path: PathBuf, reason: String },

    /// Validation error for builder patterns and argument merging
    #[error("Validation error: {message}")]
    Validation { message: String },
}
