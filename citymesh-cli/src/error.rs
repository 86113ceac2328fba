//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use citymesh::pipeline::PipelineError;
use citymesh::provider::FetchError;
use citymesh::svg::SvgError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to construct the HTTP client
    Provider(FetchError),
    /// Map pipeline run failed
    Pipeline(PipelineError),
    /// SVG input could not be processed
    Svg(SvgError),
    /// Failed to read an input file
    FileRead { path: String, error: std::io::Error },
    /// Failed to write an output file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Pipeline(PipelineError::Fetch(_)) => {
                eprintln!();
                eprintln!("The run aborted on the first failing tile (fail-fast policy).");
                eprintln!("Set fetch_policy = skip-failed in the [pipeline] config section");
                eprintln!("to render the tiles that did succeed.");
            }
            CliError::Svg(SvgError::GroupNotFound(_)) => {
                eprintln!();
                eprintln!("Pass --group to select the SVG group holding the path outlines.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Provider(e) => write!(f, "Failed to create tile provider: {}", e),
            CliError::Pipeline(e) => write!(f, "Pipeline failed: {}", e),
            CliError::Svg(e) => write!(f, "SVG input error: {}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path, error)
            }
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Provider(e) => Some(e),
            CliError::Pipeline(e) => Some(e),
            CliError::Svg(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<PipelineError> for CliError {
    fn from(e: PipelineError) -> Self {
        CliError::Pipeline(e)
    }
}

impl From<SvgError> for CliError {
    fn from(e: SvgError) -> Self {
        CliError::Svg(e)
    }
}
