use std::fmt;

/// Failure categories of CLI commands. Details are reported through the
/// `ui` module where they happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliError {
    FileError,
    InputError,
    QueryError,
    ValidationError,
    RuntimeError,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileError => write!(f, "Failed to read input file"),
            CliError::InputError => write!(f, "Invalid input"),
            CliError::QueryError => write!(f, "Failed to apply query"),
            CliError::ValidationError => write!(f, "Validation failed"),
            CliError::RuntimeError => write!(f, "Failed to start async runtime"),
        }
    }
}

impl std::error::Error for CliError {}
