//! Error types for cxbundle

use crate::exit_codes::{
    EXIT_ARCHIVE_ERROR, EXIT_CONFIG_ERROR, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_IO_ERROR,
    EXIT_PROJECT_ERROR,
};
use std::fmt;

/// Main error type for bundle generation
#[derive(Debug)]
pub enum BundleError {
    /// No files were supplied to a build
    EmptyProject,

    /// No entry script could be resolved for a build
    MissingEntryScript,

    /// The archive structure could not be created or serialized
    ArchiveInit(String),

    /// Two file records share the same id
    DuplicateFileId(String),

    /// A build option holds a value outside its domain
    InvalidOption(String),

    /// Project manifest could not be interpreted
    InvalidManifest(String),

    /// A free-text field contains a double quote (strict mode only)
    UnescapedQuote {
        /// Name of the offending field
        field: String,
    },

    /// IO error
    IoError(std::io::Error),

    /// JSON parsing error
    JsonError(serde_json::Error),

    /// Generic error with message
    Generic(String),
}

impl BundleError {
    /// Exit code the builder binary reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BundleError::EmptyProject | BundleError::MissingEntryScript => EXIT_PROJECT_ERROR,
            BundleError::ArchiveInit(_) => EXIT_ARCHIVE_ERROR,
            BundleError::InvalidOption(_) => EXIT_INVALID_ARGS,
            BundleError::DuplicateFileId(_)
            | BundleError::InvalidManifest(_)
            | BundleError::UnescapedQuote { .. }
            | BundleError::JsonError(_) => EXIT_CONFIG_ERROR,
            BundleError::IoError(_) => EXIT_IO_ERROR,
            BundleError::Generic(_) => EXIT_ERROR,
        }
    }
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleError::EmptyProject => write!(f, "Add at least one file to build a project."),
            BundleError::MissingEntryScript => write!(f, "A Python entry script is required."),
            BundleError::ArchiveInit(msg) => write!(f, "Unable to initialise archive: {msg}"),
            BundleError::DuplicateFileId(id) => write!(f, "Duplicate file id: {id}"),
            BundleError::InvalidOption(msg) => write!(f, "Invalid option: {msg}"),
            BundleError::InvalidManifest(msg) => write!(f, "Invalid manifest: {msg}"),
            BundleError::UnescapedQuote { field } => write!(
                f,
                "Field '{field}' contains a double quote, which would break the generated setup.py"
            ),
            BundleError::IoError(err) => write!(f, "IO error: {err}"),
            BundleError::JsonError(err) => write!(f, "JSON error: {err}"),
            BundleError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for BundleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BundleError::IoError(err) => Some(err),
            BundleError::JsonError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BundleError {
    fn from(err: std::io::Error) -> Self {
        BundleError::IoError(err)
    }
}

impl From<serde_json::Error> for BundleError {
    fn from(err: serde_json::Error) -> Self {
        BundleError::JsonError(err)
    }
}

impl From<zip::result::ZipError> for BundleError {
    fn from(err: zip::result::ZipError) -> Self {
        BundleError::ArchiveInit(err.to_string())
    }
}

impl From<glob::PatternError> for BundleError {
    fn from(err: glob::PatternError) -> Self {
        BundleError::InvalidManifest(format!("bad file pattern: {err}"))
    }
}

impl From<anyhow::Error> for BundleError {
    fn from(err: anyhow::Error) -> Self {
        BundleError::Generic(format!("{err:#}"))
    }
}

/// Result type for cxbundle operations
pub type Result<T> = std::result::Result<T, BundleError>;
