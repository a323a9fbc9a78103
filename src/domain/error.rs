use std::io;

use thiserror::Error;

/// Library-wide error type for bundlegen operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Zip archive failure.
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    /// Destination package already exists and overwrite was not requested.
    #[error("Package already exists at '{0}'. Pass --overwrite to replace it.")]
    PackageExists(String),

    /// A skeleton template is missing from the catalog.
    #[error("Template '{0}' not found in the skeleton catalog")]
    TemplateNotFound(String),

    /// The same target path was staged twice via create.
    #[error("File '{0}' is already staged")]
    DuplicateTarget(String),

    /// Append or replace was requested for a target that was never staged.
    #[error("No staged file at '{0}'")]
    StagedFileMissing(String),

    /// A staged structured config file failed to parse or lacks a required key.
    #[error("Invalid structured content in '{file}': {reason}")]
    StructuredContent { file: String, reason: String },

    /// A template references a tag that is not in the tag store.
    #[error("Template '{file}' references undefined tag '{tag}'")]
    UnresolvedReference { tag: String, file: String },

    /// A template carries a malformed conditional block.
    #[error("Malformed template '{file}': {details}")]
    TemplateSyntax { file: String, details: String },

    /// A composer manifest could not be parsed or has an unexpected shape.
    #[error("Failed to parse manifest '{file}': {details}")]
    ManifestParse { file: String, details: String },

    /// User-supplied input is invalid or incomplete.
    #[error("{0}")]
    InvalidInput(String),
}

impl AppError {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        AppError::InvalidInput(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Zip(_) => io::ErrorKind::Other,
            AppError::TemplateNotFound(_) | AppError::StagedFileMissing(_) => {
                io::ErrorKind::NotFound
            }
            AppError::PackageExists(_) | AppError::DuplicateTarget(_) => {
                io::ErrorKind::AlreadyExists
            }
            AppError::StructuredContent { .. }
            | AppError::UnresolvedReference { .. }
            | AppError::TemplateSyntax { .. }
            | AppError::ManifestParse { .. } => io::ErrorKind::InvalidData,
            AppError::InvalidInput(_) => io::ErrorKind::InvalidInput,
        }
    }
}
