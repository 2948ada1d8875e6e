use thiserror::Error;

/// Errors that abort a load pass before any report is derived.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file extension is outside the three recognised formats.
    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// A required column is absent from the uploaded table.
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    /// I/O or parse failure, with context describing the failing stage.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
