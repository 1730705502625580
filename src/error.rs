//! Error handling for catalog-import
//!
//! This module defines the error type shared by the import pipeline and its
//! hosts. Only structural and I/O level failures are errors here: per-field
//! validation findings are ordinary data carried in
//! [`ParseOutcome`](crate::pipeline::ParseOutcome), and a refused commit is a
//! [`CommitOutcome`](crate::import_gate::CommitOutcome) value.
//!
//! The module uses thiserror to keep the variants and their messages in one
//! place.

use thiserror::Error;

/// ImportError represents every failure the import pipeline can report
///
/// The variants cover:
/// - Reading the selected file (I/O and encoding)
/// - Files whose shape cannot be imported at all
/// - Writing the CSV template and the JSON catalog
/// - Bad caller input such as template labels or field names
#[derive(Error, Debug)]
pub enum ImportError {
    /// Error during file system operations (reading/writing files)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error while writing CSV text through the csv crate
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error while reading or writing the JSON product catalog
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The selected file is not valid UTF-8 text
    #[error("File '{0}' is not valid UTF-8 text")]
    EncodingError(String),

    /// The file has no row that can be mapped to a product
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// Template header labels that cannot be written or re-read
    #[error("Invalid template labels: {0}")]
    InvalidLabels(String),

    /// A field name that is not one of the product columns
    #[error("Unknown field '{0}'")]
    UnknownField(String),
}

/// Result type alias for operations that can produce an ImportError
pub type ImportResult<T> = std::result::Result<T, ImportError>;
