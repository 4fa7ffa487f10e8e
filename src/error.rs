//! Error types for the quranalyze library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`QuranalyzeError`] enum. Every variant carries enough context (the
//! offending chapter, verse, file or token and the violated constraint) to
//! diagnose a failure without re-reading the source data.
//!
//! # Examples
//!
//! ```
//! use quranalyze::error::{QuranalyzeError, Result};
//!
//! fn lookup(chapter: u32) -> Result<()> {
//!     Err(QuranalyzeError::not_found(format!("chapter {chapter}")))
//! }
//!
//! match lookup(115) {
//!     Ok(_) => println!("found"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Where in the dataset a validation failure was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// The dataset as a whole (directory layout, chapter numbering).
    Dataset(PathBuf),
    /// A single chapter file, before its index could be trusted.
    File(PathBuf),
    /// A chapter record.
    Chapter { chapter: u32 },
    /// A verse record, identified by its 1-based entry in the chapter's verse list.
    Verse { chapter: u32, entry: usize },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Dataset(path) => write!(f, "dataset {}", path.display()),
            Location::File(path) => write!(f, "file {}", path.display()),
            Location::Chapter { chapter } => write!(f, "chapter {chapter}"),
            Location::Verse { chapter, entry } => {
                write!(f, "chapter {chapter}, verse entry {entry}")
            }
        }
    }
}

/// The main error type for quranalyze operations.
#[derive(Error, Debug)]
pub enum QuranalyzeError {
    /// The dataset deviates from the expected schema. Aborts a corpus build.
    #[error("Malformed dataset at {location}: {constraint}")]
    MalformedDataset {
        location: Location,
        constraint: String,
    },

    /// A dataset file could not be read. Aborts a corpus build.
    #[error("Failed to read {}: {source}", path.display())]
    DatasetIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A chapter, verse, word or graph node does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A transliterated sequence has no entry in the transliteration table.
    #[error("Unmappable token {sequence:?} at byte offset {offset}")]
    UnmappableToken { sequence: String, offset: usize },

    /// A normalization table, transliteration table or config file is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O errors outside dataset loading (config files, exports).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with QuranalyzeError.
pub type Result<T> = std::result::Result<T, QuranalyzeError>;

impl QuranalyzeError {
    /// Create a new malformed dataset error.
    pub fn malformed<S: Into<String>>(location: Location, constraint: S) -> Self {
        QuranalyzeError::MalformedDataset {
            location,
            constraint: constraint.into(),
        }
    }

    /// Create a new dataset read error.
    pub fn dataset_io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        QuranalyzeError::DatasetIo {
            path: path.into(),
            source,
        }
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(what: S) -> Self {
        QuranalyzeError::NotFound(what.into())
    }

    /// Create a new unmappable token error.
    pub fn unmappable<S: Into<String>>(sequence: S, offset: usize) -> Self {
        QuranalyzeError::UnmappableToken {
            sequence: sequence.into(),
            offset,
        }
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        QuranalyzeError::InvalidConfig(msg.into())
    }

    /// Whether this error came from dataset validation.
    pub fn is_malformed(&self) -> bool {
        matches!(self, QuranalyzeError::MalformedDataset { .. })
    }

    /// Whether this error reports a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, QuranalyzeError::NotFound(_))
    }
}
