// PlaceBoard - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation: every variant carries the context
// (collection, path, id) needed to produce an actionable message.
//
// The filter engine has no error type on purpose; it cannot fail.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all PlaceBoard operations.
#[derive(Debug)]
pub enum PlaceBoardError {
    /// Record Store fetch or mutation failed.
    Store(StoreError),

    /// A feedback submission was rejected before reaching the store.
    Feedback(FeedbackError),

    /// Export operation failed.
    Export(ExportError),

    /// A background load failed or did not finish in time.
    Load { collection: String, message: String },
}

impl fmt::Display for PlaceBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "Store error: {e}"),
            Self::Feedback(e) => write!(f, "Feedback error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Load {
                collection,
                message,
            } => write!(f, "Could not load '{collection}': {message}"),
        }
    }
}

impl std::error::Error for PlaceBoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::Feedback(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Load { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Errors raised by a Record Store implementation.
///
/// Callers treat every variant as a transport failure: log it and keep the
/// displayed collection empty or stale.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error reading or writing a collection file.
    Io {
        collection: String,
        path: PathBuf,
        source: io::Error,
    },

    /// A collection file is not valid JSON or has the wrong shape.
    Json {
        collection: String,
        path: PathBuf,
        source: serde_json::Error,
    },

    /// No record with the given id exists in the collection.
    NotFound { collection: String, id: String },

    /// A record with the given id already exists in the collection.
    DuplicateId { collection: String, id: String },

    /// The collection name is empty, too long, or contains characters
    /// outside `[A-Za-z0-9_-]`.
    InvalidCollection { name: String },

    /// A collection file exceeds the maximum accepted size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                collection,
                path,
                source,
            } => write!(
                f,
                "I/O error on collection '{collection}' ('{}'): {source}",
                path.display()
            ),
            Self::Json {
                collection,
                path,
                source,
            } => write!(
                f,
                "Malformed collection '{collection}' ('{}'): {source}",
                path.display()
            ),
            Self::NotFound { collection, id } => {
                write!(f, "No record '{id}' in collection '{collection}'")
            }
            Self::DuplicateId { collection, id } => {
                write!(f, "Record '{id}' already exists in collection '{collection}'")
            }
            Self::InvalidCollection { name } => write!(
                f,
                "Invalid collection name '{name}': use letters, digits, '_' or '-'"
            ),
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Collection file '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<StoreError> for PlaceBoardError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Feedback errors
// ---------------------------------------------------------------------------

/// Validation errors for a new feedback submission.
#[derive(Debug)]
pub enum FeedbackError {
    /// Overall rating outside the accepted scale.
    RatingOutOfRange { rating: f64, min: f64, max: f64 },
}

impl fmt::Display for FeedbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RatingOutOfRange { rating, min, max } => {
                write!(f, "Rating {rating} is out of range ({min}-{max})")
            }
        }
    }
}

impl std::error::Error for FeedbackError {}

impl From<FeedbackError> for PlaceBoardError {
    fn from(e: FeedbackError) -> Self {
        Self::Feedback(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Export would exceed maximum record count.
    TooManyRecords { count: usize, max: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::TooManyRecords { count, max } => write!(
                f,
                "Export of {count} records exceeds maximum of {max}. \
                 Apply filters to reduce the result set."
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for PlaceBoardError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Problems found while loading config.toml.
///
/// None of these stop startup: `load_config` falls back to defaults for the
/// affected value (or the whole file) and hands the list back for logging.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}. Using defaults.", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range (expected {expected}). Using default."
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}. Using defaults.", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for PlaceBoard results.
pub type Result<T> = std::result::Result<T, PlaceBoardError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_store_error_chain_preserved() {
        let err: PlaceBoardError = StoreError::Io {
            collection: "opportunities".to_string(),
            path: PathBuf::from("store/opportunities.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();

        let msg = err.to_string();
        assert!(msg.starts_with("Store error:"), "got: {msg}");
        assert!(msg.contains("opportunities"));

        let store = err.source().expect("top-level error must expose its cause");
        assert!(store.source().is_some(), "io::Error must remain in the chain");
    }

    #[test]
    fn test_not_found_message_names_id_and_collection() {
        let err = StoreError::NotFound {
            collection: "applications".to_string(),
            id: "a-42".to_string(),
        };
        assert_eq!(err.to_string(), "No record 'a-42' in collection 'applications'");
        assert!(err.source().is_none());
    }
}
