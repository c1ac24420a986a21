use std::fmt;
use timescale_types::Problem;

/// Result type for timescale-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Detail shown to callers for failures that are not their fault
pub const INTERNAL_ERROR_DETAIL: &str = "An unexpected error occurred.";

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Import content failed validation, the stream failed, or it was cancelled
    Ingest(timescale_engine::Error),

    /// Storage layer error
    Index(timescale_index::Error),

    /// Request parameters were rejected before touching storage
    InvalidRequest(String),

    /// Nothing is stored under the requested name
    NotFound(String),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),
}

/// Coarse classification used to pick status codes and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Ingest(timescale_engine::Error::Validation(_)) | Error::InvalidRequest(_) => {
                ErrorKind::Validation
            }
            Error::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Internal,
        }
    }

    pub fn status(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Internal => 500,
        }
    }

    /// Problem envelope for this error. Internal failures carry a generic detail.
    pub fn to_problem(&self) -> Problem {
        match self.kind() {
            ErrorKind::Validation => Problem::bad_request(self.to_string()),
            ErrorKind::NotFound => Problem::not_found(self.to_string()),
            ErrorKind::Internal => Problem::internal(INTERNAL_ERROR_DETAIL),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Ingest(timescale_engine::Error::Validation(err)) => write!(f, "{}", err),
            Error::Ingest(err) => write!(f, "Import error: {}", err),
            Error::Index(err) => write!(f, "Index error: {}", err),
            Error::InvalidRequest(msg) => write!(f, "{}", msg),
            Error::NotFound(msg) => write!(f, "{}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Ingest(err) => Some(err),
            Error::Index(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::InvalidRequest(_) | Error::NotFound(_) | Error::Config(_) => None,
        }
    }
}

impl From<timescale_engine::Error> for Error {
    fn from(err: timescale_engine::Error) -> Self {
        Error::Ingest(err)
    }
}

impl From<timescale_engine::ValidationError> for Error {
    fn from(err: timescale_engine::ValidationError) -> Self {
        Error::Ingest(err.into())
    }
}

impl From<timescale_index::Error> for Error {
    fn from(err: timescale_index::Error) -> Self {
        Error::Index(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
