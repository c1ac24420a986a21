use std::fmt;

/// Result type for timescale-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading an import stream
#[derive(Debug)]
pub enum Error {
    /// Content violated a line or file rule
    Validation(ValidationError),

    /// Reading the underlying stream failed
    Io(std::io::Error),

    /// Caller cancelled the import
    Cancelled,
}

/// Why a line (or the file as a whole) was refused.
///
/// `Display` renders the user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    MissingFileName,
    FileNameTooLong,
    EmptyLine,
    ColumnCount,
    TooManyRows,
    InvalidDate(String),
    InvalidExecutionTime(String),
    InvalidValue(String),
    DateTooEarly,
    DateInFuture,
    NegativeExecutionTime,
    NegativeValue,
    NotUtf8,
    NoRows,
    SumOverflow,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingFileName => write!(f, "FileName is required."),
            Rejection::FileNameTooLong => write!(
                f,
                "FileName must be at most {} characters.",
                timescale_types::MAX_FILE_NAME_LEN
            ),
            Rejection::EmptyLine => write!(f, "empty line"),
            Rejection::ColumnCount => write!(f, "expected 3 columns 'Date;ExecutionTime;Value'"),
            Rejection::TooManyRows => {
                write!(f, "file has more than {} rows", crate::MAX_ROWS)
            }
            Rejection::InvalidDate(raw) => write!(f, "invalid Date '{}'", raw),
            Rejection::InvalidExecutionTime(raw) => write!(f, "invalid ExecutionTime '{}'", raw),
            Rejection::InvalidValue(raw) => write!(f, "invalid Value '{}'", raw),
            Rejection::DateTooEarly => write!(f, "Date must be >= 2000-01-01"),
            Rejection::DateInFuture => write!(f, "Date must be <= current time"),
            Rejection::NegativeExecutionTime => write!(f, "ExecutionTime must be >= 0"),
            Rejection::NegativeValue => write!(f, "Value must be >= 0"),
            Rejection::NotUtf8 => write!(f, "line is not valid UTF-8"),
            Rejection::NoRows => write!(f, "file must contain at least 1 row"),
            Rejection::SumOverflow => {
                write!(f, "ExecutionTime and Value totals must stay finite")
            }
        }
    }
}

/// A rejection tied to the 1-based line where it was detected.
///
/// Line 0 marks a whole-file failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub line: usize,
    pub reason: Rejection,
}

impl ValidationError {
    pub fn new(line: usize, reason: Rejection) -> Self {
        Self { line, reason }
    }

    pub fn whole_file(reason: Rejection) -> Self {
        Self::new(0, reason)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "Line {}: {}", self.line, self.reason)
        } else {
            write!(f, "{}", self.reason)
        }
    }
}

impl std::error::Error for ValidationError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Cancelled => write!(f, "Import cancelled"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Validation(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Cancelled => None,
        }
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
