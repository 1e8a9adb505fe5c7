use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Non-positive node counts, empty layer lists, or invalid training settings.
    InvalidTopology(String),
    /// Shapes that cannot be combined by a matrix or layer operation.
    DimensionMismatch(String),
    /// A file could not be opened, read or written.
    Io(String),
    /// A cell, record, label or snapshot that could not be parsed.
    Format(String),
    /// A path whose extension is not `.csv`.
    UnsupportedFileType(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidTopology(msg) => write!(f, "invalid topology: {msg}"),
            Error::DimensionMismatch(msg) => write!(f, "dimension mismatch: {msg}"),
            Error::Io(msg) => write!(f, "io error: {msg}"),
            Error::Format(msg) => write!(f, "format error: {msg}"),
            Error::UnsupportedFileType(path) => {
                write!(f, "unsupported file type: {path} (only .csv files are allowed)")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            Error::Io(err.to_string())
        } else {
            Error::Format(err.to_string())
        }
    }
}
