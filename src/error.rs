use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ViewerError {
    /// Fewer than a header row plus one data row
    TooFewRecords,
    /// A terminal session is already active in this process
    AlreadyInitialized,
    Csv(csv::Error),
    Io(io::Error),
    Theme(String),
    Usage(String),
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::Csv(e) => Some(e),
            ViewerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::TooFewRecords => {
                write!(f, "at least one row must be given in addition to the header row")
            }
            ViewerError::AlreadyInitialized => write!(f, "terminal session already initialized"),
            ViewerError::Csv(e) => write!(f, "csv error: {}", e),
            ViewerError::Io(e) => write!(f, "{}", e),
            ViewerError::Theme(s) => write!(f, "theme error: {}", s),
            ViewerError::Usage(s) => write!(f, "{}", s),
        }
    }
}

impl From<io::Error> for ViewerError {
    fn from(e: io::Error) -> Self {
        ViewerError::Io(e)
    }
}

impl From<csv::Error> for ViewerError {
    fn from(e: csv::Error) -> Self {
        ViewerError::Csv(e)
    }
}
