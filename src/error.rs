//! Error type for the numeric core

/// Failures the triangle core can report to its caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PascalError {
    /// A parameter was outside the range the operation accepts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, PascalError>;

impl From<PascalError> for std::io::Error {
    fn from(err: PascalError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    }
}
