use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

/// The error type used by store module
///
/// Covers connection failure, statement preparation, execution and schema creation alike. The
/// SQLite error that caused it, if any, is available through `source()`.
#[derive(Debug)]
pub struct StoreError {
    description: String,
    cause: Option<rusqlite::Error>
}

impl StoreError {
    pub fn new(description: &str) -> Self {
        StoreError { description: description.to_owned(), cause: None }
    }

    pub fn with_cause(description: &str, cause: rusqlite::Error) -> Self {
        StoreError { description: description.to_owned(), cause: Some(cause) }
    }

    pub fn message(&self) -> &str {
        &self.description
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match &self.cause {
            Some(cause) => write!(f, "store error: {}: {}", self.description, cause),
            None => write!(f, "store error: {}", self.description)
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|e| e as &(dyn Error + 'static))
    }
}

/// Attaches a description to a failing SQLite call
pub(crate) trait Context<T> {
    fn context(self, description: &str) -> Result<T, StoreError>;
}

impl<T> Context<T> for Result<T, rusqlite::Error> {
    fn context(self, description: &str) -> Result<T, StoreError> {
        self.map_err(|e| StoreError::with_cause(description, e))
    }
}
