use std::fmt;

/// Errors from the persistence layer
#[derive(Debug)]
pub enum PersistError {
    /// Treated as "already persisted" by callers: refetch and proceed.
    DuplicateKey,
    NotFound,
    Backend(rusqlite::Error),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::DuplicateKey => write!(f, "duplicate key"),
            PersistError::NotFound => write!(f, "not found"),
            PersistError::Backend(e) => write!(f, "backend error: {}", e),
        }
    }
}

impl std::error::Error for PersistError {}

impl From<rusqlite::Error> for PersistError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                PersistError::DuplicateKey
            }
            rusqlite::Error::QueryReturnedNoRows => PersistError::NotFound,
            _ => PersistError::Backend(e),
        }
    }
}
