use shelf_db::StorageError;
use shelf_errors::FieldErrors;
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("record invalid: {}", .0.keys().map(String::as_str).collect::<Vec<_>>().join(", "))]
    RecordInvalid(FieldErrors),

    #[error(transparent)]
    Query(#[from] shelf_query::Error),

    #[error("database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<StorageError> for DomainError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Query(q) => Self::Query(q),
            other @ (StorageError::UnmappedField(_) | StorageError::Db(_)) => {
                Self::database(other.to_string())
            }
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::database(e.to_string())
    }
}
