use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// A filter value or operator that does not fit the column it targets.
    #[error(transparent)]
    Query(#[from] shelf_query::Error),

    /// The contract names a field the column map does not know.
    #[error("field `{0}` has no column mapping")]
    UnmappedField(String),

    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
}
