//! Database error types.

use gravida_common::ApiError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("pool configuration error: {0}")]
    CreatePool(#[from] deadpool_postgres::CreatePoolError),

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("diagnostics do not belong to the {0} model")]
    WrongDiagnostics(&'static str),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(what) => ApiError::NotFound(what),
            other => ApiError::Storage(other.to_string()),
        }
    }
}
