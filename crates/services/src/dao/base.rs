use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaoError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),
    #[error("entity not found")]
    NotFound,
    #[error("validation: {0}")]
    Validation(String),
}

pub type DaoResult<T> = Result<T, DaoError>;
