use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("malformed entity specification: {0}")]
    MalformedEntity(String),

    #[error("missing or invalid credentials provided")]
    UnauthorizedAccess,

    #[error("non-existent entity")]
    NotFound,

    #[error("entity identifier already taken")]
    Conflict,

    #[error("repository error: {0}")]
    Repository(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
