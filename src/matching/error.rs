use thiserror::Error;
use uuid::Uuid;

use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("organization {0} not found")]
    OrganizationNotFound(Uuid),

    #[error("ranking quota exhausted for organization {0}")]
    QuotaExceeded(Uuid),

    #[error("failed to build scoring pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type MatchResult<T> = Result<T, MatchError>;
