use thiserror::Error;

/// Explainer failures. All of them are recovered inside the gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplainerError {
    #[error("explainer rate limited")]
    RateLimited,

    #[error("explainer budget exhausted")]
    BudgetExceeded,

    #[error("explainer timed out after {0} ms")]
    Timeout(u64),

    #[error("explainer provider error: {0}")]
    Provider(String),
}

pub type ExplainerResult<T> = Result<T, ExplainerError>;
