//! Cached, single-flight match explanations.
//!
//! The [`ExplanationGate`] sits between callers and an [`Explainer`]. Hits are
//! served from memory; concurrent misses for one key share a single explainer
//! call; failures degrade to [`fallback_explanation`] and are never cached.

pub mod error;
pub mod explainer;
pub mod fallback;
pub mod gate;
pub mod llm;
pub mod types;


pub use error::{ExplainerError, ExplainerResult};
#[cfg(any(test, feature = "mock"))]
pub use explainer::MockExplainer;
pub use explainer::Explainer;
pub use fallback::fallback_explanation;
pub use gate::ExplanationGate;
pub use llm::GenaiExplainer;
pub use types::{
    ExplanationInput, ExplanationOutcome, ExplanationRequest, ExplanationSource,
    GeneratedExplanation,
};
