use async_trait::async_trait;

use super::error::ExplainerResult;
use super::types::{ExplanationInput, GeneratedExplanation};

/// Turns a scored match into prose. May be slow, rate limited or unavailable.
#[async_trait]
pub trait Explainer: Send + Sync {
    async fn generate(&self, input: &ExplanationInput) -> ExplainerResult<GeneratedExplanation>;
}

#[cfg(any(test, feature = "mock"))]
pub use mock::MockExplainer;

#[cfg(any(test, feature = "mock"))]
mod mock {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::Explainer;
    use crate::explanation::error::{ExplainerError, ExplainerResult};
    use crate::explanation::types::{ExplanationInput, GeneratedExplanation};

    /// Deterministic explainer that counts its calls.
    #[derive(Debug, Clone, Default)]
    pub struct MockExplainer {
        calls: Arc<AtomicUsize>,
        delay: Duration,
        failure: Option<ExplainerError>,
        panics: bool,
    }

    impl MockExplainer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Sleeps this long inside every call.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        /// Fails every call with `error`.
        pub fn failing(error: ExplainerError) -> Self {
            Self {
                failure: Some(error),
                ..Self::default()
            }
        }

        /// Panics inside every call, taking the generation task down with it.
        pub fn panicking() -> Self {
            Self {
                panics: true,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn text_for(input: &ExplanationInput) -> String {
            format!(
                "{} fits {} with a score of {}/100 ({}).",
                input.organization_name, input.program_title, input.score, input.prompt_version
            )
        }
    }

    #[async_trait]
    impl Explainer for MockExplainer {
        async fn generate(
            &self,
            input: &ExplanationInput,
        ) -> ExplainerResult<GeneratedExplanation> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.panics {
                panic!("mock explainer crashed");
            }
            if let Some(error) = &self.failure {
                return Err(error.clone());
            }
            Ok(GeneratedExplanation {
                text: Self::text_for(input),
                cost_units: 1,
                latency_ms: self.delay.as_millis() as u64,
            })
        }
    }
}
