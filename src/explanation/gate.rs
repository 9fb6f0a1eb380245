use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use moka::sync::Cache;
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::error::ExplainerError;
use super::explainer::Explainer;
use super::fallback::fallback_explanation;
use super::types::{ExplanationInput, ExplanationOutcome, ExplanationRequest};
use crate::config::Config;
use crate::hashing::{ExplanationKey, explanation_key, key_fingerprint};
use crate::model::{FundingProgram, Match, Organization};
use crate::repository::MatchRepository;

/// Resolves to the generated text, or `None` when generation failed.
type InFlight = Shared<BoxFuture<'static, Option<String>>>;

/// Owns one generation's in-flight marker and removes it when dropped.
///
/// Lives inside the generation task, so the marker goes away with the task
/// even when the explainer panics, and a later generation's marker for the
/// same key is never touched.
struct InFlightMarker {
    in_flight: Arc<Mutex<HashMap<ExplanationKey, InFlight>>>,
    key: ExplanationKey,
}

impl Drop for InFlightMarker {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.key);
    }
}

/// Single-flight, TTL-bounded cache in front of an [`Explainer`].
///
/// Per key the state moves EMPTY -> GENERATING -> CACHED, or back to EMPTY on
/// failure. Failures are never cached, so the next call retries.
pub struct ExplanationGate {
    cache: Cache<ExplanationKey, String>,
    in_flight: Arc<Mutex<HashMap<ExplanationKey, InFlight>>>,
    repository: Arc<dyn MatchRepository>,
    timeout: Duration,
    prompt_version: String,
}

impl std::fmt::Debug for ExplanationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplanationGate")
            .field("entries", &self.cache.entry_count())
            .field("in_flight", &self.in_flight.lock().len())
            .field("timeout", &self.timeout)
            .field("prompt_version", &self.prompt_version)
            .finish_non_exhaustive()
    }
}

impl ExplanationGate {
    pub fn new(
        ttl: Duration,
        capacity: u64,
        timeout: Duration,
        prompt_version: impl Into<String>,
        repository: Arc<dyn MatchRepository>,
    ) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            repository,
            timeout,
            prompt_version: prompt_version.into(),
        }
    }

    pub fn from_config(config: &Config, repository: Arc<dyn MatchRepository>) -> Self {
        Self::new(
            config.explanation_ttl,
            config.explanation_capacity,
            config.explainer_timeout,
            config.prompt_version.clone(),
            repository,
        )
    }

    pub fn prompt_version(&self) -> &str {
        &self.prompt_version
    }

    /// Builds a request for a persisted match, stamped with this gate's prompt version.
    pub fn request(
        &self,
        org: &Organization,
        program: &FundingProgram,
        record: &Match,
        generation_allowed: bool,
    ) -> ExplanationRequest {
        ExplanationRequest {
            organization_id: record.organization_id,
            program_id: record.program_id,
            input: ExplanationInput::new(org, program, record.breakdown, &self.prompt_version),
            generation_allowed,
        }
    }

    /// `true` when a live (unexpired) explanation is cached for the pair.
    pub fn is_cached(&self, organization_id: Uuid, program_id: Uuid, prompt_version: &str) -> bool {
        self.cache
            .contains_key(&explanation_key(organization_id, program_id, prompt_version))
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.lock().len()
    }

    /// Returns the cached explanation, joins an in-flight generation, or starts
    /// one. Never fails: any generation problem yields the score-only fallback.
    #[instrument(
        skip(self, request, explainer),
        fields(organization_id = %request.organization_id, program_id = %request.program_id)
    )]
    pub async fn get_or_generate(
        &self,
        request: ExplanationRequest,
        explainer: Arc<dyn Explainer>,
    ) -> ExplanationOutcome {
        let key = explanation_key(
            request.organization_id,
            request.program_id,
            &request.input.prompt_version,
        );

        if let Some(text) = self.cache.get(&key) {
            info!(key = %key_fingerprint(&key), "explanation cache hit");
            return ExplanationOutcome::from_cache(text);
        }

        if !request.generation_allowed {
            debug!(key = %key_fingerprint(&key), "generation not allowed, using fallback");
            return ExplanationOutcome::fallback(fallback_explanation(&request.input));
        }

        let pending = {
            let mut in_flight = self.in_flight.lock();
            // A generation may have finished between the first lookup and the lock.
            if let Some(text) = self.cache.get(&key) {
                return ExplanationOutcome::from_cache(text);
            }
            match in_flight.get(&key) {
                Some(pending) => {
                    debug!(key = %key_fingerprint(&key), "joining in-flight generation");
                    pending.clone()
                }
                None => {
                    let pending = self.spawn_generation(key, &request, explainer).shared();
                    in_flight.insert(key, pending.clone());
                    pending
                }
            }
        };

        match pending.await {
            Some(text) => ExplanationOutcome::generated(text),
            None => ExplanationOutcome::fallback(fallback_explanation(&request.input)),
        }
    }

    /// Runs the explainer on its own task so a dropped caller cannot cancel it.
    ///
    /// Must be called with the in-flight lock held: the task removes its own
    /// marker, and does so only after the cache insert.
    fn spawn_generation(
        &self,
        key: ExplanationKey,
        request: &ExplanationRequest,
        explainer: Arc<dyn Explainer>,
    ) -> BoxFuture<'static, Option<String>> {
        let cache = self.cache.clone();
        let marker = InFlightMarker {
            in_flight: Arc::clone(&self.in_flight),
            key,
        };
        let repository = Arc::clone(&self.repository);
        let timeout = self.timeout;
        let input = request.input.clone();
        let (organization_id, program_id) = (request.organization_id, request.program_id);
        let fingerprint = key_fingerprint(&key);

        let task = tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, explainer.generate(&input)).await {
                Ok(result) => result,
                Err(_) => Err(ExplainerError::Timeout(timeout.as_millis() as u64)),
            };

            let text = match result {
                Ok(generated) if !generated.text.trim().is_empty() => {
                    info!(
                        key = %fingerprint,
                        cost_units = generated.cost_units,
                        latency_ms = generated.latency_ms,
                        "explanation generated"
                    );
                    Some(generated.text)
                }
                Ok(_) => {
                    warn!(key = %fingerprint, "explainer returned empty text");
                    None
                }
                Err(e) => {
                    warn!(key = %fingerprint, error = %e, "explanation generation failed");
                    None
                }
            };

            if let Some(text) = &text {
                cache.insert(key, text.clone());
            }
            drop(marker);

            if let Some(text) = &text
                && let Err(e) = repository
                    .save_explanation(organization_id, program_id, text)
                    .await
            {
                warn!(key = %fingerprint, error = %e, "failed to persist explanation");
            }

            text
        });

        async move {
            match task.await {
                Ok(text) => text,
                Err(e) => {
                    // The task's marker was already dropped with it.
                    warn!(error = %e, "explanation task aborted");
                    None
                }
            }
        }
        .boxed()
    }
}
