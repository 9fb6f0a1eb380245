//! LLM-backed explainer over the `genai` multi-provider client.

use std::time::Instant;

use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};
use tracing::{debug, error};

use super::error::{ExplainerError, ExplainerResult};
use super::explainer::Explainer;
use super::types::{ExplanationInput, GeneratedExplanation};

const SYSTEM_PROMPT: &str = "You explain why a government R&D funding program suits an \
organization. Write two or three plain sentences. Use only the facts given. Do not invent \
eligibility rules, amounts or dates.";

/// Renders the per-match user prompt. Stable for a given input.
pub fn user_prompt(input: &ExplanationInput) -> String {
    let mut prompt = format!(
        "Organization: {}\nProgram: {}\nMatch score: {}/100\nTRL range: {}\nFactors:\n",
        input.organization_name,
        input.program_title,
        input.score,
        input.trl_confidence.label()
    );
    for (factor, points) in input.breakdown.factors() {
        prompt.push_str(&format!("- {}: {}/{}\n", factor.label(), points, factor.max()));
    }
    prompt
}

fn classify(err: genai::Error) -> ExplainerError {
    let message = err.to_string();
    let lower = message.to_lowercase();
    if lower.contains("429") || lower.contains("rate limit") {
        ExplainerError::RateLimited
    } else if lower.contains("insufficient_quota") || lower.contains("billing") {
        ExplainerError::BudgetExceeded
    } else {
        ExplainerError::Provider(message)
    }
}

pub struct GenaiExplainer {
    client: Client,
    model: String,
}

impl GenaiExplainer {
    /// Uses the default client, which resolves provider keys from the environment.
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_client(Client::default(), model)
    }

    pub fn with_client(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Explainer for GenaiExplainer {
    async fn generate(&self, input: &ExplanationInput) -> ExplainerResult<GeneratedExplanation> {
        let started = Instant::now();
        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(user_prompt(input)),
        ]);

        let response = self
            .client
            .exec_chat(&self.model, request, None)
            .await
            .map_err(|e| {
                error!(model = %self.model, "Provider error: {}", e);
                classify(e)
            })?;

        let text = response.first_text().unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err(ExplainerError::Provider("empty completion".to_string()));
        }

        let cost_units = response
            .usage
            .total_tokens
            .map_or(0, |tokens| u32::try_from(tokens).unwrap_or(0));
        let latency_ms = started.elapsed().as_millis() as u64;
        debug!(model = %self.model, cost_units, latency_ms, "explainer call complete");

        Ok(GeneratedExplanation {
            text,
            cost_units,
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrlConfidence;
    use crate::scoring::ScoreBreakdown;

    #[test]
    fn test_user_prompt_lists_every_factor() {
        let input = ExplanationInput {
            organization_name: "Acme".to_string(),
            program_title: "AI Core".to_string(),
            score: 72,
            breakdown: ScoreBreakdown {
                keyword: 10,
                industry: 20,
                trl: 15,
                organization_type: 15,
                rd_experience: 0,
                deadline: 12,
            },
            trl_confidence: TrlConfidence::Inferred,
            prompt_version: "v1".to_string(),
        };

        let prompt = user_prompt(&input);
        assert!(prompt.contains("Match score: 72/100"));
        assert!(prompt.contains("TRL range: inferred"));
        assert!(prompt.contains("- industry alignment: 20/20"));
        assert!(prompt.contains("- R&D track record: 0/10"));
        assert_eq!(prompt.lines().filter(|l| l.starts_with("- ")).count(), 6);
    }

    #[test]
    fn test_model_is_kept() {
        assert_eq!(GenaiExplainer::new("gpt-4o-mini").model(), "gpt-4o-mini");
    }
}
