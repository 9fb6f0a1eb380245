use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{FundingProgram, Organization, TrlConfidence};
use crate::scoring::ScoreBreakdown;

/// Everything an explainer may see about one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationInput {
    pub organization_name: String,
    pub program_title: String,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    /// How the program's TRL range was determined.
    pub trl_confidence: TrlConfidence,
    pub prompt_version: String,
}

impl ExplanationInput {
    pub fn new(
        org: &Organization,
        program: &FundingProgram,
        breakdown: ScoreBreakdown,
        prompt_version: impl Into<String>,
    ) -> Self {
        Self {
            organization_name: org.name.clone(),
            program_title: program.title.clone(),
            score: breakdown.total(),
            breakdown,
            trl_confidence: program.trl_confidence,
            prompt_version: prompt_version.into(),
        }
    }
}

/// A successful explainer response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedExplanation {
    pub text: String,
    /// Provider-reported usage (tokens for LLM explainers).
    pub cost_units: u32,
    pub latency_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationRequest {
    pub organization_id: Uuid,
    pub program_id: Uuid,
    pub input: ExplanationInput,
    /// Caller's pre-checked generation quota decision.
    pub generation_allowed: bool,
}

/// Where the returned text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationSource {
    Cache,
    Generated,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationOutcome {
    pub explanation: String,
    /// `true` only when served from the cache without calling the explainer.
    pub cached: bool,
    pub source: ExplanationSource,
}

impl ExplanationOutcome {
    pub fn from_cache(explanation: String) -> Self {
        Self {
            explanation,
            cached: true,
            source: ExplanationSource::Cache,
        }
    }

    pub fn generated(explanation: String) -> Self {
        Self {
            explanation,
            cached: false,
            source: ExplanationSource::Generated,
        }
    }

    pub fn fallback(explanation: String) -> Self {
        Self {
            explanation,
            cached: false,
            source: ExplanationSource::Fallback,
        }
    }
}
