//! Fundmatch library crate (used by the CLI and integration tests).
//!
//! Matches organizations to government R&D funding programs, ranks consortium
//! partners, and serves cached explanations of individual matches.
//!
//! # Public API Surface
//!
//! ## Program matching
//! - [`score`], [`ScoreBreakdown`], [`ScoreFactor`] - Six-factor 0-100 scoring
//! - [`weighted_trl_score`] - TRL confidence weighting
//! - [`rank_candidates`], [`MatchRanker`], [`ScoringPool`] - Filtering and top-N selection
//!
//! ## Partners
//! - [`compatibility`], [`recommend_partners`] - Four-factor partner scoring
//!
//! ## Explanations
//! - [`ExplanationGate`] - TTL cache with single-flight generation
//! - [`Explainer`], [`GenaiExplainer`] - Generator boundary and LLM adapter
//! - [`fallback_explanation`] - Score-only text when generation is unavailable
//!
//! ## Storage
//! - [`OrganizationRepository`], [`ProgramRepository`], [`MatchRepository`] - Injected persistence
//!
//! ## Test/Mock Support
//! [`InMemoryRepository`] and [`MockExplainer`] are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod explanation;
pub mod hashing;
pub mod matching;
pub mod model;
pub mod partner;
pub mod repository;
pub mod scoring;
pub mod taxonomy;

pub use config::{Config, ConfigError};

pub use explanation::{
    Explainer, ExplainerError, ExplainerResult, ExplanationGate, ExplanationInput,
    ExplanationOutcome, ExplanationRequest, ExplanationSource, GenaiExplainer,
    GeneratedExplanation, fallback_explanation,
};
#[cfg(any(test, feature = "mock"))]
pub use explanation::MockExplainer;

pub use hashing::{ExplanationKey, explanation_key, key_fingerprint};

pub use matching::{
    MatchError, MatchRanker, MatchResult, RankedProgram, ScoringPool, qualifies, rank_candidates,
};

pub use model::{
    EligibilityRequirement, EligibilityVerdict, EmployeeCount, FundingProgram, Match,
    Organization, OrganizationType, ProgramStatus, RevenueRange, TrlConfidence,
};

pub use partner::{
    CompatibilityResult, PartnerBreakdown, PartnerFactor, PartnerRecommendation, compatibility,
    recommend_partners,
};

#[cfg(any(test, feature = "mock"))]
pub use repository::InMemoryRepository;
pub use repository::{
    MatchRepository, OrganizationRepository, ProgramRepository, Repository, RepositoryError,
    RepositoryResult,
};

pub use scoring::{ScoreBreakdown, ScoreFactor, ScoredProgram, score, weighted_trl_score};

pub use taxonomy::{IndustryCategory, Sector};
