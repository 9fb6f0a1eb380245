//! Storage boundary for organizations, programs and matches.
//!
//! The crate never talks to a database directly; callers inject an
//! implementation of these traits. Errors propagate unmodified, since retry
//! policy belongs to the implementation.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod memory;

pub use error::{RepositoryError, RepositoryResult};
#[cfg(any(test, feature = "mock"))]
pub use memory::InMemoryRepository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::{FundingProgram, Match, Organization};
use crate::scoring::ScoreBreakdown;

#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn organization(&self, id: Uuid) -> RepositoryResult<Option<Organization>>;
}

#[async_trait]
pub trait ProgramRepository: Send + Sync {
    /// Programs that are ACTIVE and whose deadline is null or not before `as_of`.
    async fn active_programs(
        &self,
        as_of: DateTime<Utc>,
    ) -> RepositoryResult<Vec<FundingProgram>>;
}

#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn find_match(
        &self,
        organization_id: Uuid,
        program_id: Uuid,
    ) -> RepositoryResult<Option<Match>>;

    /// Inserts or replaces the match for its `(organization, program)` pair.
    async fn save_match(&self, record: Match) -> RepositoryResult<()>;

    /// Writes one ranking run for `organization_id` as a single atomic step.
    ///
    /// Existing matches only get `score`, `score_breakdown` and `updated_at`
    /// replaced; `viewed`, `saved` and `explanation` are left to whoever last
    /// wrote them. Missing pairs are inserted as fresh matches. Either every
    /// pair is written or none is. Returns the stored matches in input order.
    async fn upsert_scores(
        &self,
        organization_id: Uuid,
        scores: &[(Uuid, ScoreBreakdown)],
        now: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Match>>;

    async fn save_explanation(
        &self,
        organization_id: Uuid,
        program_id: Uuid,
        explanation: &str,
    ) -> RepositoryResult<()>;

    async fn mark_viewed(&self, match_id: Uuid) -> RepositoryResult<()>;

    async fn set_saved(&self, match_id: Uuid, saved: bool) -> RepositoryResult<()>;
}

/// Everything the match ranker needs from storage.
pub trait Repository: OrganizationRepository + ProgramRepository + MatchRepository {}

impl<T> Repository for T where T: OrganizationRepository + ProgramRepository + MatchRepository {}
