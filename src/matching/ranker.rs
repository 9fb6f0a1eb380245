use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::error::{MatchError, MatchResult};
use super::pool::ScoringPool;
use crate::model::{FundingProgram, Match, Organization, first_violation};
use crate::repository::Repository;
use crate::scoring::{self, ScoreBreakdown};

/// A candidate program that survived filtering, with its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedProgram<'a> {
    pub program: &'a FundingProgram,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

impl RankedProgram<'_> {
    pub fn to_match(&self, organization_id: Uuid, now: DateTime<Utc>) -> Match {
        Match::new(organization_id, self.program.id, self.breakdown, now)
    }
}

/// Null deadlines sort after any concrete deadline.
fn deadline_order(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// `true` when the program may be offered to `org` at `as_of`.
pub fn qualifies(org: &Organization, program: &FundingProgram, as_of: DateTime<Utc>) -> bool {
    if !program.is_open(as_of) {
        debug!(
            program_id = %program.id,
            status = ?program.status,
            deadline = ?program.deadline,
            "program closed, skipping"
        );
        return false;
    }
    if let Some(reason) = first_violation(&program.eligibility, org) {
        debug!(program_id = %program.id, %reason, "organization ineligible, skipping");
        return false;
    }
    true
}

/// Filters, scores, sorts and truncates `candidates` for `org`.
///
/// Sorted by score descending, then deadline ascending (null last). The sort
/// is stable, so full ties keep their candidate order.
pub fn rank_candidates<'a>(
    pool: &ScoringPool,
    org: &Organization,
    candidates: &'a [FundingProgram],
    top_n: usize,
    as_of: DateTime<Utc>,
) -> Vec<RankedProgram<'a>> {
    if top_n == 0 || candidates.is_empty() {
        return Vec::new();
    }

    let qualifying: Vec<&FundingProgram> = candidates
        .iter()
        .filter(|program| qualifies(org, program, as_of))
        .collect();

    let mut ranked: Vec<RankedProgram<'a>> = pool.map(&qualifying, |&program| {
        let scored = scoring::score(org, program, as_of);
        RankedProgram {
            program,
            score: scored.score,
            breakdown: scored.breakdown,
        }
    });

    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| deadline_order(a.program.deadline, b.program.deadline))
    });
    ranked.truncate(top_n);

    debug!(
        organization_id = %org.id,
        candidates = candidates.len(),
        qualifying = qualifying.len(),
        kept = ranked.len(),
        "ranked candidates"
    );

    ranked
}

/// Ranks programs for organizations and persists the resulting matches.
pub struct MatchRanker {
    pool: ScoringPool,
    repository: Arc<dyn Repository>,
}

impl std::fmt::Debug for MatchRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchRanker")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl MatchRanker {
    pub fn new(pool: ScoringPool, repository: Arc<dyn Repository>) -> Self {
        Self { pool, repository }
    }

    pub fn pool(&self) -> &ScoringPool {
        &self.pool
    }

    /// Top-N matches for `org` among `candidates`. Nothing is persisted.
    pub fn rank(
        &self,
        org: &Organization,
        candidates: &[FundingProgram],
        top_n: usize,
        as_of: DateTime<Utc>,
    ) -> Vec<Match> {
        rank_candidates(&self.pool, org, candidates, top_n, as_of)
            .iter()
            .map(|ranked| ranked.to_match(org.id, as_of))
            .collect()
    }

    /// Loads the organization and open programs, ranks them and upserts the
    /// top-N matches.
    ///
    /// `allowed` is the caller's pre-checked quota decision. The matches are
    /// written in one atomic upsert that only touches score fields, so flags
    /// and explanations set concurrently survive the run.
    #[instrument(skip(self))]
    pub async fn run(
        &self,
        organization_id: Uuid,
        top_n: usize,
        as_of: DateTime<Utc>,
        allowed: bool,
    ) -> MatchResult<Vec<Match>> {
        if !allowed {
            info!("ranking quota exhausted");
            return Err(MatchError::QuotaExceeded(organization_id));
        }

        let org = self
            .repository
            .organization(organization_id)
            .await?
            .ok_or(MatchError::OrganizationNotFound(organization_id))?;
        let candidates = self.repository.active_programs(as_of).await?;

        let ranked = rank_candidates(&self.pool, &org, &candidates, top_n, as_of);

        let scores: Vec<(Uuid, ScoreBreakdown)> = ranked
            .iter()
            .map(|entry| (entry.program.id, entry.breakdown))
            .collect();
        let persisted = self
            .repository
            .upsert_scores(organization_id, &scores, as_of)
            .await?;

        info!(
            candidates = candidates.len(),
            matches = persisted.len(),
            top_score = persisted.first().map(|m| m.score),
            "ranking run complete"
        );

        Ok(persisted)
    }
}
