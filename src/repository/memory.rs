//! In-memory repository for tests and demos.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use super::error::{RepositoryError, RepositoryResult};
use super::{MatchRepository, OrganizationRepository, ProgramRepository};
use crate::model::{FundingProgram, Match, Organization};
use crate::scoring::ScoreBreakdown;

#[derive(Default)]
struct Tables {
    organizations: HashMap<Uuid, Organization>,
    /// Insertion order is preserved so ranking input is deterministic.
    programs: Vec<FundingProgram>,
    matches: HashMap<(Uuid, Uuid), Match>,
}

#[derive(Default, Clone)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_organization(&self, organization: Organization) {
        self.tables
            .write()
            .organizations
            .insert(organization.id, organization);
    }

    pub fn insert_program(&self, program: FundingProgram) {
        let mut tables = self.tables.write();
        tables.programs.retain(|p| p.id != program.id);
        tables.programs.push(program);
    }

    pub fn matches(&self) -> Vec<Match> {
        let mut matches: Vec<Match> = self.tables.read().matches.values().cloned().collect();
        matches.sort_by_key(|m| (m.organization_id, m.program_id));
        matches
    }

    pub fn match_count(&self) -> usize {
        self.tables.read().matches.len()
    }

    /// Makes every subsequent call fail with [`RepositoryError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Release);
    }

    fn check_available(&self) -> RepositoryResult<()> {
        if self.unavailable.load(Ordering::Acquire) {
            return Err(RepositoryError::Unavailable(
                "in-memory repository switched off".to_string(),
            ));
        }
        Ok(())
    }

    fn update_match<F>(&self, match_id: Uuid, apply: F) -> RepositoryResult<()>
    where
        F: FnOnce(&mut Match),
    {
        self.check_available()?;
        let mut tables = self.tables.write();
        let record = tables
            .matches
            .values_mut()
            .find(|m| m.id == match_id)
            .ok_or(RepositoryError::NotFound {
                entity: "match",
                id: match_id,
            })?;
        apply(record);
        Ok(())
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryRepository {
    async fn organization(&self, id: Uuid) -> RepositoryResult<Option<Organization>> {
        self.check_available()?;
        Ok(self.tables.read().organizations.get(&id).cloned())
    }
}

#[async_trait]
impl ProgramRepository for InMemoryRepository {
    async fn active_programs(
        &self,
        as_of: DateTime<Utc>,
    ) -> RepositoryResult<Vec<FundingProgram>> {
        self.check_available()?;
        Ok(self
            .tables
            .read()
            .programs
            .iter()
            .filter(|p| p.is_open(as_of))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MatchRepository for InMemoryRepository {
    async fn find_match(
        &self,
        organization_id: Uuid,
        program_id: Uuid,
    ) -> RepositoryResult<Option<Match>> {
        self.check_available()?;
        Ok(self
            .tables
            .read()
            .matches
            .get(&(organization_id, program_id))
            .cloned())
    }

    async fn save_match(&self, record: Match) -> RepositoryResult<()> {
        self.check_available()?;
        self.tables.write().matches.insert(record.pair(), record);
        Ok(())
    }

    async fn upsert_scores(
        &self,
        organization_id: Uuid,
        scores: &[(Uuid, ScoreBreakdown)],
        now: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Match>> {
        self.check_available()?;
        let mut tables = self.tables.write();
        let stored = scores
            .iter()
            .map(|&(program_id, breakdown)| {
                let record = tables
                    .matches
                    .entry((organization_id, program_id))
                    .and_modify(|existing| existing.rescore(breakdown, now))
                    .or_insert_with(|| Match::new(organization_id, program_id, breakdown, now));
                record.clone()
            })
            .collect();
        Ok(stored)
    }

    async fn save_explanation(
        &self,
        organization_id: Uuid,
        program_id: Uuid,
        explanation: &str,
    ) -> RepositoryResult<()> {
        self.check_available()?;
        let mut tables = self.tables.write();
        let record = tables
            .matches
            .get_mut(&(organization_id, program_id))
            .ok_or(RepositoryError::NotFound {
                entity: "match",
                id: program_id,
            })?;
        record.explanation = Some(explanation.to_string());
        Ok(())
    }

    async fn mark_viewed(&self, match_id: Uuid) -> RepositoryResult<()> {
        self.update_match(match_id, |m| m.viewed = true)
    }

    async fn set_saved(&self, match_id: Uuid, saved: bool) -> RepositoryResult<()> {
        self.update_match(match_id, |m| m.saved = saved)
    }
}
