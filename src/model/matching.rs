use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::ScoreBreakdown;

/// A scored `(organization, program)` pairing.
///
/// At most one live match exists per pair. Regenerating overwrites the score
/// fields but keeps the user's `viewed` and `saved` flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub program_id: Uuid,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub explanation: Option<String>,
    pub viewed: bool,
    pub saved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    pub fn new(
        organization_id: Uuid,
        program_id: Uuid,
        breakdown: ScoreBreakdown,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id,
            program_id,
            score: breakdown.total(),
            breakdown,
            explanation: None,
            viewed: false,
            saved: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a fresh scoring run; identity, flags and explanation are kept.
    pub fn rescore(&mut self, breakdown: ScoreBreakdown, now: DateTime<Utc>) {
        self.score = breakdown.total();
        self.breakdown = breakdown;
        self.updated_at = now;
    }

    pub fn pair(&self) -> (Uuid, Uuid) {
        (self.organization_id, self.program_id)
    }
}
