use serde::{Deserialize, Serialize};

use crate::constants::{
    DEADLINE_MAX, INDUSTRY_MAX, KEYWORD_MAX, MAX_SCORE, ORG_TYPE_MAX, RD_EXPERIENCE_MAX, TRL_MAX,
};

/// The six program-scoring factors, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Keyword,
    Industry,
    Trl,
    OrganizationType,
    RdExperience,
    Deadline,
}

impl ScoreFactor {
    pub const ALL: [ScoreFactor; 6] = [
        ScoreFactor::Keyword,
        ScoreFactor::Industry,
        ScoreFactor::Trl,
        ScoreFactor::OrganizationType,
        ScoreFactor::RdExperience,
        ScoreFactor::Deadline,
    ];

    /// Upper bound of the factor's sub-score.
    pub fn max(&self) -> u8 {
        match self {
            ScoreFactor::Keyword => KEYWORD_MAX,
            ScoreFactor::Industry => INDUSTRY_MAX,
            ScoreFactor::Trl => TRL_MAX,
            ScoreFactor::OrganizationType => ORG_TYPE_MAX,
            ScoreFactor::RdExperience => RD_EXPERIENCE_MAX,
            ScoreFactor::Deadline => DEADLINE_MAX,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreFactor::Keyword => "keyword overlap",
            ScoreFactor::Industry => "industry alignment",
            ScoreFactor::Trl => "technology readiness fit",
            ScoreFactor::OrganizationType => "organization type eligibility",
            ScoreFactor::RdExperience => "R&D track record",
            ScoreFactor::Deadline => "deadline proximity",
        }
    }
}

/// Per-factor sub-scores. Retained verbatim for explanations and audits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub keyword: u8,
    pub industry: u8,
    pub trl: u8,
    pub organization_type: u8,
    pub rd_experience: u8,
    pub deadline: u8,
}

impl ScoreBreakdown {
    pub fn get(&self, factor: ScoreFactor) -> u8 {
        match factor {
            ScoreFactor::Keyword => self.keyword,
            ScoreFactor::Industry => self.industry,
            ScoreFactor::Trl => self.trl,
            ScoreFactor::OrganizationType => self.organization_type,
            ScoreFactor::RdExperience => self.rd_experience,
            ScoreFactor::Deadline => self.deadline,
        }
    }

    /// `(factor, points)` pairs in canonical order.
    pub fn factors(&self) -> [(ScoreFactor, u8); 6] {
        ScoreFactor::ALL.map(|factor| (factor, self.get(factor)))
    }

    /// Sum of all sub-scores, clamped to 100.
    pub fn total(&self) -> u8 {
        let sum: u16 = self.factors().iter().map(|(_, points)| *points as u16).sum();
        sum.min(MAX_SCORE as u16) as u8
    }

    /// `true` when every sub-score is within its factor's maximum.
    pub fn is_within_bounds(&self) -> bool {
        self.factors()
            .iter()
            .all(|(factor, points)| *points <= factor.max())
    }
}

/// Result of scoring one program for one organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredProgram {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

impl ScoredProgram {
    pub fn new(breakdown: ScoreBreakdown) -> Self {
        let score = breakdown.total();
        debug_assert!(
            breakdown.is_within_bounds(),
            "sub-score exceeds its factor maximum: {breakdown:?}"
        );
        debug_assert_eq!(
            breakdown
                .factors()
                .iter()
                .map(|(_, p)| *p as u16)
                .sum::<u16>(),
            score as u16,
            "breakdown does not sum to score"
        );
        Self { score, breakdown }
    }
}
