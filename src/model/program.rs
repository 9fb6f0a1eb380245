use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::eligibility::EligibilityRequirement;
use super::organization::OrganizationType;

/// How a program's TRL requirement was determined. Fixed at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrlConfidence {
    /// Stated in the announcement.
    Explicit,
    /// Derived from keyword heuristics.
    Inferred,
    /// Unknown.
    Missing,
}

impl TrlConfidence {
    pub fn label(&self) -> &'static str {
        match self {
            TrlConfidence::Explicit => "explicit",
            TrlConfidence::Inferred => "inferred",
            TrlConfidence::Missing => "missing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramStatus {
    Active,
    Closed,
    Draft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingProgram {
    pub id: Uuid,
    pub agency_id: String,
    pub title: String,
    pub status: ProgramStatus,
    #[serde(default)]
    pub min_trl: Option<u8>,
    #[serde(default)]
    pub max_trl: Option<u8>,
    pub trl_confidence: TrlConfidence,
    /// Eligible organization types. Empty means open to all.
    #[serde(default)]
    pub target_type: BTreeSet<OrganizationType>,
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    #[serde(default)]
    pub category: String,
    /// Smallest currency unit.
    #[serde(default)]
    pub budget_amount: Option<u64>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub eligibility: Vec<EligibilityRequirement>,
}

impl FundingProgram {
    pub fn new(
        title: impl Into<String>,
        agency_id: impl Into<String>,
        trl_confidence: TrlConfidence,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            agency_id: agency_id.into(),
            title: title.into(),
            status: ProgramStatus::Active,
            min_trl: None,
            max_trl: None,
            trl_confidence,
            target_type: BTreeSet::new(),
            keywords: BTreeSet::new(),
            category: String::new(),
            budget_amount: None,
            deadline: None,
            eligibility: Vec::new(),
        }
    }

    /// `true` when the program may be offered at `as_of`: active, and either
    /// evergreen or not yet past its deadline.
    pub fn is_open(&self, as_of: DateTime<Utc>) -> bool {
        self.status == ProgramStatus::Active && self.deadline.is_none_or(|d| d >= as_of)
    }

    pub fn accepts(&self, org_type: OrganizationType) -> bool {
        self.target_type.is_empty() || self.target_type.contains(&org_type)
    }
}
