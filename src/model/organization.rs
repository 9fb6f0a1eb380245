use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::constants::{TRL_MAX_LEVEL, TRL_MIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrganizationType {
    Company,
    ResearchInstitute,
}

impl OrganizationType {
    pub fn label(&self) -> &'static str {
        match self {
            OrganizationType::Company => "company",
            OrganizationType::ResearchInstitute => "research institute",
        }
    }
}

/// Headcount bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeCount {
    Under10,
    From10To49,
    From50To99,
    From100To299,
    Over300,
}

impl EmployeeCount {
    pub fn label(&self) -> &'static str {
        match self {
            EmployeeCount::Under10 => "under 10 employees",
            EmployeeCount::From10To49 => "10-49 employees",
            EmployeeCount::From50To99 => "50-99 employees",
            EmployeeCount::From100To299 => "100-299 employees",
            EmployeeCount::Over300 => "300+ employees",
        }
    }
}

/// Annual revenue bucket (KRW).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevenueRange {
    None,
    Under1B,
    From1BTo10B,
    From10BTo50B,
    From50BTo100B,
    Over100B,
}

impl RevenueRange {
    pub fn label(&self) -> &'static str {
        match self {
            RevenueRange::None => "no revenue",
            RevenueRange::Under1B => "under 1B KRW",
            RevenueRange::From1BTo10B => "1-10B KRW",
            RevenueRange::From10BTo50B => "10-50B KRW",
            RevenueRange::From50BTo100B => "50-100B KRW",
            RevenueRange::Over100B => "100B+ KRW",
        }
    }
}

/// Organization profile as supplied by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub org_type: OrganizationType,
    pub industry_sector: String,
    /// Current capability.
    #[serde(default)]
    pub technology_readiness_level: Option<u8>,
    /// Desired capability; preferred over the current level for program matching.
    #[serde(default, rename = "targetResearchTRL")]
    pub target_research_trl: Option<u8>,
    #[serde(default)]
    pub employee_count: Option<EmployeeCount>,
    #[serde(default)]
    pub revenue_range: Option<RevenueRange>,
    #[serde(default)]
    pub key_technologies: BTreeSet<String>,
    #[serde(default)]
    pub research_focus_areas: BTreeSet<String>,
    #[serde(default)]
    pub desired_consortium_fields: BTreeSet<String>,
    #[serde(default)]
    pub rd_experience: bool,
    /// Completed government R&D projects.
    #[serde(default)]
    pub past_project_count: u32,
    #[serde(default)]
    pub certifications: BTreeSet<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub desired_technologies: BTreeSet<String>,
    #[serde(default, rename = "targetPartnerTRL")]
    pub target_partner_trl: Option<u8>,
    #[serde(default)]
    pub target_org_scale: BTreeSet<EmployeeCount>,
    #[serde(default)]
    pub target_org_revenue: BTreeSet<RevenueRange>,
}

impl Organization {
    pub fn new(
        name: impl Into<String>,
        org_type: OrganizationType,
        industry_sector: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            org_type,
            industry_sector: industry_sector.into(),
            technology_readiness_level: None,
            target_research_trl: None,
            employee_count: None,
            revenue_range: None,
            key_technologies: BTreeSet::new(),
            research_focus_areas: BTreeSet::new(),
            desired_consortium_fields: BTreeSet::new(),
            rd_experience: false,
            past_project_count: 0,
            certifications: BTreeSet::new(),
            region: None,
            desired_technologies: BTreeSet::new(),
            target_partner_trl: None,
            target_org_scale: BTreeSet::new(),
            target_org_revenue: BTreeSet::new(),
        }
    }

    /// Current TRL, or `None` when absent or outside 1–9.
    pub fn current_trl(&self) -> Option<u8> {
        valid_trl(self.id, "technologyReadinessLevel", self.technology_readiness_level)
    }

    /// TRL used for program matching: the target research TRL when set,
    /// otherwise the current level.
    pub fn matching_trl(&self) -> Option<u8> {
        valid_trl(self.id, "targetResearchTRL", self.target_research_trl)
            .or_else(|| self.current_trl())
    }

    pub fn partner_trl_preference(&self) -> Option<u8> {
        valid_trl(self.id, "targetPartnerTRL", self.target_partner_trl)
    }

    /// Technology vocabulary used for keyword matching.
    pub fn technology_terms(&self) -> impl Iterator<Item = &str> {
        self.key_technologies
            .iter()
            .chain(self.research_focus_areas.iter())
            .map(String::as_str)
    }
}

fn valid_trl(organization_id: Uuid, field: &'static str, value: Option<u8>) -> Option<u8> {
    match value {
        Some(trl) if (TRL_MIN..=TRL_MAX_LEVEL).contains(&trl) => Some(trl),
        Some(trl) => {
            warn!(%organization_id, field, trl, "TRL outside 1-9, treating as absent");
            None
        }
        None => None,
    }
}
