use serde::{Deserialize, Serialize};

use crate::constants::{
    MAX_SCORE, PARTNER_INDUSTRY_MAX, PARTNER_SCALE_MAX, PARTNER_STAGE_MAX, PARTNER_TECHNOLOGY_MAX,
};
use crate::model::Organization;

/// Partner compatibility factors, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerFactor {
    Stage,
    Industry,
    Technology,
    Scale,
}

impl PartnerFactor {
    pub const ALL: [PartnerFactor; 4] = [
        PartnerFactor::Stage,
        PartnerFactor::Industry,
        PartnerFactor::Technology,
        PartnerFactor::Scale,
    ];

    pub fn max(&self) -> u8 {
        match self {
            PartnerFactor::Stage => PARTNER_STAGE_MAX,
            PartnerFactor::Industry => PARTNER_INDUSTRY_MAX,
            PartnerFactor::Technology => PARTNER_TECHNOLOGY_MAX,
            PartnerFactor::Scale => PARTNER_SCALE_MAX,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PartnerFactor::Stage => "development stage",
            PartnerFactor::Industry => "industry",
            PartnerFactor::Technology => "technology",
            PartnerFactor::Scale => "organization scale",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerBreakdown {
    pub stage: u8,
    pub industry: u8,
    pub technology: u8,
    pub scale: u8,
}

impl PartnerBreakdown {
    pub fn get(&self, factor: PartnerFactor) -> u8 {
        match factor {
            PartnerFactor::Stage => self.stage,
            PartnerFactor::Industry => self.industry,
            PartnerFactor::Technology => self.technology,
            PartnerFactor::Scale => self.scale,
        }
    }

    pub fn factors(&self) -> [(PartnerFactor, u8); 4] {
        PartnerFactor::ALL.map(|factor| (factor, self.get(factor)))
    }

    pub fn total(&self) -> u8 {
        let sum: u16 = self.factors().iter().map(|(_, points)| *points as u16).sum();
        sum.min(MAX_SCORE as u16) as u8
    }
}

/// Symmetric-input compatibility between two organizations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResult {
    pub score: u8,
    pub breakdown: PartnerBreakdown,
    /// Up to two short sentences for the strongest non-zero factors.
    pub reasons: Vec<String>,
    pub explanation: String,
}

/// A ranked counterpart for [`recommend_partners`](super::recommend_partners).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartnerRecommendation<'a> {
    pub organization: &'a Organization,
    pub result: CompatibilityResult,
}
