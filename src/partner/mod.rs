//! Consortium partner compatibility.
//!
//! [`compatibility`] scores two organizations on four factors summing to 100:
//! development stage (35), industry (20), technology (25) and scale (20).
//! Complementary stages outrank identical ones, so a late-stage company and an
//! early-stage institute pair well.

pub mod engine;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::{
    Stage, compatibility, industry_score, recommend_partners, scale_score, stage_score,
    technology_score,
};
pub use types::{CompatibilityResult, PartnerBreakdown, PartnerFactor, PartnerRecommendation};
