use std::collections::BTreeSet;

use tracing::{debug, trace};

use super::types::{CompatibilityResult, PartnerBreakdown, PartnerFactor, PartnerRecommendation};
use crate::constants::{
    MAX_REASONS, MIN_TERM_CHARS, PARTNER_INDUSTRY_MAX, PARTNER_SCALE_MAX, PARTNER_STAGE_MAX,
    PARTNER_TECHNOLOGY_MAX,
};
use crate::matching::ScoringPool;
use crate::model::{Organization, OrganizationType};
use crate::scoring::engine::terms_overlap;
use crate::taxonomy::{self, IndustryRelation};

const STAGE_EARLY_LATE: u8 = 30;
const STAGE_MID_OTHER: u8 = 25;
const STAGE_MID_MID: u8 = 20;
const STAGE_SAME_EXTREME: u8 = 5;
const STAGE_UNKNOWN: u8 = 15;
/// A company carrying the later stage opposite a research institute.
const STAGE_COMMERCIALIZATION_BONUS: u8 = 5;
const STAGE_MIXED_TYPE_BONUS: u8 = 2;
const STAGE_PREFERENCE_BONUS: u8 = 3;
const STAGE_PREFERENCE_TOLERANCE: u8 = 1;

const TECH_FIRST_MATCH: u8 = 8;
const TECH_FURTHER_MATCH: u8 = 4;
const TECH_DIRECTION_CAP: u8 = 12;
const TECH_MUTUAL_BONUS: u8 = 1;
const TECH_SHARED_TERM: u8 = 4;
const TECH_SHARED_CAP: u8 = 8;

const INDUSTRY_SOUGHT_FIELD: u8 = PARTNER_INDUSTRY_MAX / 2;

const SCALE_SATISFIED: u8 = 5;
const SCALE_UNSTATED: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Early,
    Mid,
    Late,
}

impl Stage {
    pub fn of(trl: u8) -> Self {
        match trl {
            0..=4 => Stage::Early,
            5..=6 => Stage::Mid,
            _ => Stage::Late,
        }
    }
}

/// Compatibility of `a` and `b` as consortium partners.
pub fn compatibility(a: &Organization, b: &Organization) -> CompatibilityResult {
    let breakdown = PartnerBreakdown {
        stage: stage_score(a, b),
        industry: industry_score(a, b),
        technology: technology_score(a, b),
        scale: scale_score(a, b),
    };
    debug_assert!(
        breakdown.factors().iter().all(|(f, p)| *p <= f.max()),
        "partner sub-score exceeds its maximum: {breakdown:?}"
    );

    let score = breakdown.total();
    let reasons = reasons(a, b, &breakdown);
    let explanation = explain(a, b, score, &breakdown, &reasons);

    trace!(a = %a.id, b = %b.id, ?breakdown, "scored partner pair");

    CompatibilityResult {
        score,
        breakdown,
        reasons,
        explanation,
    }
}

/// Complementary development stages score highest.
pub fn stage_score(a: &Organization, b: &Organization) -> u8 {
    let (Some(trl_a), Some(trl_b)) = (a.current_trl(), b.current_trl()) else {
        return STAGE_UNKNOWN;
    };
    let (stage_a, stage_b) = (Stage::of(trl_a), Stage::of(trl_b));

    let mut points = match (stage_a, stage_b) {
        (Stage::Early, Stage::Late) | (Stage::Late, Stage::Early) => STAGE_EARLY_LATE,
        (Stage::Mid, Stage::Mid) => STAGE_MID_MID,
        (Stage::Mid, _) | (_, Stage::Mid) => STAGE_MID_OTHER,
        _ => STAGE_SAME_EXTREME,
    };

    if a.org_type != b.org_type {
        let company_leads = match (a.org_type, b.org_type) {
            (OrganizationType::Company, OrganizationType::ResearchInstitute) => stage_a > stage_b,
            (OrganizationType::ResearchInstitute, OrganizationType::Company) => stage_b > stage_a,
            _ => false,
        };
        points += if company_leads {
            STAGE_COMMERCIALIZATION_BONUS
        } else {
            STAGE_MIXED_TYPE_BONUS
        };
    }

    let wants = |pref: Option<u8>, actual: u8| {
        pref.is_some_and(|p| p.abs_diff(actual) <= STAGE_PREFERENCE_TOLERANCE)
    };
    if wants(a.partner_trl_preference(), trl_b) {
        points += STAGE_PREFERENCE_BONUS;
    }
    if wants(b.partner_trl_preference(), trl_a) {
        points += STAGE_PREFERENCE_BONUS;
    }

    points.min(PARTNER_STAGE_MAX)
}

/// Sector relation first. Unrelated pairs still earn partial credit when one
/// side lists the other's industry among its desired consortium fields.
pub fn industry_score(a: &Organization, b: &Organization) -> u8 {
    let related = sector_score(a, b);
    if related > 0 {
        return related;
    }
    if sought_partner(a, b).is_some() {
        INDUSTRY_SOUGHT_FIELD
    } else {
        0
    }
}

fn sector_score(a: &Organization, b: &Organization) -> u8 {
    let sector_a = taxonomy::normalize(&a.industry_sector);
    if sector_a.is_empty() {
        return 0;
    }
    if sector_a == taxonomy::normalize(&b.industry_sector) {
        return PARTNER_INDUSTRY_MAX;
    }
    match (
        taxonomy::classify(&a.industry_sector),
        taxonomy::classify(&b.industry_sector),
    ) {
        (Some(ca), Some(cb)) => match taxonomy::relation(ca, cb) {
            IndustryRelation::Same => PARTNER_INDUSTRY_MAX,
            IndustryRelation::SameSector => PARTNER_INDUSTRY_MAX / 2,
            IndustryRelation::Unrelated => 0,
        },
        _ => 0,
    }
}

/// `true` when one of `seeker`'s desired consortium fields names the industry
/// `candidate` works in.
fn seeks_industry_of(seeker: &Organization, candidate: &Organization) -> bool {
    let sector = taxonomy::normalize(&candidate.industry_sector);
    if sector.is_empty() {
        return false;
    }
    let category = taxonomy::classify(&candidate.industry_sector);
    seeker.desired_consortium_fields.iter().any(|field| {
        taxonomy::normalize(field) == sector
            || category.is_some_and(|c| taxonomy::classify(field) == Some(c))
    })
}

/// The organization whose industry the other one is looking for, if any.
fn sought_partner<'a>(a: &'a Organization, b: &'a Organization) -> Option<&'a Organization> {
    if seeks_industry_of(a, b) {
        Some(b)
    } else if seeks_industry_of(b, a) {
        Some(a)
    } else {
        None
    }
}

fn normalized(terms: &BTreeSet<String>) -> BTreeSet<String> {
    terms
        .iter()
        .map(|t| taxonomy::normalize(t))
        .filter(|t| t.chars().count() >= MIN_TERM_CHARS)
        .collect()
}

/// Number of `wanted` terms that some `offered` term covers.
fn covered(wanted: &BTreeSet<String>, offered: &BTreeSet<String>) -> usize {
    wanted
        .iter()
        .filter(|w| offered.iter().any(|o| terms_overlap(w, o)))
        .count()
}

fn directional_points(matches: usize) -> u8 {
    if matches == 0 {
        return 0;
    }
    let further = (matches - 1).min(usize::from(TECH_DIRECTION_CAP)) as u8;
    TECH_FIRST_MATCH
        .saturating_add(further.saturating_mul(TECH_FURTHER_MATCH))
        .min(TECH_DIRECTION_CAP)
}

/// What each side wants against what the other side has. Falls back to plain
/// shared key technologies when neither side's wishes are met.
pub fn technology_score(a: &Organization, b: &Organization) -> u8 {
    let (keys_a, keys_b) = (normalized(&a.key_technologies), normalized(&b.key_technologies));

    let a_wants_b = covered(&normalized(&a.desired_technologies), &keys_b);
    let b_wants_a = covered(&normalized(&b.desired_technologies), &keys_a);

    if a_wants_b > 0 || b_wants_a > 0 {
        let mutual = if a_wants_b > 0 && b_wants_a > 0 {
            TECH_MUTUAL_BONUS
        } else {
            0
        };
        return (directional_points(a_wants_b) + directional_points(b_wants_a) + mutual)
            .min(PARTNER_TECHNOLOGY_MAX);
    }

    let shared = covered(&keys_a, &keys_b).min(usize::from(TECH_SHARED_CAP)) as u8;
    shared.saturating_mul(TECH_SHARED_TERM).min(TECH_SHARED_CAP)
}

fn preference_points<T: Ord>(preferred: &BTreeSet<T>, actual: Option<T>) -> u8 {
    if preferred.is_empty() {
        return SCALE_UNSTATED;
    }
    match actual {
        Some(value) if preferred.contains(&value) => SCALE_SATISFIED,
        _ => 0,
    }
}

/// Stated headcount and revenue preferences, checked in both directions.
pub fn scale_score(a: &Organization, b: &Organization) -> u8 {
    preference_points(&a.target_org_scale, b.employee_count)
        + preference_points(&a.target_org_revenue, b.revenue_range)
        + preference_points(&b.target_org_scale, a.employee_count)
        + preference_points(&b.target_org_revenue, a.revenue_range)
}

fn reason(factor: PartnerFactor, points: u8, a: &Organization, b: &Organization) -> String {
    match factor {
        PartnerFactor::Stage => match (a.current_trl(), b.current_trl()) {
            (Some(ta), Some(tb)) if ta != tb && a.org_type != b.org_type => format!(
                "Complementary development stages ({} at TRL {ta}, {} at TRL {tb})",
                a.org_type.label(),
                b.org_type.label()
            ),
            (Some(ta), Some(tb)) if ta != tb => {
                format!("Complementary development stages (TRL {ta} and TRL {tb})")
            }
            (Some(t), Some(_)) => format!("Both work at TRL {t}"),
            _ => "Development stages are compatible".to_string(),
        },
        PartnerFactor::Industry if points == PARTNER_INDUSTRY_MAX => {
            format!("Same industry ({})", a.industry_sector)
        }
        PartnerFactor::Industry => match sought_partner(a, b) {
            Some(sought) if sector_score(a, b) == 0 => {
                format!("Works in a sought consortium field ({})", sought.industry_sector)
            }
            _ => format!(
                "Related industries ({} and {})",
                a.industry_sector, b.industry_sector
            ),
        },
        PartnerFactor::Technology => "Technology needs and strengths line up".to_string(),
        PartnerFactor::Scale if points == PARTNER_SCALE_MAX => {
            "Organization scale fits both partners' preferences".to_string()
        }
        PartnerFactor::Scale => "Organization scale is broadly compatible".to_string(),
    }
}

/// Strongest non-zero factors first; ties keep table order.
fn reasons(a: &Organization, b: &Organization, breakdown: &PartnerBreakdown) -> Vec<String> {
    let mut ranked: Vec<(PartnerFactor, u8)> = breakdown
        .factors()
        .into_iter()
        .filter(|(_, points)| *points > 0)
        .collect();
    ranked.sort_by(|x, y| y.1.cmp(&x.1));
    ranked
        .into_iter()
        .take(MAX_REASONS)
        .map(|(factor, points)| reason(factor, points, a, b))
        .collect()
}

fn explain(
    a: &Organization,
    b: &Organization,
    score: u8,
    breakdown: &PartnerBreakdown,
    reasons: &[String],
) -> String {
    let factors = breakdown
        .factors()
        .iter()
        .map(|(factor, points)| format!("{} {}/{}", factor.label(), points, factor.max()))
        .collect::<Vec<_>>()
        .join(", ");
    let mut text = format!(
        "{} and {} are {}% compatible ({factors}).",
        a.name, b.name, score
    );
    if !reasons.is_empty() {
        text.push(' ');
        text.push_str(&reasons.join(". "));
        text.push('.');
    }
    text
}

/// Best `top_n` partners for `org` among `candidates`, excluding `org` itself.
///
/// Sorted by score descending; equal scores keep candidate order.
pub fn recommend_partners<'a>(
    pool: &ScoringPool,
    org: &Organization,
    candidates: &'a [Organization],
    top_n: usize,
) -> Vec<PartnerRecommendation<'a>> {
    if top_n == 0 {
        return Vec::new();
    }
    let others: Vec<&Organization> = candidates.iter().filter(|c| c.id != org.id).collect();

    let mut ranked = pool.map(&others, |&candidate| PartnerRecommendation {
        organization: candidate,
        result: compatibility(org, candidate),
    });
    ranked.sort_by(|x, y| y.result.score.cmp(&x.result.score));
    ranked.truncate(top_n);

    debug!(
        organization_id = %org.id,
        candidates = others.len(),
        kept = ranked.len(),
        "ranked partners"
    );
    ranked
}
