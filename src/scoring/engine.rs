use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::{trace, warn};

use super::confidence::weighted_trl_score;
use super::types::{ScoreBreakdown, ScoredProgram};
use crate::constants::{
    DEADLINE_STEPS, INDUSTRY_MAX, INDUSTRY_PARENT_CREDIT, KEYWORD_MAX, KEYWORD_STEPS,
    MIN_TERM_CHARS, ORG_TYPE_MAX, RD_EXPERIENCE_MAX, RD_TRACK_RECORD_PROJECTS,
    TRL_DISTANCE_CUTOFF, TRL_MAX, TRL_MAX_LEVEL, TRL_MIN, TRL_UNKNOWN_CREDIT,
};
use crate::model::{FundingProgram, Organization};
use crate::taxonomy::{self, IndustryRelation};

const SECONDS_PER_DAY: i64 = 86_400;

/// Generic announcement words that say nothing about the technology.
const STOPWORDS: &[&str] = &[
    "사업",
    "기술",
    "개발",
    "지원",
    "연구",
    "과제",
    "and",
    "for",
    "the",
    "of",
    "program",
    "development",
    "research",
    "technology",
    "support",
];

/// Scores one program for one organization.
///
/// Pure: the only time input is `as_of`, used for deadline proximity.
pub fn score(org: &Organization, program: &FundingProgram, as_of: DateTime<Utc>) -> ScoredProgram {
    let breakdown = ScoreBreakdown {
        keyword: keyword_score(org, program),
        industry: industry_score(org, program),
        trl: weighted_trl_score(raw_trl_score(org, program), program.trl_confidence),
        organization_type: organization_type_score(org, program),
        rd_experience: rd_experience_score(org),
        deadline: deadline_score(program.deadline, as_of),
    };

    trace!(
        organization_id = %org.id,
        program_id = %program.id,
        ?breakdown,
        "scored program"
    );

    ScoredProgram::new(breakdown)
}

/// Splits a title into lowercase terms, dropping stopwords and short fragments.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|t| t.chars().count() >= MIN_TERM_CHARS && !STOPWORDS.contains(&t.as_str()))
}

fn normalized_terms<'a, I>(terms: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    terms
        .into_iter()
        .map(taxonomy::normalize)
        .filter(|t| t.chars().count() >= MIN_TERM_CHARS)
        .collect()
}

/// Distinct program terms matched by any organization term.
pub fn matched_terms(org: &Organization, program: &FundingProgram) -> Vec<String> {
    term_matches(org, program).0
}

/// Matched program terms, and how many distinct organization terms they cover.
fn term_matches(org: &Organization, program: &FundingProgram) -> (Vec<String>, usize) {
    let org_terms = normalized_terms(org.technology_terms());
    if org_terms.is_empty() {
        return (Vec::new(), 0);
    }

    let mut program_terms = normalized_terms(program.keywords.iter().map(String::as_str));
    program_terms.extend(tokenize(&program.title));

    let matched: Vec<String> = program_terms
        .into_iter()
        .filter(|pt| org_terms.iter().any(|ot| terms_overlap(pt, ot)))
        .collect();
    let covered = org_terms
        .iter()
        .filter(|ot| matched.iter().any(|pt| terms_overlap(pt, ot)))
        .count();
    (matched, covered)
}

/// Either term contains the other. Short ASCII terms ("ai", "iot") must match
/// exactly, otherwise "ai" would hit "retail".
pub(crate) fn terms_overlap(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if shorter.is_ascii() && shorter.len() <= 3 {
        return false;
    }
    longer.contains(shorter)
}

/// Diminishing returns per matched term keeps keyword-stuffed programs from
/// dominating.
pub fn keyword_score(org: &Organization, program: &FundingProgram) -> u8 {
    let (matched, covered) = term_matches(org, program);
    // Each organization term earns at most one step, however many program
    // variants it hits.
    let points: u8 = KEYWORD_STEPS.iter().take(matched.len().min(covered)).sum();
    points.min(KEYWORD_MAX)
}

pub fn industry_score(org: &Organization, program: &FundingProgram) -> u8 {
    let sector = taxonomy::normalize(&org.industry_sector);
    if sector.is_empty() {
        return 0;
    }
    if sector == taxonomy::normalize(&program.category) {
        return INDUSTRY_MAX;
    }

    let Some(org_category) = taxonomy::classify(&org.industry_sector) else {
        return 0;
    };

    let program_categories = taxonomy::classify_all(
        std::iter::once(program.category.as_str())
            .chain(program.keywords.iter().map(String::as_str))
            .chain(std::iter::once(program.agency_id.as_str())),
    );

    let best = program_categories
        .iter()
        .map(|&category| taxonomy::relation(org_category, category))
        .min_by_key(|relation| match relation {
            IndustryRelation::Same => 0,
            IndustryRelation::SameSector => 1,
            IndustryRelation::Unrelated => 2,
        });

    match best {
        Some(IndustryRelation::Same) => INDUSTRY_MAX,
        Some(IndustryRelation::SameSector) => INDUSTRY_PARENT_CREDIT,
        Some(IndustryRelation::Unrelated) | None => 0,
    }
}

/// The program's TRL window, or `None` when it imposes no usable constraint.
///
/// Open-ended bounds extend to the edge of the scale. Malformed ranges are
/// logged and treated as unconstrained.
pub fn program_trl_range(program: &FundingProgram) -> Option<(u8, u8)> {
    let in_scale = |trl: u8| (TRL_MIN..=TRL_MAX_LEVEL).contains(&trl);

    let (min, max) = match (program.min_trl, program.max_trl) {
        (None, None) => return None,
        (Some(min), None) => (min, TRL_MAX_LEVEL),
        (None, Some(max)) => (TRL_MIN, max),
        (Some(min), Some(max)) => (min, max),
    };

    if !in_scale(min) || !in_scale(max) || min > max {
        warn!(
            program_id = %program.id,
            min_trl = ?program.min_trl,
            max_trl = ?program.max_trl,
            "malformed TRL range, treating as unconstrained"
        );
        return None;
    }

    Some((min, max))
}

/// TRL sub-score before confidence weighting.
pub fn raw_trl_score(org: &Organization, program: &FundingProgram) -> u8 {
    let Some(trl) = org.matching_trl() else {
        return TRL_UNKNOWN_CREDIT;
    };
    let Some((min, max)) = program_trl_range(program) else {
        return TRL_MAX;
    };

    let distance = if trl < min {
        min - trl
    } else if trl > max {
        trl - max
    } else {
        0
    };

    if distance >= TRL_DISTANCE_CUTOFF {
        0
    } else {
        TRL_MAX * (TRL_DISTANCE_CUTOFF - distance) / TRL_DISTANCE_CUTOFF
    }
}

pub fn organization_type_score(org: &Organization, program: &FundingProgram) -> u8 {
    if program.accepts(org.org_type) {
        ORG_TYPE_MAX
    } else {
        0
    }
}

pub fn rd_experience_score(org: &Organization) -> u8 {
    match (org.rd_experience, org.past_project_count) {
        (true, n) if n >= RD_TRACK_RECORD_PROJECTS => RD_EXPERIENCE_MAX,
        (true, _) => 7,
        (false, n) if n > 0 => 4,
        (false, _) => 0,
    }
}

/// Whole days until `deadline`, rounded up. `None` once it has passed.
pub fn days_until(deadline: DateTime<Utc>, as_of: DateTime<Utc>) -> Option<i64> {
    let seconds = (deadline - as_of).num_seconds();
    if seconds < 0 {
        return None;
    }
    Some((seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY)
}

/// Sooner deadlines score higher. Evergreen (null) and past deadlines score 0.
pub fn deadline_score(deadline: Option<DateTime<Utc>>, as_of: DateTime<Utc>) -> u8 {
    let Some(days) = deadline.and_then(|d| days_until(d, as_of)) else {
        return 0;
    };
    DEADLINE_STEPS
        .iter()
        .find(|(max_days, _)| days <= *max_days)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}
