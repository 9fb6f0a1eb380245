//! Typed program eligibility requirements.
//!
//! Announcements carry requirements that are not first-class program fields.
//! Each known kind is a variant so evaluation is an exhaustive match; anything
//! unrecognised lands in [`EligibilityRequirement::Notes`], bounded in length.

use serde::{Deserialize, Serialize};

use super::organization::{EmployeeCount, Organization, RevenueRange};
use crate::constants::ELIGIBILITY_NOTES_MAX_CHARS;
use crate::taxonomy::normalize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EligibilityRequirement {
    /// Organization must hold the named certification (e.g. "벤처기업", "ISO 9001").
    Certification { name: String },
    /// Annual revenue at or above the bucket.
    MinimumRevenue { floor: RevenueRange },
    /// Headcount at or below the bucket.
    MaximumEmployees { ceiling: EmployeeCount },
    /// Organization must be located in one of the regions.
    Region { allowed: Vec<String> },
    /// Free-form text the engine does not interpret.
    Notes { text: String },
}

/// Outcome of checking one requirement against one organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EligibilityVerdict {
    Satisfied,
    Violated { reason: String },
    /// The organization profile lacks the data needed to decide.
    Unknown,
}

impl EligibilityVerdict {
    pub fn is_violated(&self) -> bool {
        matches!(self, EligibilityVerdict::Violated { .. })
    }
}

impl EligibilityRequirement {
    /// Builds a notes requirement, truncated to the maximum length.
    pub fn notes(text: impl Into<String>) -> Self {
        let text: String = text.into();
        EligibilityRequirement::Notes {
            text: text.chars().take(ELIGIBILITY_NOTES_MAX_CHARS).collect(),
        }
    }

    pub fn evaluate(&self, org: &Organization) -> EligibilityVerdict {
        match self {
            EligibilityRequirement::Certification { name } => {
                let wanted = normalize(name);
                if org.certifications.iter().any(|c| normalize(c) == wanted) {
                    EligibilityVerdict::Satisfied
                } else if org.certifications.is_empty() {
                    EligibilityVerdict::Unknown
                } else {
                    EligibilityVerdict::Violated {
                        reason: format!("missing certification '{name}'"),
                    }
                }
            }
            EligibilityRequirement::MinimumRevenue { floor } => match org.revenue_range {
                Some(range) if range >= *floor => EligibilityVerdict::Satisfied,
                Some(range) => EligibilityVerdict::Violated {
                    reason: format!("revenue {} below {}", range.label(), floor.label()),
                },
                None => EligibilityVerdict::Unknown,
            },
            EligibilityRequirement::MaximumEmployees { ceiling } => match org.employee_count {
                Some(count) if count <= *ceiling => EligibilityVerdict::Satisfied,
                Some(count) => EligibilityVerdict::Violated {
                    reason: format!("{} exceeds {}", count.label(), ceiling.label()),
                },
                None => EligibilityVerdict::Unknown,
            },
            EligibilityRequirement::Region { allowed } => match &org.region {
                _ if allowed.is_empty() => EligibilityVerdict::Satisfied,
                Some(region) => {
                    let region = normalize(region);
                    if allowed.iter().any(|a| normalize(a) == region) {
                        EligibilityVerdict::Satisfied
                    } else {
                        EligibilityVerdict::Violated {
                            reason: format!("region '{region}' not eligible"),
                        }
                    }
                }
                None => EligibilityVerdict::Unknown,
            },
            EligibilityRequirement::Notes { .. } => EligibilityVerdict::Unknown,
        }
    }
}

/// Returns the first definitive violation, if any. Unknowns never exclude.
pub fn first_violation<'a, I>(requirements: I, org: &Organization) -> Option<String>
where
    I: IntoIterator<Item = &'a EligibilityRequirement>,
{
    requirements
        .into_iter()
        .map(|req| req.evaluate(org))
        .find_map(|verdict| match verdict {
            EligibilityVerdict::Violated { reason } => Some(reason),
            _ => None,
        })
}
