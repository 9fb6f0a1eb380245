//! Cross-cutting, shared constants.
//!
//! The program-scoring weights below form the canonical weighting table. Each
//! factor's maximum bounds its sub-score, and the maxima sum to [`MAX_SCORE`].

pub const MAX_SCORE: u8 = 100;

pub const KEYWORD_MAX: u8 = 25;
pub const INDUSTRY_MAX: u8 = 20;
pub const TRL_MAX: u8 = 15;
pub const ORG_TYPE_MAX: u8 = 15;
pub const RD_EXPERIENCE_MAX: u8 = 10;
pub const DEADLINE_MAX: u8 = 15;

/// Points for the 1st, 2nd, 3rd and 4th distinct matched program term.
pub const KEYWORD_STEPS: [u8; 4] = [10, 7, 5, 3];
pub const MIN_TERM_CHARS: usize = 2;

pub const INDUSTRY_PARENT_CREDIT: u8 = 10;

/// TRL distance (outside the program range) at which credit reaches zero.
pub const TRL_DISTANCE_CUTOFF: u8 = 3;
pub const TRL_UNKNOWN_CREDIT: u8 = 7;
pub const TRL_MIN: u8 = 1;
pub const TRL_MAX_LEVEL: u8 = 9;

pub const RD_TRACK_RECORD_PROJECTS: u32 = 3;

/// `(max days until deadline, points)`, checked in order.
pub const DEADLINE_STEPS: [(i64, u8); 6] = [(7, 15), (14, 12), (30, 9), (60, 6), (90, 3), (180, 1)];

pub const PARTNER_STAGE_MAX: u8 = 35;
pub const PARTNER_INDUSTRY_MAX: u8 = 20;
pub const PARTNER_TECHNOLOGY_MAX: u8 = 25;
pub const PARTNER_SCALE_MAX: u8 = 20;

/// Reasons surfaced per compatibility result.
pub const MAX_REASONS: usize = 2;

pub const ELIGIBILITY_NOTES_MAX_CHARS: usize = 500;

pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_PROMPT_VERSION: &str = "v1";
pub const DEFAULT_EXPLANATION_TTL_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_EXPLANATION_CAPACITY: u64 = 10_000;
pub const DEFAULT_EXPLAINER_TIMEOUT_SECS: u64 = 20;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_weights_sum_to_max_score() {
        let sum = KEYWORD_MAX as u16
            + INDUSTRY_MAX as u16
            + TRL_MAX as u16
            + ORG_TYPE_MAX as u16
            + RD_EXPERIENCE_MAX as u16
            + DEADLINE_MAX as u16;
        assert_eq!(sum, MAX_SCORE as u16);
    }

    #[test]
    fn test_partner_weights_sum_to_max_score() {
        let sum = PARTNER_STAGE_MAX as u16
            + PARTNER_INDUSTRY_MAX as u16
            + PARTNER_TECHNOLOGY_MAX as u16
            + PARTNER_SCALE_MAX as u16;
        assert_eq!(sum, MAX_SCORE as u16);
    }

    #[test]
    fn test_keyword_steps_reach_cap() {
        let total: u16 = KEYWORD_STEPS.iter().map(|&s| s as u16).sum();
        assert_eq!(total, KEYWORD_MAX as u16);
    }

    #[test]
    fn test_deadline_steps_are_non_increasing() {
        assert_eq!(DEADLINE_STEPS[0].1, DEADLINE_MAX);
        for pair in DEADLINE_STEPS.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[0].1 >= pair[1].1);
        }
    }
}
