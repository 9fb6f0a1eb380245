//! Organization-to-program compatibility scoring.
//!
//! [`score`] combines six bounded sub-scores into a 0–100 total:
//!
//! | factor             | max |
//! |--------------------|-----|
//! | keyword overlap    | 25  |
//! | industry alignment | 20  |
//! | TRL fit (weighted) | 15  |
//! | organization type  | 15  |
//! | R&D experience     | 10  |
//! | deadline proximity | 15  |
//!
//! The TRL sub-score passes through [`weighted_trl_score`] using the program's
//! [`TrlConfidence`](crate::model::TrlConfidence) before summation. Every
//! sub-score is an integer, so the breakdown sums exactly to the total.

pub mod confidence;
pub mod engine;
pub mod types;


pub use confidence::weighted_trl_score;
pub use engine::{
    days_until, deadline_score, industry_score, keyword_score, matched_terms,
    organization_type_score, program_trl_range, raw_trl_score, rd_experience_score, score,
    tokenize,
};
pub use types::{ScoreBreakdown, ScoreFactor, ScoredProgram};
