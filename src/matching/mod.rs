//! Candidate filtering, parallel scoring and top-N selection.

pub mod error;
pub mod pool;
pub mod ranker;


pub use error::{MatchError, MatchResult};
pub use pool::ScoringPool;
pub use ranker::{MatchRanker, RankedProgram, qualifies, rank_candidates};
