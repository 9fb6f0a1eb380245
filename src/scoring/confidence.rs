//! TRL confidence weighting.
//!
//! A TRL requirement inferred from keyword heuristics, or missing altogether,
//! should not rank a program as confidently as one stated in the announcement.
//! The raw TRL sub-score is discounted by provenance before summation.

use crate::model::TrlConfidence;

impl TrlConfidence {
    /// Multiplier in hundredths: 100, 85, 70.
    pub fn multiplier_percent(&self) -> u16 {
        match self {
            TrlConfidence::Explicit => 100,
            TrlConfidence::Inferred => 85,
            TrlConfidence::Missing => 70,
        }
    }
}

/// Applies the confidence multiplier to a raw TRL sub-score, flooring.
///
/// Integer arithmetic keeps the result exact and never above `raw`.
#[inline]
pub fn weighted_trl_score(raw: u8, confidence: TrlConfidence) -> u8 {
    (raw as u16 * confidence.multiplier_percent() / 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_is_identity() {
        for raw in 0..=u8::MAX {
            assert_eq!(weighted_trl_score(raw, TrlConfidence::Explicit), raw);
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(weighted_trl_score(15, TrlConfidence::Inferred), 12);
        assert_eq!(weighted_trl_score(15, TrlConfidence::Missing), 10);
        assert_eq!(weighted_trl_score(10, TrlConfidence::Inferred), 8);
        assert_eq!(weighted_trl_score(10, TrlConfidence::Missing), 7);
        assert_eq!(weighted_trl_score(0, TrlConfidence::Missing), 0);
    }

    #[test]
    fn test_monotone_non_increasing_and_never_above_raw() {
        for raw in 0..=u8::MAX {
            let explicit = weighted_trl_score(raw, TrlConfidence::Explicit);
            let inferred = weighted_trl_score(raw, TrlConfidence::Inferred);
            let missing = weighted_trl_score(raw, TrlConfidence::Missing);

            assert!(inferred <= explicit, "raw={raw}");
            assert!(missing <= inferred, "raw={raw}");
            assert!(explicit <= raw, "raw={raw}");
        }
    }

    #[test]
    fn test_deterministic() {
        for confidence in [
            TrlConfidence::Explicit,
            TrlConfidence::Inferred,
            TrlConfidence::Missing,
        ] {
            assert_eq!(
                weighted_trl_score(13, confidence),
                weighted_trl_score(13, confidence)
            );
        }
    }
}
