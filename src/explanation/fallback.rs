use super::types::ExplanationInput;
use crate::scoring::ScoreFactor;

/// Score-only explanation used when generation is denied or fails.
///
/// Built purely from the breakdown, so equal inputs give equal text.
pub fn fallback_explanation(input: &ExplanationInput) -> String {
    let mut factors: Vec<(ScoreFactor, u8)> = input
        .breakdown
        .factors()
        .into_iter()
        .filter(|(_, points)| *points > 0)
        .collect();

    let headline = format!(
        "{} scores {}/100 for {}.",
        input.organization_name, input.score, input.program_title
    );
    if factors.is_empty() {
        return format!("{headline} No scoring factor contributed.");
    }

    factors.sort_by(|a, b| b.1.cmp(&a.1));
    let strongest = factors
        .iter()
        .map(|(factor, points)| format!("{} {}/{}", factor.label(), points, factor.max()))
        .collect::<Vec<_>>()
        .join(", ");

    let missing: Vec<&str> = input
        .breakdown
        .factors()
        .iter()
        .filter(|(_, points)| *points == 0)
        .map(|(factor, _)| factor.label())
        .collect();

    if missing.is_empty() {
        format!("{headline} Contributing factors: {strongest}.")
    } else {
        format!(
            "{headline} Contributing factors: {strongest}. No credit for {}.",
            missing.join(", ")
        )
    }
}
