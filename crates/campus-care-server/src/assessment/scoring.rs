// crates/campus-care-server/src/assessment/scoring.rs
// Total score, severity tier and category breakdown

use campus_care_types::{AssessmentResponse, CategoryScore, Instrument, SeverityResult};

use super::instruments::{PHQ9_SELF_HARM_ITEM, instrument_spec};

/// Score a set of responses.
///
/// Total over well-typed input: a question with no answer counts as 0, ids that
/// are not part of the instrument are ignored, and values are summed as given.
/// Sums saturate at `u32::MAX`, so out-of-range values land in the top band.
pub fn score(responses: &AssessmentResponse, instrument: Instrument) -> SeverityResult {
    let spec = instrument_spec(instrument);
    let answer = |id: u32| responses.get(&id).copied().unwrap_or(0);

    let total_score = spec
        .questions
        .iter()
        .fold(0u32, |sum, q| sum.saturating_add(answer(q.id)));

    let category_breakdown = spec
        .categories
        .iter()
        .map(|category| {
            let (count, raw_score) = spec
                .questions_in(category)
                .fold((0u32, 0u32), |(n, sum), q| (n + 1, sum.saturating_add(answer(q.id))));
            let max_score = count * spec.max_response;
            CategoryScore {
                category: category.to_string(),
                raw_score,
                max_score,
                percentage: percentage(raw_score, max_score),
            }
        })
        .collect();

    let band = spec.band_for(total_score);
    let safety_alert = instrument == Instrument::Phq9 && answer(PHQ9_SELF_HARM_ITEM) > 0;

    SeverityResult {
        instrument,
        total_score,
        max_score: spec.max_score(),
        tier: band.tier,
        guidance: band.guidance.to_string(),
        category_breakdown,
        safety_alert,
    }
}

/// round(100 * raw / max), halves rounded up; saturates for out-of-range raw scores
fn percentage(raw: u32, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    (100.0 * raw as f64 / max as f64).round() as u32
}
