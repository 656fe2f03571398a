//! Per-tiling card scores and the balanced `super_score` aggregate.

use std::collections::HashMap;

use nine_tiles_core::catalogue::CardDirection;
use nine_tiles_core::{CardCatalogue, StatRecord};

use crate::percentile::PercentileTable;

/// Every scorable card's score for one tiling, plus the geometric-mean
/// aggregate across all of them.
#[derive(Debug, Clone, Default)]
pub struct RowScores {
    pub card_scores: HashMap<u32, f64>,
    pub super_score: f64,
}

/// `card_score = percentile` for `max` cards, `100 - percentile` for `min`
/// cards. `super_score` is the geometric mean in log-space, 0 if any card
/// scores exactly 0.
pub fn score_row(stats: &StatRecord, cards: &CardCatalogue, percentiles: &PercentileTable) -> RowScores {
    let mut card_scores = HashMap::new();
    for card in cards.scorable_cards() {
        let key = card.key.as_deref().expect("scorable cards carry a key");
        let direction = card.r#type.expect("scorable cards carry a type");
        let Some(value) = stats.get(key) else {
            continue;
        };
        let Some(base) = percentiles.percentile(key, value) else {
            continue;
        };
        let score = match direction {
            CardDirection::Max => base,
            CardDirection::Min => 100.0 - base,
        };
        card_scores.insert(card.number, score);
    }

    let super_score = geometric_mean(card_scores.values().copied());
    RowScores {
        card_scores,
        super_score,
    }
}

pub fn score_rows(stats: &[StatRecord], cards: &CardCatalogue, percentiles: &PercentileTable) -> Vec<RowScores> {
    stats.iter().map(|s| score_row(s, cards, percentiles)).collect()
}

/// `exp(mean(ln(x)))` over a non-empty iterator, or 0.0 if any value is
/// non-positive (ties a tiling's overall score to its weakest card).
pub fn geometric_mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    let mut sum_ln = 0.0;
    for value in values {
        if value <= 0.0 {
            return 0.0;
        }
        sum_ln += value.ln();
    }
    (sum_ln / n as f64).exp()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn zero_score_collapses_super_score() {
        assert_eq!(geometric_mean([100.0, 0.0, 50.0].into_iter()), 0.0);
    }

    #[test]
    fn balanced_scores_average_in_log_space() {
        let mean = geometric_mean([100.0, 100.0].into_iter());
        assert!((mean - 100.0).abs() < 1e-9);
    }

    proptest! {
        /// `super_score` is zero exactly when at least one component score is
        /// non-positive, and strictly positive otherwise.
        #[test]
        fn super_score_is_zero_iff_any_component_is_non_positive(
            scores in prop::collection::vec(-10.0f64..110.0, 1..6)
        ) {
            let any_non_positive = scores.iter().any(|&s| s <= 0.0);
            let mean = geometric_mean(scores.iter().copied());
            if any_non_positive {
                prop_assert_eq!(mean, 0.0);
            } else {
                prop_assert!(mean > 0.0);
            }
        }

        /// Scoring the same statistics against the same catalogue and
        /// percentile table twice is deterministic.
        #[test]
        fn geometric_mean_is_deterministic(values in prop::collection::vec(0.01f64..100.0, 1..6)) {
            let a = geometric_mean(values.iter().copied());
            let b = geometric_mean(values.iter().copied());
            prop_assert_eq!(a, b);
        }
    }
}
