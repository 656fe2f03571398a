//! Chooses the best tiling for every singleton, pair, and triple of
//! scorable cards, plus the full set, under the balanced-aggregation rule.

use itertools::Itertools;
use nine_tiles_core::{CardCatalogue, OrientedTile, NUM_CELLS};

use crate::score::RowScores;

/// One chosen tiling for one combination of card ids (already sorted).
#[derive(Debug, Clone)]
pub struct Selection {
    pub card_ids: Vec<u32>,
    pub cells: [OrientedTile; NUM_CELLS],
}

/// `argmax` of `(prod score_i)^(1/k)`, i.e. `sum(ln score_i) / k`; ties
/// broken by the minimum per-card score, then by `super_score`.
fn objective(row: &RowScores, combo: &[u32]) -> Option<(f64, f64, f64)> {
    let mut sum_ln = 0.0;
    let mut min_score = f64::INFINITY;
    for &card_id in combo {
        let score = *row.card_scores.get(&card_id)?;
        sum_ln += score.ln();
        min_score = min_score.min(score);
    }
    let geometric = sum_ln / combo.len() as f64;
    Some((geometric, min_score, row.super_score))
}

fn best_for_combination<'a>(
    combo: &[u32],
    layouts: &'a [[OrientedTile; NUM_CELLS]],
    row_scores: &'a [RowScores],
) -> Option<&'a [OrientedTile; NUM_CELLS]> {
    layouts
        .iter()
        .zip(row_scores)
        .filter_map(|(cells, row)| objective(row, combo).map(|key| (key, cells)))
        .max_by(|(a, _), (b, _)| {
            a.0.total_cmp(&b.0)
                .then_with(|| a.1.total_cmp(&b.1))
                .then_with(|| a.2.total_cmp(&b.2))
        })
        .map(|(_, cells)| cells)
}

/// Every singleton, pair, and triple of scorable cards, plus the full set of
/// scorable cards as one further combination.
fn combinations(scorable_card_ids: &[u32]) -> Vec<Vec<u32>> {
    let mut combos = Vec::new();
    for k in 1..=3.min(scorable_card_ids.len()) {
        combos.extend(scorable_card_ids.iter().copied().combinations(k));
    }
    if !scorable_card_ids.is_empty() {
        combos.push(scorable_card_ids.to_vec());
    }
    combos
}

pub fn select_all_combinations(
    layouts: &[[OrientedTile; NUM_CELLS]],
    row_scores: &[RowScores],
    cards: &CardCatalogue,
) -> Vec<Selection> {
    let mut scorable_card_ids: Vec<u32> = cards.scorable_cards().map(|c| c.number).collect();
    scorable_card_ids.sort_unstable();

    let mut selections = Vec::new();
    for mut combo in combinations(&scorable_card_ids) {
        combo.sort_unstable();
        if let Some(cells) = best_for_combination(&combo, layouts, row_scores) {
            selections.push(Selection {
                card_ids: combo,
                cells: *cells,
            });
        }
    }
    selections
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;

    fn row(scores: &[(u32, f64)], super_score: f64) -> RowScores {
        RowScores {
            card_scores: scores.iter().copied().collect::<HashMap<_, _>>(),
            super_score,
        }
    }

    #[test]
    fn picks_the_row_maximising_the_single_card_score() {
        let layouts = [
            [OrientedTile::new(0, 0, 0); NUM_CELLS],
            [OrientedTile::new(1, 0, 0); NUM_CELLS],
        ];
        let rows = [row(&[(3, 40.0)], 40.0), row(&[(3, 90.0)], 90.0)];
        let best = best_for_combination(&[3], &layouts, &rows).expect("a winner");
        assert_eq!(*best, layouts[1]);
    }

    #[test]
    fn tie_breaks_on_minimum_then_super_score() {
        let layouts = [
            [OrientedTile::new(0, 0, 0); NUM_CELLS],
            [OrientedTile::new(1, 0, 0); NUM_CELLS],
        ];
        // Same geometric mean for combo [3, 7] (sqrt(80*20) == sqrt(20*80)),
        // but the second row has a higher minimum component score.
        let rows = [row(&[(3, 80.0), (7, 20.0)], 50.0), row(&[(3, 50.0), (7, 32.0)], 50.0)];
        let best = best_for_combination(&[3, 7], &layouts, &rows).expect("a winner");
        assert_eq!(*best, layouts[1]);
    }

    proptest! {
        /// If one tiling's per-card scores dominate another's across a whole
        /// combination (every card at least as high, at least one strictly
        /// higher), the dominated tiling must never be selected over it.
        #[test]
        fn dominating_row_is_never_beaten(
            base in prop::collection::vec(1.0f64..99.0, 2..4),
            margin_index in 0usize..3,
        ) {
            let combo: Vec<u32> = (0..base.len() as u32).collect();
            let margin_index = margin_index % base.len();

            let mut better: Vec<(u32, f64)> = combo.iter().zip(&base).map(|(&id, &s)| (id, s)).collect();
            better[margin_index].1 = (better[margin_index].1 + 1.0).min(100.0);

            let rows = [row(&better, 0.0), row(&combo.iter().zip(&base).map(|(&id, &s)| (id, s)).collect::<Vec<_>>(), 0.0)];
            let layouts = [
                [OrientedTile::new(0, 0, 0); NUM_CELLS],
                [OrientedTile::new(1, 0, 0); NUM_CELLS],
            ];
            let best = best_for_combination(&combo, &layouts, &rows).expect("a winner");
            prop_assert_eq!(*best, layouts[0]);
        }
    }
}
