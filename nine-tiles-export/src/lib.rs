//! `serde`-derived schemas for the ranking pipeline's two JSON exports,
//! `best_solutions.json` and `percentiles.json`, plus the canonical
//! underscore-joined card-id key used in both.

use std::collections::BTreeMap;

use nine_tiles_core::board::position_to_row_col;
use nine_tiles_core::{OrientedTile, NUM_CELLS};
use serde::Serialize;

/// Sorts and underscore-joins a set of card ids into a map key, e.g.
/// `[7, 3, 12] -> "3_7_12"`.
pub fn canonical_key(card_ids: &[u32]) -> String {
    let mut ids = card_ids.to_vec();
    ids.sort_unstable();
    ids.iter().map(u32::to_string).collect::<Vec<_>>().join("_")
}

/// One tiling's layout as `p{row}{col} -> [piece, side, orientation]`.
pub type Layout = BTreeMap<String, [u8; 3]>;

pub fn layout_of(cells: &[OrientedTile; NUM_CELLS]) -> Layout {
    let mut layout = BTreeMap::new();
    for (position, cell) in cells.iter().enumerate() {
        let (row, col) = position_to_row_col(position);
        layout.insert(format!("p{row}{col}"), [cell.piece, cell.side, cell.orientation]);
    }
    layout
}

/// `best_solutions.json`: canonical card-id key -> chosen layout. A
/// `BTreeMap` keeps key order deterministic across runs.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(transparent)]
pub struct BestSolutions(BTreeMap<String, Layout>);

impl BestSolutions {
    pub fn insert(&mut self, card_ids: &[u32], cells: &[OrientedTile; NUM_CELLS]) {
        self.0.insert(canonical_key(card_ids), layout_of(cells));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// `percentiles.json`: `stat_name -> { stat_value_string -> percentile }`.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(transparent)]
pub struct Percentiles(BTreeMap<&'static str, BTreeMap<String, f64>>);

impl Percentiles {
    pub fn insert_column(&mut self, stat_name: &'static str, column: impl IntoIterator<Item = (u32, f64)>) {
        let entry = self.0.entry(stat_name).or_default();
        for (value, percentile) in column {
            entry.insert(value.to_string(), percentile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_sorted_and_underscore_joined() {
        assert_eq!(canonical_key(&[7, 3, 12]), "3_7_12");
        assert_eq!(canonical_key(&[3]), "3");
    }

    #[test]
    fn best_solutions_serializes_as_a_plain_object() {
        let mut best = BestSolutions::default();
        let cells = [OrientedTile::new(0, 0, 0); NUM_CELLS];
        best.insert(&[7, 3], &cells);
        let json = serde_json::to_value(&best).expect("serializable");
        assert!(json.get("3_7").is_some());
        assert_eq!(json["3_7"]["p00"], serde_json::json!([0, 0, 0]));
    }

    #[test]
    fn percentiles_group_values_under_their_stat_name() {
        let mut table = Percentiles::default();
        table.insert_column("total_roads", [(0, 0.0), (3, 100.0)]);
        let json = serde_json::to_value(&table).expect("serializable");
        assert_eq!(json["total_roads"]["0"], 0.0);
        assert_eq!(json["total_roads"]["3"], 100.0);
    }

    #[test]
    fn best_solutions_shape_is_stable() {
        let mut best = BestSolutions::default();
        let mut cells = [OrientedTile::new(0, 0, 0); NUM_CELLS];
        cells[8] = OrientedTile::new(8, 1, 3);
        best.insert(&[12, 3, 7], &cells);
        let json = serde_json::to_value(&best).expect("serializable");
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert_eq!(json["3_7_12"]["p00"], serde_json::json!([0, 0, 0]));
        assert_eq!(json["3_7_12"]["p22"], serde_json::json!([8, 1, 3]));
    }
}
