//! Computes `PERCENT_RANK` over the distinct values of every statistic
//! column, ascending, scaled to `[0, 100]`.

use std::collections::BTreeMap;

use nine_tiles_core::StatRecord;

/// Per-column percentile lookup: `stat_name -> (stat_value -> percentile)`.
#[derive(Debug, Clone, Default)]
pub struct PercentileTable {
    columns: BTreeMap<&'static str, BTreeMap<u32, f64>>,
}

impl PercentileTable {
    /// Builds the table from every row's value in every statistic column.
    /// A column with only one distinct value has no meaningful rank; its
    /// single value is assigned 100.0 rather than dividing by zero.
    pub fn build(rows: &[StatRecord]) -> Self {
        let mut columns = BTreeMap::new();
        for &field in StatRecord::FIELDS {
            let mut distinct: Vec<u32> = rows.iter().filter_map(|r| r.get(field)).collect();
            distinct.sort_unstable();
            distinct.dedup();

            let mut ranks = BTreeMap::new();
            let denominator = distinct.len().saturating_sub(1);
            for (rank, &value) in distinct.iter().enumerate() {
                let percent_rank = if denominator == 0 {
                    100.0
                } else {
                    (rank as f64 / denominator as f64 * 100.0).clamp(0.0, 100.0)
                };
                ranks.insert(value, percent_rank);
            }
            columns.insert(field, ranks);
        }
        Self { columns }
    }

    pub fn percentile(&self, stat_name: &str, value: u32) -> Option<f64> {
        self.columns.get(stat_name)?.get(&value).copied()
    }

    pub fn column(&self, stat_name: &str) -> Option<&BTreeMap<u32, f64>> {
        self.columns.get(stat_name)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&'static str, &BTreeMap<u32, f64>)> {
        self.columns.iter().map(|(&name, ranks)| (name, ranks))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn rows_with(values: &[u8]) -> Vec<StatRecord> {
        values
            .iter()
            .map(|&v| StatRecord {
                total_roads: v,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn extreme_values_hit_zero_and_one_hundred() {
        let table = PercentileTable::build(&rows_with(&[2, 0, 4, 2]));
        assert_eq!(table.percentile("total_roads", 0), Some(0.0));
        assert_eq!(table.percentile("total_roads", 4), Some(100.0));
        assert_eq!(table.percentile("total_roads", 2), Some(50.0));
    }

    #[test]
    fn single_distinct_value_is_not_a_division_by_zero() {
        let table = PercentileTable::build(&rows_with(&[3, 3, 3]));
        assert_eq!(table.percentile("total_roads", 3), Some(100.0));
    }

    #[test]
    fn unseen_value_is_absent() {
        let table = PercentileTable::build(&rows_with(&[1, 2]));
        assert_eq!(table.percentile("total_roads", 9), None);
    }

    #[test]
    fn building_twice_from_the_same_rows_is_idempotent() {
        let rows = rows_with(&[2, 0, 4, 2, 7]);
        let first = PercentileTable::build(&rows);
        let second = PercentileTable::build(&rows);
        let first_column: Vec<_> = first.column("total_roads").unwrap().iter().collect();
        let second_column: Vec<_> = second.column("total_roads").unwrap().iter().collect();
        assert_eq!(first_column, second_column);
    }

    proptest! {
        /// For any column with at least two distinct values, the minimum
        /// value's percentile is 0 and the maximum's is 100, and percentile
        /// never decreases as the underlying value increases.
        #[test]
        fn percentile_bounds_and_monotonicity_hold(mut values in prop::collection::vec(0u8..20, 2..16)) {
            values.sort_unstable();
            values.dedup();
            prop_assume!(values.len() >= 2);

            let table = PercentileTable::build(&rows_with(&values));
            let min = *values.first().unwrap();
            let max = *values.last().unwrap();
            prop_assert_eq!(table.percentile("total_roads", min), Some(0.0));
            prop_assert_eq!(table.percentile("total_roads", max), Some(100.0));

            let mut previous = f64::NEG_INFINITY;
            for &value in &values {
                let percentile = table.percentile("total_roads", value).unwrap();
                prop_assert!(percentile >= previous);
                previous = percentile;
            }
        }
    }
}
