//! The ranking pipeline: percentile engine, score engine, and selector.
//! Operates purely over an already-merged columnar store; does no I/O.

pub mod percentile;
pub mod score;
pub mod selector;

pub use percentile::PercentileTable;
pub use score::{geometric_mean, score_row, score_rows, RowScores};
pub use selector::{select_all_combinations, Selection};
