use thiserror::Error;

/// Failure to load or validate a tile or card catalogue.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("failed to read catalogue file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalogue JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tile catalogue must have exactly {expected} pieces, found {found}")]
    WrongPieceCount { expected: usize, found: usize },
    #[error("card {number} references unknown statistic key {key:?}")]
    UnknownStatKey { number: u32, key: String },
    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// A road references an edge outside the valid `{0,1,2,3}` range.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error(
        "road connection index {index} on piece {piece} side {side} is out of range (expected 0..=3)"
    )]
    InvalidLocalEdge { piece: usize, side: usize, index: u8 },
    #[error(
        "item direction index {direction} on piece {piece} side {side} is out of range (expected 0..=3)"
    )]
    InvalidDirection { piece: usize, side: usize, direction: u8 },
}

/// A road component could not be walked deterministically.
#[derive(Debug, Error)]
pub enum RoadGraphError {
    #[error("road component containing node {node} has a branch vertex (degree {degree} > 2)")]
    BranchingRoad { node: u8, degree: usize },
}

/// Two per-worker columnar outputs disagree on schema.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("worker file {path} has a row byte length that isn't a multiple of {expected} (remainder {found})")]
    SchemaMismatch {
        path: String,
        expected: usize,
        found: usize,
    },
    #[error("failed to read worker output: {0}")]
    Io(#[from] std::io::Error),
}
