//! Precomputed per-(piece, side, orientation) edge masks and the reverse
//! lookup from a required edge pattern to the oriented tiles that satisfy it.

use crate::board::{rotate_edge, NUM_ORIENTATIONS, NUM_PIECES, NUM_SIDES};
use crate::catalogue::TileCatalogue;
use crate::OrientedTile;

/// A constraint on one edge: no requirement, must be absent, or must be
/// present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRequirement {
    Any,
    Absent,
    Present,
}

impl EdgeRequirement {
    const fn trit(self) -> u8 {
        match self {
            Self::Any => 0,
            Self::Absent => 1,
            Self::Present => 2,
        }
    }

    const fn from_trit(trit: u8) -> Self {
        match trit {
            1 => Self::Absent,
            2 => Self::Present,
            _ => Self::Any,
        }
    }

    fn matches(self, present: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Absent => !present,
            Self::Present => present,
        }
    }
}

/// A required edge pattern across the four local edges `[W, N, E, S]`.
pub type RequiredEdges = [EdgeRequirement; 4];

/// Number of distinct required-edge keys: one of 3 choices per edge, 4 edges.
pub const NUM_REQUIRED_KEYS: usize = 81;

/// Encodes a required-edge pattern into a dense `0..81` index.
pub fn encode_required(required: RequiredEdges) -> usize {
    required
        .iter()
        .fold(0usize, |acc, r| acc * 3 + r.trit() as usize)
}

/// Decodes a dense `0..81` index back into a required-edge pattern.
pub fn decode_required(mut index: usize) -> RequiredEdges {
    let mut trits = [0u8; 4];
    for slot in trits.iter_mut().rev() {
        *slot = (index % 3) as u8;
        index /= 3;
    }
    trits.map(EdgeRequirement::from_trit)
}

/// Precomputed edge masks and candidate lists, built once from the tile
/// catalogue and held immutably for the lifetime of the search.
pub struct ConnectionIndex {
    /// `edge_mask[piece][side][orientation] = [w, n, e, s]`, each 0/1.
    edge_mask: Vec<[[[u8; 4]; NUM_ORIENTATIONS]; NUM_SIDES]>,
    /// `candidates_for[encode_required(required)]` is the ordered list of
    /// oriented tiles compatible with that pattern.
    candidates_for: Vec<Vec<OrientedTile>>,
}

impl ConnectionIndex {
    pub fn build(catalogue: &TileCatalogue) -> Self {
        let mut edge_mask = Vec::with_capacity(NUM_PIECES);
        for piece in 0..NUM_PIECES as u8 {
            let mut per_side = [[[0u8; 4]; NUM_ORIENTATIONS]; NUM_SIDES];
            for side in 0..NUM_SIDES as u8 {
                let tile_side = catalogue.side(piece, side);
                let mut base = [0u8; 4];
                for road in &tile_side.roads {
                    for &local_edge in &road.connection {
                        base[local_edge as usize] = 1;
                    }
                }
                for orientation in 0..NUM_ORIENTATIONS as u8 {
                    let mut rotated = [0u8; 4];
                    for (local_edge, &present) in base.iter().enumerate() {
                        rotated[rotate_edge(local_edge as u8, orientation) as usize] = present;
                    }
                    per_side[side as usize][orientation as usize] = rotated;
                }
            }
            edge_mask.push(per_side);
        }

        let mut candidates_for = vec![Vec::new(); NUM_REQUIRED_KEYS];
        for (key, slot) in candidates_for.iter_mut().enumerate() {
            let required = decode_required(key);
            for piece in 0..NUM_PIECES as u8 {
                for side in 0..NUM_SIDES as u8 {
                    for orientation in 0..NUM_ORIENTATIONS as u8 {
                        let mask = edge_mask[piece as usize][side as usize][orientation as usize];
                        let compatible = required
                            .iter()
                            .zip(mask.iter())
                            .all(|(req, &bit)| req.matches(bit == 1));
                        if compatible {
                            slot.push(OrientedTile::new(piece, side, orientation));
                        }
                    }
                }
            }
        }

        Self {
            edge_mask,
            candidates_for,
        }
    }

    pub fn edge_mask(&self, tile: OrientedTile) -> [u8; 4] {
        self.edge_mask[tile.piece as usize][tile.side as usize][tile.orientation as usize]
    }

    pub fn candidates_for(&self, required: RequiredEdges) -> &[OrientedTile] {
        &self.candidates_for[encode_required(required)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_key_round_trips() {
        for key in 0..NUM_REQUIRED_KEYS {
            assert_eq!(encode_required(decode_required(key)), key);
        }
    }

    #[test]
    fn no_constraint_key_admits_everything() {
        let required = [EdgeRequirement::Any; 4];
        // Any catalogue (even a degenerate one with no roads) must admit all
        // piece/side/orientation combinations under an unconstrained key.
        let raw = "[{}, {}, {}, {}, {}, {}, {}, {}, {}]";
        // Each piece needs two sides.
        let raw = raw.replace("{}", "[{}, {}]");
        let catalogue = TileCatalogue::from_str(&raw).expect("degenerate catalogue parses");
        let index = ConnectionIndex::build(&catalogue);
        assert_eq!(
            index.candidates_for(required).len(),
            NUM_PIECES * NUM_SIDES * NUM_ORIENTATIONS
        );
    }
}
