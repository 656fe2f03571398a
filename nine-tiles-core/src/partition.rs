//! Carves the search tree into independent seed tasks so the enumerator can
//! run across a pool of worker threads with no shared mutable state.

use crate::board::{Board, NUM_CELLS, NUM_ORIENTATIONS, NUM_PIECES, NUM_SIDES};
use crate::catalogue::TileCatalogue;
use crate::connection_index::ConnectionIndex;
use crate::enumerator::{compute_domain, tile_road_edges};
use crate::union_find::UnionFind;
use crate::OrientedTile;

/// Board positions used as seed cells: a corner, an edge midpoint, and the
/// centre are the three geometrically distinct cells of a 3x3 grid.
pub const SEED_POSITIONS: [usize; 3] = [0, 1, 4];

/// One independent unit of search: a partially filled board plus the
/// remaining-piece set and union-find state induced by that partial fill.
#[derive(Debug, Clone)]
pub struct SeedTask {
    pub board: Board,
    pub available: [bool; NUM_PIECES],
    pub uf: UnionFind,
}

fn place_if_acyclic(
    board: &Board,
    available: [bool; NUM_PIECES],
    uf: UnionFind,
    catalogue: &TileCatalogue,
    position: usize,
    tile: OrientedTile,
) -> Option<SeedTask> {
    let mut uf = uf;
    let closes_cycle = tile_road_edges(catalogue, position, tile)
        .into_iter()
        .any(|(a, b)| uf.union(a as usize, b as usize));
    if closes_cycle {
        return None;
    }
    let mut board = board.clone();
    board.set(position, tile);
    let mut available = available;
    available[tile.piece as usize] = false;
    Some(SeedTask {
        board,
        available,
        uf,
    })
}

/// Seeds the search by placing `seed_piece` into each of the three
/// geometrically distinct cells, under every side and orientation.
pub fn seed_single_piece(seed_piece: u8, catalogue: &TileCatalogue) -> Vec<SeedTask> {
    let board = Board::new();
    let available = [true; NUM_PIECES];
    let uf = UnionFind::new();

    let mut tasks = Vec::with_capacity(SEED_POSITIONS.len() * NUM_SIDES * NUM_ORIENTATIONS);
    for position in SEED_POSITIONS {
        for side in 0..NUM_SIDES as u8 {
            for orientation in 0..NUM_ORIENTATIONS as u8 {
                let tile = OrientedTile::new(seed_piece, side, orientation);
                if let Some(task) = place_if_acyclic(&board, available, uf, catalogue, position, tile) {
                    tasks.push(task);
                }
            }
        }
    }
    tasks
}

/// Further subdivides each single-piece seed task by placing a second piece
/// into every empty cell under every candidate compatible with the first
/// placement, multiplying task count and shrinking per-task work.
pub fn seed_two_pieces(
    seed_piece: u8,
    catalogue: &TileCatalogue,
    connection_index: &ConnectionIndex,
) -> Vec<SeedTask> {
    let mut tasks = Vec::new();
    for base in seed_single_piece(seed_piece, catalogue) {
        for position in 0..NUM_CELLS {
            if base.board.get(position).is_some() {
                continue;
            }
            let domain = compute_domain(&base.board, position, &base.available, connection_index);
            for tile in domain {
                if let Some(task) = place_if_acyclic(
                    &base.board,
                    base.available,
                    base.uf,
                    catalogue,
                    position,
                    tile,
                ) {
                    tasks.push(task);
                }
            }
        }
    }
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_catalogue() -> TileCatalogue {
        let raw = "[[{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}]]";
        TileCatalogue::from_str(raw).expect("valid catalogue")
    }

    #[test]
    fn single_seed_has_no_roads_to_close_cycles() {
        let catalogue = empty_catalogue();
        let tasks = seed_single_piece(0, &catalogue);
        assert_eq!(tasks.len(), SEED_POSITIONS.len() * NUM_SIDES * NUM_ORIENTATIONS);
        for task in &tasks {
            assert!(!task.available[0]);
        }
    }

    #[test]
    fn two_piece_seed_multiplies_task_count() {
        let catalogue = empty_catalogue();
        let connection_index = ConnectionIndex::build(&catalogue);
        let tasks = seed_two_pieces(0, &catalogue, &connection_index);
        // 24 single-piece seeds, each followed by 8 empty cells x 8 remaining
        // candidates (since no roads constrain anything here).
        assert_eq!(tasks.len(), 24 * 8 * (NUM_PIECES - 1) * NUM_SIDES * NUM_ORIENTATIONS);
    }
}
