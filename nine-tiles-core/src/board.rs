//! The 3x3 board, oriented tiles, and the static road-node topology.

/// Board side length; the game is always played on a 3x3 grid.
pub const BOARD_SIZE: usize = 3;
/// Number of cells on the board.
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;
/// Number of distinct pieces in the catalogue.
pub const NUM_PIECES: usize = 9;
/// Number of sides per piece.
pub const NUM_SIDES: usize = 2;
/// Number of rotations per oriented tile.
pub const NUM_ORIENTATIONS: usize = 4;
/// Number of distinct global road-graph node ids.
pub const NUM_NODES: usize = 24;

/// Local edge index under a tile's own (unrotated) orientation.
pub const WEST: u8 = 0;
pub const NORTH: u8 = 1;
pub const EAST: u8 = 2;
pub const SOUTH: u8 = 3;

/// Rotates a local edge index by `orientation` quarter-turns.
pub const fn rotate_edge(local_edge: u8, orientation: u8) -> u8 {
    (local_edge + orientation) % 4
}

/// Rotates a local edge index backwards by `orientation` quarter-turns.
pub const fn unrotate_edge(local_edge: u8, orientation: u8) -> u8 {
    (local_edge + 4 - (orientation % 4)) % 4
}

/// A placed piece: which piece, which side face-up, and how many quarter-turns
/// clockwise it has been rotated from its catalogue orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrientedTile {
    pub piece: u8,
    pub side: u8,
    pub orientation: u8,
}

impl OrientedTile {
    pub const fn new(piece: u8, side: u8, orientation: u8) -> Self {
        Self {
            piece,
            side,
            orientation,
        }
    }
}

/// `TILE_NODES[position][local_edge]` gives the global road-graph node id for
/// that edge of that cell, under the cell's own (unrotated) local edge
/// numbering (W=0, N=1, E=2, S=3). Adjacent cells share the id of the edge
/// between them.
#[rustfmt::skip]
pub const TILE_NODES: [[u8; 4]; NUM_CELLS] = [
    [ 3,  0,  4,  7], [ 4,  1,  5,  8], [ 5,  2,  6,  9],
    [10,  7, 11, 14], [11,  8, 12, 15], [12,  9, 13, 16],
    [17, 14, 18, 21], [18, 15, 19, 22], [19, 16, 20, 23],
];

/// Maps a (row, column) pair to a board position `p = 3r + c`.
pub const fn row_col_to_position(row: usize, col: usize) -> usize {
    row * BOARD_SIZE + col
}

/// Maps a board position back to its (row, column) pair.
pub const fn position_to_row_col(position: usize) -> (usize, usize) {
    (position / BOARD_SIZE, position % BOARD_SIZE)
}

/// A 3x3 grid of optionally-filled cells.
#[derive(Debug, Clone)]
pub struct Board {
    cells: [Option<OrientedTile>; NUM_CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: [None; NUM_CELLS],
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, position: usize) -> Option<OrientedTile> {
        self.cells[position]
    }

    pub fn set(&mut self, position: usize, tile: OrientedTile) {
        self.cells[position] = Some(tile);
    }

    pub fn clear(&mut self, position: usize) {
        self.cells[position] = None;
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The first empty cell in grid order, if any.
    pub fn first_empty(&self) -> Option<usize> {
        self.cells.iter().position(Option::is_none)
    }

    pub fn iter_placed(&self) -> impl Iterator<Item = (usize, OrientedTile)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(p, c)| c.map(|t| (p, t)))
    }

    /// Returns the full board as nine oriented tiles, if every cell is filled.
    pub fn as_cells(&self) -> Option<[OrientedTile; NUM_CELLS]> {
        let mut out = [OrientedTile::new(0, 0, 0); NUM_CELLS];
        for (p, slot) in self.cells.iter().enumerate() {
            out[p] = (*slot)?;
        }
        Some(out)
    }

    /// The neighbour position sharing `local_edge` of `position`, if it is
    /// within the grid (i.e. not a board-border edge).
    pub fn neighbour(position: usize, local_edge: u8) -> Option<usize> {
        let (row, col) = position_to_row_col(position);
        match local_edge {
            WEST if col > 0 => Some(row_col_to_position(row, col - 1)),
            NORTH if row > 0 => Some(row_col_to_position(row - 1, col)),
            EAST if col + 1 < BOARD_SIZE => Some(row_col_to_position(row, col + 1)),
            SOUTH if row + 1 < BOARD_SIZE => Some(row_col_to_position(row + 1, col)),
            _ => None,
        }
    }

    /// The local edge of the neighbour that mirrors `local_edge` of `position`
    /// (e.g. the east edge of a cell mirrors the west edge of its east
    /// neighbour).
    pub const fn mirrored_edge(local_edge: u8) -> u8 {
        (local_edge + 2) % 4
    }
}
