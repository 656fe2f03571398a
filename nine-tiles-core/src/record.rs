//! The flat statistic record produced by the analyzer for one tiling, and
//! its packed on-disk byte layout.

use zerocopy::{LE, U16};
use zerocopy_derive::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::board::{OrientedTile, NUM_CELLS};

/// All derived statistics for one completed tiling. Fields that can exceed
/// 255 (the two multiplicative compound stats) are `u16`; everything else
/// comfortably fits in `u8` given nine tiles' worth of per-tile maxima.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatRecord {
    pub total_houses: u8,
    pub total_ufos: u8,
    pub total_girls: u8,
    pub total_boys: u8,
    pub total_dogs: u8,
    pub total_hamburgers: u8,
    pub total_aliens: u8,
    pub total_agents: u8,
    pub total_captured_aliens: u8,
    pub total_curves: u8,
    pub total_tiles_without_roads: u8,

    pub total_roads: u8,
    pub longest_road_size: u8,
    pub max_roads_of_same_length: u8,

    pub total_aliens_caught: u8,
    pub total_food_chain_sets: u8,
    pub max_aliens_between_two_agents: u8,
    pub max_hamburgers_in_front_of_alien: u8,
    pub max_aliens_running_towards_agent: u8,
    pub max_agents_on_one_road: u8,
    pub max_aliens_on_one_road: u8,

    pub largest_dog_group: u8,
    pub largest_house_group: u8,
    pub largest_citizen_group: u8,
    pub largest_safe_zone_size: u8,
    pub largest_alien_group: u8,

    pub aliens_times_ufos: u16,
    pub aliens_times_hamburgers: u16,
    pub citizen_dog_pairs: u8,
}

impl StatRecord {
    /// Canonical statistic column names, in declaration order. Card keys
    /// are validated against this list.
    pub const FIELDS: &'static [&'static str] = &[
        "total_houses",
        "total_ufos",
        "total_girls",
        "total_boys",
        "total_dogs",
        "total_hamburgers",
        "total_aliens",
        "total_agents",
        "total_captured_aliens",
        "total_curves",
        "total_tiles_without_roads",
        "total_roads",
        "longest_road_size",
        "max_roads_of_same_length",
        "total_aliens_caught",
        "total_food_chain_sets",
        "max_aliens_between_two_agents",
        "max_hamburgers_in_front_of_alien",
        "max_aliens_running_towards_agent",
        "max_agents_on_one_road",
        "max_aliens_on_one_road",
        "largest_dog_group",
        "largest_house_group",
        "largest_citizen_group",
        "largest_safe_zone_size",
        "largest_alien_group",
        "aliens_times_ufos",
        "aliens_times_hamburgers",
        "citizen_dog_pairs",
    ];

    /// Looks up a statistic by its canonical column name, as used by card
    /// keys. Returns `None` for an unrecognised key.
    pub fn get(&self, key: &str) -> Option<u32> {
        Some(match key {
            "total_houses" => self.total_houses.into(),
            "total_ufos" => self.total_ufos.into(),
            "total_girls" => self.total_girls.into(),
            "total_boys" => self.total_boys.into(),
            "total_dogs" => self.total_dogs.into(),
            "total_hamburgers" => self.total_hamburgers.into(),
            "total_aliens" => self.total_aliens.into(),
            "total_agents" => self.total_agents.into(),
            "total_captured_aliens" => self.total_captured_aliens.into(),
            "total_curves" => self.total_curves.into(),
            "total_tiles_without_roads" => self.total_tiles_without_roads.into(),
            "total_roads" => self.total_roads.into(),
            "longest_road_size" => self.longest_road_size.into(),
            "max_roads_of_same_length" => self.max_roads_of_same_length.into(),
            "total_aliens_caught" => self.total_aliens_caught.into(),
            "total_food_chain_sets" => self.total_food_chain_sets.into(),
            "max_aliens_between_two_agents" => self.max_aliens_between_two_agents.into(),
            "max_hamburgers_in_front_of_alien" => self.max_hamburgers_in_front_of_alien.into(),
            "max_aliens_running_towards_agent" => self.max_aliens_running_towards_agent.into(),
            "max_agents_on_one_road" => self.max_agents_on_one_road.into(),
            "max_aliens_on_one_road" => self.max_aliens_on_one_road.into(),
            "largest_dog_group" => self.largest_dog_group.into(),
            "largest_house_group" => self.largest_house_group.into(),
            "largest_citizen_group" => self.largest_citizen_group.into(),
            "largest_safe_zone_size" => self.largest_safe_zone_size.into(),
            "largest_alien_group" => self.largest_alien_group.into(),
            "aliens_times_ufos" => self.aliens_times_ufos.into(),
            "aliens_times_hamburgers" => self.aliens_times_hamburgers.into(),
            "citizen_dog_pairs" => self.citizen_dog_pairs.into(),
            _ => return None,
        })
    }
}

/// One packed layout cell: piece, side, and orientation, each an 8-bit
/// unsigned integer as the external columnar format specifies.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PackedCell {
    pub piece: u8,
    pub side: u8,
    pub orientation: u8,
}

impl From<OrientedTile> for PackedCell {
    fn from(tile: OrientedTile) -> Self {
        Self {
            piece: tile.piece,
            side: tile.side,
            orientation: tile.orientation,
        }
    }
}

impl From<PackedCell> for OrientedTile {
    fn from(cell: PackedCell) -> Self {
        OrientedTile::new(cell.piece, cell.side, cell.orientation)
    }
}

/// The on-disk byte layout of one emitted tiling: 27 layout bytes followed
/// by the statistic columns, matching the external columnar format exactly
/// so rows can be read back with a plain `FromBytes::ref_from_bytes`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct PackedRow {
    pub cells: [PackedCell; NUM_CELLS],

    pub total_houses: u8,
    pub total_ufos: u8,
    pub total_girls: u8,
    pub total_boys: u8,
    pub total_dogs: u8,
    pub total_hamburgers: u8,
    pub total_aliens: u8,
    pub total_agents: u8,
    pub total_captured_aliens: u8,
    pub total_curves: u8,
    pub total_tiles_without_roads: u8,

    pub total_roads: u8,
    pub longest_road_size: u8,
    pub max_roads_of_same_length: u8,

    pub total_aliens_caught: u8,
    pub total_food_chain_sets: u8,
    pub max_aliens_between_two_agents: u8,
    pub max_hamburgers_in_front_of_alien: u8,
    pub max_aliens_running_towards_agent: u8,
    pub max_agents_on_one_road: u8,
    pub max_aliens_on_one_road: u8,

    pub largest_dog_group: u8,
    pub largest_house_group: u8,
    pub largest_citizen_group: u8,
    pub largest_safe_zone_size: u8,
    pub largest_alien_group: u8,

    pub aliens_times_ufos: U16<LE>,
    pub aliens_times_hamburgers: U16<LE>,
    pub citizen_dog_pairs: u8,
}

impl PackedRow {
    pub fn new(cells: [OrientedTile; NUM_CELLS], stats: StatRecord) -> Self {
        Self {
            cells: cells.map(PackedCell::from),
            total_houses: stats.total_houses,
            total_ufos: stats.total_ufos,
            total_girls: stats.total_girls,
            total_boys: stats.total_boys,
            total_dogs: stats.total_dogs,
            total_hamburgers: stats.total_hamburgers,
            total_aliens: stats.total_aliens,
            total_agents: stats.total_agents,
            total_captured_aliens: stats.total_captured_aliens,
            total_curves: stats.total_curves,
            total_tiles_without_roads: stats.total_tiles_without_roads,
            total_roads: stats.total_roads,
            longest_road_size: stats.longest_road_size,
            max_roads_of_same_length: stats.max_roads_of_same_length,
            total_aliens_caught: stats.total_aliens_caught,
            total_food_chain_sets: stats.total_food_chain_sets,
            max_aliens_between_two_agents: stats.max_aliens_between_two_agents,
            max_hamburgers_in_front_of_alien: stats.max_hamburgers_in_front_of_alien,
            max_aliens_running_towards_agent: stats.max_aliens_running_towards_agent,
            max_agents_on_one_road: stats.max_agents_on_one_road,
            max_aliens_on_one_road: stats.max_aliens_on_one_road,
            largest_dog_group: stats.largest_dog_group,
            largest_house_group: stats.largest_house_group,
            largest_citizen_group: stats.largest_citizen_group,
            largest_safe_zone_size: stats.largest_safe_zone_size,
            largest_alien_group: stats.largest_alien_group,
            aliens_times_ufos: bit_twiddling_helpers::conv_u16le::from_inner(stats.aliens_times_ufos),
            aliens_times_hamburgers: bit_twiddling_helpers::conv_u16le::from_inner(
                stats.aliens_times_hamburgers,
            ),
            citizen_dog_pairs: stats.citizen_dog_pairs,
        }
    }

    pub fn cells(&self) -> [OrientedTile; NUM_CELLS] {
        self.cells.map(OrientedTile::from)
    }

    pub fn stats(&self) -> StatRecord {
        StatRecord {
            total_houses: self.total_houses,
            total_ufos: self.total_ufos,
            total_girls: self.total_girls,
            total_boys: self.total_boys,
            total_dogs: self.total_dogs,
            total_hamburgers: self.total_hamburgers,
            total_aliens: self.total_aliens,
            total_agents: self.total_agents,
            total_captured_aliens: self.total_captured_aliens,
            total_curves: self.total_curves,
            total_tiles_without_roads: self.total_tiles_without_roads,
            total_roads: self.total_roads,
            longest_road_size: self.longest_road_size,
            max_roads_of_same_length: self.max_roads_of_same_length,
            total_aliens_caught: self.total_aliens_caught,
            total_food_chain_sets: self.total_food_chain_sets,
            max_aliens_between_two_agents: self.max_aliens_between_two_agents,
            max_hamburgers_in_front_of_alien: self.max_hamburgers_in_front_of_alien,
            max_aliens_running_towards_agent: self.max_aliens_running_towards_agent,
            max_agents_on_one_road: self.max_agents_on_one_road,
            max_aliens_on_one_road: self.max_aliens_on_one_road,
            largest_dog_group: self.largest_dog_group,
            largest_house_group: self.largest_house_group,
            largest_citizen_group: self.largest_citizen_group,
            largest_safe_zone_size: self.largest_safe_zone_size,
            largest_alien_group: self.largest_alien_group,
            aliens_times_ufos: bit_twiddling_helpers::conv_u16le::into_inner(self.aliens_times_ufos),
            aliens_times_hamburgers: bit_twiddling_helpers::conv_u16le::into_inner(
                self.aliens_times_hamburgers,
            ),
            citizen_dog_pairs: self.citizen_dog_pairs,
        }
    }
}
