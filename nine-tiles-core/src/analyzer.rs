//! Computes the full statistic record for one completed tiling: simple
//! aggregates, road-graph reconstruction, directional road statistics,
//! adjacency components, and compound statistics.

use std::collections::VecDeque;

use crate::board::{position_to_row_col, row_col_to_position, Board, BOARD_SIZE, NUM_CELLS};
use crate::catalogue::{ItemKind, TileCatalogue};
use crate::error::RoadGraphError;
use crate::record::StatRecord;
use crate::road_graph::{RoadGraph, WalkEntry};

/// Narrows a `u32` accumulator into a `u8`, saturating rather than
/// panicking. Every accumulator here is bounded by the tile catalogue's
/// fixed nine-tile, four-rotation shape and never approaches `u8::MAX` in
/// practice; saturation is a defensive backstop, not an expected path.
fn narrow_u8(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

fn narrow_u16(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

pub fn analyze(board: &Board, catalogue: &TileCatalogue) -> Result<StatRecord, RoadGraphError> {
    let mut stats = StatRecord::default();

    let mut dogs_positive = [false; NUM_CELLS];
    let mut houses_positive = [false; NUM_CELLS];
    let mut citizens_positive = [false; NUM_CELLS];
    let mut safe_positive = [false; NUM_CELLS];
    let mut aliens_positive = [false; NUM_CELLS];

    let (
        mut houses,
        mut ufos,
        mut girls,
        mut boys,
        mut dogs,
        mut hamburgers,
        mut aliens,
        mut agents,
        mut captured_aliens,
        mut curves,
        mut tiles_without_roads,
    ) = (0u32, 0u32, 0u32, 0u32, 0u32, 0u32, 0u32, 0u32, 0u32, 0u32, 0u32);

    for position in 0..NUM_CELLS {
        let tile = board
            .get(position)
            .expect("analyzer is only called on completed tilings");
        let side = catalogue.side(tile.piece, tile.side);

        houses += side.houses;
        ufos += side.ufos;
        girls += side.girls;
        boys += side.boys;
        dogs += side.dogs;
        hamburgers += side.hamburgers;
        aliens += side.aliens;
        agents += side.agents;
        captured_aliens += side.captured_aliens;
        curves += side.curves;
        if side.roads.is_empty() {
            tiles_without_roads += 1;
        }

        dogs_positive[position] = side.dogs > 0;
        houses_positive[position] = side.houses > 0;
        citizens_positive[position] = side.boys + side.girls > 0;
        safe_positive[position] = side.aliens == 0;
        aliens_positive[position] = side.aliens > 0;
    }

    stats.total_houses = narrow_u8(houses);
    stats.total_ufos = narrow_u8(ufos);
    stats.total_girls = narrow_u8(girls);
    stats.total_boys = narrow_u8(boys);
    stats.total_dogs = narrow_u8(dogs);
    stats.total_hamburgers = narrow_u8(hamburgers);
    stats.total_aliens = narrow_u8(aliens);
    stats.total_agents = narrow_u8(agents);
    stats.total_curves = narrow_u8(curves);
    stats.total_tiles_without_roads = narrow_u8(tiles_without_roads);

    stats.largest_dog_group = largest_component(dogs_positive);
    stats.largest_house_group = largest_component(houses_positive);
    stats.largest_citizen_group = largest_component(citizens_positive);
    stats.largest_safe_zone_size = largest_component(safe_positive);
    stats.largest_alien_group = largest_component(aliens_positive);

    let graph = RoadGraph::build(board, catalogue);
    let components = graph.components();

    stats.total_roads = narrow_u8(components.len() as u32);

    let mut lengths: Vec<usize> = Vec::with_capacity(components.len());
    let mut total_aliens_caught = 0u32;
    let mut total_food_chain_sets = 0u32;
    let mut max_aliens_between_two_agents = 0u32;
    let mut max_hamburgers_in_front_of_alien = 0u32;
    let mut max_aliens_running_towards_agent = 0u32;
    let mut max_agents_on_one_road = 0u32;
    let mut max_aliens_on_one_road = 0u32;

    for component in &components {
        let walk = graph.ordered_walk(component)?;
        lengths.push(walk.len());

        let road = analyze_road(&walk);
        total_aliens_caught += road.aliens_caught;
        total_food_chain_sets += road.food_chain_sets;
        max_aliens_between_two_agents = max_aliens_between_two_agents.max(road.max_aliens_between_two_agents);
        max_hamburgers_in_front_of_alien =
            max_hamburgers_in_front_of_alien.max(road.max_hamburgers_in_front_of_alien);
        max_aliens_running_towards_agent =
            max_aliens_running_towards_agent.max(road.max_aliens_running_towards_agent);
        max_agents_on_one_road = max_agents_on_one_road.max(road.num_agents);
        max_aliens_on_one_road = max_aliens_on_one_road.max(road.num_aliens);
    }

    stats.longest_road_size = narrow_u8(lengths.iter().copied().max().unwrap_or(0) as u32);
    stats.max_roads_of_same_length = narrow_u8(most_common_frequency(&lengths));

    stats.total_aliens_caught = narrow_u8(total_aliens_caught);
    stats.total_food_chain_sets = narrow_u8(total_food_chain_sets);
    stats.max_aliens_between_two_agents = narrow_u8(max_aliens_between_two_agents);
    stats.max_hamburgers_in_front_of_alien = narrow_u8(max_hamburgers_in_front_of_alien);
    stats.max_aliens_running_towards_agent = narrow_u8(max_aliens_running_towards_agent);
    stats.max_agents_on_one_road = narrow_u8(max_agents_on_one_road);
    stats.max_aliens_on_one_road = narrow_u8(max_aliens_on_one_road);

    // Side-effect contract: total_captured_aliens folds in the aliens caught
    // during analysis, not just the catalogue's static count.
    stats.total_captured_aliens = narrow_u8(captured_aliens + total_aliens_caught);

    let aliens_free = aliens.saturating_sub(u32::from(stats.total_captured_aliens));
    stats.aliens_times_ufos = narrow_u16(aliens_free * ufos);
    stats.aliens_times_hamburgers = narrow_u16(aliens_free * hamburgers);
    stats.citizen_dog_pairs = narrow_u8((boys + girls).min(dogs));

    Ok(stats)
}

fn most_common_frequency(lengths: &[usize]) -> u32 {
    let mut counts: std::collections::HashMap<usize, u32> = std::collections::HashMap::new();
    for &len in lengths {
        *counts.entry(len).or_insert(0) += 1;
    }
    counts.values().copied().max().unwrap_or(0)
}

fn largest_component(property: [bool; NUM_CELLS]) -> u8 {
    let mut visited = [false; NUM_CELLS];
    let mut best = 0u32;
    for start in 0..NUM_CELLS {
        if visited[start] || !property[start] {
            continue;
        }
        let mut size = 0u32;
        let mut queue = VecDeque::from([start]);
        visited[start] = true;
        while let Some(position) = queue.pop_front() {
            size += 1;
            let (row, col) = position_to_row_col(position);
            for (dr, dc) in [(-1i32, 0i32), (1, 0), (0, -1), (0, 1)] {
                let nr = row as i32 + dr;
                let nc = col as i32 + dc;
                if nr < 0 || nc < 0 || nr >= BOARD_SIZE as i32 || nc >= BOARD_SIZE as i32 {
                    continue;
                }
                let neighbour = row_col_to_position(nr as usize, nc as usize);
                if !visited[neighbour] && property[neighbour] {
                    visited[neighbour] = true;
                    queue.push_back(neighbour);
                }
            }
        }
        best = best.max(size);
    }
    narrow_u8(best).into()
}

struct RoadStats {
    num_agents: u32,
    num_aliens: u32,
    aliens_caught: u32,
    max_aliens_between_two_agents: u32,
    max_hamburgers_in_front_of_alien: u32,
    max_aliens_running_towards_agent: u32,
    food_chain_sets: u32,
}

fn analyze_road(walk: &[WalkEntry]) -> RoadStats {
    let agents: Vec<(usize, i8)> = walk
        .iter()
        .enumerate()
        .filter(|(_, e)| e.item == Some(ItemKind::Agent))
        .map(|(i, e)| (i, e.direction))
        .collect();
    let aliens: Vec<(usize, i8)> = walk
        .iter()
        .enumerate()
        .filter(|(_, e)| e.item == Some(ItemKind::Alien))
        .map(|(i, e)| (i, e.direction))
        .collect();

    let mut caught = vec![false; aliens.len()];
    let mut aliens_caught = 0u32;
    for &(agent_idx, agent_dir) in &agents {
        let catch = match agent_dir {
            1 => aliens
                .iter()
                .enumerate()
                .filter(|(ai, (idx, _))| !caught[*ai] && *idx > agent_idx)
                .min_by_key(|(_, (idx, _))| *idx),
            0 => aliens
                .iter()
                .enumerate()
                .filter(|(ai, (idx, _))| !caught[*ai] && *idx < agent_idx)
                .max_by_key(|(_, (idx, _))| *idx),
            _ => None,
        };
        if let Some((ai, _)) = catch {
            caught[ai] = true;
            aliens_caught += 1;
        }
    }

    let mut running_dir1 = 0u32;
    let mut running_dir0 = 0u32;
    for (ai, &(alien_idx, alien_dir)) in aliens.iter().enumerate() {
        if caught[ai] {
            continue;
        }
        match alien_dir {
            1 if agents.iter().any(|&(idx, _)| idx > alien_idx) => running_dir1 += 1,
            0 if agents.iter().any(|&(idx, _)| idx < alien_idx) => running_dir0 += 1,
            _ => {}
        }
    }
    let max_aliens_running_towards_agent = running_dir1.max(running_dir0);

    let mut max_hamburgers_in_front_of_alien = 0u32;
    for (ai, &(alien_idx, alien_dir)) in aliens.iter().enumerate() {
        if caught[ai] {
            continue;
        }
        let count = hamburgers_ahead(walk, &aliens, &caught, alien_idx, alien_dir);
        max_hamburgers_in_front_of_alien = max_hamburgers_in_front_of_alien.max(count);
    }

    let mut max_aliens_between_two_agents = 0u32;
    for &(agent_idx, agent_dir) in &agents {
        let value = aliens_between(walk, agent_idx, agent_dir);
        max_aliens_between_two_agents = max_aliens_between_two_agents.max(value);
    }

    RoadStats {
        num_agents: narrow_u8(agents.len() as u32).into(),
        num_aliens: narrow_u8(aliens.len() as u32).into(),
        aliens_caught,
        max_aliens_between_two_agents,
        max_hamburgers_in_front_of_alien,
        max_aliens_running_towards_agent,
        food_chain_sets: food_chain_sets(walk),
    }
}

fn hamburgers_ahead(
    walk: &[WalkEntry],
    aliens: &[(usize, i8)],
    caught: &[bool],
    alien_idx: usize,
    dir: i8,
) -> u32 {
    let mut count = 0u32;
    let is_blocking_alien = |idx: usize| -> bool {
        aliens
            .iter()
            .position(|&(oi, _)| oi == idx)
            .is_some_and(|ai| !caught[ai] && aliens[ai].1 == dir)
    };
    match dir {
        1 => {
            for idx in (alien_idx + 1)..walk.len() {
                match walk[idx].item {
                    Some(ItemKind::Alien) if is_blocking_alien(idx) => break,
                    Some(ItemKind::Hamburger) => count += 1,
                    _ => {}
                }
            }
        }
        0 => {
            for idx in (0..alien_idx).rev() {
                match walk[idx].item {
                    Some(ItemKind::Alien) if is_blocking_alien(idx) => break,
                    Some(ItemKind::Hamburger) => count += 1,
                    _ => {}
                }
            }
        }
        _ => {}
    }
    count
}

fn aliens_between(walk: &[WalkEntry], agent_idx: usize, dir: i8) -> u32 {
    let mut count = 0u32;
    let mut blocked_by_same_direction_agent = false;
    match dir {
        1 => {
            for idx in (agent_idx + 1)..walk.len() {
                match walk[idx].item {
                    Some(ItemKind::Agent) => {
                        blocked_by_same_direction_agent = walk[idx].direction == dir;
                        break;
                    }
                    Some(ItemKind::Alien) => count += 1,
                    _ => {}
                }
            }
        }
        0 => {
            for idx in (0..agent_idx).rev() {
                match walk[idx].item {
                    Some(ItemKind::Agent) => {
                        blocked_by_same_direction_agent = walk[idx].direction == dir;
                        break;
                    }
                    Some(ItemKind::Alien) => count += 1,
                    _ => {}
                }
            }
        }
        _ => return 0,
    }
    if blocked_by_same_direction_agent {
        0
    } else {
        count
    }
}

/// Non-overlapping `(agent, alien, hamburger)` matches in road order, plus
/// reverse-direction matches over whatever edges the forward pass left
/// unconsumed.
fn food_chain_sets(walk: &[WalkEntry]) -> u32 {
    let filtered: Vec<ItemKind> = walk.iter().filter_map(|e| e.item).collect();
    let mut consumed = vec![false; filtered.len()];
    let forward = greedy_chain_match(&filtered, &mut consumed, false);
    let reverse = greedy_chain_match(&filtered, &mut consumed, true);
    forward + reverse
}

fn greedy_chain_match(filtered: &[ItemKind], consumed: &mut [bool], reverse: bool) -> u32 {
    let order: Vec<usize> = if reverse {
        (0..filtered.len()).rev().filter(|&i| !consumed[i]).collect()
    } else {
        (0..filtered.len()).filter(|&i| !consumed[i]).collect()
    };

    let sequence = [ItemKind::Agent, ItemKind::Alien, ItemKind::Hamburger];
    let mut state = 0usize;
    let mut pending = Vec::new();
    let mut count = 0u32;
    for i in order {
        if filtered[i] == sequence[state] {
            pending.push(i);
            state += 1;
            if state == sequence.len() {
                for &p in &pending {
                    consumed[p] = true;
                }
                pending.clear();
                state = 0;
                count += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::OrientedTile;

    fn all_empty_catalogue() -> TileCatalogue {
        let raw = "[[{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}]]";
        TileCatalogue::from_str(raw).expect("valid catalogue")
    }

    fn full_board() -> Board {
        let mut board = Board::new();
        for p in 0..NUM_CELLS {
            board.set(p, OrientedTile::new(p as u8, 0, 0));
        }
        board
    }

    #[test]
    fn empty_roads_yield_zero_road_stats() {
        let catalogue = all_empty_catalogue();
        let board = full_board();
        let stats = analyze(&board, &catalogue).expect("no branch vertices");
        assert_eq!(stats.total_roads, 0);
        assert_eq!(stats.longest_road_size, 0);
    }

    #[test]
    fn agent_catches_alien_ahead() {
        let raw = r#"[
            [{"roads":[{"connection":[0,2],"item":"agent","direction":2}]}, {}],
            [{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}]
        ]"#;
        let catalogue = TileCatalogue::from_str(raw).expect("valid catalogue");
        // Piece 1 carries a west-east road with an alien facing west (towards piece 0).
        let raw2 = r#"[
            [{"roads":[{"connection":[0,2],"item":"agent","direction":2}]}, {}],
            [{"roads":[{"connection":[0,2],"item":"alien","direction":0}]}, {}],
            [{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}], [{}, {}]
        ]"#;
        let catalogue2 = TileCatalogue::from_str(raw2).expect("valid catalogue");
        let mut board = Board::new();
        board.set(0, OrientedTile::new(0, 0, 0));
        board.set(1, OrientedTile::new(1, 0, 0));
        for p in 2..9 {
            board.set(p, OrientedTile::new(p as u8, 0, 0));
        }
        let stats = analyze(&board, &catalogue2).expect("no branch vertices");
        assert_eq!(stats.total_roads, 1);
        assert_eq!(stats.total_aliens_caught, 1);
        let _ = catalogue;
    }
}
