//! Reconstructs the road multigraph for a completed tiling and exposes each
//! connected component as an ordered walk of edge annotations.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::board::{rotate_edge, Board, NUM_NODES, TILE_NODES};
use crate::catalogue::{ItemKind, TileCatalogue};
use crate::error::RoadGraphError;

/// One road segment: the two global nodes it connects, its optional item
/// tag, and the global node the item faces (if the catalogue gave it a
/// direction).
#[derive(Debug, Clone, Copy)]
pub struct RoadEdge {
    pub a: u8,
    pub b: u8,
    pub item: Option<ItemKind>,
    pub facing: Option<u8>,
}

/// The full set of road edges induced by a completed board.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    edges: Vec<RoadEdge>,
}

/// A connected subset of the road graph containing at least one edge.
#[derive(Debug, Clone)]
pub struct Component {
    pub nodes: Vec<u8>,
    pub edge_indices: Vec<usize>,
}

/// One edge along an ordered walk of a road component.
#[derive(Debug, Clone, Copy)]
pub struct WalkEntry {
    pub item: Option<ItemKind>,
    /// 1 if the item's facing points in the walk's direction of travel, 0 if
    /// against, -1 if the edge carries no direction.
    pub direction: i8,
}

impl RoadGraph {
    pub fn build(board: &Board, catalogue: &TileCatalogue) -> Self {
        let mut edges = Vec::new();
        for (position, tile) in board.iter_placed() {
            let side = catalogue.side(tile.piece, tile.side);
            for road in &side.roads {
                let rotated = road.connection.map(|c| rotate_edge(c, tile.orientation));
                let a = TILE_NODES[position][rotated[0] as usize];
                let b = TILE_NODES[position][rotated[1] as usize];
                let item = road.item.as_deref().and_then(ItemKind::from_tag);
                let facing = road.direction.map(|d| {
                    let rotated_direction = rotate_edge(d, tile.orientation);
                    TILE_NODES[position][rotated_direction as usize]
                });
                edges.push(RoadEdge { a, b, item, facing });
            }
        }
        Self { edges }
    }

    pub fn edges(&self) -> &[RoadEdge] {
        &self.edges
    }

    /// Every connected component containing at least one edge.
    pub fn components(&self) -> Vec<Component> {
        let mut adjacency: [Vec<(u8, usize)>; NUM_NODES] = Default::default();
        for (idx, edge) in self.edges.iter().enumerate() {
            adjacency[edge.a as usize].push((edge.b, idx));
            adjacency[edge.b as usize].push((edge.a, idx));
        }

        let mut visited = [false; NUM_NODES];
        let mut components = Vec::new();
        for start in 0..NUM_NODES {
            if visited[start] || adjacency[start].is_empty() {
                continue;
            }
            let mut nodes = Vec::new();
            let mut edge_set = HashSet::new();
            let mut queue = VecDeque::from([start as u8]);
            visited[start] = true;
            while let Some(node) = queue.pop_front() {
                nodes.push(node);
                for &(neighbour, edge_idx) in &adjacency[node as usize] {
                    edge_set.insert(edge_idx);
                    if !visited[neighbour as usize] {
                        visited[neighbour as usize] = true;
                        queue.push_back(neighbour);
                    }
                }
            }
            nodes.sort_unstable();
            let mut edge_indices: Vec<usize> = edge_set.into_iter().collect();
            edge_indices.sort_unstable();
            components.push(Component {
                nodes,
                edge_indices,
            });
        }
        components
    }

    /// Walks every edge of `component` exactly once, starting from a
    /// component-internal degree-1 node if one exists (else the
    /// smallest-id node), and returns the ordered edge annotations.
    ///
    /// Errors if the component contains a branch vertex (internal degree
    /// greater than 2): the game's tiles are expected to only ever form
    /// path-shaped road components, but a malformed catalogue could violate
    /// that, and a silently-chosen spanning path would hide the corruption.
    pub fn ordered_walk(&self, component: &Component) -> Result<Vec<WalkEntry>, RoadGraphError> {
        let mut adjacency: HashMap<u8, Vec<(u8, usize)>> = HashMap::new();
        for &edge_idx in &component.edge_indices {
            let edge = &self.edges[edge_idx];
            adjacency.entry(edge.a).or_default().push((edge.b, edge_idx));
            adjacency.entry(edge.b).or_default().push((edge.a, edge_idx));
        }

        for (&node, neighbours) in &adjacency {
            if neighbours.len() > 2 {
                return Err(RoadGraphError::BranchingRoad {
                    node,
                    degree: neighbours.len(),
                });
            }
        }

        let start = adjacency
            .iter()
            .filter(|(_, neighbours)| neighbours.len() == 1)
            .map(|(&node, _)| node)
            .min()
            .unwrap_or_else(|| *component.nodes.iter().min().expect("component has nodes"));

        let mut visited_edges = HashSet::new();
        let mut walk = Vec::with_capacity(component.edge_indices.len());
        let mut current = start;
        loop {
            let step = adjacency[&current]
                .iter()
                .find(|(_, edge_idx)| !visited_edges.contains(edge_idx))
                .copied();
            let Some((next_node, edge_idx)) = step else {
                break;
            };
            visited_edges.insert(edge_idx);
            let edge = &self.edges[edge_idx];
            let direction = match edge.facing {
                Some(face) if face == next_node => 1,
                Some(face) if face == current => 0,
                _ => -1,
            };
            walk.push(WalkEntry {
                item: edge.item,
                direction,
            });
            current = next_node;
        }
        Ok(walk)
    }
}
