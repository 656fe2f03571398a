//! Tile and card catalogues: the read-only JSON inputs describing the game's
//! nine physical tiles and the scoring cards players draw.

use std::path::Path;

use serde::Deserialize;

use crate::board::{NUM_PIECES, NUM_SIDES};
use crate::error::{CatalogueError, TopologyError};

/// A single road segment on one side of one tile, in the tile's own
/// (unrotated) local edge numbering.
#[derive(Debug, Clone, Deserialize)]
pub struct Road {
    pub connection: [u8; 2],
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub direction: Option<u8>,
}

/// Tag naming what an item on a road represents, for the directional road
/// statistics. Any item string not recognised here is treated as untagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Agent,
    Alien,
    Hamburger,
}

impl ItemKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "agent" => Some(Self::Agent),
            "alien" => Some(Self::Alien),
            "hamburger" => Some(Self::Hamburger),
            _ => None,
        }
    }
}

/// The scalar counts and road list for one side of one tile.
#[derive(Debug, Clone, Deserialize)]
pub struct TileSide {
    #[serde(default)]
    pub roads: Vec<Road>,
    #[serde(default)]
    pub houses: u32,
    #[serde(default)]
    pub ufos: u32,
    #[serde(default)]
    pub girls: u32,
    #[serde(default)]
    pub boys: u32,
    #[serde(default)]
    pub dogs: u32,
    #[serde(default)]
    pub hamburgers: u32,
    #[serde(default)]
    pub aliens: u32,
    #[serde(default)]
    pub agents: u32,
    #[serde(default)]
    pub captured_aliens: u32,
    #[serde(default)]
    pub curves: u32,
}

/// Both faces of one physical tile.
pub type TileEntry = [TileSide; NUM_SIDES];

/// The full nine-piece tile catalogue, loaded once and held immutably for
/// the lifetime of the process.
#[derive(Debug, Clone)]
pub struct TileCatalogue {
    pieces: Vec<TileEntry>,
}

impl TileCatalogue {
    pub fn from_str(json: &str) -> Result<Self, CatalogueError> {
        let pieces: Vec<TileEntry> = serde_json::from_str(json)?;
        Self::validate(pieces)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_str(&text)
    }

    fn validate(pieces: Vec<TileEntry>) -> Result<Self, CatalogueError> {
        if pieces.len() != NUM_PIECES {
            return Err(CatalogueError::WrongPieceCount {
                expected: NUM_PIECES,
                found: pieces.len(),
            });
        }
        for (piece, entry) in pieces.iter().enumerate() {
            for (side, tile_side) in entry.iter().enumerate() {
                for road in &tile_side.roads {
                    for &index in &road.connection {
                        if index > 3 {
                            return Err(TopologyError::InvalidLocalEdge {
                                piece,
                                side,
                                index,
                            }
                            .into());
                        }
                    }
                    if let Some(direction) = road.direction {
                        if direction > 3 {
                            return Err(TopologyError::InvalidDirection {
                                piece,
                                side,
                                direction,
                            }
                            .into());
                        }
                    }
                }
            }
        }
        Ok(Self { pieces })
    }

    pub fn side(&self, piece: u8, side: u8) -> &TileSide {
        &self.pieces[piece as usize][side as usize]
    }

    pub fn pieces(&self) -> &[TileEntry] {
        &self.pieces
    }
}

/// One scoring card. Cards without a `key` never participate in scoring.
#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub number: u32,
    pub name: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub r#type: Option<CardDirection>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Whether a card rewards the maximum or minimum percentile of its statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardDirection {
    Max,
    Min,
}

impl Card {
    /// A card is scorable iff it carries both a key and a direction.
    pub fn is_scorable(&self) -> bool {
        self.key.is_some() && self.r#type.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct CardCatalogue {
    cards: Vec<Card>,
}

impl CardCatalogue {
    pub fn from_str(json: &str, known_keys: &[&str]) -> Result<Self, CatalogueError> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        for card in &cards {
            if let Some(key) = &card.key {
                if !known_keys.contains(&key.as_str()) {
                    return Err(CatalogueError::UnknownStatKey {
                        number: card.number,
                        key: key.clone(),
                    });
                }
            }
        }
        Ok(Self { cards })
    }

    pub fn from_path(path: impl AsRef<Path>, known_keys: &[&str]) -> Result<Self, CatalogueError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_str(&text, known_keys)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn scorable_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.is_scorable())
    }
}
