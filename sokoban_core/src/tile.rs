use serde::{Deserialize, Serialize};

/// Discriminant for a tile, independent of per-tile state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Floor,
    Wall,
    Goal,
}

/// Represents a fixed cell of the maze.
///
/// Tile shape is immutable for the lifetime of a board; the only mutable
/// state is a goal's `filled` flag, which is set when a crate is pushed onto
/// it and never reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Floor,
    Wall,
    Goal { filled: bool },
}

impl Tile {
    /// A fresh, unfilled goal tile.
    pub fn goal() -> Self {
        Tile::Goal { filled: false }
    }

    pub fn kind(&self) -> TileKind {
        match self {
            Tile::Floor => TileKind::Floor,
            Tile::Wall => TileKind::Wall,
            Tile::Goal { .. } => TileKind::Goal,
        }
    }

    /// True if neither the player nor a pushed crate may enter this tile.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Tile::Wall)
    }

    /// True for a goal tile that has consumed a crate. Non-goal tiles are
    /// never filled.
    pub fn is_filled(&self) -> bool {
        matches!(self, Tile::Goal { filled: true })
    }

    /// Marks a goal tile as filled. No effect on other tile kinds, and no
    /// guard against refilling: the crate that filled a goal is deleted, so
    /// a second fill of the same tile cannot happen during play.
    pub fn fill(&mut self) {
        if let Tile::Goal { filled } = self {
            *filled = true;
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Floor
    }
}
