use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod board;
pub mod entity;
pub mod grid;
pub mod loader;
pub mod tile;

/// Represents a 2D coordinate (row-major, matching maze file layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Applies a (row, col) delta, returning `None` if either coordinate
    /// would go negative. Overshooting the grid on the positive side is
    /// caught later by the grid lookup itself.
    pub fn offset(self, delta: (isize, isize)) -> Option<Position> {
        let row = self.row.checked_add_signed(delta.0)?;
        let col = self.col.checked_add_signed(delta.1)?;
        Some(Position { row, col })
    }
}

/// The four directions a move attempt can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the (row, col) delta for one step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Error returned when a textual direction token is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognised direction token: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Parses the driver's textual tokens: `w`/`a`/`s`/`d` or the full
    /// direction words, case-insensitive. Anything else is rejected, which
    /// keeps invalid input out of the move engine entirely.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" | "up" => Ok(Direction::Up),
            "s" | "down" => Ok(Direction::Down),
            "a" | "left" => Ok(Direction::Left),
            "d" | "right" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_rejects_negative_coordinates() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.offset((-1, 0)), None);
        assert_eq!(origin.offset((0, -1)), None);
        assert_eq!(origin.offset((1, 1)), Some(Position::new(1, 1)));
    }

    #[test]
    fn direction_tokens_parse() {
        assert_eq!("w".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("RIGHT".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!(" down ".parse::<Direction>(), Ok(Direction::Down));
        assert!("q".parse::<Direction>().is_err());
        assert!("upwards".parse::<Direction>().is_err());
    }

    #[test]
    fn deltas_are_unit_steps() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let (dr, dc) = dir.delta();
            assert_eq!(dr.abs() + dc.abs(), 1);
        }
    }
}
