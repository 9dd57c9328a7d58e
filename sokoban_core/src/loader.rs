use std::collections::HashMap;
use std::path::Path;

use crate::{
    Position,
    board::Board,
    entity::{Entity, Player, PotionKind},
    grid::Grid,
    tile::Tile,
};

const WALL: char = 'W';
const GOAL: char = 'G';
const FLOOR: char = ' ';
const PLAYER: char = 'P';
const STRENGTH_POTION: char = 'S';
const MOVE_POTION: char = 'M';
const FANCY_POTION: char = 'F';

/// Represents errors that can occur while decoding a maze definition.
#[derive(Debug, thiserror::Error)]
pub enum MazeError {
    #[error("Failed to read maze file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Maze definition is empty")]
    Empty,
    #[error("Missing or malformed stats line (expected '<strength> <moves>', found {0:?})")]
    InvalidStats(String),
    #[error("Inconsistent width at row {row}: expected {expected}, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unknown maze symbol {symbol:?} at position ({row}, {col})")]
    UnknownSymbol {
        symbol: char,
        row: usize,
        col: usize,
    },
    #[error("No player marker ('P') found in maze")]
    MissingPlayer,
    #[error("Multiple player markers ('P') found in maze")]
    DuplicatePlayer,
}

/// Loads a board from a maze definition string.
///
/// The first non-empty line holds the player's starting resources as
/// `<strength> <moves>`; every following line is one row of the maze. Row
/// symbols: `W` wall, `G` goal, space floor, `P` the player start (exactly
/// one, stands on floor), `S`/`M`/`F` the potions, and any digit a crate
/// with that strength requirement.
pub fn load_board(source: &str) -> Result<Board, MazeError> {
    let mut lines = source.lines();

    let stats_line = lines
        .by_ref()
        .find(|line| !line.trim().is_empty())
        .ok_or(MazeError::Empty)?;
    let player = parse_stats(stats_line)?;

    // Blank boundary lines around the maze block are ignored; interior
    // whitespace is significant (spaces are floor).
    let rows: Vec<&str> = lines.collect();
    let first = rows.iter().position(|line| !line.trim().is_empty());
    let last = rows.iter().rposition(|line| !line.trim().is_empty());
    let rows: Vec<&str> = match (first, last) {
        (Some(first), Some(last)) => rows[first..=last].to_vec(),
        _ => return Err(MazeError::Empty),
    };

    let cols = rows[0].chars().count();
    let mut maze: Grid<Tile> = Grid::new(rows.len(), cols);
    let mut entities: HashMap<Position, Entity> = HashMap::new();
    let mut player_position: Option<Position> = None;

    for (row, line) in rows.iter().enumerate() {
        let found = line.chars().count();
        if found != cols {
            return Err(MazeError::RaggedRow {
                row,
                expected: cols,
                found,
            });
        }

        for (col, symbol) in line.chars().enumerate() {
            let pos = Position::new(row, col);
            let (tile, entity) = match symbol {
                WALL => (Tile::Wall, None),
                GOAL => (Tile::goal(), None),
                FLOOR => (Tile::Floor, None),
                PLAYER => {
                    if player_position.is_some() {
                        return Err(MazeError::DuplicatePlayer);
                    }
                    player_position = Some(pos);
                    (Tile::Floor, None)
                }
                STRENGTH_POTION => (Tile::Floor, Some(Entity::Potion(PotionKind::Strength))),
                MOVE_POTION => (Tile::Floor, Some(Entity::Potion(PotionKind::Move))),
                FANCY_POTION => (Tile::Floor, Some(Entity::Potion(PotionKind::Fancy))),
                // Any other symbol is a crate tagged with its strength.
                other => match other.to_digit(10) {
                    Some(strength) => (Tile::Floor, Some(Entity::Crate { strength })),
                    None => {
                        return Err(MazeError::UnknownSymbol {
                            symbol: other,
                            row,
                            col,
                        });
                    }
                },
            };

            maze[pos] = tile;
            if let Some(entity) = entity {
                entities.insert(pos, entity);
            }
        }
    }

    let player_position = player_position.ok_or(MazeError::MissingPlayer)?;
    Ok(Board::new(maze, entities, player_position, player))
}

/// Loads a board from a maze file on disk. The path is always explicit;
/// there is no baked-in default maze.
pub fn load_board_from_file(path: impl AsRef<Path>) -> Result<Board, MazeError> {
    let source = std::fs::read_to_string(path)?;
    load_board(&source)
}

fn parse_stats(line: &str) -> Result<Player, MazeError> {
    let mut fields = line.split_whitespace();
    let strength = fields.next().and_then(|s| s.parse().ok());
    let moves = fields.next().and_then(|s| s.parse().ok());
    match (strength, moves, fields.next()) {
        (Some(strength), Some(moves), None) => Ok(Player::new(strength, moves)),
        _ => Err(MazeError::InvalidStats(line.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileKind;

    const MAZE: &str = "\
2 12
WWWWW
WP1GW
W SMW
WWWWW
";

    #[test]
    fn decodes_tiles_entities_and_player() {
        let board = load_board(MAZE).unwrap();
        assert_eq!(board.maze().rows(), 4);
        assert_eq!(board.maze().cols(), 5);
        assert_eq!(board.player_position(), Position::new(1, 1));
        assert_eq!(board.player_strength(), 2);
        assert_eq!(board.player_moves_remaining(), 12);

        assert_eq!(board.maze()[Position::new(0, 0)].kind(), TileKind::Wall);
        assert_eq!(board.maze()[Position::new(1, 3)].kind(), TileKind::Goal);
        // The player marker decodes to floor under the player.
        assert_eq!(board.maze()[Position::new(1, 1)].kind(), TileKind::Floor);

        assert_eq!(
            board.entities().get(&Position::new(1, 2)),
            Some(&Entity::Crate { strength: 1 })
        );
        assert_eq!(
            board.entities().get(&Position::new(2, 2)),
            Some(&Entity::Potion(PotionKind::Strength))
        );
        assert_eq!(
            board.entities().get(&Position::new(2, 3)),
            Some(&Entity::Potion(PotionKind::Move))
        );
        assert_eq!(board.entities().len(), 3);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(load_board(""), Err(MazeError::Empty)));
        assert!(matches!(load_board("1 5\n\n\n"), Err(MazeError::Empty)));
    }

    #[test]
    fn malformed_stats_are_rejected() {
        assert!(matches!(
            load_board("strong 5\nP\n"),
            Err(MazeError::InvalidStats(_))
        ));
        assert!(matches!(
            load_board("1 5 9\nP\n"),
            Err(MazeError::InvalidStats(_))
        ));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let result = load_board("1 5\nWWW\nWW\n");
        assert!(matches!(
            result,
            Err(MazeError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2,
            })
        ));
    }

    #[test]
    fn unknown_symbols_are_rejected() {
        let result = load_board("1 5\nWPxW\n");
        assert!(matches!(
            result,
            Err(MazeError::UnknownSymbol {
                symbol: 'x',
                row: 0,
                col: 2,
            })
        ));
    }

    #[test]
    fn player_marker_must_be_unique() {
        assert!(matches!(
            load_board("1 5\nW W\n"),
            Err(MazeError::MissingPlayer)
        ));
        assert!(matches!(
            load_board("1 5\nWPPW\n"),
            Err(MazeError::DuplicatePlayer)
        ));
    }
}
