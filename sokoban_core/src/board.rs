use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    Direction, Position,
    entity::{Entity, Player},
    grid::Grid,
    tile::Tile,
};

/// Manages the full game state: the tile maze, the entity map, and the
/// player singleton.
///
/// Constructed once from parsed maze data and mutated in place by
/// [`Board::attempt_move`], the only mutator. Invariants held across every
/// mutation: at most one entity per position, the player never shares a
/// position with an entity, and the player always stands on a non-blocking
/// tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    maze: Grid<Tile>,
    entities: HashMap<Position, Entity>,
    player_position: Position,
    player: Player,
}

impl Board {
    pub fn new(
        maze: Grid<Tile>,
        entities: HashMap<Position, Entity>,
        player_position: Position,
        player: Player,
    ) -> Self {
        Board {
            maze,
            entities,
            player_position,
            player,
        }
    }

    /// Returns the current state of the maze.
    pub fn maze(&self) -> &Grid<Tile> {
        &self.maze
    }

    /// Returns the entities currently present in the maze.
    pub fn entities(&self) -> &HashMap<Position, Entity> {
        &self.entities
    }

    /// Returns the player's current position.
    pub fn player_position(&self) -> Position {
        self.player_position
    }

    /// Returns the player's current strength.
    pub fn player_strength(&self) -> u32 {
        self.player.strength
    }

    /// Returns the number of moves remaining for the player.
    pub fn player_moves_remaining(&self) -> u32 {
        self.player.moves_remaining
    }

    /// Attempts to move the player one cell in the given direction.
    ///
    /// The attempt is all-or-nothing: every check runs before any mutation,
    /// so a `false` return leaves the board exactly as it was. A `true`
    /// return means the player relocated and paid exactly one move, with any
    /// crate push, goal fill, or potion pickup along the way applied in the
    /// same step.
    pub fn attempt_move(&mut self, direction: Direction) -> bool {
        let delta = direction.delta();
        let Some(target) = self.player_position.offset(delta) else {
            return false;
        };
        match self.maze.get(target) {
            Some(tile) if !tile.is_blocking() => {}
            _ => return false,
        }

        if let Some(Entity::Crate { strength }) = self.entities.get(&target) {
            let required = *strength;
            let Some(crate_target) = target.offset(delta) else {
                return false;
            };
            match self.maze.get(crate_target) {
                Some(tile) if !tile.is_blocking() => {}
                _ => return false,
            }
            // Crates cannot stack, and an unconsumed potion blocks the push.
            if self.entities.contains_key(&crate_target) {
                return false;
            }
            if self.player.strength < required {
                return false;
            }

            self.relocate_entity(target, crate_target);
            if let Some(tile) = self.maze.get_mut(crate_target) {
                if matches!(tile, Tile::Goal { .. }) {
                    tile.fill();
                    // The crate is consumed by the goal and leaves the grid.
                    self.entities.remove(&crate_target);
                }
            }
        }

        // A crate vacated `target` above, so a potion here means no push
        // happened this step.
        if let Some(Entity::Potion(kind)) = self.entities.get(&target) {
            let effect = kind.effect();
            self.player.apply_effect(effect);
            self.entities.remove(&target);
        }

        self.player_position = target;
        self.player.moves_remaining = self.player.moves_remaining.saturating_sub(1);
        true
    }

    /// Moves an entity to a new key as one logical step, so the map never
    /// holds the entity under both keys.
    fn relocate_entity(&mut self, from: Position, to: Position) {
        debug_assert!(!self.entities.contains_key(&to));
        if let Some(entity) = self.entities.remove(&from) {
            self.entities.insert(to, entity);
        }
    }

    /// Checks whether every goal tile is filled.
    ///
    /// A maze with no goal tiles trivially reports a win.
    pub fn has_won(&self) -> bool {
        self.maze.iter().all(|tile| match tile {
            Tile::Goal { filled } => *filled,
            _ => true,
        })
    }
}
