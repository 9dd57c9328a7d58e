use serde::{Deserialize, Serialize};

/// Discriminant for an entity occupying a maze position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Crate,
    Potion(PotionKind),
}

/// The three potion varieties, each with a fixed effect table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotionKind {
    Strength,
    Move,
    Fancy,
}

/// A one-time resource bonus granted to the player on pickup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub strength: u32,
    pub moves: u32,
}

impl PotionKind {
    pub fn effect(self) -> Effect {
        match self {
            PotionKind::Strength => Effect {
                strength: 2,
                moves: 0,
            },
            PotionKind::Move => Effect {
                strength: 0,
                moves: 5,
            },
            PotionKind::Fancy => Effect {
                strength: 2,
                moves: 2,
            },
        }
    }
}

/// Represents an occupant of a maze position, distinct from the tile under
/// it. The player is not an `Entity`: it is tracked as a singleton on the
/// board with its own position field.
///
/// Entities exist from board construction until consumed: a crate is deleted
/// when it fills a goal, a potion when the player steps onto it. Nothing
/// creates entities during play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entity {
    /// A pushable crate requiring at least `strength` to move.
    Crate { strength: u32 },
    Potion(PotionKind),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Crate { .. } => EntityKind::Crate,
            Entity::Potion(kind) => EntityKind::Potion(*kind),
        }
    }

    /// True if the entity can be relocated by a push. Potions stay where
    /// they were placed until consumed.
    pub fn is_movable(&self) -> bool {
        matches!(self, Entity::Crate { .. })
    }
}

/// The player's mutable resources. Position lives on the board, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub strength: u32,
    pub moves_remaining: u32,
}

impl Player {
    pub fn new(strength: u32, moves_remaining: u32) -> Self {
        Player {
            strength,
            moves_remaining,
        }
    }

    /// Adds a potion's deltas to the player's resources.
    pub fn apply_effect(&mut self, effect: Effect) {
        self.strength += effect.strength;
        self.moves_remaining += effect.moves;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn potion_effect_tables() {
        assert_eq!(
            PotionKind::Strength.effect(),
            Effect {
                strength: 2,
                moves: 0
            }
        );
        assert_eq!(
            PotionKind::Move.effect(),
            Effect {
                strength: 0,
                moves: 5
            }
        );
        assert_eq!(
            PotionKind::Fancy.effect(),
            Effect {
                strength: 2,
                moves: 2
            }
        );
    }

    #[test]
    fn kind_tags_match_variants() {
        assert_eq!(Entity::Crate { strength: 1 }.kind(), EntityKind::Crate);
        assert_eq!(
            Entity::Potion(PotionKind::Fancy).kind(),
            EntityKind::Potion(PotionKind::Fancy)
        );
    }

    #[test]
    fn only_crates_are_movable() {
        assert!(Entity::Crate { strength: 3 }.is_movable());
        assert!(!Entity::Potion(PotionKind::Move).is_movable());
    }

    #[test]
    fn apply_effect_adds_both_resources() {
        let mut player = Player::new(1, 10);
        player.apply_effect(PotionKind::Fancy.effect());
        assert_eq!(player.strength, 3);
        assert_eq!(player.moves_remaining, 12);
    }
}
