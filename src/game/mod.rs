//! # Game Module
//!
//! Combat rules for a single player-versus-enemy encounter.
//!
//! This module contains:
//! - Typed character, enemy and skill records consumed from the character sheet
//! - The deterministic damage formula and per-swing variance
//! - The turn-based combat session state machine

pub mod combat;
pub mod damage;
pub mod entities;

pub use combat::*;
pub use damage::*;
pub use entities::*;

use serde::{Deserialize, Serialize};

/// One side of an encounter.
///
/// # Examples
///
/// ```
/// use arcane::Side;
///
/// assert_eq!(Side::Player.opponent(), Side::Enemy);
/// assert_eq!(Side::Enemy.opponent(), Side::Player);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// Returns the side this one is fighting.
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    /// Name used in combat log lines.
    pub fn label(self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Enemy => "Enemy",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
