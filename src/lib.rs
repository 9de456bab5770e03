//! # Arcane Encounter Core
//!
//! The encounter resolution core of the Arcane Engine action-RPG.
//!
//! ## Architecture Overview
//!
//! Everything here is synchronous, in-memory and driven by the caller. There
//! are no process-wide singletons: loot tables, matchmaking queues and
//! instance registries are ordinary values that the caller constructs and
//! owns, so independent sessions never interfere with each other.
//!
//! - **Generation**: weighted rarity, affix and stat rolls producing [`LootItem`]s
//! - **Game**: the damage formula and the turn-based [`CombatSession`] state machine
//! - **Matchmaking**: the FIFO [`Matchmaker`], the [`InstanceRegistry`] and the
//!   [`DungeonFinder`] that chains them
//! - **Config**: serializable tuning knobs shared by all of the above
//!
//! ## Randomness
//!
//! Every random operation takes the caller's generator, usually a seeded
//! `StdRng`, so any encounter can be replayed exactly.

pub mod config;
pub mod game;
pub mod generation;
pub mod matchmaking;

// Core module re-exports
pub use config::*;
pub use game::*;
pub use generation::*;
pub use matchmaking::*;

// Explicit re-exports for the types most callers touch
pub use game::{
    // From combat
    ActionOutcome,
    CombatConfig,
    CombatLog,
    CombatResult,
    CombatSession,
    CombatState,
    // From entities
    CharacterRecord,
    CharacterStats,
    CombatantState,
    EnemyRecord,
    Side,
    Skill,
};

pub use generation::{
    roll_item, Affix, AffixPool, Crafting, GenerationConfig, Generator, ItemGenerator,
    LootItem, LootTables, RarityTable, RarityTier, Recipe, StatPool, StatRange,
};

pub use matchmaking::{
    DungeonFinder, DuplicatePolicy, Enqueued, Group, GroupKind, Instance, InstanceId,
    InstanceKind, InstanceRegistry, MatchRequest, Matchmaker, PlayerId, SharedRegistry,
};

/// Core error type for the Arcane encounter core.
#[derive(thiserror::Error, Debug)]
pub enum ArcaneError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Tables, pools or limits were set up in a way that can never work
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// State is inconsistent with the requested operation
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Arcane codebase.
pub type ArcaneResult<T> = Result<T, ArcaneError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
