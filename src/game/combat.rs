//! # Combat Sessions
//!
//! A single player-versus-enemy encounter modeled as a turn-based state machine.
//!
//! The session starts on the player's turn. Every successful action hands the
//! turn to the other side until one side's health reaches zero, at which point
//! the session is finished and rejects further actions. The enemy never acts
//! on its own: the caller drives it with [`CombatSession::advance_turn`], so any
//! pacing delay lives in the presentation layer.

use crate::config::{COMBAT_LOG_CAPACITY, DEFAULT_SKILL_VARIANCE, DEFAULT_SWING_VARIANCE};
use crate::game::damage::roll_swing;
use crate::{ArcaneError, ArcaneResult, CharacterRecord, CombatantState, EnemyRecord, Side, Skill};
use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Tuning values for combat sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Inclusive multiplier range for basic attacks
    pub swing_variance: (f64, f64),
    /// Inclusive multiplier range for skill hits
    pub skill_variance: (f64, f64),
    /// Number of log lines kept
    pub log_capacity: usize,
}

impl CombatConfig {
    /// Creates the standard combat configuration.
    pub fn new() -> Self {
        Self {
            swing_variance: DEFAULT_SWING_VARIANCE,
            skill_variance: DEFAULT_SKILL_VARIANCE,
            log_capacity: COMBAT_LOG_CAPACITY,
        }
    }

    /// Creates a configuration without any damage variance.
    ///
    /// Useful for tests and balance tooling where every hit must land for
    /// exactly its expected damage.
    pub fn deterministic() -> Self {
        Self {
            swing_variance: (1.0, 1.0),
            skill_variance: (1.0, 1.0),
            log_capacity: COMBAT_LOG_CAPACITY,
        }
    }

    /// Rejects variance ranges that are inverted or negative and an empty log.
    pub fn validate(&self) -> ArcaneResult<()> {
        for (label, (min, max)) in [
            ("swing_variance", self.swing_variance),
            ("skill_variance", self.skill_variance),
        ] {
            if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
                warn!("Rejected {} of ({}, {})", label, min, max);
                return Err(ArcaneError::Configuration(format!(
                    "{} must be an ordered, non-negative range, got ({}, {})",
                    label, min, max
                )));
            }
        }

        if self.log_capacity == 0 {
            warn!("Rejected log_capacity of zero");
            return Err(ArcaneError::Configuration(
                "log_capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal outcome of a session, from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatResult {
    Win,
    Lose,
}

/// Where a session is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatState {
    PlayerTurn,
    EnemyTurn,
    Finished(CombatResult),
}

/// What happened when an action was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// The action landed and the turn moved on (or the session ended)
    Hit {
        attacker: Side,
        damage: u32,
        /// Health left on the side that was hit
        remaining_health: u32,
    },
    /// The skill could not be paid for; the turn did not advance
    InsufficientMana { required: u32, available: u32 },
    /// The action is not valid in the current state; nothing changed
    Rejected,
}

impl ActionOutcome {
    /// Whether the action consumed the turn.
    pub fn advanced_turn(&self) -> bool {
        matches!(self, ActionOutcome::Hit { .. })
    }
}

/// Fixed-size log that keeps only the most recent lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl CombatLog {
    /// Creates an empty log. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a line, discarding the oldest one when full.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.into());
    }

    /// Lines from oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All retained lines joined with newlines.
    pub fn text(&self) -> String {
        self.entries().collect::<Vec<_>>().join("\n")
    }
}

/// One encounter between a player and an enemy.
///
/// # Examples
///
/// ```
/// use arcane::{CharacterRecord, CombatConfig, CombatSession, CombatState, EnemyRecord};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let hero = CharacterRecord::new("Aiden", "Barbarian");
/// let toad = EnemyRecord::new("Swamp Toad", 10, 3);
/// let mut session = CombatSession::new(&hero, &toad, CombatConfig::default()).unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
///
/// while !session.is_over() {
///     session.player_attack(&mut rng);
///     session.advance_turn(&mut rng);
/// }
/// assert!(matches!(session.state(), CombatState::Finished(_)));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatSession {
    player: CombatantState,
    enemy: CombatantState,
    state: CombatState,
    log: CombatLog,
    config: CombatConfig,
    turns_taken: u32,
}

impl CombatSession {
    /// Starts an encounter between a character and an enemy template.
    ///
    /// Fails if `config` does not pass [`CombatConfig::validate`].
    pub fn new(
        player: &CharacterRecord,
        enemy: &EnemyRecord,
        config: CombatConfig,
    ) -> ArcaneResult<Self> {
        Self::from_states(
            CombatantState::from_character(player),
            CombatantState::from_enemy(enemy),
            config,
        )
    }

    /// Starts an encounter from already-built combatants.
    pub fn from_states(
        player: CombatantState,
        enemy: CombatantState,
        config: CombatConfig,
    ) -> ArcaneResult<Self> {
        config.validate()?;
        debug!(
            "Combat started: {} ({} hp) vs {} ({} hp)",
            player.name(),
            player.health(),
            enemy.name(),
            enemy.health()
        );
        Ok(Self {
            player,
            enemy,
            state: CombatState::PlayerTurn,
            log: CombatLog::new(config.log_capacity),
            config,
            turns_taken: 0,
        })
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    /// The terminal result, if the session has finished.
    pub fn result(&self) -> Option<CombatResult> {
        match self.state {
            CombatState::Finished(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.result().is_some()
    }

    pub fn player(&self) -> &CombatantState {
        &self.player
    }

    pub fn enemy(&self) -> &CombatantState {
        &self.enemy
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    /// The retained log lines joined with newlines.
    pub fn log_text(&self) -> String {
        self.log.text()
    }

    /// Number of actions that landed.
    pub fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    /// Basic attack by the player.
    pub fn player_attack(&mut self, rng: &mut impl Rng) -> ActionOutcome {
        if self.state != CombatState::PlayerTurn {
            return self.reject("player attack");
        }

        let damage = roll_swing(
            self.player.damage_profile().resolve(),
            self.config.swing_variance,
            rng,
        );
        self.log.push(format!("Player attacks for {} damage!", damage));
        self.land_hit(Side::Player, damage)
    }

    /// Spends mana on a skill for a stronger hit.
    ///
    /// Without enough mana the failure is logged and the player keeps the turn.
    pub fn use_skill(&mut self, skill: &Skill, rng: &mut impl Rng) -> ActionOutcome {
        if self.state != CombatState::PlayerTurn {
            return self.reject("skill use");
        }

        let available = self.player.mana().unwrap_or(0);
        if !self.player.spend_mana(skill.mana_cost) {
            warn!(
                "{} needs {} mana for {}, has {}",
                self.player.name(),
                skill.mana_cost,
                skill.name,
                available
            );
            self.log.push("Not enough mana!");
            return ActionOutcome::InsufficientMana {
                required: skill.mana_cost,
                available,
            };
        }

        let base = self.player.attack() as f64 + skill.power as f64;
        let damage = roll_swing(base, self.config.skill_variance, rng);
        self.log
            .push(format!("Player uses {} for {} damage!", skill.name, damage));
        self.land_hit(Side::Player, damage)
    }

    /// Uses one of the player's own skills by name.
    ///
    /// An unknown name is rejected without touching state or the log.
    pub fn use_skill_named(&mut self, name: &str, rng: &mut impl Rng) -> ActionOutcome {
        match self.player.skill(name).cloned() {
            Some(skill) => self.use_skill(&skill, rng),
            None => {
                warn!("{} has no skill named {:?}", self.player.name(), name);
                ActionOutcome::Rejected
            }
        }
    }

    /// Basic attack by the enemy.
    pub fn enemy_attack(&mut self, rng: &mut impl Rng) -> ActionOutcome {
        if self.state != CombatState::EnemyTurn {
            return self.reject("enemy attack");
        }

        let damage = roll_swing(
            self.enemy.damage_profile().resolve(),
            self.config.swing_variance,
            rng,
        );
        self.log.push(format!("Enemy attacks for {} damage!", damage));
        self.land_hit(Side::Enemy, damage)
    }

    /// Plays the enemy's turn if it is due; otherwise does nothing.
    pub fn advance_turn(&mut self, rng: &mut impl Rng) -> ActionOutcome {
        match self.state {
            CombatState::EnemyTurn => self.enemy_attack(rng),
            _ => ActionOutcome::Rejected,
        }
    }

    /// Applies a landed hit to the attacker's opponent and moves the state on.
    fn land_hit(&mut self, attacker: Side, damage: u32) -> ActionOutcome {
        let target = match attacker {
            Side::Player => &mut self.enemy,
            Side::Enemy => &mut self.player,
        };
        let remaining_health = target.take_damage(damage);
        self.turns_taken += 1;
        debug!(
            "{} hit for {} ({} health left)",
            attacker, damage, remaining_health
        );

        if remaining_health == 0 {
            let result = match attacker {
                Side::Player => CombatResult::Win,
                Side::Enemy => CombatResult::Lose,
            };
            self.log.push(match result {
                CombatResult::Win => "Enemy defeated!",
                CombatResult::Lose => "You have been defeated!",
            });
            self.state = CombatState::Finished(result);
            info!(
                "Combat between {} and {} finished after {} turns: {:?}",
                self.player.name(),
                self.enemy.name(),
                self.turns_taken,
                result
            );
        } else {
            self.state = match attacker.opponent() {
                Side::Player => CombatState::PlayerTurn,
                Side::Enemy => CombatState::EnemyTurn,
            };
        }

        ActionOutcome::Hit {
            attacker,
            damage,
            remaining_health,
        }
    }

    fn reject(&self, action: &str) -> ActionOutcome {
        debug!("Ignoring {} in state {:?}", action, self.state);
        ActionOutcome::Rejected
    }
}
