//! # Combatant Records
//!
//! Typed views of the character sheet and enemy templates, and the mutable
//! per-encounter [`CombatantState`] built from them.

use crate::game::damage::DamageProfile;
use serde::{Deserialize, Serialize};

/// A usable combat skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Display name, also used for lookups
    pub name: String,
    /// Mana spent on use
    #[serde(default = "Skill::default_mana_cost")]
    pub mana_cost: u32,
    /// Flat damage added to the caster's base attack
    #[serde(default = "Skill::default_power")]
    pub power: u32,
}

impl Skill {
    /// Creates a new skill.
    pub fn new(name: impl Into<String>, mana_cost: u32, power: u32) -> Self {
        Self {
            name: name.into(),
            mana_cost,
            power,
        }
    }

    fn default_mana_cost() -> u32 {
        10
    }

    fn default_power() -> u32 {
        10
    }
}

/// Combat statistics from the character sheet.
///
/// Any stat missing from a serialized sheet takes the value shown in
/// [`CharacterStats::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterStats {
    pub hp: u32,
    pub max_hp: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub attack: u32,
    pub attack_speed: f64,
    /// Probability of a critical hit, 0.0 to 1.0
    pub crit_chance: f64,
    pub crit_mult: f64,
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self {
            hp: 100,
            max_hp: 100,
            mana: 50,
            max_mana: 50,
            attack: 10,
            attack_speed: 1.0,
            crit_chance: 0.05,
            crit_mult: 2.0,
        }
    }
}

/// The slice of a character sheet the encounter core reads.
///
/// # Examples
///
/// ```
/// use arcane::CharacterRecord;
///
/// let hero: CharacterRecord =
///     serde_json::from_str(r#"{ "name": "Aiden", "class": "Barbarian", "stats": { "attack": 14 } }"#).unwrap();
/// assert_eq!(hero.stats.attack, 14);
/// assert_eq!(hero.stats.hp, 100);
/// assert!(hero.skills.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    pub class: String,
    #[serde(default)]
    pub stats: CharacterStats,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl CharacterRecord {
    /// Creates a character with default stats and no skills.
    pub fn new(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            stats: CharacterStats::default(),
            skills: Vec::new(),
        }
    }

    /// Replaces the stat block.
    pub fn with_stats(mut self, stats: CharacterStats) -> Self {
        self.stats = stats;
        self
    }

    /// Adds a skill to the character's list.
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }
}

/// An enemy template. Enemies have no mana and no skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyRecord {
    pub name: String,
    pub hp: u32,
    pub attack: u32,
    #[serde(default)]
    pub attack_speed: Option<f64>,
    #[serde(default)]
    pub crit_chance: Option<f64>,
    #[serde(default)]
    pub crit_mult: Option<f64>,
}

impl EnemyRecord {
    pub const DEFAULT_ATTACK_SPEED: f64 = 1.0;
    pub const DEFAULT_CRIT_CHANCE: f64 = 0.05;
    pub const DEFAULT_CRIT_MULT: f64 = 1.5;

    /// Creates an enemy that uses the default speed and crit values.
    pub fn new(name: impl Into<String>, hp: u32, attack: u32) -> Self {
        Self {
            name: name.into(),
            hp,
            attack,
            attack_speed: None,
            crit_chance: None,
            crit_mult: None,
        }
    }
}

/// Current and maximum mana.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaPool {
    pub current: u32,
    pub max: u32,
}

/// One side of a running combat session.
///
/// Only the owning session changes a combatant, so the mutators are crate
/// private.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantState {
    name: String,
    health: u32,
    max_health: u32,
    mana: Option<ManaPool>,
    attack: u32,
    attack_speed: f64,
    crit_chance: f64,
    crit_mult: f64,
    skills: Vec<Skill>,
}

impl CombatantState {
    /// Builds the player side from a character sheet.
    pub fn from_character(character: &CharacterRecord) -> Self {
        let stats = &character.stats;
        Self {
            name: character.name.clone(),
            health: stats.hp,
            max_health: stats.max_hp.max(stats.hp),
            mana: Some(ManaPool {
                current: stats.mana,
                max: stats.max_mana.max(stats.mana),
            }),
            attack: stats.attack,
            attack_speed: stats.attack_speed,
            crit_chance: stats.crit_chance,
            crit_mult: stats.crit_mult,
            skills: character.skills.clone(),
        }
    }

    /// Builds the enemy side from a template.
    pub fn from_enemy(enemy: &EnemyRecord) -> Self {
        Self {
            name: enemy.name.clone(),
            health: enemy.hp,
            max_health: enemy.hp,
            mana: None,
            attack: enemy.attack,
            attack_speed: enemy
                .attack_speed
                .unwrap_or(EnemyRecord::DEFAULT_ATTACK_SPEED),
            crit_chance: enemy.crit_chance.unwrap_or(EnemyRecord::DEFAULT_CRIT_CHANCE),
            crit_mult: enemy.crit_mult.unwrap_or(EnemyRecord::DEFAULT_CRIT_MULT),
            skills: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Current mana, or `None` for combatants without a mana pool.
    pub fn mana(&self) -> Option<u32> {
        self.mana.map(|pool| pool.current)
    }

    pub fn max_mana(&self) -> Option<u32> {
        self.mana.map(|pool| pool.max)
    }

    pub fn attack(&self) -> u32 {
        self.attack
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Finds a skill by name.
    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.name == name)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Damage inputs for a basic attack.
    pub fn damage_profile(&self) -> DamageProfile {
        DamageProfile::new(
            self.attack as f64,
            self.attack_speed,
            self.crit_chance,
            self.crit_mult,
        )
    }

    /// Applies damage, flooring health at zero. Returns the health left.
    pub(crate) fn take_damage(&mut self, damage: u32) -> u32 {
        self.health = self.health.saturating_sub(damage);
        self.health
    }

    /// Spends mana if enough is available. Combatants without a pool can
    /// only pay a zero cost.
    pub(crate) fn spend_mana(&mut self, cost: u32) -> bool {
        match self.mana.as_mut() {
            Some(pool) if pool.current >= cost => {
                pool.current -= cost;
                true
            }
            Some(_) => false,
            None => cost == 0,
        }
    }
}
