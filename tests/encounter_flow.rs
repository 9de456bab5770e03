//! End-to-end encounters: a character fighting an enemy, plus loot drops.

use arcane::generation::tables;
use arcane::{
    ActionOutcome, ArcaneResult, CharacterRecord, CharacterStats, CombatConfig, CombatResult,
    CombatSession, CombatState, EnemyRecord, Side, Skill,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

fn steady_hero(attack: u32) -> CharacterRecord {
    CharacterRecord::new("Aiden", "Barbarian").with_stats(CharacterStats {
        attack,
        crit_chance: 0.0,
        crit_mult: 1.0,
        ..CharacterStats::default()
    })
}

fn steady_enemy(hp: u32, attack: u32) -> EnemyRecord {
    EnemyRecord {
        crit_chance: Some(0.0),
        crit_mult: Some(1.0),
        ..EnemyRecord::new("Bone Warden", hp, attack)
    }
}

#[test]
fn test_three_swings_defeat_enemy() {
    let mut session = CombatSession::new(
        &steady_hero(10),
        &steady_enemy(30, 5),
        CombatConfig::deterministic(),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    for swing in 1..=3 {
        let outcome = session.player_attack(&mut rng);
        assert_eq!(
            outcome,
            ActionOutcome::Hit {
                attacker: Side::Player,
                damage: 10,
                remaining_health: 30 - swing * 10,
            }
        );
        session.advance_turn(&mut rng);
    }

    assert_eq!(session.state(), CombatState::Finished(CombatResult::Win));
    assert_eq!(session.player().health(), 90);
    assert_eq!(session.log().latest(), Some("Enemy defeated!"));
    assert_eq!(
        session.log_text(),
        [
            "Player attacks for 10 damage!",
            "Enemy attacks for 5 damage!",
            "Player attacks for 10 damage!",
            "Enemy attacks for 5 damage!",
            "Player attacks for 10 damage!",
            "Enemy defeated!",
        ]
        .join("\n")
    );

    // Finished sessions ignore further input.
    assert_eq!(session.player_attack(&mut rng), ActionOutcome::Rejected);
    assert_eq!(session.advance_turn(&mut rng), ActionOutcome::Rejected);
}

#[test]
fn test_twenty_hp_enemy_falls_on_second_swing() {
    let mut session = CombatSession::new(
        &steady_hero(10),
        &steady_enemy(20, 5),
        CombatConfig::deterministic(),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    session.player_attack(&mut rng);
    session.advance_turn(&mut rng);
    let second = session.player_attack(&mut rng);
    assert!(matches!(second, ActionOutcome::Hit { remaining_health: 0, .. }));
    assert_eq!(session.result(), Some(CombatResult::Win));

    let third = session.player_attack(&mut rng);
    assert_eq!(third, ActionOutcome::Rejected);
    assert_eq!(session.enemy().health(), 0);
}

#[test]
fn test_player_can_lose() {
    let mut session = CombatSession::new(
        &steady_hero(1),
        &steady_enemy(1_000, 60),
        CombatConfig::deterministic(),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(2);

    while !session.is_over() {
        session.player_attack(&mut rng);
        session.advance_turn(&mut rng);
    }

    assert_eq!(session.result(), Some(CombatResult::Lose));
    assert_eq!(session.player().health(), 0);
    assert_eq!(session.log().latest(), Some("You have been defeated!"));
}

#[test]
fn test_skills_drain_mana_then_fail() {
    let hero = steady_hero(10).with_skill(Skill::new("Cleave", 20, 15));
    let mut session = CombatSession::new(
        &hero,
        &steady_enemy(500, 1),
        CombatConfig::deterministic(),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..2 {
        let outcome = session.use_skill_named("Cleave", &mut rng);
        assert!(matches!(outcome, ActionOutcome::Hit { damage: 25, .. }));
        session.advance_turn(&mut rng);
    }
    assert_eq!(session.player().mana(), Some(10));

    let outcome = session.use_skill_named("Cleave", &mut rng);
    assert_eq!(
        outcome,
        ActionOutcome::InsufficientMana {
            required: 20,
            available: 10,
        }
    );
    assert_eq!(session.state(), CombatState::PlayerTurn);
    assert_eq!(session.log().latest(), Some("Not enough mana!"));
}

#[test]
fn test_log_keeps_last_six_lines() {
    let mut session = CombatSession::new(
        &steady_hero(1),
        &steady_enemy(1_000, 1),
        CombatConfig::deterministic(),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(4);

    for _ in 0..10 {
        session.player_attack(&mut rng);
        session.advance_turn(&mut rng);
    }

    assert_eq!(session.log().len(), 6);
    assert_eq!(session.turns_taken(), 20);
}

#[test]
fn test_default_loot_rarity_distribution() -> ArcaneResult<()> {
    let loot = tables::default_loot_tables()?;
    let mut rng = StdRng::seed_from_u64(8080);
    let rolls = 10_000;
    let mut counts: HashMap<String, usize> = HashMap::new();

    for _ in 0..rolls {
        let item = loot.roll_item("Iron Sword", "Weapon", 2, 2, &mut rng)?;
        assert_eq!(item.stats().len(), 2);
        assert_eq!(item.substats().len(), 2);
        assert!(item.name().contains("Iron Sword"));
        *counts.entry(item.rarity().to_string()).or_default() += 1;
    }

    for tier in loot.rarities.tiers() {
        let expected = tier.weight as f64 / loot.rarities.total_weight() as f64;
        let observed = *counts.get(&tier.name).unwrap_or(&0) as f64 / rolls as f64;
        assert!(
            (observed - expected).abs() < 0.02,
            "{}: observed {:.4}, expected {:.4}",
            tier.name,
            observed,
            expected
        );
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_sessions_always_terminate(
        attack in 5u32..50,
        attack_speed in 0.5f64..2.0,
        enemy_hp in 1u32..300,
        enemy_attack in 0u32..40,
        seed in any::<u64>(),
    ) {
        let hero = CharacterRecord::new("Aiden", "Barbarian").with_stats(CharacterStats {
            attack,
            attack_speed,
            ..CharacterStats::default()
        });
        let enemy = EnemyRecord::new("Bone Warden", enemy_hp, enemy_attack);
        let mut session = CombatSession::new(&hero, &enemy, CombatConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        let mut rounds = 0;
        while !session.is_over() && rounds < 500 {
            session.player_attack(&mut rng);
            session.advance_turn(&mut rng);
            rounds += 1;
        }

        prop_assert!(session.is_over());
        let winner_alive = match session.result() {
            Some(CombatResult::Win) => session.player().is_alive() && !session.enemy().is_alive(),
            Some(CombatResult::Lose) => !session.player().is_alive() && session.enemy().is_alive(),
            None => false,
        };
        prop_assert!(winner_alive);
        prop_assert!(session.log().len() <= 6);
    }
}
