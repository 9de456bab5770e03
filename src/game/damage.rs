//! # Damage Resolution
//!
//! The deterministic expected-damage formula, kept apart from the random
//! per-swing variance so the formula can be checked exactly.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inputs to the damage formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageProfile {
    pub base: f64,
    pub attack_speed: f64,
    pub crit_chance: f64,
    pub crit_mult: f64,
    #[serde(default)]
    pub flat_bonus: f64,
    #[serde(default)]
    pub percent_bonus: f64,
}

impl DamageProfile {
    /// Creates a profile with no bonuses.
    pub fn new(base: f64, attack_speed: f64, crit_chance: f64, crit_mult: f64) -> Self {
        Self {
            base,
            attack_speed,
            crit_chance,
            crit_mult,
            flat_bonus: 0.0,
            percent_bonus: 0.0,
        }
    }

    /// Adds a flat amount to the base before any multiplier.
    pub fn with_flat_bonus(mut self, flat_bonus: f64) -> Self {
        self.flat_bonus = flat_bonus;
        self
    }

    /// Adds a percentage increase, where `0.25` means +25%.
    pub fn with_percent_bonus(mut self, percent_bonus: f64) -> Self {
        self.percent_bonus = percent_bonus;
        self
    }

    /// Average damage once critical hits are folded in.
    pub fn effective_crit_factor(&self) -> f64 {
        1.0 + self.crit_chance * (self.crit_mult - 1.0)
    }

    /// Expected damage per attack. No randomness.
    pub fn resolve(&self) -> f64 {
        (self.base + self.flat_bonus)
            * (1.0 + self.percent_bonus)
            * self.attack_speed
            * self.effective_crit_factor()
    }
}

/// Expected damage for an attack without bonuses.
///
/// # Examples
///
/// ```
/// use arcane::resolve_damage;
///
/// assert_eq!(resolve_damage(10.0, 1.0, 0.05, 2.0), 10.5);
/// ```
pub fn resolve_damage(base: f64, attack_speed: f64, crit_chance: f64, crit_mult: f64) -> f64 {
    DamageProfile::new(base, attack_speed, crit_chance, crit_mult).resolve()
}

/// Draws a multiplier from an inclusive `(min, max)` range.
///
/// A degenerate range always yields `min` without touching the generator.
/// A range with a non-finite bound yields `1.0`.
pub fn sample_factor(range: (f64, f64), rng: &mut impl Rng) -> f64 {
    let (min, max) = range;
    if !(min.is_finite() && max.is_finite()) {
        1.0
    } else if min >= max {
        min
    } else {
        rng.gen_range(min..=max)
    }
}

/// Realized damage for one swing: the expected value scaled by a random
/// factor, truncated toward zero and never negative.
pub fn roll_swing(expected: f64, variance: (f64, f64), rng: &mut impl Rng) -> u32 {
    let realized = expected * sample_factor(variance, rng);
    if realized.is_finite() && realized > 0.0 {
        realized as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_resolve_damage_exact() {
        assert_eq!(resolve_damage(10.0, 1.0, 0.05, 2.0), 10.5);
    }

    #[test]
    fn test_no_crit_chance_means_no_crit_factor() {
        let profile = DamageProfile::new(12.0, 1.5, 0.0, 3.0);
        assert_eq!(profile.effective_crit_factor(), 1.0);
        assert_eq!(profile.resolve(), 18.0);
    }

    #[test]
    fn test_bonuses_apply_before_speed_and_crit() {
        let profile = DamageProfile::new(10.0, 2.0, 0.5, 3.0)
            .with_flat_bonus(5.0)
            .with_percent_bonus(1.0);
        // (10 + 5) * 2 * 2 * (1 + 0.5 * 2)
        assert_eq!(profile.resolve(), 120.0);
    }

    #[test]
    fn test_roll_swing_stays_in_variance_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let damage = roll_swing(100.0, (0.8, 1.2), &mut rng);
            assert!((80..=120).contains(&damage), "damage {} out of band", damage);
        }
    }

    #[test]
    fn test_degenerate_variance_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_factor((1.0, 1.0), &mut rng), 1.0);
        assert_eq!(roll_swing(10.0, (1.0, 1.0), &mut rng), 10);
        assert_eq!(roll_swing(10.9, (1.0, 1.0), &mut rng), 10);
    }

    #[test]
    fn test_negative_damage_clamps_to_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(roll_swing(-5.0, (1.0, 1.0), &mut rng), 0);
        assert_eq!(roll_swing(f64::NAN, (1.0, 1.0), &mut rng), 0);
    }

    #[test]
    fn test_non_finite_variance_falls_back_to_one() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_factor((f64::NAN, 1.2), &mut rng), 1.0);
        assert_eq!(sample_factor((1.1, f64::INFINITY), &mut rng), 1.0);
        assert_eq!(roll_swing(10.0, (f64::NEG_INFINITY, f64::NAN), &mut rng), 10);
    }
}
