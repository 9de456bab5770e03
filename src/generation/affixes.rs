//! # Affixes and Stat Pools
//!
//! Named item modifiers and the stat ranges items roll from.

use crate::{ArcaneError, ArcaneResult};
use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A named modifier attached to the front or back of an item name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Affix {
    /// Display name, e.g. "Fiery" or "of the Bear"
    pub name: String,
    /// Textual effect, e.g. "+Fire Damage"
    pub effect: String,
}

impl Affix {
    pub fn new(name: impl Into<String>, effect: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effect: effect.into(),
        }
    }
}

/// Unvalidated form of an [`AffixPool`], used for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffixLists {
    pub prefixes: Vec<Affix>,
    pub suffixes: Vec<Affix>,
}

/// Prefixes and suffixes available to the loot roller.
///
/// Both lists are non-empty and share no names.
///
/// # Examples
///
/// ```
/// use arcane::{Affix, AffixPool};
///
/// let pool = AffixPool::new(
///     vec![Affix::new("Fiery", "+Fire Damage")],
///     vec![Affix::new("of the Bear", "+Strength")],
/// )
/// .unwrap();
/// assert_eq!(pool.prefixes().len(), 1);
///
/// assert!(AffixPool::new(vec![], vec![Affix::new("of the Bear", "+Strength")]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AffixLists", into = "AffixLists")]
pub struct AffixPool {
    prefixes: Vec<Affix>,
    suffixes: Vec<Affix>,
}

impl AffixPool {
    /// Builds a pool, rejecting empty lists and names used on both sides.
    pub fn new(prefixes: Vec<Affix>, suffixes: Vec<Affix>) -> ArcaneResult<Self> {
        if prefixes.is_empty() || suffixes.is_empty() {
            warn!(
                "Rejected affix pool with {} prefixes and {} suffixes",
                prefixes.len(),
                suffixes.len()
            );
            return Err(ArcaneError::Configuration(
                "affix pool needs at least one prefix and one suffix".to_string(),
            ));
        }

        let prefix_names: HashSet<&str> = prefixes.iter().map(|a| a.name.as_str()).collect();
        if let Some(shared) = suffixes
            .iter()
            .find(|a| prefix_names.contains(a.name.as_str()))
        {
            warn!("Rejected affix {:?} listed as prefix and suffix", shared.name);
            return Err(ArcaneError::Configuration(format!(
                "affix {:?} is both a prefix and a suffix",
                shared.name
            )));
        }

        Ok(Self { prefixes, suffixes })
    }

    pub fn prefixes(&self) -> &[Affix] {
        &self.prefixes
    }

    pub fn suffixes(&self) -> &[Affix] {
        &self.suffixes
    }

    /// Draws one prefix uniformly.
    pub fn choose_prefix(&self, rng: &mut impl Rng) -> &Affix {
        choose_one(&self.prefixes, rng)
    }

    /// Draws one suffix uniformly.
    pub fn choose_suffix(&self, rng: &mut impl Rng) -> &Affix {
        choose_one(&self.suffixes, rng)
    }
}

impl TryFrom<AffixLists> for AffixPool {
    type Error = ArcaneError;

    fn try_from(lists: AffixLists) -> ArcaneResult<Self> {
        Self::new(lists.prefixes, lists.suffixes)
    }
}

impl From<AffixPool> for AffixLists {
    fn from(pool: AffixPool) -> Self {
        Self {
            prefixes: pool.prefixes,
            suffixes: pool.suffixes,
        }
    }
}

// Pools are never empty, so indexing stays in bounds.
fn choose_one<'a>(affixes: &'a [Affix], rng: &mut impl Rng) -> &'a Affix {
    &affixes[rng.gen_range(0..affixes.len())]
}

/// A stat an item can roll, with its inclusive value range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRange {
    pub name: String,
    pub min: i32,
    pub max: i32,
}

impl StatRange {
    pub fn new(name: impl Into<String>, min: i32, max: i32) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }

    /// Draws a value uniformly from `[min, max]`.
    pub fn roll(&self, rng: &mut impl Rng) -> i32 {
        rng.gen_range(self.min..=self.max)
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// An ordered set of stat ranges with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StatRange>", into = "Vec<StatRange>")]
pub struct StatPool {
    ranges: Vec<StatRange>,
}

impl StatPool {
    /// Builds a pool, rejecting inverted ranges and repeated names.
    pub fn new(ranges: Vec<StatRange>) -> ArcaneResult<Self> {
        let mut seen = HashSet::new();
        for range in &ranges {
            if range.min > range.max {
                warn!("Rejected inverted range for stat {:?}", range.name);
                return Err(ArcaneError::Configuration(format!(
                    "stat {:?} has min {} above max {}",
                    range.name, range.min, range.max
                )));
            }
            if !seen.insert(range.name.as_str()) {
                warn!("Rejected repeated stat {:?}", range.name);
                return Err(ArcaneError::Configuration(format!(
                    "stat {:?} appears more than once",
                    range.name
                )));
            }
        }

        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[StatRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&StatRange> {
        self.ranges.iter().find(|range| range.name == name)
    }

    /// Fails if `count` distinct stats cannot be drawn from this pool.
    pub fn check_count(&self, count: usize, label: &str) -> ArcaneResult<()> {
        if count > self.ranges.len() {
            warn!(
                "Rejected request for {} {} from a pool of {}",
                count,
                label,
                self.ranges.len()
            );
            return Err(ArcaneError::Configuration(format!(
                "requested {} distinct {} but the pool holds {}",
                count,
                label,
                self.ranges.len()
            )));
        }
        Ok(())
    }

    /// Picks `count` distinct stats and rolls a value for each.
    pub fn sample(&self, count: usize, rng: &mut impl Rng) -> ArcaneResult<BTreeMap<String, i32>> {
        self.check_count(count, "stats")?;

        let chosen: Vec<&StatRange> = self.ranges.choose_multiple(rng, count).collect();
        Ok(chosen
            .into_iter()
            .map(|range| (range.name.clone(), range.roll(rng)))
            .collect())
    }
}

impl TryFrom<Vec<StatRange>> for StatPool {
    type Error = ArcaneError;

    fn try_from(ranges: Vec<StatRange>) -> ArcaneResult<Self> {
        Self::new(ranges)
    }
}

impl From<StatPool> for Vec<StatRange> {
    fn from(pool: StatPool) -> Self {
        pool.ranges
    }
}
