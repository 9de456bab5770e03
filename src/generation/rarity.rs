//! # Rarity Tiers
//!
//! Weighted quality brackets for generated loot.
//!
//! Selection is a single draw over the cumulative weights of the tiers that
//! can actually drop, followed by a binary search. Tiers with weight zero never
//! enter the cumulative table, so they cannot be selected at all.

use crate::{ArcaneError, ArcaneResult};
use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A named quality bracket with a relative selection weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityTier {
    pub name: String,
    pub weight: u32,
    /// Display color; ignored by the roller
    #[serde(default)]
    pub color: String,
}

impl RarityTier {
    pub fn new(name: impl Into<String>, weight: u32, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight,
            color: color.into(),
        }
    }
}

/// Ordered rarity tiers with precomputed cumulative weights.
///
/// # Examples
///
/// ```
/// use arcane::{RarityTable, RarityTier};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let table = RarityTable::new(vec![
///     RarityTier::new("Common", 3, "#bbb"),
///     RarityTier::new("Cursed", 0, "#000"),
/// ])
/// .unwrap();
///
/// let mut rng = StdRng::seed_from_u64(1);
/// for _ in 0..100 {
///     assert_eq!(table.pick(&mut rng).name, "Common");
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RarityTier>", into = "Vec<RarityTier>")]
pub struct RarityTable {
    tiers: Vec<RarityTier>,
    /// Running weight totals over the selectable tiers only
    cumulative: Vec<u64>,
    /// Index into `tiers` for each entry of `cumulative`
    selectable: Vec<usize>,
}

impl RarityTable {
    /// Builds a table. At least one tier must have a positive weight.
    pub fn new(tiers: Vec<RarityTier>) -> ArcaneResult<Self> {
        let mut cumulative = Vec::new();
        let mut selectable = Vec::new();
        let mut running = 0u64;

        for (index, tier) in tiers.iter().enumerate() {
            if tier.weight == 0 {
                continue;
            }
            running += u64::from(tier.weight);
            cumulative.push(running);
            selectable.push(index);
        }

        if selectable.is_empty() {
            warn!("Rejected rarity table of {} tiers without a positive weight", tiers.len());
            return Err(ArcaneError::Configuration(
                "rarity table needs at least one tier with a positive weight".to_string(),
            ));
        }

        Ok(Self {
            tiers,
            cumulative,
            selectable,
        })
    }

    /// All tiers in declaration order, including unreachable ones.
    pub fn tiers(&self) -> &[RarityTier] {
        &self.tiers
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Probability of drawing the named tier, or `None` for unknown names.
    pub fn probability(&self, name: &str) -> Option<f64> {
        self.tiers
            .iter()
            .find(|tier| tier.name == name)
            .map(|tier| f64::from(tier.weight) / self.total_weight() as f64)
    }

    /// Draws a tier with probability `weight / total_weight`.
    pub fn pick(&self, rng: &mut impl Rng) -> &RarityTier {
        let roll = rng.gen_range(0..self.total_weight());
        let slot = self.cumulative.partition_point(|&bound| bound <= roll);
        &self.tiers[self.selectable[slot]]
    }
}

impl TryFrom<Vec<RarityTier>> for RarityTable {
    type Error = ArcaneError;

    fn try_from(tiers: Vec<RarityTier>) -> ArcaneResult<Self> {
        Self::new(tiers)
    }
}

impl From<RarityTable> for Vec<RarityTier> {
    fn from(table: RarityTable) -> Self {
        table.tiers
    }
}
