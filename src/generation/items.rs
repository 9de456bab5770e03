//! # Item Generation
//!
//! Rolls finished loot from a base item, a rarity table, an affix pool and
//! stat pools, and builds crafted items that skip the rarity roll.

use crate::generation::{Affix, AffixPool, GenerationConfig, Generator, RarityTable, StatPool};
use crate::{ArcaneError, ArcaneResult};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rarity label given to crafted items.
pub const CRAFTED_RARITY: &str = "Crafted";

/// A generated item. Owned by whoever receives it; never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootItem {
    base_name: String,
    item_type: String,
    rarity: String,
    prefix: Affix,
    suffix: Affix,
    name: String,
    stats: BTreeMap<String, i32>,
    substats: BTreeMap<String, i32>,
}

impl LootItem {
    /// The base item this was rolled from, e.g. "Iron Sword".
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    /// Name of the rarity tier that was drawn.
    pub fn rarity(&self) -> &str {
        &self.rarity
    }

    pub fn prefix(&self) -> &Affix {
        &self.prefix
    }

    pub fn suffix(&self) -> &Affix {
        &self.suffix
    }

    /// Display name: prefix, base name and suffix separated by spaces.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &BTreeMap<String, i32> {
        &self.stats
    }

    pub fn substats(&self) -> &BTreeMap<String, i32> {
        &self.substats
    }
}

impl std::fmt::Display for LootItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{} {}]", self.name, self.rarity, self.item_type)
    }
}

/// Rolls one item.
///
/// Draws the rarity by weight, one prefix and one suffix uniformly, then
/// `stat_count` distinct stats and `substat_count` distinct substats, each
/// with a value from its inclusive range. Asking for more distinct stats or
/// substats than a pool holds is a configuration error reported before
/// anything is drawn.
///
/// # Examples
///
/// ```
/// use arcane::{roll_item, Affix, AffixPool, RarityTable, RarityTier, StatPool, StatRange};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let rarities = RarityTable::new(vec![RarityTier::new("Rare", 1, "#ffe14b")]).unwrap();
/// let affixes = AffixPool::new(
///     vec![Affix::new("Fiery", "+Fire Damage")],
///     vec![Affix::new("of the Bear", "+Strength")],
/// )
/// .unwrap();
/// let stats = StatPool::new(vec![StatRange::new("Power", 10, 100)]).unwrap();
/// let substats = StatPool::new(vec![StatRange::new("Armor", 5, 50)]).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let item = roll_item("Iron Sword", "Weapon", &rarities, &affixes, &stats, &substats, 1, 1, &mut rng).unwrap();
/// assert_eq!(item.name(), "Fiery Iron Sword of the Bear");
/// assert_eq!(item.rarity(), "Rare");
/// assert!((10..=100).contains(&item.stats()["Power"]));
/// ```
#[allow(clippy::too_many_arguments)]
pub fn roll_item(
    base_name: &str,
    item_type: &str,
    rarities: &RarityTable,
    affixes: &AffixPool,
    stat_pool: &StatPool,
    substat_pool: &StatPool,
    stat_count: usize,
    substat_count: usize,
    rng: &mut impl Rng,
) -> ArcaneResult<LootItem> {
    stat_pool.check_count(stat_count, "stats")?;
    substat_pool.check_count(substat_count, "substats")?;

    let rarity = rarities.pick(rng).name.clone();
    let prefix = affixes.choose_prefix(rng).clone();
    let suffix = affixes.choose_suffix(rng).clone();
    let stats = stat_pool.sample(stat_count, rng)?;
    let substats = substat_pool.sample(substat_count, rng)?;
    let name = format!("{} {} {}", prefix.name, base_name, suffix.name);

    debug!("Rolled {} ({}) with {:?} / {:?}", name, rarity, stats, substats);

    Ok(LootItem {
        base_name: base_name.to_string(),
        item_type: item_type.to_string(),
        rarity,
        prefix,
        suffix,
        name,
        stats,
        substats,
    })
}

/// Builds a crafted item: random prefix and suffix, no rarity roll and no
/// stats.
pub fn craft_item(
    base_name: &str,
    item_type: &str,
    affixes: &AffixPool,
    rng: &mut impl Rng,
) -> LootItem {
    let prefix = affixes.choose_prefix(rng).clone();
    let suffix = affixes.choose_suffix(rng).clone();
    let name = format!("{} {} {}", prefix.name, base_name, suffix.name);
    debug!("Crafted {}", name);

    LootItem {
        base_name: base_name.to_string(),
        item_type: item_type.to_string(),
        rarity: CRAFTED_RARITY.to_string(),
        prefix,
        suffix,
        name,
        stats: BTreeMap::new(),
        substats: BTreeMap::new(),
    }
}

/// An entry of the loot table: a base item and its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBase {
    pub name: String,
    pub item_type: String,
}

impl ItemBase {
    pub fn new(name: impl Into<String>, item_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_type: item_type.into(),
        }
    }
}

/// Every table the roller draws from, loaded once and shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootTables {
    pub rarities: RarityTable,
    pub affixes: AffixPool,
    pub stats: StatPool,
    pub substats: StatPool,
}

impl LootTables {
    /// Parses tables from JSON. Every table is validated while parsing.
    pub fn load_from_json(json: &str) -> ArcaneResult<Self> {
        serde_json::from_str(json).map_err(ArcaneError::from)
    }

    /// Rolls an item from these tables.
    pub fn roll_item(
        &self,
        base_name: &str,
        item_type: &str,
        stat_count: usize,
        substat_count: usize,
        rng: &mut impl Rng,
    ) -> ArcaneResult<LootItem> {
        roll_item(
            base_name,
            item_type,
            &self.rarities,
            &self.affixes,
            &self.stats,
            &self.substats,
            stat_count,
            substat_count,
            rng,
        )
    }

    /// Crafts an item from these tables' affixes.
    pub fn craft_item(&self, base_name: &str, item_type: &str, rng: &mut impl Rng) -> LootItem {
        craft_item(base_name, item_type, &self.affixes, rng)
    }
}

/// Generates loot drops from a list of base items.
pub struct ItemGenerator {
    tables: LootTables,
    bases: Vec<ItemBase>,
}

impl ItemGenerator {
    /// Creates a generator. The base list must not be empty.
    pub fn new(tables: LootTables, bases: Vec<ItemBase>) -> ArcaneResult<Self> {
        if bases.is_empty() {
            warn!("Rejected item generator without base items");
            return Err(ArcaneError::Configuration(
                "item generator needs at least one base item".to_string(),
            ));
        }
        Ok(Self { tables, bases })
    }

    pub fn tables(&self) -> &LootTables {
        &self.tables
    }

    pub fn bases(&self) -> &[ItemBase] {
        &self.bases
    }

    /// Rolls an item for a specific base.
    pub fn roll(
        &self,
        base: &ItemBase,
        config: &GenerationConfig,
        rng: &mut impl Rng,
    ) -> ArcaneResult<LootItem> {
        self.tables.roll_item(
            &base.name,
            &base.item_type,
            config.stat_count,
            config.substat_count,
            rng,
        )
    }
}

impl Generator<LootItem> for ItemGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> ArcaneResult<LootItem> {
        let base = &self.bases[rng.gen_range(0..self.bases.len())];
        let item = self.roll(base, config, rng)?;
        self.validate(&item, config)?;
        Ok(item)
    }

    fn validate(&self, content: &LootItem, config: &GenerationConfig) -> ArcaneResult<()> {
        if content.stats.len() != config.stat_count
            || content.substats.len() != config.substat_count
        {
            return Err(ArcaneError::InvalidState(format!(
                "{} has {} stats and {} substats, expected {} and {}",
                content.name,
                content.stats.len(),
                content.substats.len(),
                config.stat_count,
                config.substat_count
            )));
        }

        let in_pool = |pool: &StatPool, rolled: &BTreeMap<String, i32>| {
            rolled
                .iter()
                .all(|(name, value)| pool.get(name).is_some_and(|range| range.contains(*value)))
        };
        if !in_pool(&self.tables.stats, &content.stats)
            || !in_pool(&self.tables.substats, &content.substats)
        {
            return Err(ArcaneError::InvalidState(format!(
                "{} rolled a stat outside its pool",
                content.name
            )));
        }

        if self.tables.rarities.probability(&content.rarity).is_none() {
            return Err(ArcaneError::InvalidState(format!(
                "{} has unknown rarity {}",
                content.name, content.rarity
            )));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "ItemGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{tables, utils, Affix, RarityTier, StatRange};
    use rand::SeedableRng;

    fn small_tables() -> LootTables {
        LootTables {
            rarities: RarityTable::new(vec![
                RarityTier::new("Common", 1, "#bbb"),
                RarityTier::new("Never", 0, "#000"),
            ])
            .unwrap(),
            affixes: AffixPool::new(
                vec![Affix::new("Mighty", "+5 Strength")],
                vec![Affix::new("of Power", "+10 Damage")],
            )
            .unwrap(),
            stats: StatPool::new(vec![
                StatRange::new("Power", 10, 100),
                StatRange::new("Strength", 1, 20),
            ])
            .unwrap(),
            substats: StatPool::new(vec![StatRange::new("Armor", 5, 50)]).unwrap(),
        }
    }

    #[test]
    fn test_roll_item_composes_name() {
        let tables = small_tables();
        let mut rng = StdRng::seed_from_u64(1);
        let item = tables.roll_item("Iron Sword", "Weapon", 2, 1, &mut rng).unwrap();

        assert_eq!(item.name(), "Mighty Iron Sword of Power");
        assert_eq!(item.base_name(), "Iron Sword");
        assert_eq!(item.item_type(), "Weapon");
        assert_eq!(item.rarity(), "Common");
        assert_eq!(item.prefix().effect, "+5 Strength");
        assert_eq!(item.stats().len(), 2);
        assert_eq!(item.substats().len(), 1);
        assert!((5..=50).contains(&item.substats()["Armor"]));
    }

    #[test]
    fn test_roll_item_rejects_oversized_requests() {
        let tables = small_tables();
        let mut rng = StdRng::seed_from_u64(1);

        let too_many_stats = tables.roll_item("Iron Sword", "Weapon", 3, 0, &mut rng);
        assert!(matches!(too_many_stats, Err(ArcaneError::Configuration(_))));

        let too_many_substats = tables.roll_item("Iron Sword", "Weapon", 0, 2, &mut rng);
        assert!(matches!(too_many_substats, Err(ArcaneError::Configuration(_))));
    }

    #[test]
    fn test_same_seed_same_item() {
        let tables = tables::default_loot_tables().unwrap();
        let mut first = StdRng::seed_from_u64(55);
        let mut second = StdRng::seed_from_u64(55);
        let a = tables.roll_item("Ring of Power", "Accessory", 2, 2, &mut first).unwrap();
        let b = tables.roll_item("Ring of Power", "Accessory", 2, 2, &mut second).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_craft_item_skips_rarity_and_stats() {
        let tables = small_tables();
        let mut rng = StdRng::seed_from_u64(2);
        let item = tables.craft_item("Leather Armor", "Armor", &mut rng);

        assert_eq!(item.rarity(), CRAFTED_RARITY);
        assert_eq!(item.name(), "Mighty Leather Armor of Power");
        assert!(item.stats().is_empty());
        assert!(item.substats().is_empty());
    }

    #[test]
    fn test_item_generator_generates_valid_items() {
        let generator =
            ItemGenerator::new(tables::default_loot_tables().unwrap(), tables::default_item_bases())
                .unwrap();
        let config = GenerationConfig::new(31337);
        let mut rng = utils::create_rng(&config);

        for _ in 0..100 {
            let item = generator.generate(&config, &mut rng).unwrap();
            assert!(generator
                .bases()
                .iter()
                .any(|base| base.name == item.base_name() && base.item_type == item.item_type()));
        }
        assert_eq!(generator.generator_type(), "ItemGenerator");
    }

    #[test]
    fn test_item_generator_validate_catches_wrong_counts() {
        let generator =
            ItemGenerator::new(small_tables(), vec![ItemBase::new("Iron Sword", "Weapon")]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let item = generator
            .roll(&generator.bases()[0].clone(), &GenerationConfig::for_testing(3), &mut rng)
            .unwrap();

        assert!(generator
            .validate(&item, &GenerationConfig::for_testing(3))
            .is_ok());
        assert!(generator.validate(&item, &GenerationConfig::new(3)).is_err());
    }

    #[test]
    fn test_item_generator_needs_bases() {
        assert!(ItemGenerator::new(small_tables(), Vec::new()).is_err());
    }

    #[test]
    fn test_loot_tables_json_round_trip() {
        let tables = small_tables();
        let json = serde_json::to_string(&tables).unwrap();
        let loaded = LootTables::load_from_json(&json).unwrap();
        assert_eq!(loaded, tables);
        assert!(LootTables::load_from_json(r#"{ "rarities": [] }"#).is_err());
    }
}
