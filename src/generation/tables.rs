//! # Default Loot Tables
//!
//! The stock rarity tiers, gear affixes, stat pools and base items of the
//! Arcane Engine. Callers with their own content load [`LootTables`] from JSON
//! instead.

use crate::generation::{
    Affix, AffixPool, ItemBase, LootTables, RarityTable, RarityTier, Recipe, StatPool, StatRange,
};
use crate::ArcaneResult;

/// Common 60, Magic 25, Rare 10, Legendary 4, Unique 1.
pub fn default_rarity_table() -> ArcaneResult<RarityTable> {
    RarityTable::new(vec![
        RarityTier::new("Common", 60, "#bbb"),
        RarityTier::new("Magic", 25, "#4b8cff"),
        RarityTier::new("Rare", 10, "#ffe14b"),
        RarityTier::new("Legendary", 4, "#ff7f27"),
        RarityTier::new("Unique", 1, "#b400ff"),
    ])
}

pub fn default_affix_pool() -> ArcaneResult<AffixPool> {
    let prefixes = [
        ("Fiery", "+Fire Damage"),
        ("Icy", "+Cold Damage"),
        ("Shocking", "+Lightning Damage"),
        ("Vampiric", "Life Leech"),
        ("Stalwart", "+Armor"),
        ("Swift", "+Attack Speed"),
        ("Deadly", "+Critical Strike Chance"),
        ("Resilient", "+All Resistances"),
        ("Frenzied", "+Frenzy on Hit"),
        ("Ancient", "+Max Life"),
    ];
    let suffixes = [
        ("of the Bear", "+Strength"),
        ("of the Eagle", "+Dexterity"),
        ("of the Sage", "+Intelligence"),
        ("of the Fox", "+Evasion"),
        ("of the Leech", "Life Leech"),
        ("of the Fortress", "+Block Chance"),
        ("of the Avalanche", "+Cold Resistance"),
        ("of the Inferno", "+Fire Resistance"),
        ("of the Storm", "+Lightning Resistance"),
        ("of the Titan", "+Max Health"),
    ];

    AffixPool::new(
        prefixes.iter().map(|(name, effect)| Affix::new(*name, *effect)).collect(),
        suffixes.iter().map(|(name, effect)| Affix::new(*name, *effect)).collect(),
    )
}

pub fn default_stat_pool() -> ArcaneResult<StatPool> {
    StatPool::new(vec![
        StatRange::new("Power", 10, 100),
        StatRange::new("Strength", 1, 20),
        StatRange::new("Dexterity", 1, 20),
        StatRange::new("Intelligence", 1, 20),
        StatRange::new("Vitality", 1, 20),
    ])
}

pub fn default_substat_pool() -> ArcaneResult<StatPool> {
    StatPool::new(vec![
        StatRange::new("Critical Strike Chance", 1, 10),
        StatRange::new("Attack Speed", 1, 8),
        StatRange::new("Life Leech", 1, 5),
        StatRange::new("Armor", 5, 50),
        StatRange::new("All Resistances", 1, 15),
    ])
}

/// All of the default tables together.
pub fn default_loot_tables() -> ArcaneResult<LootTables> {
    Ok(LootTables {
        rarities: default_rarity_table()?,
        affixes: default_affix_pool()?,
        stats: default_stat_pool()?,
        substats: default_substat_pool()?,
    })
}

/// Base items that drop from the default loot table.
pub fn default_item_bases() -> Vec<ItemBase> {
    vec![
        ItemBase::new("Iron Sword", "Weapon"),
        ItemBase::new("Ancient Staff", "Weapon"),
        ItemBase::new("Leather Armor", "Armor"),
        ItemBase::new("Ring of Power", "Accessory"),
    ]
}

/// The four stock crafting recipes.
pub fn default_recipes() -> Vec<Recipe> {
    vec![
        Recipe::new("Iron Sword", [("Iron Ore", 3), ("Leather", 1)], "Iron Sword"),
        Recipe::new("Magic Staff", [("Arcane Dust", 3), ("Crystal Shard", 1)], "Ancient Staff"),
        Recipe::new("Leather Armor", [("Leather", 4), ("Iron Ore", 1)], "Leather Armor"),
        Recipe::new("Enchanted Ring", [("Arcane Dust", 2), ("Gold", 200)], "Ring of Power"),
    ]
}

/// Starting material stock of a new character.
pub fn default_materials() -> [(&'static str, u32); 5] {
    [
        ("Iron Ore", 10),
        ("Leather", 8),
        ("Arcane Dust", 5),
        ("Crystal Shard", 2),
        ("Gold", 1000),
    ]
}
