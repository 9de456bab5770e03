//! # Crafting
//!
//! Turns stocked materials into crafted items. A [`Crafting`] value owns the
//! material inventory and the recipe book; crafting either succeeds and
//! spends the recipe's materials, or fails and leaves the inventory as it was.

use crate::generation::{craft_item, tables, AffixPool, ItemBase, LootItem};
use crate::ArcaneResult;
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Item type given to crafted items whose base is not in the base list.
pub const UNKNOWN_ITEM_TYPE: &str = "Unknown";

/// A named recipe: the materials it consumes and the base item it makes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub materials: BTreeMap<String, u32>,
    pub base_item: String,
}

impl Recipe {
    pub fn new<'a>(
        name: impl Into<String>,
        materials: impl IntoIterator<Item = (&'a str, u32)>,
        base_item: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            materials: materials
                .into_iter()
                .map(|(material, amount)| (material.to_string(), amount))
                .collect(),
            base_item: base_item.into(),
        }
    }
}

/// Material stock plus the recipes that spend it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crafting {
    affixes: AffixPool,
    bases: Vec<ItemBase>,
    recipes: Vec<Recipe>,
    materials: BTreeMap<String, u32>,
}

impl Crafting {
    /// Creates a crafting station with an empty material stock.
    pub fn new(affixes: AffixPool, bases: Vec<ItemBase>, recipes: Vec<Recipe>) -> Self {
        Self {
            affixes,
            bases,
            recipes,
            materials: BTreeMap::new(),
        }
    }

    /// The stock recipes, bases and starting materials.
    pub fn with_defaults() -> ArcaneResult<Self> {
        let mut crafting = Self::new(
            tables::default_affix_pool()?,
            tables::default_item_bases(),
            tables::default_recipes(),
        );
        for (material, amount) in tables::default_materials() {
            crafting.add_materials(material, amount);
        }
        Ok(crafting)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.name == name)
    }

    /// Snapshot of the material stock.
    pub fn materials(&self) -> &BTreeMap<String, u32> {
        &self.materials
    }

    /// Stocked amount of one material; 0 when never added.
    pub fn material(&self, name: &str) -> u32 {
        self.materials.get(name).copied().unwrap_or(0)
    }

    pub fn add_materials(&mut self, material: impl Into<String>, amount: u32) {
        let stock = self.materials.entry(material.into()).or_insert(0);
        *stock = stock.saturating_add(amount);
    }

    /// True when the recipe exists and every material it needs is stocked.
    pub fn can_craft(&self, recipe_name: &str) -> bool {
        self.recipe(recipe_name)
            .is_some_and(|recipe| self.has_materials(recipe))
    }

    /// Crafts an item, spending the recipe's materials.
    ///
    /// Returns `None` for an unknown recipe or a short stock. Nothing is
    /// spent in that case.
    pub fn craft(&mut self, recipe_name: &str, rng: &mut impl Rng) -> Option<LootItem> {
        let Some(recipe) = self.recipe(recipe_name) else {
            warn!("Unknown recipe {}", recipe_name);
            return None;
        };
        if !self.has_materials(recipe) {
            debug!("Not enough materials for {}", recipe_name);
            return None;
        }

        let recipe = recipe.clone();
        for (material, amount) in &recipe.materials {
            if let Some(stock) = self.materials.get_mut(material) {
                *stock -= amount;
            }
        }

        let item_type = self
            .bases
            .iter()
            .find(|base| base.name == recipe.base_item)
            .map_or(UNKNOWN_ITEM_TYPE, |base| base.item_type.as_str());
        Some(craft_item(&recipe.base_item, item_type, &self.affixes, rng))
    }

    fn has_materials(&self, recipe: &Recipe) -> bool {
        recipe
            .materials
            .iter()
            .all(|(material, amount)| self.material(material) >= *amount)
    }
}
