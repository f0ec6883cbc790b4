/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::pantry::inventory::Inventory;
use crate::recipes::recipe::Recipe;
use std::collections::BTreeMap;

/// The collection of known recipes, one per case-insensitive name.
#[derive(Debug, Default, Clone)]
pub struct Cookbook {
	/// lowercased name -> recipe
	recipes: BTreeMap<String, Recipe>,
}

impl Cookbook {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns false, leaving the cookbook as it was, when a recipe of the
	/// same name is already present.
	pub fn add(&mut self, recipe: Recipe) -> bool {
		let key = recipe.key();
		if self.recipes.contains_key(&key) {
			return false;
		}

		self.recipes.insert(key, recipe);
		true
	}

	pub fn remove(&mut self, name: &str) -> bool {
		self.recipes.remove(&name.trim().to_lowercase()).is_some()
	}

	pub fn search(&self, name: &str) -> Option<&Recipe> {
		self.recipes.get(&name.trim().to_lowercase())
	}

	pub fn len(&self) -> usize {
		self.recipes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.recipes.is_empty()
	}

	/// Recipes in alphabetical order
	pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
		self.recipes.values()
	}

	/// Recipes whose every line is covered by the raw quantity held under
	/// the same name. Nothing is converted: 1000 ml of milk covers a line
	/// asking for 1000 l. A line in another dimension than the stock (litres
	/// of flour held in kilograms) is never covered. No inventory means no
	/// suggestions.
	pub fn suggest(&self, inventory: Option<&Inventory>) -> Vec<&Recipe> {
		let Some(inventory) = inventory else {
			return vec![];
		};

		self.iter()
			.filter(|recipe| {
				recipe.ingredients().iter().all(|line| {
					inventory
						.stock_unit(line.name())
						.is_some_and(|unit| unit.is_compatible(line.unit()))
						&& inventory.quantity_of(line.name()) >= line.quantity()
				})
			})
			.collect()
	}

	/// Recipes the inventory can cover after unit conversion. A recipe with
	/// a line in a unit its ingredient cannot be converted to is left out.
	pub fn suggest_converted(&self, inventory: Option<&Inventory>) -> Vec<&Recipe> {
		let Some(inventory) = inventory else {
			return vec![];
		};

		self.iter()
			.filter(|recipe| {
				matches!(inventory.has_enough_for_recipe(recipe), Ok(true))
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::pantry::ingredient::Ingredient;
	use crate::pantry::unit::UnitTable;
	use crate::util::quant::Quant;

	fn q(input: &str) -> Quant {
		input.parse().unwrap()
	}

	fn ingredient(name: &str, quantity: &str, symbol: &str) -> Ingredient {
		let unit = UnitTable::standard().lookup(symbol).unwrap().clone();
		Ingredient::new(name, q(quantity), unit, Quant::zero()).unwrap()
	}

	fn recipe(name: &str, lines: &[(&str, &str, &str)]) -> Recipe {
		let mut recipe = Recipe::new(name, "Tasty", "Cook it", q("2")).unwrap();
		for (line, quantity, symbol) in lines {
			recipe
				.add_ingredient(ingredient(line, quantity, symbol))
				.unwrap();
		}
		recipe
	}

	fn cookbook() -> Cookbook {
		let mut cookbook = Cookbook::new();
		assert!(cookbook.add(recipe(
			"Pancakes",
			&[("Flour", "250", "g"), ("Milk", "1", "l")]
		)));
		assert!(cookbook.add(recipe("Omelette", &[("Eggs", "3", "pcs")])));
		assert!(cookbook.add(recipe("Toast", &[])));
		cookbook
	}

	#[test]
	fn test_duplicate_names_are_rejected() {
		let mut cookbook = cookbook();
		assert!(!cookbook.add(recipe("PANCAKES", &[("Flour", "1", "kg")])));
		assert_eq!(cookbook.len(), 3);
		assert_eq!(
			cookbook.search("pancakes").unwrap().ingredients()[0].quantity(),
			q("250")
		);
	}

	#[test]
	fn test_search_and_remove() {
		let mut cookbook = cookbook();
		assert_eq!(cookbook.search(" omelette ").unwrap().name(), "Omelette");
		assert!(cookbook.search("Waffles").is_none());

		assert!(cookbook.remove("OMELETTE"));
		assert!(!cookbook.remove("omelette"));
		assert_eq!(cookbook.len(), 2);
	}

	#[test]
	fn test_iterates_alphabetically() {
		let cookbook = cookbook();
		let names: Vec<&str> = cookbook.iter().map(|r| r.name()).collect();
		assert_eq!(names, vec!["Omelette", "Pancakes", "Toast"]);
	}

	#[test]
	fn test_suggest_without_inventory() {
		let cookbook = cookbook();
		assert!(cookbook.suggest(None).is_empty());
		assert!(cookbook.suggest_converted(None).is_empty());
	}

	#[test]
	fn test_suggest_compares_raw_quantities() {
		let cookbook = cookbook();
		let mut inventory = Inventory::new();
		inventory.add(ingredient("flour", "300", "g")).unwrap();
		inventory.add(ingredient("milk", "1000", "ml")).unwrap();
		inventory.add(ingredient("Eggs", "2", "pcs")).unwrap();

		let names: Vec<&str> = cookbook
			.suggest(Some(&inventory))
			.iter()
			.map(|r| r.name())
			.collect();
		assert_eq!(names, vec!["Pancakes", "Toast"]);
	}

	#[test]
	fn test_raw_suggest_ignores_units() {
		let cookbook = cookbook();
		let mut inventory = Inventory::new();
		inventory.add(ingredient("Flour", "1", "kg")).unwrap();
		inventory.add(ingredient("Milk", "1", "l")).unwrap();

		// 1 kg is less than 250 when compared raw
		let names: Vec<&str> = cookbook
			.suggest(Some(&inventory))
			.iter()
			.map(|r| r.name())
			.collect();
		assert_eq!(names, vec!["Toast"]);

		let names: Vec<&str> = cookbook
			.suggest_converted(Some(&inventory))
			.iter()
			.map(|r| r.name())
			.collect();
		assert_eq!(names, vec!["Pancakes", "Toast"]);
	}

	#[test]
	fn test_both_suggest_paths_skip_incompatible_recipes() {
		let mut cookbook = Cookbook::new();
		cookbook.add(recipe("Dough", &[("Flour", "1", "l")]));
		let mut inventory = Inventory::new();
		inventory.add(ingredient("Flour", "1", "kg")).unwrap();

		assert!(cookbook.suggest_converted(Some(&inventory)).is_empty());
		// 1 is not less than 1, but litres of flour are not kilograms
		assert!(cookbook.suggest(Some(&inventory)).is_empty());

		inventory.add(ingredient("Flour", "4", "kg")).unwrap();
		assert!(cookbook.suggest(Some(&inventory)).is_empty());
	}
}
