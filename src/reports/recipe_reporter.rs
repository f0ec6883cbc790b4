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
use crate::recipes::cookbook::Cookbook;
use crate::recipes::recipe::Recipe;
use crate::reports::stock_reporter::print_or_no_data;
use crate::reports::table::Table;
use anyhow::Error;

/// Reports over the cookbook, checked against what is in storage
pub struct RecipeReporter<'a> {
	cookbook: &'a Cookbook,
	inventory: &'a Inventory,
}

impl<'a> RecipeReporter<'a> {
	pub fn new(cookbook: &'a Cookbook, inventory: &'a Inventory) -> Self {
		Self {
			cookbook,
			inventory,
		}
	}

	pub fn print_recipes(&self) {
		print_or_no_data(self.recipes_table());
	}

	pub fn print_check(&self, recipe: &Recipe) -> Result<(), Error> {
		let (table, enough) = self.check_table(recipe)?;

		println!("{} (serves {})", recipe.name(), recipe.portions());
		println!("{}", recipe.description());
		println!("{}", recipe.procedure());
		table.print();
		println!();
		if enough {
			println!("Enough stock to make {}", recipe.name());
		} else {
			println!("Not enough stock to make {}", recipe.name());
		}
		Ok(())
	}

	pub fn print_suggestions(&self, raw: bool) {
		let recipes = if raw {
			self.cookbook.suggest(Some(self.inventory))
		} else {
			self.cookbook.suggest_converted(Some(self.inventory))
		};
		print_or_no_data(suggestions_table(&recipes));
	}

	fn recipes_table(&self) -> Option<Table> {
		if self.cookbook.is_empty() {
			return None;
		}

		let mut table = Table::new(4);
		table.right_align(vec![1, 2]);
		table.add_header(vec!["Recipe", "Serves", "Lines", "In stock"]);
		table.add_separator();

		for recipe in self.cookbook.iter() {
			let in_stock = match self.inventory.has_enough_for_recipe(recipe) {
				Ok(true) => "yes",
				Ok(false) => "no",
				Err(_) => "unit mismatch",
			};
			table.add_row(vec![
				recipe.name().to_string(),
				recipe.portions().to_string(),
				recipe.ingredients().len().to_string(),
				in_stock.to_string(),
			]);
		}

		Some(table)
	}

	/// One line per ingredient, with what is held converted into the unit
	/// the recipe asks for, and as stored.
	fn check_table(&self, recipe: &Recipe) -> Result<(Table, bool), Error> {
		let mut table = Table::new(6);
		table.right_align(vec![1, 2, 4]);
		table.add_header(vec![
			"Ingredient",
			"Needed",
			"Available",
			"Unit",
			"Held",
			"Status",
		]);
		table.add_separator();

		let held = self.inventory.availability_for(recipe);

		let mut enough = true;
		for line in recipe.ingredients() {
			let available =
				self.inventory.available_in(line.name(), line.unit())?;
			let status = if available >= line.quantity() {
				"ok".to_string()
			} else {
				enough = false;
				format!("short {}", line.quantity() - available)
			};

			let held = match (
				held.get(line.name()),
				self.inventory.stock_unit(line.name()),
			) {
				(Some(quantity), Some(unit)) => format!("{} {}", quantity, unit),
				_ => "-".to_string(),
			};

			table.add_row(vec![
				line.name().to_string(),
				line.quantity().to_string(),
				available.to_string(),
				line.unit().to_string(),
				held,
				status,
			]);
		}

		Ok((table, enough))
	}
}

fn suggestions_table(recipes: &[&Recipe]) -> Option<Table> {
	if recipes.is_empty() {
		return None;
	}

	let mut table = Table::new(3);
	table.right_align(vec![1]);
	table.add_header(vec!["Recipe", "Serves", "Description"]);
	table.add_separator();

	for recipe in recipes {
		table.add_row(vec![
			recipe.name().to_string(),
			recipe.portions().to_string(),
			recipe.description().to_string(),
		]);
	}

	Some(table)
}
