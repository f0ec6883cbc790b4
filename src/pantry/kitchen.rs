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

use crate::config::config_file::Config;
use crate::pantry::ingredient::Ingredient;
use crate::pantry::inventory::Inventory;
use crate::pantry::movement::{Movement, MovementKind};
use crate::pantry::movement_buffer::MovementBuffer;
use crate::pantry::unit::{Dimension, Unit, UnitTable};
use crate::recipes::cookbook::Cookbook;
use crate::recipes::recipe::Recipe;
use crate::util::date::Date;
use crate::util::quant::Quant;
use anyhow::{anyhow, bail, Error};
use tracing::{debug, warn};

/// Takes input from the parser and assembles it: units and rates as they
/// are declared, recipes block by block, and stock movements into a buffer
/// that is replayed into an Inventory once the whole journal has been read.
#[derive(Debug)]
pub struct Kitchen {
	units: UnitTable,
	pub cookbook: Cookbook,
	movements: MovementBuffer,

	/// Recipe block currently being read, if any
	pending_recipe: Option<RecipeDraft>,

	/// Symbol of the currency that bare prices are written in
	base_currency: String,

	/// Accept purchases whose expiration date precedes the purchase
	lenient_mode: bool,
}

#[derive(Debug)]
struct RecipeDraft {
	name: String,
	line: usize,
	portions: Option<Quant>,
	description: Vec<String>,
	procedure: Vec<String>,
	ingredients: Vec<Ingredient>,
}

impl Kitchen {
	pub fn new(config: &Config, lenient: bool) -> Result<Self, Error> {
		let mut units = UnitTable::standard();

		for (currency, rate) in &config.rates {
			let rate = rate
				.parse()
				.map_err(|e| anyhow!("Invalid rate for {}: {}", currency, e))?;
			units.define(currency, rate, &config.currency)?;
		}

		for (symbol, definition) in &config.units {
			let amount = definition
				.amount
				.parse()
				.map_err(|e| anyhow!("Invalid amount for unit {}: {}", symbol, e))?;
			units.define(symbol, amount, &definition.unit)?;
		}

		let kitchen = Self {
			units,
			cookbook: Cookbook::new(),
			movements: Default::default(),
			pending_recipe: None,
			base_currency: config.currency.clone(),
			lenient_mode: lenient,
		};

		// make sure it exists and is a currency
		kitchen.base_currency()?;

		Ok(kitchen)
	}

	// -----------
	// -- UNITS --
	// -----------

	pub fn declare_unit(
		&mut self,
		symbol: &str,
		amount: Quant,
		reference: &str,
	) -> Result<(), Error> {
		let unit = self.units.define(symbol, amount, reference)?;
		debug!(unit = %unit, factor = %unit.factor(), "unit declared");
		Ok(())
	}

	pub fn unit(&self, symbol: &str) -> Result<Unit, Error> {
		Ok(self.units.lookup(symbol)?.clone())
	}

	pub fn currency(&self, symbol: &str) -> Result<&Unit, Error> {
		let unit = self.units.lookup(symbol)?;
		if unit.dimension() != Dimension::Currency {
			bail!("{} is not a currency", symbol);
		}
		Ok(unit)
	}

	pub fn base_currency(&self) -> Result<&Unit, Error> {
		self.currency(&self.base_currency)
	}

	/// Converts a price written in the given currency (or the base currency,
	/// if none) into the base currency.
	pub fn price_in_base(
		&self,
		amount: Quant,
		currency: Option<&str>,
	) -> Result<Quant, Error> {
		let base = self.base_currency()?;
		match currency {
			None => Ok(amount),
			Some(symbol) => {
				let from = self.currency(symbol)?;
				Ok(UnitTable::convert(amount, from, base)?)
			},
		}
	}

	// -------------
	// -- RECIPES --
	// -------------

	/// Starts a recipe block, closing any block still open.
	pub fn new_recipe(&mut self, name: &str, line: usize) -> Result<(), Error> {
		self.finish_recipe()?;

		self.pending_recipe = Some(RecipeDraft {
			name: name.trim().to_string(),
			line,
			portions: None,
			description: vec![],
			procedure: vec![],
			ingredients: vec![],
		});
		Ok(())
	}

	pub fn in_recipe(&self) -> bool {
		self.pending_recipe.is_some()
	}

	pub fn set_portions(&mut self, portions: Quant) -> Result<(), Error> {
		let draft = self.draft()?;
		if draft.portions.is_some() {
			bail!("Recipe {} serves more than one count", draft.name);
		}
		draft.portions = Some(portions);
		Ok(())
	}

	pub fn add_description(&mut self, text: &str) -> Result<(), Error> {
		self.draft()?.description.push(text.trim().to_string());
		Ok(())
	}

	pub fn add_step(&mut self, text: &str) -> Result<(), Error> {
		self.draft()?.procedure.push(text.trim().to_string());
		Ok(())
	}

	pub fn add_recipe_line(
		&mut self,
		name: &str,
		quantity: Quant,
		unit: &str,
	) -> Result<(), Error> {
		let unit = self.unit(unit)?;
		let ingredient = Ingredient::new(name, quantity, unit, Quant::zero())?;
		self.draft()?.ingredients.push(ingredient);
		Ok(())
	}

	/// Validates the open recipe block and adds it to the cookbook. Does
	/// nothing outside of a block.
	pub fn finish_recipe(&mut self) -> Result<(), Error> {
		let Some(draft) = self.pending_recipe.take() else {
			return Ok(());
		};

		let at = |e: String| {
			anyhow!("{} in recipe {} (line {})", e, draft.name, draft.line)
		};

		let portions = draft
			.portions
			.ok_or_else(|| at("missing serves".to_string()))?;

		let mut recipe = Recipe::new(
			&draft.name,
			&draft.description.join(" "),
			&draft.procedure.join("\n"),
			portions,
		)
		.map_err(|e| at(e.to_string()))?;

		for ingredient in draft.ingredients {
			recipe
				.add_ingredient(ingredient)
				.map_err(|e| at(e.to_string()))?;
		}

		debug!(
			recipe = %recipe.name(),
			lines = recipe.ingredients().len(),
			"recipe added"
		);

		if !self.cookbook.add(recipe) {
			bail!("Recipe {} defined twice (line {})", draft.name, draft.line);
		}

		Ok(())
	}

	fn draft(&mut self) -> Result<&mut RecipeDraft, Error> {
		self.pending_recipe
			.as_mut()
			.ok_or_else(|| anyhow!("Recipe detail outside of a recipe block"))
	}

	// ---------------
	// -- MOVEMENTS --
	// ---------------

	/// Records a purchase. Its expiration date may not precede the purchase
	/// date, except in lenient mode, where that only warns.
	pub fn buy(
		&mut self,
		date: Date,
		line: usize,
		ingredient: Ingredient,
		expires: Option<Date>,
	) -> Result<(), Error> {
		let ingredient = match expires {
			None => ingredient,
			Some(expires) if self.lenient_mode => {
				if expires < date {
					warn!(
						"{} bought on {} had already expired on {} (line {})",
						ingredient.name(),
						date,
						expires,
						line
					);
				}
				ingredient.with_expiry(expires, &Date::min())?
			},
			Some(expires) => ingredient.with_expiry(expires, &date)?,
		};

		self.movements.add_movement(Movement {
			date,
			kind: MovementKind::Buy(ingredient),
			line,
		});
		Ok(())
	}

	pub fn use_stock(
		&mut self,
		date: Date,
		line: usize,
		name: &str,
		quantity: Quant,
		unit: &str,
	) -> Result<(), Error> {
		let unit = self.unit(unit)?;
		self.movements.add_movement(Movement {
			date,
			kind: MovementKind::Use {
				name: name.trim().to_string(),
				quantity,
				unit,
			},
			line,
		});
		Ok(())
	}

	pub fn cook(&mut self, date: Date, line: usize, recipe: &str) {
		self.movements.add_movement(Movement {
			date,
			kind: MovementKind::Cook {
				recipe: recipe.trim().to_string(),
			},
			line,
		});
	}

	/// Closes any open recipe and replays all movements into the stock they
	/// leave behind.
	pub fn finalize(&mut self) -> Result<Inventory, Error> {
		self.finish_recipe()?;
		self.movements.tabulate(&self.cookbook)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::config_file::UnitDefinition;

	fn q(input: &str) -> Quant {
		input.parse().unwrap()
	}

	fn d(input: &str) -> Date {
		input.parse().unwrap()
	}

	fn kitchen(lenient: bool) -> Kitchen {
		Kitchen::new(&Config::default(), lenient).unwrap()
	}

	fn flour(kitchen: &Kitchen, quantity: &str) -> Ingredient {
		Ingredient::new("Flour", q(quantity), kitchen.unit("g").unwrap(), q("12"))
			.unwrap()
	}

	#[test]
	fn test_config_units_and_rates() {
		let mut config = Config::default();
		config.rates.insert("USD".to_string(), "0.5".to_string());
		config.units.insert(
			"pinch".to_string(),
			UnitDefinition {
				amount: "0.35".to_string(),
				unit: "g".to_string(),
			},
		);

		let kitchen = Kitchen::new(&config, false).unwrap();
		assert_eq!(kitchen.unit("pinch").unwrap().factor(), q("0.35"));
		assert_eq!(kitchen.price_in_base(q("10"), Some("usd")).unwrap(), q("5"));
		assert_eq!(kitchen.price_in_base(q("10"), None).unwrap(), q("10"));
	}

	#[test]
	fn test_base_currency_must_be_a_currency() {
		let config = Config {
			currency: "kg".to_string(),
			..Default::default()
		};
		assert!(Kitchen::new(&config, false).is_err());

		let config = Config {
			currency: "DOUBLOON".to_string(),
			..Default::default()
		};
		assert!(Kitchen::new(&config, false).is_err());
	}

	#[test]
	fn test_price_in_non_currency_fails() {
		let kitchen = kitchen(false);
		assert!(kitchen.price_in_base(q("1"), Some("g")).is_err());
	}

	#[test]
	fn test_recipe_block() {
		let mut kitchen = kitchen(false);
		kitchen.new_recipe("Pancakes", 1).unwrap();
		kitchen.set_portions(q("4")).unwrap();
		kitchen.add_description("Fluffy").unwrap();
		kitchen.add_description("pancakes").unwrap();
		kitchen.add_step("Whisk.").unwrap();
		kitchen.add_step("Fry.").unwrap();
		kitchen.add_recipe_line("Flour", q("250"), "g").unwrap();
		kitchen.add_recipe_line("flour", q("0.05"), "kg").unwrap();
		kitchen.finish_recipe().unwrap();

		assert!(!kitchen.in_recipe());
		let recipe = kitchen.cookbook.search("pancakes").unwrap();
		assert_eq!(recipe.description(), "Fluffy pancakes");
		assert_eq!(recipe.procedure(), "Whisk.\nFry.");
		assert_eq!(recipe.ingredients().len(), 1);
		assert_eq!(recipe.ingredients()[0].quantity(), q("300"));
	}

	#[test]
	fn test_recipe_block_requires_fields() {
		let mut kitchen = kitchen(false);
		kitchen.new_recipe("Toast", 3).unwrap();
		kitchen.add_description("Crunchy").unwrap();
		kitchen.add_step("Toast it").unwrap();
		let err = kitchen.finish_recipe().unwrap_err();
		assert_eq!(err.to_string(), "missing serves in recipe Toast (line 3)");

		kitchen.new_recipe("Toast", 5).unwrap();
		kitchen.set_portions(q("1")).unwrap();
		assert!(kitchen.finish_recipe().is_err());
	}

	#[test]
	fn test_duplicate_recipe() {
		let mut kitchen = kitchen(false);
		for line in [1, 10] {
			kitchen.new_recipe("Toast", line).unwrap();
			kitchen.set_portions(q("1")).unwrap();
			kitchen.add_description("Crunchy").unwrap();
			kitchen.add_step("Toast it").unwrap();
		}
		// starting the second block closed the first
		let err = kitchen.finish_recipe().unwrap_err();
		assert_eq!(err.to_string(), "Recipe Toast defined twice (line 10)");
		assert_eq!(kitchen.cookbook.len(), 1);
	}

	#[test]
	fn test_detail_outside_recipe() {
		let mut kitchen = kitchen(false);
		assert!(kitchen.set_portions(q("1")).is_err());
		assert!(kitchen.add_recipe_line("Flour", q("1"), "g").is_err());
	}

	#[test]
	fn test_buy_validates_expiry_against_purchase_date() {
		let mut kitchen = kitchen(false);
		let ingredient = flour(&kitchen, "100");
		assert!(kitchen
			.buy(d("2026-01-10"), 1, ingredient, Some(d("2026-01-09")))
			.is_err());

		let mut lenient = self::kitchen(true);
		let ingredient = flour(&lenient, "100");
		lenient
			.buy(d("2026-01-10"), 1, ingredient, Some(d("2026-01-09")))
			.unwrap();
		let inventory = lenient.finalize().unwrap();
		let batch = &inventory.search("flour")[0];
		assert_eq!(batch.expires(), Some(d("2026-01-09")));
	}

	#[test]
	fn test_finalize_replays_movements() {
		let mut kitchen = kitchen(false);
		let ingredient = flour(&kitchen, "2000");
		kitchen
			.buy(d("2026-01-02"), 1, ingredient, Some(d("2026-01-15")))
			.unwrap();
		kitchen
			.use_stock(d("2026-01-05"), 2, "flour", q("0.3"), "kg")
			.unwrap();
		assert!(kitchen
			.use_stock(d("2026-01-05"), 3, "flour", q("1"), "parsec")
			.is_err());

		let inventory = kitchen.finalize().unwrap();
		assert_eq!(inventory.quantity_of("flour"), q("1700"));
	}
}
