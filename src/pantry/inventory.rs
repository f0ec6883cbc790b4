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
use crate::error::{PantryError, PantryResult};
use crate::pantry::ingredient::{name_key, Ingredient};
use crate::pantry::unit::{Unit, UnitTable};
use crate::recipes::recipe::Recipe;
use crate::util::date::Date;
use crate::util::quant::Quant;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// The food storage: every batch currently held, grouped by
/// case-insensitive ingredient name.
///
/// Batches of the same name share one stock unit (that of the first batch
/// added); later additions are converted into it, so quantities under a
/// name can always be summed directly. A name never maps to an empty list
/// and no batch ever holds zero.
#[derive(Debug, Default, Clone)]
pub struct Inventory {
	/// lowercased name -> holding
	stock: BTreeMap<String, Holding>,
}

/// Everything held under one name. The display spelling and stock unit are
/// fixed by the first batch and outlive it.
#[derive(Debug, Clone)]
struct Holding {
	name: String,
	unit: Unit,
	/// insertion order
	batches: Vec<Ingredient>,
}

impl Holding {
	fn quantity(&self) -> Quant {
		self.batches.iter().map(|b| b.quantity()).sum()
	}
}

/// One recipe line the inventory cannot cover, in the line's own unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortage {
	pub name: String,
	pub needed: Quant,
	pub available: Quant,
	pub unit: Unit,
}

impl Inventory {
	pub fn new() -> Self {
		Self::default()
	}

	// -----------
	// -- INPUT --
	// -----------

	/// Merges the ingredient into the batch with the same expiration date and
	/// price, or appends it as a new batch.
	pub fn add(&mut self, mut ingredient: Ingredient) -> PantryResult<()> {
		let key = ingredient.key();

		if let Some(unit) = self.stock_unit(&key) {
			if unit != ingredient.unit() {
				let unit = unit.clone();
				ingredient.convert_to(&unit)?;
			}
		}

		let holding = self.stock.entry(key).or_insert_with(|| Holding {
			name: ingredient.name().to_string(),
			unit: ingredient.unit().clone(),
			batches: vec![],
		});
		match holding.batches.iter_mut().find(|b| b.same_batch(&ingredient)) {
			Some(batch) => batch.increase_quantity(ingredient.quantity())?,
			None => holding.batches.push(ingredient),
		}

		Ok(())
	}

	/// Takes the given quantity (in the stock unit) out of the named
	/// ingredient, earliest expiration first. Batches without a date go last.
	/// Either the whole quantity is removed or nothing is; returns the
	/// quantity removed.
	pub fn remove(&mut self, name: &str, quantity: Quant) -> PantryResult<Quant> {
		if !quantity.is_positive() {
			return Err(PantryError::invalid_quantity(
				quantity,
				format!("removal of {} must be greater than zero", name.trim()),
			));
		}

		let key = name_key(name);
		let holding = self.stock.get_mut(&key).ok_or_else(|| {
			PantryError::NotFound {
				kind: "ingredient",
				name: name.trim().to_string(),
			}
		})?;

		let available = holding.quantity();
		if quantity > available {
			return Err(PantryError::InsufficientStock {
				name: holding.name.clone(),
				requested: quantity,
				available,
				unit: holding.unit.symbol().to_string(),
			});
		}

		// the batches themselves stay in insertion order; the sort is stable,
		// so equal dates are taken in that order too
		let batches = &mut holding.batches;
		let mut order: Vec<usize> = (0..batches.len()).collect();
		order.sort_by_key(|&i| {
			(batches[i].expires().is_none(), batches[i].expires())
		});

		let mut remaining = quantity;
		for i in order {
			if remaining.is_zero() {
				break;
			}
			let taken = remaining.min(batches[i].quantity());
			batches[i].decrease_quantity(taken)?;
			remaining -= taken;
		}

		batches.retain(|b| !b.quantity().is_zero());
		if batches.is_empty() {
			self.stock.remove(&key);
		}

		Ok(quantity - remaining)
	}

	/// Like `remove`, with the quantity given in any compatible unit. Returns
	/// the quantity removed, in the stock unit.
	pub fn remove_in(
		&mut self,
		name: &str,
		quantity: Quant,
		unit: &Unit,
	) -> PantryResult<Quant> {
		let stock_unit =
			self.stock_unit(name).ok_or_else(|| PantryError::NotFound {
				kind: "ingredient",
				name: name.trim().to_string(),
			})?;

		let converted = UnitTable::convert(quantity, unit, stock_unit)?;
		self.remove(name, converted)
	}

	/// Removes every line of the recipe. Nothing is touched unless all
	/// lines are covered.
	pub fn consume_recipe(&mut self, recipe: &Recipe) -> PantryResult<()> {
		if let Some(shortage) = self.shortages(recipe)?.into_iter().next() {
			return Err(PantryError::InsufficientStock {
				name: shortage.name,
				requested: shortage.needed,
				available: shortage.available,
				unit: shortage.unit.symbol().to_string(),
			});
		}

		for line in recipe.ingredients() {
			self.remove_in(line.name(), line.quantity(), line.unit())?;
		}

		Ok(())
	}

	// -------------
	// -- QUERIES --
	// -------------

	pub fn len(&self) -> usize {
		self.stock.len()
	}

	pub fn is_empty(&self) -> bool {
		self.stock.is_empty()
	}

	/// All batches held under the name, or nothing.
	pub fn search(&self, name: &str) -> Vec<Ingredient> {
		self.stock
			.get(&name_key(name))
			.map(|holding| holding.batches.clone())
			.unwrap_or_default()
	}

	/// Every batch, alphabetically by name.
	pub fn batches(&self) -> impl Iterator<Item = &Ingredient> {
		self.stock.values().flat_map(|holding| holding.batches.iter())
	}

	pub fn stock_unit(&self, name: &str) -> Option<&Unit> {
		self.stock.get(&name_key(name)).map(|holding| &holding.unit)
	}

	/// Raw total held under the name, in its stock unit.
	pub fn quantity_of(&self, name: &str) -> Quant {
		self.stock
			.get(&name_key(name))
			.map(Holding::quantity)
			.unwrap_or_default()
	}

	/// Total held under the name, expressed in the given unit. Zero when
	/// nothing is held.
	pub fn available_in(&self, name: &str, unit: &Unit) -> PantryResult<Quant> {
		match self.stock_unit(name) {
			None => Ok(Quant::zero()),
			Some(stock_unit) => {
				UnitTable::convert(self.quantity_of(name), stock_unit, unit)
			},
		}
	}

	/// Batches whose expiration date lies strictly before the date, soonest
	/// first. Non-perishables never expire.
	pub fn expired_before(&self, date: &Date) -> Vec<&Ingredient> {
		self.sorted_by_expiry(|expires| &expires < date)
	}

	/// Batches whose expiration date lies strictly after the date, soonest
	/// first. Non-perishables are left out.
	pub fn expiring_after(&self, date: &Date) -> Vec<&Ingredient> {
		self.sorted_by_expiry(|expires| &expires > date)
	}

	fn sorted_by_expiry(&self, keep: impl Fn(Date) -> bool) -> Vec<&Ingredient> {
		let mut out: Vec<&Ingredient> = self
			.batches()
			.filter(|b| b.expires().is_some_and(&keep))
			.collect();
		out.sort_by_key(|b| b.expires());
		out
	}

	/// Sum of the recorded prices. Each price is what was paid for the
	/// batch, so quantity does not enter into it.
	pub fn total_value<'a>(
		ingredients: impl IntoIterator<Item = &'a Ingredient>,
	) -> Quant {
		ingredients.into_iter().map(|i| i.price()).sum()
	}

	/// Sum of price times quantity, for journals that record unit prices.
	pub fn total_value_weighted<'a>(
		ingredients: impl IntoIterator<Item = &'a Ingredient>,
	) -> Quant {
		ingredients
			.into_iter()
			.map(|i| i.price() * i.quantity())
			.sum()
	}

	/// Lines of the recipe that current stock does not cover, after unit
	/// conversion. Fails if any line's unit cannot be converted to the stock
	/// unit of its ingredient.
	pub fn shortages(&self, recipe: &Recipe) -> PantryResult<Vec<Shortage>> {
		let mut out = vec![];

		for line in recipe.ingredients() {
			let available = self.available_in(line.name(), line.unit())?;
			if available < line.quantity() {
				out.push(Shortage {
					name: line.name().to_string(),
					needed: line.quantity(),
					available,
					unit: line.unit().clone(),
				});
			}
		}

		Ok(out)
	}

	pub fn has_enough_for_recipe(&self, recipe: &Recipe) -> PantryResult<bool> {
		Ok(self.shortages(recipe)?.is_empty())
	}

	/// Raw quantity held for each line of the recipe, in stock units.
	pub fn availability_for(&self, recipe: &Recipe) -> BTreeMap<String, Quant> {
		recipe
			.ingredients()
			.iter()
			.map(|line| (line.name().to_string(), self.quantity_of(line.name())))
			.collect()
	}

	/// Names in case-insensitive alphabetical order with their totals. Each
	/// call starts over, and the listing itself can be cloned to re-walk it.
	pub fn alphabetical_listing(&self) -> Listing<'_> {
		Listing {
			inner: self.stock.values(),
		}
	}
}

/// A stock position as listed by `Inventory::alphabetical_listing`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLine<'a> {
	pub name: &'a str,
	pub quantity: Quant,
	pub unit: &'a Unit,
	pub batches: usize,
	pub next_expiry: Option<Date>,
}

#[derive(Clone)]
pub struct Listing<'a> {
	inner: btree_map::Values<'a, String, Holding>,
}

impl<'a> Iterator for Listing<'a> {
	type Item = StockLine<'a>;

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|holding| StockLine {
			name: &holding.name,
			quantity: holding.quantity(),
			unit: &holding.unit,
			batches: holding.batches.len(),
			next_expiry: holding.batches.iter().filter_map(|b| b.expires()).min(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn q(input: &str) -> Quant {
		input.parse().unwrap()
	}

	fn d(input: &str) -> Date {
		input.parse().unwrap()
	}

	fn unit(symbol: &str) -> Unit {
		UnitTable::standard().lookup(symbol).unwrap().clone()
	}

	fn batch(
		name: &str,
		quantity: &str,
		symbol: &str,
		expires: Option<&str>,
		price: &str,
	) -> Ingredient {
		let ingredient =
			Ingredient::new(name, q(quantity), unit(symbol), q(price)).unwrap();
		match expires {
			Some(date) => ingredient.with_expiry(d(date), &Date::min()).unwrap(),
			None => ingredient,
		}
	}

	fn recipe(lines: &[(&str, &str, &str)]) -> Recipe {
		let mut recipe =
			Recipe::new("Pancakes", "Breakfast", "Mix and fry", q("4")).unwrap();
		for (name, quantity, symbol) in lines {
			recipe
				.add_ingredient(
					Ingredient::new(name, q(quantity), unit(symbol), Quant::zero())
						.unwrap(),
				)
				.unwrap();
		}
		recipe
	}

	mod add {
		use super::*;

		#[test]
		fn test_same_date_and_price_merge() {
			let mut inventory = Inventory::new();
			inventory
				.add(batch("Flour", "2000", "g", Some("2026-01-15"), "12"))
				.unwrap();
			inventory
				.add(batch("flour", "500", "g", Some("2026-01-15"), "12"))
				.unwrap();

			let batches = inventory.search("FLOUR");
			assert_eq!(batches.len(), 1);
			assert_eq!(batches[0].quantity(), q("2500"));
			assert_eq!(batches[0].name(), "Flour");
		}

		#[test]
		fn test_different_price_or_date_append() {
			let mut inventory = Inventory::new();
			inventory
				.add(batch("Flour", "2000", "g", Some("2026-01-15"), "12"))
				.unwrap();
			inventory
				.add(batch("Flour", "500", "g", Some("2026-01-15"), "13"))
				.unwrap();
			inventory
				.add(batch("Flour", "500", "g", Some("2026-02-15"), "12"))
				.unwrap();
			inventory.add(batch("Flour", "1", "kg", None, "12")).unwrap();

			assert_eq!(inventory.len(), 1);
			assert_eq!(inventory.search("flour").len(), 4);
			assert_eq!(inventory.quantity_of("Flour"), q("4000"));
		}

		#[test]
		fn test_converts_into_stock_unit() {
			let mut inventory = Inventory::new();
			inventory.add(batch("Milk", "1", "l", None, "1")).unwrap();
			inventory.add(batch("Milk", "500", "ml", None, "1")).unwrap();

			let batches = inventory.search("milk");
			assert_eq!(batches.len(), 1);
			assert_eq!(batches[0].quantity(), q("1.5"));
			assert_eq!(inventory.stock_unit("milk").unwrap().symbol(), "l");
		}

		#[test]
		fn test_incompatible_unit_leaves_stock_alone() {
			let mut inventory = Inventory::new();
			inventory.add(batch("Milk", "1", "l", None, "1")).unwrap();
			assert!(matches!(
				inventory.add(batch("Milk", "1", "kg", None, "1")),
				Err(PantryError::IncompatibleUnits { .. })
			));
			assert_eq!(inventory.search("milk").len(), 1);
			assert_eq!(inventory.quantity_of("milk"), q("1"));
		}
	}

	mod remove {
		use super::*;

		fn three_batches() -> Inventory {
			let mut inventory = Inventory::new();
			// added out of order on purpose
			inventory
				.add(batch("Milk", "300", "ml", Some("2026-01-12"), "1"))
				.unwrap();
			inventory
				.add(batch("Milk", "100", "ml", Some("2026-01-10"), "1"))
				.unwrap();
			inventory
				.add(batch("Milk", "200", "ml", Some("2026-01-11"), "1"))
				.unwrap();
			inventory
		}

		#[test]
		fn test_fifo_by_expiration() {
			let mut inventory = three_batches();
			let removed = inventory.remove("milk", q("250")).unwrap();
			assert_eq!(removed, q("250"));

			// remaining batches keep the order they were added in
			let batches = inventory.search("milk");
			assert_eq!(batches.len(), 2);
			assert_eq!(batches[0].expires(), Some(d("2026-01-12")));
			assert_eq!(batches[0].quantity(), q("300"));
			assert_eq!(batches[1].expires(), Some(d("2026-01-11")));
			assert_eq!(batches[1].quantity(), q("50"));
		}

		#[test]
		fn test_exact_batch_boundary() {
			let mut inventory = three_batches();
			inventory.remove("milk", q("100")).unwrap();

			let batches = inventory.search("milk");
			assert_eq!(batches.len(), 2);
			assert_eq!(batches[0].quantity(), q("300"));
			assert_eq!(batches[1].quantity(), q("200"));
		}

		#[test]
		fn test_first_spelling_and_unit_survive_removal() {
			let mut inventory = Inventory::new();
			inventory
				.add(batch("Rice", "1", "kg", Some("2027-01-01"), "4"))
				.unwrap();
			inventory.add(batch("rice", "500", "g", None, "2")).unwrap();

			inventory.remove("RICE", q("0.25")).unwrap();
			let line = inventory.alphabetical_listing().next().unwrap();
			assert_eq!(line.name, "Rice");
			assert_eq!(line.unit.symbol(), "kg");
			assert_eq!(line.quantity, q("1.25"));

			// the first batch is used up, the name it was added under stays
			inventory.remove("rice", q("0.8")).unwrap();
			assert_eq!(inventory.search("rice")[0].name(), "rice");
			let line = inventory.alphabetical_listing().next().unwrap();
			assert_eq!(line.name, "Rice");
			assert_eq!(line.batches, 1);
			assert_eq!(inventory.stock_unit("rice").unwrap().symbol(), "kg");
			assert_eq!(
				inventory.remove("rice", q("1")),
				Err(PantryError::InsufficientStock {
					name: "Rice".to_string(),
					requested: q("1"),
					available: q("0.45"),
					unit: "kg".to_string(),
				})
			);
		}

		#[test]
		fn test_dateless_batches_go_last() {
			let mut inventory = Inventory::new();
			inventory.add(batch("Rice", "500", "g", None, "2")).unwrap();
			inventory
				.add(batch("Rice", "100", "g", Some("2027-01-01"), "2"))
				.unwrap();

			inventory.remove("rice", q("150")).unwrap();

			let batches = inventory.search("rice");
			assert_eq!(batches.len(), 1);
			assert_eq!(batches[0].expires(), None);
			assert_eq!(batches[0].quantity(), q("450"));
		}

		#[test]
		fn test_over_request_changes_nothing() {
			let mut inventory = three_batches();
			let before = inventory.search("milk");

			assert_eq!(
				inventory.remove("Milk", q("601")),
				Err(PantryError::InsufficientStock {
					name: "Milk".to_string(),
					requested: q("601"),
					available: q("600"),
					unit: "ml".to_string(),
				})
			);
			assert_eq!(inventory.search("milk"), before);
		}

		#[test]
		fn test_unknown_name() {
			let mut inventory = three_batches();
			assert!(matches!(
				inventory.remove("Cream", q("1")),
				Err(PantryError::NotFound { .. })
			));
		}

		#[test]
		fn test_non_positive_quantity() {
			let mut inventory = three_batches();
			assert!(matches!(
				inventory.remove("milk", Quant::zero()),
				Err(PantryError::InvalidQuantity { .. })
			));
			assert!(matches!(
				inventory.remove("milk", q("-1")),
				Err(PantryError::InvalidQuantity { .. })
			));
		}

		#[test]
		fn test_emptied_name_disappears() {
			let mut inventory = three_batches();
			assert_eq!(inventory.remove("MILK", q("600")).unwrap(), q("600"));
			assert!(inventory.stock_unit("milk").is_none());
			assert!(inventory.is_empty());
			assert!(inventory.search("milk").is_empty());
		}

		#[test]
		fn test_remove_in_other_unit() {
			let mut inventory = three_batches();
			let removed = inventory
				.remove_in("milk", q("0.25"), &unit("l"))
				.unwrap();
			assert_eq!(removed, q("250"));
			assert_eq!(inventory.quantity_of("milk"), q("350"));

			assert!(matches!(
				inventory.remove_in("milk", q("1"), &unit("g")),
				Err(PantryError::IncompatibleUnits { .. })
			));
			assert!(matches!(
				inventory.remove_in("cream", q("1"), &unit("l")),
				Err(PantryError::NotFound { .. })
			));
		}
	}

	mod queries {
		use super::*;

		fn stocked() -> Inventory {
			let mut inventory = Inventory::new();
			inventory
				.add(batch("Milk", "1", "l", Some("2026-01-10"), "1.2"))
				.unwrap();
			inventory
				.add(batch("Flour", "2", "kg", Some("2026-03-01"), "3"))
				.unwrap();
			inventory
				.add(batch("apples", "6", "pcs", Some("2026-01-12"), "2.5"))
				.unwrap();
			inventory.add(batch("Salt", "1", "kg", None, "0.8")).unwrap();
			inventory
		}

		#[test]
		fn test_search_is_case_insensitive() {
			let inventory = stocked();
			assert_eq!(inventory.search("mIlK").len(), 1);
			assert!(inventory.search("cream").is_empty());
		}

		#[test]
		fn test_expired_before() {
			let inventory = stocked();
			let expired = inventory.expired_before(&d("2026-01-12"));
			let names: Vec<&str> = expired.iter().map(|b| b.name()).collect();
			// the apples expire on the 12th, so are not yet expired
			assert_eq!(names, vec!["Milk"]);

			let all = inventory.expired_before(&Date::max());
			let names: Vec<&str> = all.iter().map(|b| b.name()).collect();
			assert_eq!(names, vec!["Milk", "apples", "Flour"]);
		}

		#[test]
		fn test_expiring_after() {
			let inventory = stocked();
			let expiring = inventory.expiring_after(&d("2026-01-10"));
			let names: Vec<&str> = expiring.iter().map(|b| b.name()).collect();
			assert_eq!(names, vec!["apples", "Flour"]);
			assert!(inventory.expiring_after(&d("2026-03-01")).is_empty());
		}

		#[test]
		fn test_total_value_is_sum_of_prices() {
			let inventory = stocked();
			assert_eq!(Inventory::total_value(inventory.batches()), q("7.5"));
			assert_eq!(
				Inventory::total_value(&inventory.search("apples")),
				q("2.5")
			);
			let none = Vec::<&Ingredient>::new();
			assert_eq!(Inventory::total_value(none), Quant::zero());
		}

		#[test]
		fn test_total_value_weighted() {
			let inventory = stocked();
			// 1 * 1.2 + 2 * 3 + 6 * 2.5 + 1 * 0.8
			assert_eq!(
				Inventory::total_value_weighted(inventory.batches()),
				q("23")
			);
		}

		#[test]
		fn test_alphabetical_listing() {
			let mut inventory = stocked();
			inventory
				.add(batch("Milk", "500", "ml", Some("2026-01-08"), "0.7"))
				.unwrap();

			let listing = inventory.alphabetical_listing();
			let names: Vec<&str> = listing.clone().map(|l| l.name).collect();
			assert_eq!(names, vec!["apples", "Flour", "Milk", "Salt"]);

			// restartable
			assert_eq!(listing.count(), 4);
			let milk = inventory
				.alphabetical_listing()
				.find(|l| l.name == "Milk")
				.unwrap();
			assert_eq!(milk.quantity, q("1.5"));
			assert_eq!(milk.unit.symbol(), "l");
			assert_eq!(milk.batches, 2);
			assert_eq!(milk.next_expiry, Some(d("2026-01-08")));
		}
	}

	mod feasibility {
		use super::*;

		#[test]
		fn test_converts_units_for_feasibility() {
			let mut inventory = Inventory::new();
			inventory.add(batch("Milk", "1000", "ml", None, "1")).unwrap();

			let needs_a_litre = recipe(&[("milk", "1", "l")]);
			assert_eq!(inventory.has_enough_for_recipe(&needs_a_litre), Ok(true));

			let needs_more = recipe(&[("milk", "1.001", "l")]);
			assert_eq!(inventory.has_enough_for_recipe(&needs_more), Ok(false));
		}

		#[test]
		fn test_dimension_mismatch_is_an_error() {
			let mut inventory = Inventory::new();
			inventory.add(batch("Flour", "1", "kg", None, "1")).unwrap();

			let by_volume = recipe(&[("Flour", "1", "l")]);
			assert!(matches!(
				inventory.has_enough_for_recipe(&by_volume),
				Err(PantryError::IncompatibleUnits { .. })
			));
		}

		#[test]
		fn test_missing_ingredient_is_not_enough() {
			let inventory = Inventory::new();
			let recipe = recipe(&[("Eggs", "2", "pcs")]);
			assert_eq!(inventory.has_enough_for_recipe(&recipe), Ok(false));
			assert_eq!(
				inventory.shortages(&recipe).unwrap(),
				vec![Shortage {
					name: "Eggs".to_string(),
					needed: q("2"),
					available: Quant::zero(),
					unit: unit("pcs"),
				}]
			);
		}

		#[test]
		fn test_empty_recipe_is_feasible() {
			let inventory = Inventory::new();
			assert_eq!(inventory.has_enough_for_recipe(&recipe(&[])), Ok(true));
		}

		#[test]
		fn test_availability_is_raw() {
			let mut inventory = Inventory::new();
			inventory.add(batch("Milk", "750", "ml", None, "1")).unwrap();
			let recipe = recipe(&[("Milk", "1", "l"), ("Eggs", "2", "pcs")]);

			let availability = inventory.availability_for(&recipe);
			assert_eq!(availability.get("Milk"), Some(&q("750")));
			assert_eq!(availability.get("Eggs"), Some(&Quant::zero()));
		}

		#[test]
		fn test_consume_recipe() {
			let mut inventory = Inventory::new();
			inventory.add(batch("Milk", "1", "l", None, "1")).unwrap();
			inventory.add(batch("Eggs", "6", "pcs", None, "3")).unwrap();

			let pancakes = recipe(&[("Milk", "250", "ml"), ("Eggs", "2", "pcs")]);
			inventory.consume_recipe(&pancakes).unwrap();
			assert_eq!(inventory.quantity_of("milk"), q("0.75"));
			assert_eq!(inventory.quantity_of("eggs"), q("4"));
		}

		#[test]
		fn test_consume_recipe_is_all_or_nothing() {
			let mut inventory = Inventory::new();
			inventory.add(batch("Milk", "1", "l", None, "1")).unwrap();
			inventory.add(batch("Eggs", "1", "pcs", None, "3")).unwrap();

			let pancakes = recipe(&[("Milk", "250", "ml"), ("Eggs", "2", "pcs")]);
			assert!(matches!(
				inventory.consume_recipe(&pancakes),
				Err(PantryError::InsufficientStock { .. })
			));
			assert_eq!(inventory.quantity_of("milk"), q("1"));
			assert_eq!(inventory.quantity_of("eggs"), q("1"));
		}
	}

	#[test]
	fn test_end_to_end_flour() {
		let mut inventory = Inventory::new();
		inventory
			.add(batch("Flour", "2000", "g", Some("2026-01-15"), "12"))
			.unwrap();
		inventory
			.add(batch("Flour", "500", "g", Some("2026-01-15"), "12"))
			.unwrap();

		assert_eq!(inventory.search("flour").len(), 1);
		assert_eq!(inventory.quantity_of("flour"), q("2500"));

		match inventory.remove("Flour", q("3000")) {
			Err(PantryError::InsufficientStock { available, .. }) => {
				assert_eq!(available, q("2500"))
			},
			other => panic!("unexpected result: {:?}", other),
		}

		assert_eq!(inventory.remove("Flour", q("2500")).unwrap(), q("2500"));
		assert!(inventory.search("flour").is_empty());
	}
}
