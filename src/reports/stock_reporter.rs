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
use crate::pantry::ingredient::Ingredient;
use crate::pantry::inventory::Inventory;
use crate::reports::currency::DisplayCurrency;
use crate::reports::table::Table;
use crate::util::date::Date;

/// Reports over what is currently in storage
pub struct StockReporter<'a> {
	inventory: &'a Inventory,
	currency: DisplayCurrency,
	as_of: Date,
}

impl<'a> StockReporter<'a> {
	pub fn new(
		inventory: &'a Inventory,
		currency: DisplayCurrency,
		as_of: Date,
	) -> Self {
		Self {
			inventory,
			currency,
			as_of,
		}
	}

	pub fn print_stock(&self) {
		print_or_no_data(self.stock_table());
	}

	pub fn print_find(&self, name: &str) {
		let batches = self.inventory.search(name);
		print_or_no_data(self.batch_table(batches.iter()));
	}

	pub fn print_expired(&self) {
		let batches = self.inventory.expired_before(&self.as_of);
		print_or_no_data(self.batch_table(batches.into_iter()));
	}

	pub fn print_expiring(&self, window_days: u64) {
		print_or_no_data(self.expiring_table(window_days));
	}

	pub fn print_value(&self, weighted: bool) {
		print_or_no_data(self.value_table(weighted));
	}

	/// One line per ingredient name, alphabetically
	fn stock_table(&self) -> Option<Table> {
		if self.inventory.is_empty() {
			return None;
		}

		let mut table = Table::new(5);
		table.right_align(vec![1, 3]);
		table.add_header(vec!["Name", "Qty", "Unit", "Batches", "Next expiry"]);
		table.add_separator();

		for line in self.inventory.alphabetical_listing() {
			table.add_row(vec![
				line.name.to_string(),
				line.quantity.to_string(),
				line.unit.to_string(),
				line.batches.to_string(),
				line.next_expiry.map_or("-".to_string(), |d| d.to_string()),
			]);
		}

		Some(table)
	}

	/// Batches expiring from the as-of date up to the end of the window.
	/// Anything already past its date belongs to the expired report.
	fn expiring_table(&self, window_days: u64) -> Option<Table> {
		let until = self.as_of.plus_days(window_days as i64);
		let batches = self
			.inventory
			.expiring_after(&self.as_of.plus_days(-1))
			.into_iter()
			.filter(|b| b.expires().is_some_and(|e| e <= until));

		self.batch_table(batches)
	}

	fn batch_table<'b>(
		&self,
		batches: impl Iterator<Item = &'b Ingredient>,
	) -> Option<Table> {
		let mut table = Table::new(6);
		table.right_align(vec![1, 4, 5]);
		table.add_header(vec![
			"Name",
			"Qty",
			"Unit",
			"Expires",
			"Days left",
			"Price",
		]);
		table.add_separator();

		let mut any = false;
		for batch in batches {
			any = true;
			table.add_row(vec![
				batch.name().to_string(),
				batch.quantity().to_string(),
				batch.unit().to_string(),
				batch.expires().map_or("-".to_string(), |d| d.to_string()),
				batch
					.days_left(&self.as_of)
					.map_or("-".to_string(), |d| d.to_string()),
				self.currency.render(batch.price()),
			]);
		}

		any.then_some(table)
	}

	fn value_table(&self, weighted: bool) -> Option<Table> {
		if self.inventory.is_empty() {
			return None;
		}

		let value = |batches: &[Ingredient]| {
			if weighted {
				Inventory::total_value_weighted(batches)
			} else {
				Inventory::total_value(batches)
			}
		};

		let mut table = Table::new(2);
		table.right_align(vec![1]);
		table.add_header(vec!["Name", "Value"]);
		table.add_separator();

		for line in self.inventory.alphabetical_listing() {
			let batches = self.inventory.search(line.name);
			table.add_row(vec![
				line.name.to_string(),
				self.currency.render(value(batches.as_slice())),
			]);
		}

		let batches: Vec<Ingredient> =
			self.inventory.batches().cloned().collect();
		table.add_separator();
		table.add_row(vec![
			"Total".to_string(),
			self.currency.render(value(batches.as_slice())),
		]);

		Some(table)
	}
}

pub fn print_or_no_data(table: Option<Table>) {
	match table {
		Some(table) => table.print(),
		None => println!("No data"),
	}
}
