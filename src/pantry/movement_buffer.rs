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

use crate::error::PantryError;
use crate::pantry::inventory::Inventory;
use crate::pantry::movement::{Movement, MovementKind};
use crate::recipes::cookbook::Cookbook;
use anyhow::{anyhow, Error};

/// Stores movements until they are all in, at which time this sorts them and
/// replays them into an Inventory.
#[derive(Debug, Default)]
pub struct MovementBuffer {
	movements: Vec<Movement>, // all movements, unordered
}

impl MovementBuffer {
	pub fn add_movement(&mut self, movement: Movement) {
		self.movements.push(movement);
	}

	/// Applies all movements in chronological order; within a day, buys
	/// before uses before cooking, and otherwise in journal order. Fails on
	/// the first movement the stock cannot satisfy.
	pub fn tabulate(&mut self, cookbook: &Cookbook) -> Result<Inventory, Error> {
		// stable, so journal order breaks ties
		self.movements.sort_by_key(|m| (m.date, m.kind.rank()));

		let mut inventory = Inventory::new();

		for movement in &self.movements {
			let at = |e: PantryError| {
				anyhow!("{} on {} (line {})", e, movement.date, movement.line)
			};

			match &movement.kind {
				MovementKind::Buy(ingredient) => {
					inventory.add(ingredient.clone()).map_err(at)?;
				},
				MovementKind::Use {
					name,
					quantity,
					unit,
				} => {
					inventory.remove_in(name, *quantity, unit).map_err(at)?;
				},
				MovementKind::Cook { recipe } => {
					let recipe = cookbook.search(recipe).ok_or_else(|| {
						anyhow!(
							"Unknown recipe {} on {} (line {})",
							recipe,
							movement.date,
							movement.line
						)
					})?;
					inventory.consume_recipe(recipe).map_err(at)?;
				},
			}
		}

		Ok(inventory)
	}
}
