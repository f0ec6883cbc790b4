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
use crate::pantry::unit::Unit;
use crate::util::date::Date;
use crate::util::quant::Quant;

/// A change to stock recorded in the journal. Movements are gathered first
/// and applied afterwards in date order, because the journal does not have
/// to be written in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Movement {
	pub date: Date,
	pub kind: MovementKind,

	/// Journal line, for error messages
	pub line: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MovementKind {
	Buy(Ingredient),
	Use {
		name: String,
		quantity: Quant,
		unit: Unit,
	},
	Cook {
		recipe: String,
	},
}

impl MovementKind {
	/// On the same day, purchases come before anything is used, so that the
	/// order of lines within a day does not matter.
	pub fn rank(&self) -> u8 {
		match self {
			MovementKind::Buy(_) => 0,
			MovementKind::Use { .. } => 1,
			MovementKind::Cook { .. } => 2,
		}
	}
}
