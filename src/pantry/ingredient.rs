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
use crate::pantry::unit::{Unit, UnitTable};
use crate::util::date::Date;
use crate::util::quant::Quant;
use std::fmt;

/// Lookup key for ingredient and recipe names. Identity is
/// case-insensitive everywhere.
pub fn name_key(name: &str) -> String {
	name.trim().to_lowercase()
}

/// A quantity of one grocery. In the inventory this is a batch: one lot
/// bought at one price with one expiration date. In a recipe it is a
/// required line, which carries no date and usually no price.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ingredient {
	name: String,
	quantity: Quant, // never negative; positive when constructed
	unit: Unit,

	/// None means non-perishable
	expires: Option<Date>,
	price: Quant,
}

impl Ingredient {
	pub fn new(
		name: &str,
		quantity: Quant,
		unit: Unit,
		price: Quant,
	) -> PantryResult<Self> {
		let name = name.trim();
		if name.is_empty() {
			return Err(PantryError::validation("name", "must not be blank"));
		}
		if !quantity.is_positive() {
			return Err(PantryError::validation(
				"quantity",
				format!("{} of {} must be greater than zero", quantity, name),
			));
		}
		if price.is_negative() {
			return Err(PantryError::validation(
				"price",
				format!("{} of {} must not be negative", price, name),
			));
		}

		Ok(Self {
			name: name.to_string(),
			quantity,
			unit,
			expires: None,
			price,
		})
	}

	/// Marks the ingredient as perishable. The date may not lie before
	/// `as_of`, which is normally the day it was bought; pass `Date::min()`
	/// to accept anything.
	pub fn with_expiry(
		mut self,
		expires: Date,
		as_of: &Date,
	) -> PantryResult<Self> {
		if &expires < as_of {
			return Err(PantryError::validation(
				"expiration date",
				format!("{} expires {}, before {}", self.name, expires, as_of),
			));
		}

		self.expires = Some(expires);
		Ok(self)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn key(&self) -> String {
		name_key(&self.name)
	}

	pub fn quantity(&self) -> Quant {
		self.quantity
	}

	pub fn unit(&self) -> &Unit {
		&self.unit
	}

	pub fn expires(&self) -> Option<Date> {
		self.expires
	}

	pub fn price(&self) -> Quant {
		self.price
	}

	pub fn increase_quantity(&mut self, delta: Quant) -> PantryResult<()> {
		if delta.is_negative() {
			return Err(PantryError::invalid_quantity(
				delta,
				format!("cannot increase {} by a negative amount", self.name),
			));
		}

		self.quantity += delta;
		Ok(())
	}

	pub fn decrease_quantity(&mut self, delta: Quant) -> PantryResult<()> {
		if delta.is_negative() {
			return Err(PantryError::invalid_quantity(
				delta,
				format!("cannot decrease {} by a negative amount", self.name),
			));
		}
		if delta > self.quantity {
			return Err(PantryError::InsufficientStock {
				name: self.name.clone(),
				requested: delta,
				available: self.quantity,
				unit: self.unit.symbol().to_string(),
			});
		}

		self.quantity -= delta;
		Ok(())
	}

	/// Zero is allowed here; an emptied batch is dropped by its owner.
	pub fn set_quantity(&mut self, value: Quant) -> PantryResult<()> {
		if value.is_negative() {
			return Err(PantryError::invalid_quantity(
				value,
				format!("{} cannot hold a negative quantity", self.name),
			));
		}

		self.quantity = value;
		Ok(())
	}

	/// Re-expresses the quantity in another unit of the same dimension.
	pub fn convert_to(&mut self, unit: &Unit) -> PantryResult<()> {
		self.quantity = UnitTable::convert(self.quantity, &self.unit, unit)?;
		self.unit = unit.clone();
		Ok(())
	}

	/// Two batches are the same lot when they share a name, expiration date
	/// and price; their quantities may then be merged.
	pub fn same_batch(&self, other: &Ingredient) -> bool {
		self.key() == other.key()
			&& self.expires == other.expires
			&& self.price == other.price
	}

	/// Days from `as_of` until expiry; negative once expired.
	pub fn days_left(&self, as_of: &Date) -> Option<i64> {
		self.expires.map(|date| as_of.days_until(&date))
	}
}

impl fmt::Display for Ingredient {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {} {}", self.name, self.quantity, self.unit)?;
		if let Some(date) = self.expires {
			write!(f, " (exp {})", date)?;
		}
		Ok(())
	}
}
