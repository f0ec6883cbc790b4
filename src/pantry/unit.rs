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
use crate::util::quant::Quant;
use std::collections::BTreeMap;
use std::fmt;

/// The physical category of a unit. Only units sharing a dimension can be
/// converted into each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
	Mass,
	Volume,
	Count,
	Currency,
}

impl fmt::Display for Dimension {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Dimension::Mass => "mass",
			Dimension::Volume => "volume",
			Dimension::Count => "count",
			Dimension::Currency => "currency",
		};
		write!(f, "{}", name)
	}
}

/// A unit of measure, expressed as a factor of its dimension's base unit
/// (grams, millilitres, pieces, euros).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Unit {
	symbol: String,
	dimension: Dimension,
	factor: Quant,
}

impl Unit {
	pub fn new(
		symbol: &str,
		dimension: Dimension,
		factor: Quant,
	) -> PantryResult<Self> {
		let symbol = symbol.trim();
		if symbol.is_empty() || symbol.contains(char::is_whitespace) {
			return Err(PantryError::validation(
				"unit symbol",
				format!("'{}' must be a single word", symbol),
			));
		}
		if !factor.is_positive() {
			return Err(PantryError::validation(
				"unit factor",
				format!("{} must be positive", factor),
			));
		}

		Ok(Self {
			symbol: symbol.to_string(),
			dimension,
			factor,
		})
	}

	pub fn symbol(&self) -> &str {
		&self.symbol
	}

	pub fn dimension(&self) -> Dimension {
		self.dimension
	}

	pub fn factor(&self) -> Quant {
		self.factor
	}

	pub fn is_compatible(&self, other: &Unit) -> bool {
		self.dimension == other.dimension
	}
}

impl fmt::Display for Unit {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.symbol)
	}
}

/// symbol, dimension, factor numerator, factor denominator
const STANDARD_UNITS: [(&str, Dimension, i128, i128); 19] = [
	("mg", Dimension::Mass, 1, 1000),
	("g", Dimension::Mass, 1, 1),
	("kg", Dimension::Mass, 1000, 1),
	("oz", Dimension::Mass, 28_349_523_125, 1_000_000_000),
	("lb", Dimension::Mass, 45_359_237, 100_000),
	("ml", Dimension::Volume, 1, 1),
	("cl", Dimension::Volume, 10, 1),
	("dl", Dimension::Volume, 100, 1),
	("l", Dimension::Volume, 1000, 1),
	("tsp", Dimension::Volume, 5, 1),
	("tbsp", Dimension::Volume, 15, 1),
	("cup", Dimension::Volume, 240, 1),
	("pcs", Dimension::Count, 1, 1),
	("pc", Dimension::Count, 1, 1),
	("dozen", Dimension::Count, 12, 1),
	("EUR", Dimension::Currency, 1, 1),
	("USD", Dimension::Currency, 92, 100),
	("GBP", Dimension::Currency, 117, 100),
	("CHF", Dimension::Currency, 104, 100),
];

/// Registry of known units, looked up case-insensitively by symbol.
///
/// Currency rates are fixed at construction time and may be overridden by
/// configuration or journal directives; every other built-in unit is
/// immutable.
#[derive(Debug, Default, Clone)]
pub struct UnitTable {
	/// lowercased symbol -> unit
	units: BTreeMap<String, Unit>,
}

impl UnitTable {
	pub fn standard() -> Self {
		let units = STANDARD_UNITS
			.iter()
			.map(|(symbol, dimension, numerator, denominator)| {
				(
					symbol.to_lowercase(),
					Unit {
						symbol: symbol.to_string(),
						dimension: *dimension,
						factor: Quant::from_frac(*numerator, *denominator),
					},
				)
			})
			.collect();

		Self { units }
	}

	pub fn lookup(&self, symbol: &str) -> PantryResult<&Unit> {
		self.units
			.get(&symbol.trim().to_lowercase())
			.ok_or_else(|| PantryError::UnknownUnit(symbol.to_string()))
	}

	/// Expresses a value given in one unit in another unit of the same
	/// dimension.
	pub fn convert(value: Quant, from: &Unit, to: &Unit) -> PantryResult<Quant> {
		if !from.is_compatible(to) {
			return Err(PantryError::IncompatibleUnits {
				from: from.symbol.clone(),
				from_dimension: from.dimension,
				to: to.symbol.clone(),
				to_dimension: to.dimension,
			});
		}

		if from.factor == to.factor {
			return Ok(value);
		}

		value
			.checked_mul(from.factor)
			.and_then(|base| base.checked_div(to.factor))
			.ok_or_else(|| {
				PantryError::invalid_quantity(
					value,
					format!("{} {} is out of range in {}", value, from, to),
				)
			})
	}

	/// Defines `1 symbol = amount reference`. The new unit takes the
	/// dimension of its reference. Currencies may be redefined (to update a
	/// rate); any other existing unit may not.
	pub fn define(
		&mut self,
		symbol: &str,
		amount: Quant,
		reference: &str,
	) -> PantryResult<&Unit> {
		let key = symbol.trim().to_lowercase();
		if key == reference.trim().to_lowercase() {
			return Err(PantryError::validation(
				"unit definition",
				format!("{} cannot be defined in terms of itself", symbol),
			));
		}
		if !amount.is_positive() {
			return Err(PantryError::validation(
				"unit definition",
				format!("1 {} cannot equal {} {}", symbol, amount, reference),
			));
		}

		let reference = self.lookup(reference)?;
		let factor = amount.checked_mul(reference.factor).ok_or_else(|| {
			PantryError::validation(
				"unit definition",
				format!("1 {} = {} {} is out of range", symbol, amount, reference),
			)
		})?;
		let unit = Unit::new(symbol, reference.dimension, factor)?;

		if let Some(existing) = self.units.get(&key) {
			if existing.dimension != Dimension::Currency
				|| unit.dimension != Dimension::Currency
			{
				return Err(PantryError::validation(
					"unit definition",
					format!("{} is already defined", existing.symbol),
				));
			}
		}

		self.units.insert(key.clone(), unit);
		self.lookup(&key)
	}
}
