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
use crate::pantry::kitchen::Kitchen;
use crate::pantry::unit::{Unit, UnitTable};
use crate::util::quant::Quant;
use anyhow::Error;

/// The currency reports show money in. Amounts arrive in the base currency
/// and are converted at a rate fixed when this is built.
#[derive(Debug, Clone)]
pub struct DisplayCurrency {
	unit: Unit,
	rate: Quant,
}

impl DisplayCurrency {
	/// Resolves the symbol (or the base currency, if none) against the
	/// kitchen's unit table.
	pub fn new(kitchen: &Kitchen, symbol: Option<&str>) -> Result<Self, Error> {
		let base = kitchen.base_currency()?;
		let unit = match symbol {
			Some(symbol) => kitchen.currency(symbol)?.clone(),
			None => base.clone(),
		};
		let rate = UnitTable::convert(Quant::from_i128(1), base, &unit)?;

		Ok(Self { unit, rate })
	}

	pub fn symbol(&self) -> &str {
		self.unit.symbol()
	}

	pub fn convert(&self, amount: Quant) -> Quant {
		amount * self.rate
	}

	/// Two decimal places and the symbol, e.g. `1,234.50 EUR`
	pub fn render(&self, amount: Quant) -> String {
		format!("{:.2} {}", self.convert(amount), self.symbol())
	}
}
