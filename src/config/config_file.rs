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
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Currency that journal prices are written in unless they name one
	pub currency: String,

	/// Currency reports are shown in, unless overridden on the command line
	pub display_currency: Option<String>,

	/// How far ahead the `expiring` report looks
	pub expiring_window_days: u64,

	/// symbol -> definition in terms of another unit
	pub units: BTreeMap<String, UnitDefinition>,

	/// currency -> value of one unit of it in `currency`
	pub rates: BTreeMap<String, String>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			currency: "EUR".to_string(),
			display_currency: None,
			expiring_window_days: 7,
			units: Default::default(),
			rates: Default::default(),
		}
	}
}

/// `1 <symbol> = <amount> <unit>`
#[derive(Debug, Deserialize)]
pub struct UnitDefinition {
	pub amount: String,
	pub unit: String,
}
