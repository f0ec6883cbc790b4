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

use anyhow::{anyhow, Error};
use chrono::{Local, NaiveDate, TimeDelta};
use std::fmt;
use std::str::FromStr;

/// A calendar day, as written in journals and shown on reports. Expiration
/// dates, purchase dates and the report date are all of this type.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date(NaiveDate);

impl Date {
	pub fn today() -> Date {
		Date(Local::now().date_naive())
	}

	pub fn min() -> Date {
		Date(NaiveDate::MIN)
	}

	pub fn max() -> Date {
		Date(NaiveDate::MAX)
	}

	/// Signed number of days from this date to the other one; negative when
	/// the other date is earlier.
	pub fn days_until(&self, other: &Date) -> i64 {
		(other.0 - self.0).num_days()
	}

	/// Moves the date by a signed number of days, saturating at the
	/// representable range.
	pub fn plus_days(&self, days: i64) -> Date {
		TimeDelta::try_days(days)
			.and_then(|delta| self.0.checked_add_signed(delta))
			.map(Date)
			.unwrap_or(if days < 0 { Date::min() } else { Date::max() })
	}
}

impl FromStr for Date {
	type Err = Error;

	/// Parses the "YYYY-mm-dd" format
	fn from_str(date_str: &str) -> Result<Self, Self::Err> {
		NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
			.map(Date)
			.map_err(|e| {
				anyhow!("Invalid date {} ({}); expected YYYY-MM-DD", date_str, e)
			})
	}
}

impl fmt::Display for Date {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0.format("%Y-%m-%d"))
	}
}
