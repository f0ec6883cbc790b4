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
use anyhow::{anyhow, bail, Error};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// How many decimal places to render when the formatter does not ask for a
/// specific precision. Trailing zeros are trimmed in that case.
const DEFAULT_RENDER_PRECISION: usize = 3;

/// Parsed input is bounded so that products of a few quantities, prices and
/// conversion factors stay well inside `i128`.
const MAX_DECIMAL_PLACES: usize = 9;
const MAX_WHOLE: i128 = 1_000_000_000_000;

/// An exact rational number used for every quantity, price and conversion
/// factor. Kitchen arithmetic never needs more than a handful of digits, but
/// unit conversion chains (ounces to grams to kilograms) do not survive
/// floating point, and FIFO removal must drive batches to exactly zero.
///
/// Always stored reduced, with a positive denominator, so derived equality
/// and hashing are value equality. The arithmetic operators panic on `i128`
/// overflow; callers working with derived values they do not control use
/// the `checked_*` methods instead. Comparison never overflows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Quant {
	numerator: i128,
	denominator: i128,
}

impl Quant {
	pub fn zero() -> Self {
		Self {
			numerator: 0,
			denominator: 1,
		}
	}

	pub fn from_i128(value: i128) -> Self {
		Self {
			numerator: value,
			denominator: 1,
		}
	}

	pub fn from_frac(numerator: i128, denominator: i128) -> Self {
		if denominator == 0 {
			panic!("Denominator cannot be zero");
		}

		let mut out = Self {
			numerator,
			denominator,
		};
		out.reduce();
		out
	}

	pub fn is_zero(&self) -> bool {
		self.numerator == 0
	}

	pub fn is_positive(&self) -> bool {
		self.numerator > 0
	}

	pub fn is_negative(&self) -> bool {
		self.numerator < 0
	}

	pub fn checked_add(self, rhs: Self) -> Option<Self> {
		if self.is_zero() {
			return Some(rhs);
		}
		if rhs.is_zero() {
			return Some(self);
		}

		let gcd = Self::gcd(self.denominator as u128, rhs.denominator as u128)
			as i128;
		let lcm = (self.denominator / gcd).checked_mul(rhs.denominator)?;
		let left = self.numerator.checked_mul(lcm / self.denominator)?;
		let right = rhs.numerator.checked_mul(lcm / rhs.denominator)?;

		Some(Quant::from_frac(left.checked_add(right)?, lcm))
	}

	pub fn checked_mul(self, rhs: Self) -> Option<Self> {
		// cross-reduce first to keep intermediates small
		let a = Self::gcd(self.numerator.unsigned_abs(), rhs.denominator as u128)
			as i128;
		let b = Self::gcd(rhs.numerator.unsigned_abs(), self.denominator as u128)
			as i128;

		let numerator = (self.numerator / a).checked_mul(rhs.numerator / b)?;
		let denominator =
			(self.denominator / b).checked_mul(rhs.denominator / a)?;
		Some(Quant::from_frac(numerator, denominator))
	}

	/// None on overflow and on division by zero.
	pub fn checked_div(self, rhs: Self) -> Option<Self> {
		if rhs.is_zero() {
			return None;
		}
		self.checked_mul(Quant::from_frac(rhs.denominator, rhs.numerator))
	}

	/// Keeps the denominator positive and the fraction in lowest terms.
	fn reduce(&mut self) {
		if self.denominator < 0 {
			self.numerator = -self.numerator;
			self.denominator = -self.denominator;
		}

		let gcd =
			Self::gcd(self.numerator.unsigned_abs(), self.denominator as u128);
		if gcd > 1 {
			self.numerator /= gcd as i128;
			self.denominator /= gcd as i128;
		}
	}

	/// Euclid's algorithm
	fn gcd(mut a: u128, mut b: u128) -> u128 {
		while b != 0 {
			let temp = b;
			b = a % b;
			a = temp;
		}
		a.max(1)
	}

	/// Compares a/b with c/d (b and d positive) by walking their continued
	/// fraction expansions, so no product is ever formed.
	fn cmp_fractions(a: i128, b: i128, c: i128, d: i128) -> Ordering {
		let (p, q) = (a.div_euclid(b), c.div_euclid(d));
		if p != q {
			return p.cmp(&q);
		}

		match (a.rem_euclid(b), c.rem_euclid(d)) {
			(0, 0) => Ordering::Equal,
			(0, _) => Ordering::Less,
			(_, 0) => Ordering::Greater,
			// r/b < s/d exactly when b/r > d/s
			(r, s) => Self::cmp_fractions(b, r, d, s).reverse(),
		}
	}

	/// Parses a plain decimal such as `12`, `-0.25` or `.5`.
	fn parse_decimal(input: &str) -> Result<Self, Error> {
		let (is_negative, sanitized) = match input.strip_prefix('-') {
			Some(rest) => (true, rest),
			None => (false, input),
		};

		if sanitized.is_empty()
			|| !sanitized.chars().all(|c| c.is_ascii_digit() || c == '.')
		{
			bail!("Invalid number: {}", input);
		}

		let (whole, decimal) = match sanitized.split_once('.') {
			None => (sanitized, ""),
			Some((_, "")) => bail!("Invalid number: {}", input),
			Some((w, d)) => (w, d),
		};

		if decimal.len() > MAX_DECIMAL_PLACES {
			bail!("Too many decimal places: {}", input);
		}

		let whole = if whole.is_empty() {
			0
		} else {
			whole
				.parse::<i128>()
				.ok()
				.filter(|w| *w < MAX_WHOLE)
				.ok_or_else(|| anyhow!("Number too large: {}", input))?
		};

		let scale = 10i128.pow(decimal.len() as u32);
		let fractional = if decimal.is_empty() {
			0
		} else {
			decimal.parse::<i128>()?
		};

		let numerator = whole * scale + fractional;

		let sign = if is_negative { -1 } else { 1 };
		Ok(Quant::from_frac(sign * numerator, scale))
	}
}

impl FromStr for Quant {
	type Err = Error;

	/// Accepts decimals (`2.5`) and simple fractions (`1/3`), the latter
	/// being common in recipes.
	fn from_str(input: &str) -> Result<Self, Self::Err> {
		let input = input.trim();

		match input.split_once('/') {
			None => Quant::parse_decimal(input),
			Some((numerator, denominator)) => {
				let numerator = Quant::parse_decimal(numerator.trim())?;
				let denominator = Quant::parse_decimal(denominator.trim())?;
				if denominator.is_zero() {
					bail!("Division by zero: {}", input);
				}
				Ok(numerator / denominator)
			},
		}
	}
}

impl fmt::Display for Quant {
	/// Rounds half away from zero. With an explicit precision (`{:.2}`) that
	/// many places are always shown; otherwise up to three, trailing zeros
	/// trimmed. The integer part is grouped in thousands.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let precision = f.precision().unwrap_or(DEFAULT_RENDER_PRECISION);
		let scale = 10u128.pow(precision as u32);
		let numerator = self.numerator.unsigned_abs();
		let denominator = self.denominator as u128;

		let mut integer_part = numerator / denominator;
		let remainder = numerator % denominator;
		let scaled = remainder.checked_mul(scale);
		// huge denominators only; scale them down instead
		let divisor = match scaled {
			Some(_) => denominator,
			None => (denominator / scale).max(1),
		};
		let scaled = scaled.unwrap_or(remainder);

		let mut fraction = scaled / divisor;
		if (scaled % divisor) * 2 >= divisor {
			fraction += 1;
		}
		if fraction >= scale {
			fraction = 0;
			integer_part += 1;
		}

		let mut fraction_str = if precision == 0 {
			String::new()
		} else {
			format!("{:0width$}", fraction, width = precision)
		};
		if f.precision().is_none() {
			while fraction_str.ends_with('0') {
				fraction_str.pop();
			}
		}

		let mut int_str = integer_part.to_string();
		let mut i = int_str.len() as isize - 3;
		while i > 0 {
			int_str.insert(i as usize, ',');
			i -= 3;
		}

		let sign = if self.is_negative() && (integer_part > 0 || fraction > 0) {
			"-"
		} else {
			""
		};

		if fraction_str.is_empty() {
			write!(f, "{}{}", sign, int_str)
		} else {
			write!(f, "{}{}.{}", sign, int_str, fraction_str)
		}
	}
}

// -----------------
// -- BOILERPLATE --
// -----------------

impl Default for Quant {
	fn default() -> Self {
		Quant::zero()
	}
}

impl Add for Quant {
	type Output = Self;

	fn add(self, rhs: Self) -> Self::Output {
		match self.checked_add(rhs) {
			Some(sum) => sum,
			None => panic!("Quantity overflow adding {} and {}", self, rhs),
		}
	}
}

impl AddAssign for Quant {
	fn add_assign(&mut self, rhs: Self) {
		*self = *self + rhs;
	}
}

impl Sum for Quant {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Quant::zero(), |acc, quant| acc + quant)
	}
}

impl Sub for Quant {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self::Output {
		self + (-rhs)
	}
}

impl SubAssign for Quant {
	fn sub_assign(&mut self, rhs: Self) {
		*self = *self - rhs;
	}
}

impl Mul for Quant {
	type Output = Self;

	fn mul(self, rhs: Self) -> Self::Output {
		match self.checked_mul(rhs) {
			Some(product) => product,
			None => panic!("Quantity overflow multiplying {} by {}", self, rhs),
		}
	}
}

impl MulAssign for Quant {
	fn mul_assign(&mut self, rhs: Self) {
		*self = *self * rhs;
	}
}

impl Div for Quant {
	type Output = Self;

	/// Panics when dividing by zero, like integer division.
	fn div(self, rhs: Self) -> Self::Output {
		if rhs.is_zero() {
			panic!("Division by zero");
		}

		self * Quant::from_frac(rhs.denominator, rhs.numerator)
	}
}

impl Neg for Quant {
	type Output = Self;

	fn neg(self) -> Self::Output {
		Self {
			numerator: -self.numerator,
			denominator: self.denominator,
		}
	}
}

impl PartialEq<i128> for Quant {
	fn eq(&self, other: &i128) -> bool {
		self.denominator == 1 && self.numerator == *other
	}
}

impl PartialOrd for Quant {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl PartialOrd<i128> for Quant {
	fn partial_cmp(&self, other: &i128) -> Option<Ordering> {
		Some(self.cmp(&Quant::from_i128(*other)))
	}
}

impl Ord for Quant {
	fn cmp(&self, other: &Self) -> Ordering {
		// denominators are positive, so cross-multiplying keeps the order
		match (
			self.numerator.checked_mul(other.denominator),
			other.numerator.checked_mul(self.denominator),
		) {
			(Some(left), Some(right)) => left.cmp(&right),
			_ => Self::cmp_fractions(
				self.numerator,
				self.denominator,
				other.numerator,
				other.denominator,
			),
		}
	}
}
