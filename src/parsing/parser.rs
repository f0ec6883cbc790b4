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
use crate::pantry::kitchen::Kitchen;
use crate::parsing::filesystem::Filesystem;
use crate::util::date::Date;
use crate::util::quant::Quant;
use anyhow::{anyhow, bail, Error};
use regex::Regex;
use std::fs::File;
use std::io;
use std::io::{BufRead, Seek};
use std::str::FromStr;
use tracing::debug;

pub struct Parser {
	fs: Filesystem,
	detail_regex: Regex,
}

impl Parser {
	pub fn new() -> Result<Self, Error> {
		Ok(Self {
			detail_regex: Regex::new(r#""([^"]*)"|(\S+)"#)?,
			fs: Filesystem::new(),
		})
	}

	/// Opens and parses the journal at file_path into the passed Kitchen. We
	/// make two passes through the file: the first processes includes and unit
	/// directives, and the second processes recipes and movements. Units can
	/// therefore be declared anywhere in the journal, before or after use.
	pub fn parse(
		&mut self,
		file_path: &str,
		kitchen: &mut Kitchen,
		ignore_after: &Date,
	) -> Result<ParseResult, Error> {
		let mut file = self.fs.open(file_path)?;

		self.first_pass(file_path, &file, kitchen)?;
		file.rewind()?;

		let mut output: ParseResult = Default::default();
		self.second_pass(&file, kitchen, &mut output, ignore_after)?;

		Ok(output)
	}

	/// First pass to process only includes and directive lines. Includes
	/// recurse, with the Filesystem rejecting any file seen twice.
	fn first_pass(
		&mut self,
		path: &str,
		file: &File,
		kitchen: &mut Kitchen,
	) -> Result<(), Error> {
		self.fs.declare_file(path)?;
		debug!(file = path, "reading journal");

		let reader = io::BufReader::new(file);

		for (i, line) in reader.lines().enumerate() {
			let n = i + 1;
			let l = strip_comment(&line?);

			if l.is_empty() {
				continue;
			}

			if let Some(target) = include_target(&l) {
				let target = target
					.ok_or_else(|| anyhow!("Invalid include (line {})", n))?;
				let file = self.fs.open(target)?;
				self.first_pass(target, &file, kitchen)?;
				continue;
			}

			let directive: Vec<&str> = match l.strip_prefix('!') {
				None => continue,
				Some(d) => d.split_whitespace().collect(),
			};

			match directive.as_slice() {
				["unit", symbol, amount, reference] => {
					let amount = Quant::from_str(amount)
						.map_err(|e| anyhow!("{} (line {})", e, n))?;
					kitchen
						.declare_unit(symbol, amount, reference)
						.map_err(|e| anyhow!("{} (line {})", e, n))?;
				},
				_ => bail!("Invalid directive (line {}): {}", n, l),
			}
		}

		Ok(())
	}

	/// Second pass to process recipe blocks and dated movements. Includes
	/// were validated by first_pass, so they are simply followed here.
	fn second_pass(
		&mut self,
		file: &File,
		kitchen: &mut Kitchen,
		parse_result: &mut ParseResult,
		ignore_after: &Date,
	) -> Result<(), Error> {
		let reader = io::BufReader::new(file);

		for (i, line) in reader.lines().enumerate() {
			let n = i + 1;
			let l = strip_comment(&line?);

			// A blank line closes any recipe block
			if l.is_empty() {
				kitchen
					.finish_recipe()
					.map_err(|e| anyhow!("{} (line {})", e, n))?;
				continue;
			}

			if let Some(target) = include_target(&l) {
				let target = target
					.ok_or_else(|| anyhow!("Invalid include (line {})", n))?;
				let file = self.fs.open(target)?;
				self.second_pass(&file, kitchen, parse_result, ignore_after)?;
				continue;
			}

			if l.starts_with('!') {
				continue;
			}

			if let Some(name) = l.strip_prefix("recipe ") {
				kitchen.new_recipe(&unquote(name), n)?;
				parse_result.recipes += 1;
				continue;
			}

			if let Some((date_str, rest)) = l.split_once(char::is_whitespace) {
				if let Ok(date) = Date::from_str(date_str) {
					kitchen.finish_recipe()?;

					if &date > ignore_after {
						parse_result.ignored += 1;
						continue;
					}

					self.parse_movement(date, rest.trim(), n, kitchen)?;
					parse_result.movements += 1;
					continue;
				}
			}

			if Date::from_str(&l).is_ok() {
				bail!("Orphaned date (line {}): {}", n, l);
			}

			if !kitchen.in_recipe() {
				bail!("Invalid line (line {}): {}", n, l);
			}

			self.parse_recipe_detail(&l, n, kitchen)?;
		}

		kitchen
			.finish_recipe()
			.map_err(|e| anyhow!("{} (line eof)", e))?;

		Ok(())
	}

	/// `serves N`, `desc TEXT`, `step TEXT` or an ingredient line
	/// `NAME QTY UNIT`.
	fn parse_recipe_detail(
		&self,
		l: &str,
		n: usize,
		kitchen: &mut Kitchen,
	) -> Result<(), Error> {
		let (keyword, rest) =
			l.split_once(char::is_whitespace).unwrap_or((l, ""));
		let rest = rest.trim();

		let result = match keyword {
			"serves" => {
				Quant::from_str(rest).and_then(|p| kitchen.set_portions(p))
			},
			"desc" => kitchen.add_description(rest),
			"step" => kitchen.add_step(rest),
			_ => {
				let parts = self.split_detail(l);
				if parts.len() != 3 {
					bail!("Invalid recipe line (line {}): {}", n, l);
				}
				Quant::from_str(&parts[1])
					.and_then(|q| kitchen.add_recipe_line(&parts[0], q, &parts[2]))
			},
		};

		result.map_err(|e| anyhow!("{} (line {})", e, n))
	}

	/// Everything after the date: `buy NAME QTY UNIT [exp DATE] [@ PRICE
	/// [CURRENCY]]`, `use NAME QTY UNIT` or `cook RECIPE`.
	fn parse_movement(
		&self,
		date: Date,
		rest: &str,
		n: usize,
		kitchen: &mut Kitchen,
	) -> Result<(), Error> {
		let (kind, detail) =
			rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
		let detail = detail.trim();

		match kind {
			"buy" => {
				let parts = self.split_detail(detail);
				if parts.len() < 3 {
					bail!("Invalid purchase (line {}): {}", n, rest);
				}

				let quantity = Quant::from_str(&parts[1])
					.map_err(|e| anyhow!("{} (line {})", e, n))?;
				let unit = kitchen
					.unit(&parts[2])
					.map_err(|e| anyhow!("{} (line {})", e, n))?;

				let mut idx = 3;
				let mut expires = None;
				if parts.get(idx).map(String::as_str) == Some("exp") {
					let date_str = parts.get(idx + 1).ok_or_else(|| {
						anyhow!("Missing expiration date (line {})", n)
					})?;
					expires = Some(
						Date::from_str(date_str)
							.map_err(|e| anyhow!("{} (line {})", e, n))?,
					);
					idx += 2;
				}

				let mut price = Quant::zero();
				if parts.get(idx).map(String::as_str) == Some("@") {
					let amount = parts
						.get(idx + 1)
						.ok_or_else(|| anyhow!("Missing price (line {})", n))?;
					let amount = Quant::from_str(amount)
						.map_err(|e| anyhow!("{} (line {})", e, n))?;
					let currency = parts.get(idx + 2).map(String::as_str);
					price = kitchen
						.price_in_base(amount, currency)
						.map_err(|e| anyhow!("{} (line {})", e, n))?;
					idx += if currency.is_some() { 3 } else { 2 };
				}

				if idx != parts.len() {
					bail!("Invalid purchase (line {}): {}", n, rest);
				}

				let ingredient =
					Ingredient::new(&parts[0], quantity, unit, price)
						.map_err(|e| anyhow!("{} (line {})", e, n))?;
				kitchen
					.buy(date, n, ingredient, expires)
					.map_err(|e| anyhow!("{} (line {})", e, n))?;
			},
			"use" => {
				let parts = self.split_detail(detail);
				if parts.len() != 3 {
					bail!("Invalid use (line {}): {}", n, rest);
				}

				let quantity = Quant::from_str(&parts[1])
					.map_err(|e| anyhow!("{} (line {})", e, n))?;
				kitchen
					.use_stock(date, n, &parts[0], quantity, &parts[2])
					.map_err(|e| anyhow!("{} (line {})", e, n))?;
			},
			"cook" if !detail.is_empty() => {
				kitchen.cook(date, n, &unquote(detail))
			},
			_ => bail!("Invalid movement (line {}): {}", n, rest),
		}

		Ok(())
	}

	/// Splits by whitespace except for terms in quotation marks, which allows
	/// names like `"Whole egg"`.
	fn split_detail(&self, input: &str) -> Vec<String> {
		self.detail_regex
			.captures_iter(input)
			.map(|cap| {
				cap.get(1).map_or_else(
					move || cap[2].to_string(),
					|m| m.as_str().to_string(),
				)
			})
			.collect()
	}
}

fn strip_comment(line: &str) -> String {
	line.split('#').next().unwrap_or_default().trim().to_string()
}

/// `Some(None)` marks a malformed include line.
fn include_target(line: &str) -> Option<Option<&str>> {
	let rest = line.strip_prefix("include")?;
	if !rest.starts_with(char::is_whitespace) {
		return None;
	}

	let include: Vec<&str> = rest.split_whitespace().collect();
	match include.as_slice() {
		[target] => Some(Some(*target)),
		_ => Some(None),
	}
}

fn unquote(input: &str) -> String {
	input.trim().trim_matches('"').trim().to_string()
}

#[derive(Debug, Default)]
pub struct ParseResult {
	/// Movements recorded, up to and including the as-of date
	pub movements: usize,
	/// Movements dated after the as-of date
	pub ignored: usize,
	pub recipes: usize,
}
