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
use crate::parsing::filesystem::Filesystem;
use crate::reports::currency::DisplayCurrency;
use crate::reports::recipe_reporter::RecipeReporter;
use crate::reports::stock_reporter::StockReporter;
use crate::util::date::Date;
use crate::util::quant::Quant;
use anyhow::{anyhow, bail, Error};
use clap::{Parser, ValueEnum};
use std::str::FromStr;
use tracing::debug;

mod config;
mod error;
mod pantry;
mod parsing;
mod recipes;
mod reports;
mod util;

#[derive(Parser)]
#[command(
	name = "larder",
	version = "0.3",
	about = "Plain text household food inventory and recipe planner"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// The ingredient for Find, or the recipe for Check
	#[arg(required = false)]
	term: Option<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// Specifies the journal file
	#[arg(short)]
	file: String,

	/// Evaluate stock on this date and ignore later entries (YYYY-MM-DD;
	/// default: today)
	#[arg(short, long)]
	as_of: Option<String>,

	/// Custom config file location (default: ~/.config/larder/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Show money in this currency
	#[arg(short, long)]
	currency: Option<String>,

	/// Days ahead the Expiring command looks (default: from config, or 7)
	#[arg(short, long)]
	within: Option<u64>,

	/// Scale the recipe for Check to this many portions
	#[arg(long)]
	serves: Option<String>,

	/// Value stock at price times quantity instead of price paid
	#[arg(long)]
	weighted: bool,

	/// Suggest recipes by raw quantities, without converting units
	#[arg(long)]
	raw: bool,

	/// Leave a recipe out of Recipes and Suggest (repeatable)
	#[arg(long)]
	skip: Vec<String>,

	/// Accept purchases that were already expired when bought
	#[arg(long)]
	lenient: bool,

	/// Log parsing details to stderr
	#[arg(short, long)]
	verbose: bool,
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	Stock,    // alphabetical stock listing
	Find,     // batches of one ingredient
	Expired,  // batches past their date
	Expiring, // batches expiring soon
	Value,    // value of stock

	Recipes, // all recipes
	Check,   // can a recipe be made
	Suggest, // recipes that can be made
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();

	let log_level = if args.verbose { "debug" } else { "warn" };
	tracing_subscriber::fmt()
		.with_env_filter(log_level)
		.with_writer(std::io::stderr)
		.init();

	let as_of = match &args.as_of {
		Some(date) => Date::from_str(date)?,
		None => Date::today(),
	};

	let fs = Filesystem::new();
	let config = fs.get_config(args.config.as_ref())?;

	let mut kitchen = Kitchen::new(&config, args.lenient)?;
	let mut parser = parsing::parser::Parser::new()?;
	let parse_result = parser.parse(&args.file, &mut kitchen, &as_of)?;
	debug!(
		movements = parse_result.movements,
		ignored = parse_result.ignored,
		recipes = parse_result.recipes,
		"journal parsed"
	);

	let inventory = kitchen.finalize()?;
	debug!(ingredients = inventory.len(), "stock tabulated");

	// after finalize, so earlier cooks of a skipped recipe still count
	for name in &args.skip {
		if !kitchen.cookbook.remove(name) {
			bail!("Unknown recipe {}", name);
		}
	}
	debug!(recipes = kitchen.cookbook.len(), "cookbook ready");

	let currency = DisplayCurrency::new(
		&kitchen,
		args.currency
			.as_deref()
			.or(config.display_currency.as_deref()),
	)?;

	match args.command {
		Directive::Stock => {
			StockReporter::new(&inventory, currency, as_of).print_stock()
		},
		Directive::Find => {
			let Some(name) = &args.term else {
				bail!("No ingredient specified");
			};
			StockReporter::new(&inventory, currency, as_of).print_find(name);
		},
		Directive::Expired => {
			StockReporter::new(&inventory, currency, as_of).print_expired()
		},
		Directive::Expiring => {
			let window = args.within.unwrap_or(config.expiring_window_days);
			StockReporter::new(&inventory, currency, as_of)
				.print_expiring(window);
		},
		Directive::Value => StockReporter::new(&inventory, currency, as_of)
			.print_value(args.weighted),
		Directive::Recipes => {
			RecipeReporter::new(&kitchen.cookbook, &inventory).print_recipes()
		},
		Directive::Check => {
			let Some(name) = &args.term else {
				bail!("No recipe specified");
			};
			let recipe = kitchen
				.cookbook
				.search(name)
				.ok_or_else(|| anyhow!("Unknown recipe {}", name))?;

			let recipe = match &args.serves {
				Some(serves) => recipe.scaled(Quant::from_str(serves)?)?,
				None => recipe.clone(),
			};

			// fails on lines whose units cannot be compared with stock
			inventory.has_enough_for_recipe(&recipe)?;

			RecipeReporter::new(&kitchen.cookbook, &inventory)
				.print_check(&recipe)?;
		},
		Directive::Suggest => RecipeReporter::new(&kitchen.cookbook, &inventory)
			.print_suggestions(args.raw),
	}

	Ok(())
}
