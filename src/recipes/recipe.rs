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
use crate::pantry::ingredient::{name_key, Ingredient};
use crate::util::quant::Quant;

/// A named dish with the ingredient lines it requires. No two lines share
/// a name: adding a line for an ingredient already listed adds to that line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipe {
	name: String,
	description: String,
	procedure: String,
	portions: Quant,
	ingredients: Vec<Ingredient>,
}

impl Recipe {
	pub fn new(
		name: &str,
		description: &str,
		procedure: &str,
		portions: Quant,
	) -> PantryResult<Self> {
		let required = [
			("recipe name", name),
			("description", description),
			("procedure", procedure),
		];
		for (field, value) in required {
			if value.trim().is_empty() {
				return Err(PantryError::validation(field, "must not be blank"));
			}
		}
		if !portions.is_positive() {
			return Err(PantryError::validation(
				"portions",
				format!("{} must be greater than zero", portions),
			));
		}

		Ok(Self {
			name: name.trim().to_string(),
			description: description.trim().to_string(),
			procedure: procedure.trim().to_string(),
			portions,
			ingredients: vec![],
		})
	}

	/// Adds a line, merging case-insensitively with an existing line of the
	/// same name. The merged line keeps its first spelling and unit; the
	/// incoming quantity is converted into that unit.
	pub fn add_ingredient(
		&mut self,
		mut ingredient: Ingredient,
	) -> PantryResult<()> {
		let key = ingredient.key();

		match self.ingredients.iter_mut().find(|line| line.key() == key) {
			Some(line) => {
				if line.unit() != ingredient.unit() {
					ingredient.convert_to(line.unit())?;
				}
				line.increase_quantity(ingredient.quantity())
			},
			None => {
				self.ingredients.push(ingredient);
				Ok(())
			},
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn key(&self) -> String {
		name_key(&self.name)
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn procedure(&self) -> &str {
		&self.procedure
	}

	pub fn portions(&self) -> Quant {
		self.portions
	}

	pub fn ingredients(&self) -> &[Ingredient] {
		&self.ingredients
	}

	/// A copy of this recipe with every line scaled to feed `portions`.
	pub fn scaled(&self, portions: Quant) -> PantryResult<Recipe> {
		if !portions.is_positive() {
			return Err(PantryError::validation(
				"portions",
				format!("{} must be greater than zero", portions),
			));
		}

		let factor = portions / self.portions;
		let mut out = self.clone();
		out.portions = portions;
		for line in out.ingredients.iter_mut() {
			line.set_quantity(line.quantity() * factor)?;
		}

		Ok(out)
	}
}
