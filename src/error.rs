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
use crate::pantry::unit::Dimension;
use crate::util::quant::Quant;
use thiserror::Error;

/// Result type for inventory and recipe operations
pub type PantryResult<T> = Result<T, PantryError>;

/// Failures raised by the inventory, recipe and unit modules. None of them
/// are recovered from inside those modules; the caller decides what to tell
/// the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PantryError {
	/// Malformed input when building an ingredient, recipe or unit
	#[error("invalid {field}: {reason}")]
	Validation { field: &'static str, reason: String },

	#[error("{kind} not found: {name}")]
	NotFound { kind: &'static str, name: String },

	/// A quantity that makes no sense for the operation, e.g. a negative
	/// increase
	#[error("invalid quantity {quantity}: {reason}")]
	InvalidQuantity { quantity: Quant, reason: String },

	/// Asked to take more than is held in total
	#[error("cannot take {requested} {unit} of {name}; only {available} {unit} available")]
	InsufficientStock {
		name: String,
		requested: Quant,
		available: Quant,
		unit: String,
	},

	#[error("cannot convert {from} ({from_dimension}) to {to} ({to_dimension})")]
	IncompatibleUnits {
		from: String,
		from_dimension: Dimension,
		to: String,
		to_dimension: Dimension,
	},

	#[error("unknown unit: {0}")]
	UnknownUnit(String),
}

impl PantryError {
	pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
		PantryError::Validation {
			field,
			reason: reason.into(),
		}
	}

	pub fn invalid_quantity(quantity: Quant, reason: impl Into<String>) -> Self {
		PantryError::InvalidQuantity {
			quantity,
			reason: reason.into(),
		}
	}
}
