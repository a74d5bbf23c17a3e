//! Bounded character element codec

use super::{ElementCodec, ElementOptions, stringify, unexpected};
use crate::error::Result;
use crate::fields::{CharField, FieldKwarg, FieldType, FieldTypeName};
use crate::validators::{ElementValidator, MaxLengthValidator};
use crate::value::SqlValue;
use std::collections::HashMap;
use std::sync::Arc;

/// `VARCHAR(n)` elements
///
/// Every element is coerced to a string and checked against `max_length`.
/// String parameters are `unknown`-typed in PostgreSQL, so lookups are cast
/// to the array column type.
///
/// # Examples
///
/// ```
/// use reinhardt_dbarray::codec::{CharCodec, ElementCodec};
/// use reinhardt_dbarray::SqlValue;
///
/// let codec = CharCodec::new(10);
/// assert_eq!(codec.column_type(), "VARCHAR(10)");
/// assert_eq!(codec.to_storage(SqlValue::Int(5)).unwrap(), SqlValue::from("5"));
/// assert!(codec.validate(&SqlValue::from("Christopher")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CharCodec {
	max_length: u32,
	options: ElementOptions,
}

impl CharCodec {
	pub fn new(max_length: u32) -> Self {
		Self {
			max_length,
			options: ElementOptions {
				null: false,
				validators: vec![
					Arc::new(MaxLengthValidator::new(max_length as usize)) as Arc<dyn ElementValidator>,
				],
			},
		}
	}

	pub fn max_length(&self) -> u32 {
		self.max_length
	}
}

impl Default for CharCodec {
	fn default() -> Self {
		Self::new(255)
	}
}

super::impl_element_options!(CharCodec);

impl ElementCodec for CharCodec {
	fn field_name(&self) -> &str {
		CharField::NAME
	}

	fn field_type(&self) -> FieldType {
		FieldType::VarChar(self.max_length)
	}

	fn to_native(&self, value: SqlValue) -> Result<SqlValue> {
		stringify(value)
	}

	fn to_storage(&self, value: SqlValue) -> Result<SqlValue> {
		stringify(value)
	}

	fn validate(&self, value: &SqlValue) -> Result<()> {
		match value {
			SqlValue::Null | SqlValue::String(_) => self.options.run_validators(value),
			other => Err(unexpected(other, "a string")),
		}
	}

	fn requires_cast(&self) -> bool {
		true
	}

	fn accepts_scalar(&self, value: &SqlValue) -> bool {
		matches!(value, SqlValue::String(_))
	}

	fn kwargs(&self) -> HashMap<String, FieldKwarg> {
		let mut kwargs = HashMap::new();
		kwargs.insert(
			"max_length".to_string(),
			FieldKwarg::Uint(u64::from(self.max_length)),
		);
		kwargs
	}
}
