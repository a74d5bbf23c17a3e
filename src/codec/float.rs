//! Floating point element codec

use super::{ElementCodec, ElementOptions, invalid, unexpected};
use crate::error::Result;
use crate::fields::{FieldType, FieldTypeName, FloatField};
use crate::value::SqlValue;

/// Double precision elements (`DOUBLE PRECISION`)
///
/// A bare numeric parameter compared against a `DOUBLE PRECISION[]` column
/// is typed as `numeric[]` by PostgreSQL, so lookups are cast explicitly.
#[derive(Debug, Clone, Default)]
pub struct FloatCodec {
	options: ElementOptions,
}

impl FloatCodec {
	pub fn new() -> Self {
		Self::default()
	}
}

super::impl_element_options!(FloatCodec);

impl ElementCodec for FloatCodec {
	fn field_name(&self) -> &str {
		FloatField::NAME
	}

	fn field_type(&self) -> FieldType {
		FieldType::Double
	}

	fn to_native(&self, value: SqlValue) -> Result<SqlValue> {
		match value {
			SqlValue::Null | SqlValue::Float(_) => Ok(value),
			SqlValue::Int(i) => Ok(SqlValue::Float(i as f64)),
			SqlValue::Bool(b) => Ok(SqlValue::Float(if b { 1.0 } else { 0.0 })),
			SqlValue::String(ref s) => s
				.trim()
				.parse::<f64>()
				.map(SqlValue::Float)
				.map_err(|_| invalid(format!("'{}' value must be a float.", s))),
			_ => Err(unexpected(&value, "a float")),
		}
	}

	fn to_storage(&self, value: SqlValue) -> Result<SqlValue> {
		self.to_native(value)
	}

	fn validate(&self, value: &SqlValue) -> Result<()> {
		match value {
			SqlValue::Null | SqlValue::Float(_) | SqlValue::Int(_) => {
				self.options.run_validators(value)
			}
			other => Err(unexpected(other, "a float")),
		}
	}

	fn requires_cast(&self) -> bool {
		true
	}
}
