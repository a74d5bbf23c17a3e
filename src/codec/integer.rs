//! Integer element codec

use super::{ElementCodec, ElementOptions, invalid, unexpected};
use crate::error::Result;
use crate::fields::{FieldType, FieldTypeName, IntegerField};
use crate::validators::{ElementValidator, RangeValidator};
use crate::value::SqlValue;
use std::sync::Arc;

/// 32-bit integer elements (`INTEGER`)
///
/// Elements are held as [`SqlValue::Int`] and range-checked against `i32`.
/// Integer parameters are typed unambiguously by PostgreSQL, so lookups are
/// never cast.
///
/// # Examples
///
/// ```
/// use reinhardt_dbarray::codec::{ElementCodec, IntegerCodec};
/// use reinhardt_dbarray::SqlValue;
///
/// let codec = IntegerCodec::new();
/// assert_eq!(codec.column_type(), "INTEGER");
/// assert_eq!(codec.to_native(SqlValue::from(" 42 ")).unwrap(), SqlValue::Int(42));
/// assert!(!codec.requires_cast());
/// ```
#[derive(Debug, Clone)]
pub struct IntegerCodec {
	options: ElementOptions,
}

impl IntegerCodec {
	pub fn new() -> Self {
		Self {
			options: ElementOptions {
				null: false,
				validators: vec![Arc::new(RangeValidator::new(
					Some(i64::from(i32::MIN)),
					Some(i64::from(i32::MAX)),
				)) as Arc<dyn ElementValidator>],
			},
		}
	}
}

impl Default for IntegerCodec {
	fn default() -> Self {
		Self::new()
	}
}

super::impl_element_options!(IntegerCodec);

impl ElementCodec for IntegerCodec {
	fn field_name(&self) -> &str {
		IntegerField::NAME
	}

	fn field_type(&self) -> FieldType {
		FieldType::Integer
	}

	fn to_native(&self, value: SqlValue) -> Result<SqlValue> {
		match value {
			SqlValue::Null | SqlValue::Int(_) => Ok(value),
			SqlValue::Bool(b) => Ok(SqlValue::Int(i64::from(b))),
			// `i64::MAX as f64` rounds up to 2^63, which is already out of range
			SqlValue::Float(f)
				if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
			{
				Ok(SqlValue::Int(f as i64))
			}
			SqlValue::String(ref s) => s
				.trim()
				.parse::<i64>()
				.map(SqlValue::Int)
				.map_err(|_| invalid(format!("'{}' value must be an integer.", s))),
			_ => Err(unexpected(&value, "an integer")),
		}
	}

	fn to_storage(&self, value: SqlValue) -> Result<SqlValue> {
		self.to_native(value)
	}

	fn validate(&self, value: &SqlValue) -> Result<()> {
		match value {
			SqlValue::Null | SqlValue::Int(_) => self.options.run_validators(value),
			other => Err(unexpected(other, "an integer")),
		}
	}
}
