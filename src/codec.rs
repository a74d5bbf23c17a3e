//! Element codecs
//!
//! An [`ElementCodec`] is the scalar half of an array field: it knows how one
//! element is converted, validated and typed in SQL. [`crate::ArrayField`]
//! applies a codec across every element of a sequence and never inspects the
//! concrete element type itself.
//!
//! Five codecs ship with the crate:
//!
//! | Codec | Element field | Column type | Cast on lookup |
//! |-------|---------------|-------------|----------------|
//! | [`IntegerCodec`] | `IntegerField` | `INTEGER` | no |
//! | [`FloatCodec`] | `FloatField` | `DOUBLE PRECISION` | yes |
//! | [`CharCodec`] | `CharField` | `VARCHAR(n)` | yes |
//! | [`TextCodec`] | `TextField` | `TEXT` | no |
//! | [`DateCodec`] | `DateField` | `DATE` | yes |
//!
//! Other element types are added by implementing [`ElementCodec`].

pub mod character;
pub mod date;
pub mod float;
pub mod integer;
pub mod text;

pub use character::CharCodec;
pub use date::DateCodec;
pub use float::FloatCodec;
pub use integer::IntegerCodec;
pub use text::TextCodec;

use crate::error::{ArrayFieldError, Result, ValidationError};
use crate::fields::{FieldKwarg, FieldType};
use crate::validators::ElementValidator;
use crate::value::SqlValue;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Per-element behavior delegated to by array fields
pub trait ElementCodec: fmt::Debug + Send + Sync {
	/// Name of the scalar model field this codec stands for (e.g. `IntegerField`)
	fn field_name(&self) -> &str;

	/// Column type of a single element
	fn field_type(&self) -> FieldType;

	/// SQL type name of a single element
	fn column_type(&self) -> String {
		self.field_type().to_sql_string()
	}

	/// Convert a value read from the driver into its in-memory form
	fn to_native(&self, value: SqlValue) -> Result<SqlValue>;

	/// Convert an in-memory value into the form handed to the driver
	fn to_storage(&self, value: SqlValue) -> Result<SqlValue>;

	/// Validate one element, including SQL NULL
	fn validate(&self, value: &SqlValue) -> Result<()>;

	/// Whether lookup parameters need an explicit cast to be typed correctly
	fn requires_cast(&self) -> bool {
		false
	}

	/// Whether a bare scalar may stand in for a one-element array
	fn accepts_scalar(&self, _value: &SqlValue) -> bool {
		false
	}

	/// Constructor parameters reported by `deconstruct()`
	fn kwargs(&self) -> HashMap<String, FieldKwarg> {
		HashMap::new()
	}
}

impl<C: ElementCodec + ?Sized> ElementCodec for Box<C> {
	fn field_name(&self) -> &str {
		(**self).field_name()
	}

	fn field_type(&self) -> FieldType {
		(**self).field_type()
	}

	fn column_type(&self) -> String {
		(**self).column_type()
	}

	fn to_native(&self, value: SqlValue) -> Result<SqlValue> {
		(**self).to_native(value)
	}

	fn to_storage(&self, value: SqlValue) -> Result<SqlValue> {
		(**self).to_storage(value)
	}

	fn validate(&self, value: &SqlValue) -> Result<()> {
		(**self).validate(value)
	}

	fn requires_cast(&self) -> bool {
		(**self).requires_cast()
	}

	fn accepts_scalar(&self, value: &SqlValue) -> bool {
		(**self).accepts_scalar(value)
	}

	fn kwargs(&self) -> HashMap<String, FieldKwarg> {
		(**self).kwargs()
	}
}

impl<C: ElementCodec + ?Sized> ElementCodec for Arc<C> {
	fn field_name(&self) -> &str {
		(**self).field_name()
	}

	fn field_type(&self) -> FieldType {
		(**self).field_type()
	}

	fn column_type(&self) -> String {
		(**self).column_type()
	}

	fn to_native(&self, value: SqlValue) -> Result<SqlValue> {
		(**self).to_native(value)
	}

	fn to_storage(&self, value: SqlValue) -> Result<SqlValue> {
		(**self).to_storage(value)
	}

	fn validate(&self, value: &SqlValue) -> Result<()> {
		(**self).validate(value)
	}

	fn requires_cast(&self) -> bool {
		(**self).requires_cast()
	}

	fn accepts_scalar(&self, value: &SqlValue) -> bool {
		(**self).accepts_scalar(value)
	}

	fn kwargs(&self) -> HashMap<String, FieldKwarg> {
		(**self).kwargs()
	}
}

/// Options every built-in codec carries: element nullability and validators
#[derive(Debug, Clone, Default)]
pub struct ElementOptions {
	pub null: bool,
	pub validators: Vec<Arc<dyn ElementValidator>>,
}

impl ElementOptions {
	/// Apply the NULL policy, then every validator in order
	///
	/// NULL elements are accepted only when the codec was made nullable;
	/// validators never see them.
	pub fn run_validators(&self, value: &SqlValue) -> Result<()> {
		if value.is_null() {
			return if self.null {
				Ok(())
			} else {
				Err(ValidationError::null().into())
			};
		}
		for validator in &self.validators {
			validator.validate(value)?;
		}
		Ok(())
	}
}

macro_rules! impl_element_options {
	($codec:ty) => {
		impl $codec {
			/// Accept SQL NULL as an element
			pub fn nullable(mut self) -> Self {
				self.options.null = true;
				self
			}

			/// Add a validator run against every non-NULL element
			pub fn with_validator(
				mut self,
				validator: impl $crate::validators::ElementValidator + 'static,
			) -> Self {
				self.options
					.validators
					.push(::std::sync::Arc::new(validator));
				self
			}

			/// Whether SQL NULL elements are accepted
			pub fn allows_null(&self) -> bool {
				self.options.null
			}
		}
	};
}

pub(crate) use impl_element_options;

pub(crate) fn invalid(message: impl Into<String>) -> ArrayFieldError {
	ArrayFieldError::validation(message, "invalid")
}

/// Reject a value whose variant does not belong to the codec
pub(crate) fn unexpected(value: &SqlValue, expected: &str) -> ArrayFieldError {
	invalid(format!(
		"'{}' value must be {} but got {}",
		value,
		expected,
		value.type_name()
	))
}

/// String conversion shared by the character codecs
///
/// Scalars render with their display form, except that floats keep their
/// decimal point (`6.0`, not `6`). Arrays are not strings.
pub(crate) fn stringify(value: SqlValue) -> Result<SqlValue> {
	match value {
		SqlValue::Null | SqlValue::String(_) => Ok(value),
		SqlValue::Float(f) => Ok(SqlValue::String(format!("{:?}", f))),
		SqlValue::Array(_) => Err(unexpected(&value, "a string")),
		other => Ok(SqlValue::String(other.to_string())),
	}
}
