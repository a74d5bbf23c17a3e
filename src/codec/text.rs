//! Unbounded text element codec

use super::{ElementCodec, ElementOptions, stringify, unexpected};
use crate::error::Result;
use crate::fields::{FieldType, FieldTypeName, TextField};
use crate::value::SqlValue;

/// `TEXT` elements
///
/// Like [`super::CharCodec`] without a length bound. `text[]` is the type
/// PostgreSQL infers for untyped string arrays, so lookups are never cast.
#[derive(Debug, Clone, Default)]
pub struct TextCodec {
	options: ElementOptions,
}

impl TextCodec {
	pub fn new() -> Self {
		Self::default()
	}
}

super::impl_element_options!(TextCodec);

impl ElementCodec for TextCodec {
	fn field_name(&self) -> &str {
		TextField::NAME
	}

	fn field_type(&self) -> FieldType {
		FieldType::Text
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
}
