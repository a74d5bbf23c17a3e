//! Array field registry
//!
//! Maps element field names to codec factories so an array field can be
//! derived from a [`FieldType`] read at runtime (migration state, model
//! metadata). The five built-in element types are registered up front; other
//! element types are added with [`ArrayFieldRegistry::register`].

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::array_field::{ArrayField, DynArrayField};
use crate::codec::{CharCodec, DateCodec, ElementCodec, FloatCodec, IntegerCodec, TextCodec};
use crate::error::{ArrayFieldError, Result};
use crate::fields::{CharField, DateField, FieldType, FieldTypeName, FloatField, IntegerField, TextField};

/// Builds an element codec from the element's column type
pub type CodecFactory = fn(&FieldType) -> Result<Box<dyn ElementCodec>>;

/// Registry of element codec factories, keyed by element field name
#[derive(Debug, Clone)]
pub struct ArrayFieldRegistry {
	factories: Arc<RwLock<HashMap<String, CodecFactory>>>,
}

fn integer_codec(_: &FieldType) -> Result<Box<dyn ElementCodec>> {
	Ok(Box::new(IntegerCodec::new()))
}

fn float_codec(_: &FieldType) -> Result<Box<dyn ElementCodec>> {
	Ok(Box::new(FloatCodec::new()))
}

fn char_codec(field_type: &FieldType) -> Result<Box<dyn ElementCodec>> {
	if let FieldType::Char(max_length) = field_type {
		return Err(ArrayFieldError::configuration(format!(
			"CharField array elements are VARCHAR; fixed-length CHAR({}) is not supported",
			max_length
		)));
	}
	let max_length = field_type.max_length().ok_or_else(|| {
		ArrayFieldError::configuration(format!(
			"CharField elements require a max_length, got {:?}",
			field_type
		))
	})?;
	Ok(Box::new(CharCodec::new(max_length)))
}

fn text_codec(_: &FieldType) -> Result<Box<dyn ElementCodec>> {
	Ok(Box::new(TextCodec::new()))
}

fn date_codec(_: &FieldType) -> Result<Box<dyn ElementCodec>> {
	Ok(Box::new(DateCodec::new()))
}

impl ArrayFieldRegistry {
	/// Create a registry with the built-in element types
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::{ArrayFieldRegistry, FieldType};
	///
	/// let registry = ArrayFieldRegistry::new();
	/// let field = registry.derive(&FieldType::VarChar(10)).unwrap();
	/// assert_eq!(field.column_type(), "VARCHAR(10)[]");
	/// ```
	pub fn new() -> Self {
		let registry = Self::empty();
		registry.register::<IntegerField>(integer_codec);
		registry.register::<FloatField>(float_codec);
		registry.register::<CharField>(char_codec);
		registry.register::<TextField>(text_codec);
		registry.register::<DateField>(date_codec);
		registry
	}

	/// Create a registry with nothing registered
	pub fn empty() -> Self {
		Self {
			factories: Arc::new(RwLock::new(HashMap::new())),
		}
	}

	/// Register the codec factory for element field `M`
	///
	/// A later registration for the same field replaces the earlier one.
	pub fn register<M: FieldTypeName>(&self, factory: CodecFactory) {
		self.register_name(M::NAME, factory);
	}

	/// Register a codec factory under an explicit element field name
	pub fn register_name(&self, field_name: impl Into<String>, factory: CodecFactory) {
		let field_name = field_name.into();
		tracing::debug!(element = %field_name, "registering array element codec");
		self.factories.write().insert(field_name, factory);
	}

	pub fn is_registered(&self, field_name: &str) -> bool {
		self.factories.read().contains_key(field_name)
	}

	/// Registered element field names, sorted
	pub fn registered_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.factories.read().keys().cloned().collect();
		names.sort();
		names
	}

	/// Derive an array field whose elements have `element` as column type
	///
	/// Nested arrays and unregistered element types are configuration errors.
	pub fn derive(&self, element: &FieldType) -> Result<DynArrayField> {
		if element.is_array() {
			return Err(ArrayFieldError::configuration(
				"Array fields cannot be nested; multi-dimensional arrays are not supported",
			));
		}

		let field_name = element.field_name();
		let factory = self.factories.read().get(field_name).copied();
		let Some(factory) = factory else {
			return Err(ArrayFieldError::configuration(format!(
				"No array element codec registered for {}",
				field_name
			)));
		};

		let codec = factory(element)?;
		let field = ArrayField::try_new(codec)?;
		tracing::debug!(
			element = field_name,
			column_type = %field.column_type(),
			"derived array field"
		);
		Ok(field)
	}
}

impl Default for ArrayFieldRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Process-wide registry with the built-in element types
///
/// # Examples
///
/// ```
/// use reinhardt_dbarray::{FieldType, registry::global_registry};
///
/// let field = global_registry().derive(&FieldType::Date).unwrap();
/// assert!(field.cast_lookups());
/// ```
pub fn global_registry() -> &'static ArrayFieldRegistry {
	static REGISTRY: Lazy<ArrayFieldRegistry> = Lazy::new(ArrayFieldRegistry::new);
	&REGISTRY
}
