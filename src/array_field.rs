//! Array fields
//!
//! [`ArrayField`] wraps an element codec and lifts its conversion, validation
//! and typing to one-dimensional PostgreSQL arrays. The field only iterates;
//! everything element-specific is delegated to the codec.
//!
//! ```
//! use reinhardt_dbarray::{CharArrayField, DatabaseConfig, SqlValue};
//!
//! let names = CharArrayField::with_max_length(10);
//! let pg = DatabaseConfig::postgresql("app", "u", "p", "localhost", 5432);
//!
//! assert_eq!(names.db_type(&pg).unwrap(), "VARCHAR(10)[]");
//! assert_eq!(
//!     names.prepare_outbound("Adrian").unwrap(),
//!     SqlValue::from(vec!["Adrian"])
//! );
//! ```

use crate::backends::require_postgres;
use crate::codec::{CharCodec, DateCodec, ElementCodec, FloatCodec, IntegerCodec, TextCodec};
use crate::error::{ArrayFieldError, Result, ValidationError};
use crate::fields::{FieldDeconstruction, FieldKwarg, FieldType};
use crate::lookup::{CastExpression, LookupOperand, LookupType};
use crate::settings::DatabaseConfig;
use crate::value::SqlValue;

/// Module path reported by `deconstruct()`
const DECONSTRUCT_PATH: &str = "reinhardt.contrib.dbarray";

/// Array of integers (`INTEGER[]`)
pub type IntegerArrayField = ArrayField<IntegerCodec>;
/// Array of floats (`DOUBLE PRECISION[]`)
pub type FloatArrayField = ArrayField<FloatCodec>;
/// Array of bounded strings (`VARCHAR(n)[]`)
pub type CharArrayField = ArrayField<CharCodec>;
/// Array of strings (`TEXT[]`)
pub type TextArrayField = ArrayField<TextCodec>;
/// Array of dates (`DATE[]`)
pub type DateArrayField = ArrayField<DateCodec>;
/// Array field whose element codec is chosen at runtime
pub type DynArrayField = ArrayField<Box<dyn ElementCodec>>;

/// A one-dimensional array column of a single element type
#[derive(Debug, Clone)]
pub struct ArrayField<C: ElementCodec> {
	codec: C,
	name: Option<String>,
	null: bool,
	db_column: Option<String>,
}

impl<C: ElementCodec> ArrayField<C> {
	/// Create an array field over `codec`
	///
	/// Codecs that already describe an array column are rejected with a
	/// configuration error, since multi-dimensional arrays are not supported.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::{ArrayField, codec::IntegerCodec};
	///
	/// let field = ArrayField::try_new(IntegerCodec::new()).unwrap().null(true);
	/// assert!(field.is_nullable());
	/// assert!(!field.cast_lookups());
	/// ```
	pub fn try_new(codec: C) -> Result<Self> {
		if codec.field_type().is_array() {
			return Err(ArrayFieldError::configuration(format!(
				"Array fields cannot be nested ({} elements are already arrays)",
				codec.field_name()
			)));
		}
		Ok(Self::from_scalar_codec(codec))
	}

	/// Wrap a codec known to describe a scalar column
	fn from_scalar_codec(codec: C) -> Self {
		Self {
			codec,
			name: None,
			null: false,
			db_column: None,
		}
	}

	/// Allow SQL NULL for the whole array
	pub fn null(mut self, null: bool) -> Self {
		self.null = null;
		self
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn db_column(mut self, db_column: impl Into<String>) -> Self {
		self.db_column = Some(db_column.into());
		self
	}

	pub fn codec(&self) -> &C {
		&self.codec
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn is_nullable(&self) -> bool {
		self.null
	}

	/// Column name used in SQL: `db_column`, else the field name
	pub fn column(&self) -> Option<&str> {
		self.db_column.as_deref().or(self.name.as_deref())
	}

	/// Whether lookup values are wrapped in an explicit cast
	pub fn cast_lookups(&self) -> bool {
		self.codec.requires_cast()
	}

	/// Array column type without the backend gate
	pub fn column_type(&self) -> String {
		format!("{}[]", self.codec.column_type())
	}

	/// Column type for `CREATE TABLE`
	///
	/// Fails with a configuration error on any backend other than PostgreSQL.
	pub fn db_type(&self, connection: &DatabaseConfig) -> Result<String> {
		require_postgres(connection)?;
		Ok(self.column_type())
	}

	/// Column type for the migrations layer
	pub fn field_type(&self) -> FieldType {
		FieldType::Array(Box::new(self.codec.field_type()))
	}

	/// Human readable description
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::DateArrayField;
	///
	/// assert_eq!(
	///     DateArrayField::default().description(),
	///     "An array, where each element is of the same type as DateField."
	/// );
	/// ```
	pub fn description(&self) -> String {
		format!(
			"An array, where each element is of the same type as {}.",
			self.codec.field_name()
		)
	}

	/// Convert a value read from the driver
	///
	/// NULL becomes `None`. Each element goes through the codec's inbound
	/// conversion, order preserved.
	pub fn parse_inbound(&self, value: impl Into<SqlValue>) -> Result<Option<Vec<SqlValue>>> {
		match value.into() {
			SqlValue::Null => Ok(None),
			SqlValue::Array(items) => {
				tracing::trace!(
					element = self.codec.field_name(),
					len = items.len(),
					"parsing inbound array"
				);
				self.map_elements(items, |codec, item| codec.to_native(item))
					.map(Some)
			}
			_ => Err(ValidationError::not_iterable().into()),
		}
	}

	/// Convert an in-memory value into the driver representation
	///
	/// A bare scalar is wrapped into a one-element array when the codec
	/// accepts it (strings for char elements).
	pub fn prepare_outbound(&self, value: impl Into<SqlValue>) -> Result<SqlValue> {
		let value = value.into();
		let items = match value {
			SqlValue::Null => return Ok(SqlValue::Null),
			SqlValue::Array(items) => items,
			scalar if self.codec.accepts_scalar(&scalar) => vec![scalar],
			_ => return Err(ValidationError::not_iterable().into()),
		};
		tracing::trace!(
			element = self.codec.field_name(),
			len = items.len(),
			"preparing outbound array"
		);
		self.map_elements(items, |codec, item| codec.to_storage(item))
			.map(SqlValue::Array)
	}

	/// Validate a whole value
	///
	/// The first failing element is reported with its index. Empty arrays
	/// are valid.
	pub fn validate(&self, value: &SqlValue) -> Result<()> {
		match value {
			SqlValue::Null if self.null => Ok(()),
			SqlValue::Null => Err(ValidationError::null().into()),
			SqlValue::Array(items) => self.validate_elements(items),
			_ => Err(ValidationError::not_iterable().into()),
		}
	}

	/// Inbound conversion followed by validation
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::{IntegerArrayField, SqlValue};
	///
	/// let field = IntegerArrayField::default();
	/// let cleaned = field.clean(vec!["1", "4"]).unwrap();
	/// assert_eq!(cleaned, Some(vec![SqlValue::Int(1), SqlValue::Int(4)]));
	///
	/// let error = field.clean(vec!["1", "x"]).unwrap_err();
	/// assert_eq!(error.as_validation().unwrap().index, Some(1));
	/// ```
	pub fn clean(&self, value: impl Into<SqlValue>) -> Result<Option<Vec<SqlValue>>> {
		let parsed = self.parse_inbound(value)?;
		match &parsed {
			None if !self.null => return Err(ValidationError::null().into()),
			None => {}
			Some(items) => self.validate_elements(items)?,
		}
		Ok(parsed)
	}

	/// Value handed to the driver when saving
	///
	/// `prepared` values are passed through untouched after the backend gate.
	pub fn get_db_prep_value(
		&self,
		value: impl Into<SqlValue>,
		connection: &DatabaseConfig,
		prepared: bool,
	) -> Result<SqlValue> {
		require_postgres(connection)?;
		if prepared {
			Ok(value.into())
		} else {
			self.prepare_outbound(value)
		}
	}

	/// Prepare a filter value for `lookup_type`
	///
	/// `isnull` takes a boolean; every other lookup takes an array (or a
	/// scalar the codec accepts) and converts it like a saved value.
	pub fn get_prep_lookup(
		&self,
		lookup_type: LookupType,
		value: impl Into<SqlValue>,
	) -> Result<SqlValue> {
		let value = value.into();
		match (lookup_type, value) {
			(LookupType::IsNull, flag @ SqlValue::Bool(_)) => Ok(flag),
			(LookupType::IsNull, _) => Err(ArrayFieldError::validation(
				"The QuerySet value for an isnull lookup must be True or False.",
				"invalid_lookup",
			)),
			(_, SqlValue::Null) => Err(ArrayFieldError::validation(
				format!(
					"Cannot use None as a query value for '{}'; use isnull instead.",
					lookup_type
				),
				"invalid_lookup",
			)),
			(_, value) => self.prepare_outbound(value),
		}
	}

	/// Build the right-hand side of a lookup without the backend gate
	///
	/// When the codec requires it, the value is wrapped in a cast to the
	/// array column type.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::{FloatArrayField, LookupOperand, LookupType};
	///
	/// let field = FloatArrayField::default();
	/// let operand = field
	///     .build_lookup_operand(LookupType::Exact, vec![3.5, 6.0], false)
	///     .unwrap();
	///
	/// match operand {
	///     LookupOperand::Cast(cast) => assert_eq!(cast.db_type, "DOUBLE PRECISION[]"),
	///     LookupOperand::Params(_) => unreachable!(),
	/// }
	/// ```
	pub fn build_lookup_operand(
		&self,
		lookup_type: LookupType,
		value: impl Into<SqlValue>,
		prepared: bool,
	) -> Result<LookupOperand> {
		let value = if prepared {
			value.into()
		} else {
			self.get_prep_lookup(lookup_type, value)?
		};

		if lookup_type == LookupType::IsNull || !self.cast_lookups() {
			return Ok(LookupOperand::Params(vec![value]));
		}
		Ok(LookupOperand::Cast(CastExpression::new(
			value,
			self.column_type(),
		)))
	}

	/// Right-hand side of a lookup, after the backend gate
	pub fn get_db_prep_lookup(
		&self,
		lookup_type: LookupType,
		value: impl Into<SqlValue>,
		connection: &DatabaseConfig,
		prepared: bool,
	) -> Result<LookupOperand> {
		require_postgres(connection)?;
		self.build_lookup_operand(lookup_type, value, prepared)
	}

	/// Name, import path and constructor arguments for migrations
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::{CharArrayField, FieldKwarg};
	///
	/// let field = CharArrayField::with_max_length(10).with_name("names");
	/// let deconstructed = field.deconstruct();
	///
	/// assert_eq!(deconstructed.path, "reinhardt.contrib.dbarray.CharArrayField");
	/// assert_eq!(deconstructed.kwargs.get("max_length"), Some(&FieldKwarg::Uint(10)));
	/// ```
	pub fn deconstruct(&self) -> FieldDeconstruction {
		let mut kwargs = self.codec.kwargs();
		if self.null {
			kwargs.insert("null".to_string(), FieldKwarg::Bool(true));
		}
		if let Some(db_column) = &self.db_column {
			kwargs.insert("db_column".to_string(), FieldKwarg::String(db_column.clone()));
		}

		FieldDeconstruction {
			name: self.name.clone(),
			path: format!("{}.{}", DECONSTRUCT_PATH, self.class_name()),
			args: Vec::new(),
			kwargs,
		}
	}

	/// `IntegerField` becomes `IntegerArrayField`
	fn class_name(&self) -> String {
		let element = self.codec.field_name();
		let stem = element.strip_suffix("Field").unwrap_or(element);
		format!("{}ArrayField", stem)
	}

	fn map_elements(
		&self,
		items: Vec<SqlValue>,
		convert: impl Fn(&C, SqlValue) -> Result<SqlValue>,
	) -> Result<Vec<SqlValue>> {
		items
			.into_iter()
			.enumerate()
			.map(|(index, item)| convert(&self.codec, item).map_err(|e| e.at_index(index)))
			.collect()
	}

	fn validate_elements(&self, items: &[SqlValue]) -> Result<()> {
		for (index, item) in items.iter().enumerate() {
			self.codec.validate(item).map_err(|e| e.at_index(index))?;
		}
		Ok(())
	}
}

macro_rules! impl_default_array_field {
	($($codec:ty),* $(,)?) => {
		$(
			impl Default for ArrayField<$codec> {
				fn default() -> Self {
					Self::from_scalar_codec(<$codec>::default())
				}
			}
		)*
	};
}

impl_default_array_field!(IntegerCodec, FloatCodec, CharCodec, TextCodec, DateCodec);

impl ArrayField<CharCodec> {
	/// `VARCHAR(max_length)[]`
	pub fn with_max_length(max_length: u32) -> Self {
		Self::from_scalar_codec(CharCodec::new(max_length))
	}
}

/// Build an array field over any element codec
///
/// # Examples
///
/// ```
/// use reinhardt_dbarray::{array_of, codec::TextCodec};
///
/// let tags = array_of(TextCodec::new().nullable()).unwrap();
/// assert_eq!(tags.column_type(), "TEXT[]");
/// ```
pub fn array_of<C: ElementCodec>(codec: C) -> Result<ArrayField<C>> {
	ArrayField::try_new(codec)
}
