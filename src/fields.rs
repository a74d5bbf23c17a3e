//! Field metadata shared with the migrations layer
//!
//! [`FieldType`] describes a column type the way the schema generator sees it,
//! [`FieldDeconstruction`] is the Django-style `deconstruct()` result used when
//! writing migration files.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents database field types relevant to array columns
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
	// Integer types
	BigInteger,
	Integer,
	SmallInteger,

	// String types (with parameters)
	Char(u32),
	VarChar(u32),
	Text,

	// Date/time types
	Date,

	// Numeric types
	Double,

	// Boolean type
	Boolean,

	/// PostgreSQL Array type with inner element type
	Array(Box<FieldType>),

	// Custom types
	Custom(String),
}

impl FieldType {
	/// Convert FieldType to its PostgreSQL column type
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::FieldType;
	///
	/// assert_eq!(FieldType::VarChar(10).to_sql_string(), "VARCHAR(10)");
	/// assert_eq!(
	///     FieldType::Array(Box::new(FieldType::Double)).to_sql_string(),
	///     "DOUBLE PRECISION[]"
	/// );
	/// ```
	pub fn to_sql_string(&self) -> String {
		match self {
			FieldType::BigInteger => "BIGINT".to_string(),
			FieldType::Integer => "INTEGER".to_string(),
			FieldType::SmallInteger => "SMALLINT".to_string(),
			FieldType::Char(max_length) => format!("CHAR({})", max_length),
			FieldType::VarChar(max_length) => format!("VARCHAR({})", max_length),
			FieldType::Text => "TEXT".to_string(),
			FieldType::Date => "DATE".to_string(),
			FieldType::Double => "DOUBLE PRECISION".to_string(),
			FieldType::Boolean => "BOOLEAN".to_string(),
			FieldType::Array(inner) => format!("{}[]", inner.to_sql_string()),
			FieldType::Custom(custom_type) => custom_type.clone(),
		}
	}

	/// Name of the model field class that produces this column type
	///
	/// Used as the lookup key of the array field registry. Custom types use
	/// their own name.
	pub fn field_name(&self) -> &str {
		match self {
			FieldType::BigInteger => BigIntegerField::NAME,
			FieldType::Integer => IntegerField::NAME,
			FieldType::SmallInteger => SmallIntegerField::NAME,
			FieldType::Char(_) | FieldType::VarChar(_) => CharField::NAME,
			FieldType::Text => TextField::NAME,
			FieldType::Date => DateField::NAME,
			FieldType::Double => FloatField::NAME,
			FieldType::Boolean => BooleanField::NAME,
			FieldType::Array(_) => ArrayField::NAME,
			FieldType::Custom(name) => name,
		}
	}

	/// Check if this is an array type
	pub fn is_array(&self) -> bool {
		matches!(self, FieldType::Array(_))
	}

	/// Get max_length if this type has one
	pub fn max_length(&self) -> Option<u32> {
		match self {
			FieldType::Char(max_length) | FieldType::VarChar(max_length) => Some(*max_length),
			_ => None,
		}
	}
}

/// Trait for field types that provide their type name as a compile-time constant
pub trait FieldTypeName {
	const NAME: &'static str;
}

// Type-safe field type markers
pub struct BigIntegerField;
impl FieldTypeName for BigIntegerField {
	const NAME: &'static str = "BigIntegerField";
}

pub struct IntegerField;
impl FieldTypeName for IntegerField {
	const NAME: &'static str = "IntegerField";
}

pub struct SmallIntegerField;
impl FieldTypeName for SmallIntegerField {
	const NAME: &'static str = "SmallIntegerField";
}

pub struct FloatField;
impl FieldTypeName for FloatField {
	const NAME: &'static str = "FloatField";
}

pub struct CharField;
impl FieldTypeName for CharField {
	const NAME: &'static str = "CharField";
}

pub struct TextField;
impl FieldTypeName for TextField {
	const NAME: &'static str = "TextField";
}

pub struct DateField;
impl FieldTypeName for DateField {
	const NAME: &'static str = "DateField";
}

pub struct BooleanField;
impl FieldTypeName for BooleanField {
	const NAME: &'static str = "BooleanField";
}

pub struct ArrayField;
impl FieldTypeName for ArrayField {
	const NAME: &'static str = "ArrayField";
}

/// Field deconstruction result
/// Returns (name, path, args, kwargs) similar to Django's deconstruct()
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeconstruction {
	pub name: Option<String>,
	pub path: String,
	pub args: Vec<FieldArg>,
	pub kwargs: HashMap<String, FieldKwarg>,
}

/// Positional argument for field construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldArg {
	String(String),
	Int(i64),
	Bool(bool),
	Float(f64),
}

/// Keyword argument for field construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldKwarg {
	String(String),
	Int(i64),
	Uint(u64),
	Bool(bool),
	Float(f64),
}
