//! Dynamic values exchanged with the database driver
//!
//! [`SqlValue`] is what the driver hands back for a column and what the field
//! hands to the driver for binding. Array columns carry [`SqlValue::Array`].

use crate::error::{ArrayFieldError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Driver-level value
///
/// Deserializing never yields [`SqlValue::Date`]: a date serializes as an ISO
/// string and reads back as [`SqlValue::String`]. The date codec converts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	Date(NaiveDate),
	Array(Vec<SqlValue>),
}

impl SqlValue {
	/// Check whether this is SQL NULL
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::SqlValue;
	///
	/// assert!(SqlValue::Null.is_null());
	/// assert!(!SqlValue::Int(0).is_null());
	/// ```
	pub fn is_null(&self) -> bool {
		matches!(self, SqlValue::Null)
	}

	/// Borrow the elements of an array value
	pub fn as_array(&self) -> Option<&[SqlValue]> {
		match self {
			SqlValue::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Short type label used in error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			SqlValue::Null => "null",
			SqlValue::Bool(_) => "bool",
			SqlValue::Int(_) => "int",
			SqlValue::Float(_) => "float",
			SqlValue::Date(_) => "date",
			SqlValue::String(_) => "string",
			SqlValue::Array(_) => "array",
		}
	}

	/// Convert an array value into a typed vector
	///
	/// NULL maps to `None`; anything that is not an array is rejected as
	/// non-iterable.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::SqlValue;
	///
	/// let value = SqlValue::from(vec![1, 4, 2, 7]);
	/// let ints: Option<Vec<i64>> = value.into_vec().unwrap();
	/// assert_eq!(ints, Some(vec![1, 4, 2, 7]));
	///
	/// let absent: Option<Vec<i64>> = SqlValue::Null.into_vec().unwrap();
	/// assert!(absent.is_none());
	/// ```
	pub fn into_vec<T>(self) -> Result<Option<Vec<T>>>
	where
		T: TryFrom<SqlValue, Error = ArrayFieldError>,
	{
		match self {
			SqlValue::Null => Ok(None),
			SqlValue::Array(items) => items
				.into_iter()
				.map(T::try_from)
				.collect::<Result<Vec<T>>>()
				.map(Some),
			_ => Err(crate::error::ValidationError::not_iterable().into()),
		}
	}
}

impl fmt::Display for SqlValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SqlValue::Null => write!(f, "NULL"),
			SqlValue::Bool(b) => write!(f, "{}", b),
			SqlValue::Int(i) => write!(f, "{}", i),
			SqlValue::Float(x) => write!(f, "{}", x),
			SqlValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
			SqlValue::String(s) => write!(f, "{}", s),
			SqlValue::Array(items) => {
				write!(f, "{{")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						write!(f, ",")?;
					}
					write!(f, "{}", item)?;
				}
				write!(f, "}}")
			}
		}
	}
}

impl From<bool> for SqlValue {
	fn from(b: bool) -> Self {
		SqlValue::Bool(b)
	}
}

impl From<i64> for SqlValue {
	fn from(i: i64) -> Self {
		SqlValue::Int(i)
	}
}

impl From<i32> for SqlValue {
	fn from(i: i32) -> Self {
		SqlValue::Int(i as i64)
	}
}

impl From<f64> for SqlValue {
	fn from(f: f64) -> Self {
		SqlValue::Float(f)
	}
}

impl From<NaiveDate> for SqlValue {
	fn from(d: NaiveDate) -> Self {
		SqlValue::Date(d)
	}
}

impl From<&str> for SqlValue {
	fn from(s: &str) -> Self {
		SqlValue::String(s.to_string())
	}
}

impl From<String> for SqlValue {
	fn from(s: String) -> Self {
		SqlValue::String(s)
	}
}

impl<T: Into<SqlValue>> From<Vec<T>> for SqlValue {
	fn from(items: Vec<T>) -> Self {
		SqlValue::Array(items.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(SqlValue::Null, Into::into)
	}
}

fn type_error(value: &SqlValue, target: &str) -> ArrayFieldError {
	ArrayFieldError::validation(
		format!("Cannot convert {} value '{}' to {}", value.type_name(), value, target),
		"invalid",
	)
}

impl TryFrom<SqlValue> for i64 {
	type Error = ArrayFieldError;

	fn try_from(value: SqlValue) -> Result<Self> {
		match value {
			SqlValue::Int(i) => Ok(i),
			_ => Err(type_error(&value, "i64")),
		}
	}
}

impl TryFrom<SqlValue> for i32 {
	type Error = ArrayFieldError;

	fn try_from(value: SqlValue) -> Result<Self> {
		match value {
			SqlValue::Int(i) => i32::try_from(i).map_err(|_| {
				ArrayFieldError::validation(
					format!("Value {} out of range for i32", i),
					"invalid",
				)
			}),
			_ => Err(type_error(&value, "i32")),
		}
	}
}

impl TryFrom<SqlValue> for f64 {
	type Error = ArrayFieldError;

	fn try_from(value: SqlValue) -> Result<Self> {
		match value {
			SqlValue::Float(f) => Ok(f),
			SqlValue::Int(i) => Ok(i as f64),
			_ => Err(type_error(&value, "f64")),
		}
	}
}

impl TryFrom<SqlValue> for bool {
	type Error = ArrayFieldError;

	fn try_from(value: SqlValue) -> Result<Self> {
		match value {
			SqlValue::Bool(b) => Ok(b),
			_ => Err(type_error(&value, "bool")),
		}
	}
}

impl TryFrom<SqlValue> for String {
	type Error = ArrayFieldError;

	fn try_from(value: SqlValue) -> Result<Self> {
		match value {
			SqlValue::String(s) => Ok(s),
			_ => Err(type_error(&value, "String")),
		}
	}
}

impl TryFrom<SqlValue> for NaiveDate {
	type Error = ArrayFieldError;

	fn try_from(value: SqlValue) -> Result<Self> {
		match value {
			SqlValue::Date(d) => Ok(d),
			_ => Err(type_error(&value, "NaiveDate")),
		}
	}
}
