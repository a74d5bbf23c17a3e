//! Lookups on array columns
//!
//! An array field turns a filter value into a [`LookupOperand`]: either plain
//! bind parameters or a [`CastExpression`] when the element type is ambiguous
//! to PostgreSQL. [`ArrayLookup`] renders the operand into a WHERE-clause
//! fragment with `$n` placeholders.

use crate::error::{ArrayFieldError, Result};
use crate::value::SqlValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lookup types supported on array columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupType {
	/// Whole-array equality
	Exact,
	/// Column contains every element of the operand
	Contains,
	/// Every element of the column is in the operand
	ContainedBy,
	/// Column and operand share at least one element
	Overlap,
	IsNull,
}

impl LookupType {
	/// Lookup name as written in filter keywords (`tags__contains`)
	pub fn name(&self) -> &'static str {
		match self {
			LookupType::Exact => "exact",
			LookupType::Contains => "contains",
			LookupType::ContainedBy => "contained_by",
			LookupType::Overlap => "overlap",
			LookupType::IsNull => "isnull",
		}
	}

	/// SQL operator, `None` for `IsNull`
	pub fn operator(&self) -> Option<&'static str> {
		match self {
			LookupType::Exact => Some("="),
			LookupType::Contains => Some("@>"),
			LookupType::ContainedBy => Some("<@"),
			LookupType::Overlap => Some("&&"),
			LookupType::IsNull => None,
		}
	}
}

impl FromStr for LookupType {
	type Err = ArrayFieldError;

	/// Parse a lookup name
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::LookupType;
	///
	/// assert_eq!("contains".parse::<LookupType>().unwrap(), LookupType::Contains);
	/// assert!("icontains".parse::<LookupType>().is_err());
	/// ```
	fn from_str(s: &str) -> Result<Self> {
		match s {
			"exact" => Ok(LookupType::Exact),
			"contains" => Ok(LookupType::Contains),
			"contained_by" => Ok(LookupType::ContainedBy),
			"overlap" => Ok(LookupType::Overlap),
			"isnull" => Ok(LookupType::IsNull),
			other => Err(ArrayFieldError::configuration(format!(
				"Unsupported lookup type for array fields: {}",
				other
			))),
		}
	}
}

impl fmt::Display for LookupType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A bind parameter with an explicit SQL type cast
///
/// Never persisted; only produced while building lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct CastExpression {
	pub value: SqlValue,
	pub db_type: String,
}

impl CastExpression {
	pub fn new(value: SqlValue, db_type: impl Into<String>) -> Self {
		Self {
			value,
			db_type: db_type.into(),
		}
	}

	/// Render with the given placeholder
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::{CastExpression, SqlValue};
	///
	/// let cast = CastExpression::new(SqlValue::from(vec![3.5, 6.0]), "DOUBLE PRECISION[]");
	/// let (sql, params) = cast.as_sql("$1");
	///
	/// assert_eq!(sql, "$1::DOUBLE PRECISION[]");
	/// assert_eq!(params, vec![SqlValue::from(vec![3.5, 6.0])]);
	/// ```
	pub fn as_sql(&self, placeholder: &str) -> (String, Vec<SqlValue>) {
		(
			format!("{}::{}", placeholder, self.db_type),
			vec![self.value.clone()],
		)
	}
}

/// Right-hand side of an array lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOperand {
	/// Plain bind parameters
	Params(Vec<SqlValue>),
	/// A single parameter wrapped in a cast
	Cast(CastExpression),
}

impl LookupOperand {
	pub fn is_cast(&self) -> bool {
		matches!(self, LookupOperand::Cast(_))
	}

	/// The values to bind, in order
	pub fn params(&self) -> Vec<SqlValue> {
		match self {
			LookupOperand::Params(params) => params.clone(),
			LookupOperand::Cast(cast) => vec![cast.value.clone()],
		}
	}
}

/// A compiled predicate on one array column
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLookup {
	column: String,
	lookup_type: LookupType,
	operand: LookupOperand,
}

impl ArrayLookup {
	pub fn new(column: impl Into<String>, lookup_type: LookupType, operand: LookupOperand) -> Self {
		Self {
			column: column.into(),
			lookup_type,
			operand,
		}
	}

	pub fn column(&self) -> &str {
		&self.column
	}

	pub fn lookup_type(&self) -> LookupType {
		self.lookup_type
	}

	pub fn operand(&self) -> &LookupOperand {
		&self.operand
	}

	/// Render as a WHERE-clause fragment
	///
	/// Placeholders are numbered from `first_param`. `IsNull` renders without
	/// parameters.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::{ArrayLookup, LookupOperand, LookupType, SqlValue};
	///
	/// let lookup = ArrayLookup::new(
	///     "tags",
	///     LookupType::Contains,
	///     LookupOperand::Params(vec![SqlValue::from(vec!["a"])]),
	/// );
	/// let (sql, params) = lookup.to_sql(3).unwrap();
	///
	/// assert_eq!(sql, r#""tags" @> $3"#);
	/// assert_eq!(params.len(), 1);
	/// ```
	pub fn to_sql(&self, first_param: usize) -> Result<(String, Vec<SqlValue>)> {
		let column = quote_identifier(&self.column);

		let Some(operator) = self.lookup_type.operator() else {
			return match self.operand.params().as_slice() {
				[SqlValue::Bool(true)] => Ok((format!("{} IS NULL", column), Vec::new())),
				[SqlValue::Bool(false)] => Ok((format!("{} IS NOT NULL", column), Vec::new())),
				_ => Err(ArrayFieldError::validation(
					"The QuerySet value for an isnull lookup must be True or False.",
					"invalid_lookup",
				)),
			};
		};

		let placeholder = format!("${}", first_param);
		let (rhs, params) = match &self.operand {
			LookupOperand::Cast(cast) => cast.as_sql(&placeholder),
			LookupOperand::Params(params) if params.len() == 1 => (placeholder, params.clone()),
			LookupOperand::Params(params) => {
				return Err(ArrayFieldError::configuration(format!(
					"Array lookup '{}' expects one parameter, got {}",
					self.lookup_type,
					params.len()
				)));
			}
		};

		Ok((format!("{} {} {}", column, operator, rhs), params))
	}
}

/// Double-quote each segment of a possibly table-qualified column name
fn quote_identifier(name: &str) -> String {
	name.split('.')
		.map(|segment| format!("\"{}\"", segment.replace('"', "\"\"")))
		.collect::<Vec<_>>()
		.join(".")
}
