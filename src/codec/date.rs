//! Calendar date element codec

use super::{ElementCodec, ElementOptions, invalid, unexpected};
use crate::error::{ArrayFieldError, Result};
use crate::fields::{DateField, FieldType, FieldTypeName};
use crate::value::SqlValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// `DATE` elements
///
/// Strings in ISO-8601 form are parsed to [`SqlValue::Date`]; datetimes are
/// truncated to their date. Outbound values go through the same parser so the
/// driver binds a native date instead of a preformatted string.
///
/// # Examples
///
/// ```
/// use reinhardt_dbarray::codec::{DateCodec, ElementCodec};
/// use reinhardt_dbarray::SqlValue;
/// use chrono::NaiveDate;
///
/// let codec = DateCodec::new();
/// let date = NaiveDate::from_ymd_opt(1953, 5, 16).unwrap();
/// assert_eq!(codec.to_storage(SqlValue::from("1953-05-16")).unwrap(), SqlValue::Date(date));
/// assert!(codec.requires_cast());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DateCodec {
	options: ElementOptions,
}

impl DateCodec {
	pub fn new() -> Self {
		Self::default()
	}
}

super::impl_element_options!(DateCodec);

fn parse_date(raw: &str) -> Result<NaiveDate> {
	let raw = raw.trim();
	if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
		return Ok(date);
	}
	for format in DATETIME_FORMATS {
		if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
			return Ok(datetime.date());
		}
	}
	if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
		return Ok(datetime.date_naive());
	}

	// Well-formed but out of calendar (e.g. 2010-02-30)
	if looks_like_date(raw) {
		return Err(ArrayFieldError::validation(
			format!(
				"'{}' value has the correct format (YYYY-MM-DD) but it is an invalid date.",
				raw
			),
			"invalid_date",
		));
	}
	Err(invalid(format!(
		"'{}' value has an invalid date format. It must be in YYYY-MM-DD format.",
		raw
	)))
}

fn looks_like_date(raw: &str) -> bool {
	let parts: Vec<&str> = raw.splitn(3, '-').collect();
	parts.len() == 3
		&& [4, 2, 2]
			.iter()
			.zip(&parts)
			.all(|(len, part)| part.len() == *len && part.bytes().all(|b| b.is_ascii_digit()))
}

impl ElementCodec for DateCodec {
	fn field_name(&self) -> &str {
		DateField::NAME
	}

	fn field_type(&self) -> FieldType {
		FieldType::Date
	}

	fn to_native(&self, value: SqlValue) -> Result<SqlValue> {
		match value {
			SqlValue::Null | SqlValue::Date(_) => Ok(value),
			SqlValue::String(ref s) => parse_date(s).map(SqlValue::Date),
			_ => Err(unexpected(&value, "a date")),
		}
	}

	fn to_storage(&self, value: SqlValue) -> Result<SqlValue> {
		self.to_native(value)
	}

	fn validate(&self, value: &SqlValue) -> Result<()> {
		match value {
			SqlValue::Null | SqlValue::Date(_) => self.options.run_validators(value),
			other => Err(unexpected(other, "a date")),
		}
	}

	fn requires_cast(&self) -> bool {
		true
	}
}
