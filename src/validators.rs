//! Element validators
//!
//! Validators run against a single array element after conversion. Element
//! codecs own their validators; the array field only iterates.

use crate::error::{ArrayFieldError, Result};
use crate::value::SqlValue;
use std::fmt;

/// Base trait for element validators
pub trait ElementValidator: fmt::Debug + Send + Sync {
	/// Validate one element; NULL elements are never passed in
	fn validate(&self, value: &SqlValue) -> Result<()>;

	/// Default error message
	fn message(&self) -> String;
}

/// Max length validator
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
	pub max_length: usize,
	pub message: String,
}

impl MaxLengthValidator {
	/// Create a new max length validator
	///
	/// Length is counted in characters, not bytes.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::validators::{ElementValidator, MaxLengthValidator};
	/// use reinhardt_dbarray::SqlValue;
	///
	/// let validator = MaxLengthValidator::new(6);
	/// assert!(validator.validate(&SqlValue::from("Adrian")).is_ok());
	/// assert!(validator.validate(&SqlValue::from("Malcolm")).is_err());
	/// ```
	pub fn new(max_length: usize) -> Self {
		Self {
			max_length,
			message: format!(
				"Ensure this value has at most {} characters",
				max_length
			),
		}
	}

	/// Create a max length validator with custom error message
	pub fn with_message(max_length: usize, message: impl Into<String>) -> Self {
		Self {
			max_length,
			message: message.into(),
		}
	}
}

impl ElementValidator for MaxLengthValidator {
	fn validate(&self, value: &SqlValue) -> Result<()> {
		if let SqlValue::String(s) = value
			&& s.chars().count() > self.max_length
		{
			return Err(ArrayFieldError::validation(
				self.message.clone(),
				"max_length",
			));
		}
		Ok(())
	}

	fn message(&self) -> String {
		self.message.clone()
	}
}

/// Numeric range validator
#[derive(Debug, Clone)]
pub struct RangeValidator {
	pub min: Option<i64>,
	pub max: Option<i64>,
	pub message: String,
}

impl RangeValidator {
	/// Create a new numeric range validator
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::validators::{ElementValidator, RangeValidator};
	/// use reinhardt_dbarray::SqlValue;
	///
	/// let validator = RangeValidator::new(Some(0), Some(100));
	/// assert!(validator.validate(&SqlValue::Int(50)).is_ok());
	/// assert!(validator.validate(&SqlValue::Int(101)).is_err());
	/// assert!(validator.validate(&SqlValue::Float(-0.5)).is_err());
	/// ```
	pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
		let message = match (min, max) {
			(Some(min), Some(max)) => format!("Value must be between {} and {}", min, max),
			(Some(min), None) => format!("Value must be at least {}", min),
			(None, Some(max)) => format!("Value must be at most {}", max),
			(None, None) => "Invalid range".to_string(),
		};
		Self { min, max, message }
	}

	/// Create a range validator with custom error message
	pub fn with_message(min: Option<i64>, max: Option<i64>, message: impl Into<String>) -> Self {
		Self {
			min,
			max,
			message: message.into(),
		}
	}
}

impl ElementValidator for RangeValidator {
	fn validate(&self, value: &SqlValue) -> Result<()> {
		let num = match value {
			SqlValue::Int(i) => *i as f64,
			SqlValue::Float(f) => *f,
			_ => return Ok(()),
		};

		if let Some(min) = self.min
			&& num < min as f64
		{
			return Err(ArrayFieldError::validation(
				self.message.clone(),
				"min_value",
			));
		}

		if let Some(max) = self.max
			&& num > max as f64
		{
			return Err(ArrayFieldError::validation(
				self.message.clone(),
				"max_value",
			));
		}

		Ok(())
	}

	fn message(&self) -> String {
		self.message.clone()
	}
}
