//! Error types for array fields
//!
//! Two kinds of failure exist:
//! - [`ArrayFieldError::Configuration`] for schema-time misuse (unsupported
//!   backend, invalid element type, nested arrays, unreadable settings)
//! - [`ArrayFieldError::Validation`] for data-time misuse (non-iterable values,
//!   elements rejected by the element codec)

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation error raised for a value assigned to an array field
///
/// `index` is set when the failure comes from a single element, so callers can
/// point an end user at the offending position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
	pub message: String,
	pub code: String,
	pub index: Option<usize>,
}

impl ValidationError {
	/// Create a new validation error
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::ValidationError;
	///
	/// let error = ValidationError::new("Enter a whole number.", "invalid");
	/// assert_eq!(error.code, "invalid");
	/// assert!(error.index.is_none());
	/// ```
	pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			code: code.into(),
			index: None,
		}
	}

	/// Attach the position of the failing element
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::ValidationError;
	///
	/// let error = ValidationError::new("too long", "max_length").at_index(2);
	/// assert_eq!(error.index, Some(2));
	/// assert_eq!(error.to_string(), "Item 2 in the array did not validate: too long (max_length)");
	/// ```
	pub fn at_index(mut self, index: usize) -> Self {
		self.index = Some(index);
		self
	}

	pub(crate) fn not_iterable() -> Self {
		Self::new(
			"An ArrayField value must be None or an iterable.",
			"not_iterable",
		)
	}

	pub(crate) fn null() -> Self {
		Self::new("This field cannot be null.", "null")
	}
}

impl std::fmt::Display for ValidationError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.index {
			Some(index) => write!(
				f,
				"Item {} in the array did not validate: {} ({})",
				index, self.message, self.code
			),
			None => write!(f, "{} ({})", self.message, self.code),
		}
	}
}

impl std::error::Error for ValidationError {}

/// Errors that can occur when defining or using array fields
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArrayFieldError {
	/// Schema-time misuse
	#[error("Configuration error: {0}")]
	Configuration(String),

	/// Data-time misuse
	#[error("Validation error: {0}")]
	Validation(#[from] ValidationError),
}

impl ArrayFieldError {
	pub(crate) fn configuration(message: impl Into<String>) -> Self {
		Self::Configuration(message.into())
	}

	pub(crate) fn validation(message: impl Into<String>, code: impl Into<String>) -> Self {
		Self::Validation(ValidationError::new(message, code))
	}

	/// Returns `true` for schema-time errors
	pub fn is_configuration(&self) -> bool {
		matches!(self, Self::Configuration(_))
	}

	/// Returns `true` for data-time errors
	pub fn is_validation(&self) -> bool {
		matches!(self, Self::Validation(_))
	}

	/// The underlying validation error, if any
	pub fn as_validation(&self) -> Option<&ValidationError> {
		match self {
			Self::Validation(error) => Some(error),
			Self::Configuration(_) => None,
		}
	}

	/// Attach an element position to a validation error
	///
	/// Configuration errors pass through untouched.
	pub(crate) fn at_index(self, index: usize) -> Self {
		match self {
			Self::Validation(error) => Self::Validation(error.at_index(index)),
			other => other,
		}
	}
}

/// Result type for array field operations
pub type Result<T> = std::result::Result<T, ArrayFieldError>;
