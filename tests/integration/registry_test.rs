//! Integration tests for extending array fields with custom element types

use crate::fixtures::{MemoryTable, postgres};
use reinhardt_dbarray::codec::ElementCodec;
use reinhardt_dbarray::fields::BooleanField;
use reinhardt_dbarray::{
	ArrayFieldError, ArrayFieldRegistry, DatabaseConfig, FieldType, FieldTypeName, LookupType,
	Result, SqlValue, ValidationError, array_of,
};
use rstest::rstest;

/// Boolean elements, accepting the usual textual spellings
#[derive(Debug, Default)]
struct BooleanCodec;

impl ElementCodec for BooleanCodec {
	fn field_name(&self) -> &str {
		BooleanField::NAME
	}

	fn field_type(&self) -> FieldType {
		FieldType::Boolean
	}

	fn to_native(&self, value: SqlValue) -> Result<SqlValue> {
		match value {
			SqlValue::Bool(_) => Ok(value),
			SqlValue::Int(1) => Ok(SqlValue::Bool(true)),
			SqlValue::Int(0) => Ok(SqlValue::Bool(false)),
			SqlValue::String(ref s) => match s.as_str() {
				"t" | "true" | "1" => Ok(SqlValue::Bool(true)),
				"f" | "false" | "0" => Ok(SqlValue::Bool(false)),
				_ => Err(ValidationError::new(format!("'{}' must be True or False.", s), "invalid").into()),
			},
			other => Err(ValidationError::new(format!("'{}' must be True or False.", other), "invalid").into()),
		}
	}

	fn to_storage(&self, value: SqlValue) -> Result<SqlValue> {
		self.to_native(value)
	}

	fn validate(&self, value: &SqlValue) -> Result<()> {
		match value {
			SqlValue::Bool(_) => Ok(()),
			_ => Err(ValidationError::new("This field cannot be null.", "null").into()),
		}
	}
}

fn boolean_codec(_: &FieldType) -> Result<Box<dyn ElementCodec>> {
	Ok(Box::new(BooleanCodec))
}

/// Test registering a custom element type and deriving a field from it
#[rstest]
fn test_register_custom_codec(postgres: DatabaseConfig) {
	// Arrange
	let registry = ArrayFieldRegistry::new();
	registry.register::<BooleanField>(boolean_codec);

	// Act
	let field = registry.derive(&FieldType::Boolean).unwrap().null(true);

	// Assert
	assert_eq!(field.db_type(&postgres).unwrap(), "BOOLEAN[]");
	assert!(!field.cast_lookups());
	assert_eq!(
		field.description(),
		"An array, where each element is of the same type as BooleanField."
	);
	assert_eq!(
		field.deconstruct().path,
		"reinhardt.contrib.dbarray.BooleanArrayField"
	);
}

/// Test a full round trip through a table using a custom element type
#[rstest]
fn test_custom_codec_roundtrip(postgres: DatabaseConfig) {
	// Arrange
	let registry = ArrayFieldRegistry::new();
	registry.register::<BooleanField>(boolean_codec);
	let field = registry.derive(&FieldType::Boolean).unwrap().with_name("flags");
	let mut table = MemoryTable::new(field, postgres);

	// Act
	let id = table.create(vec!["t", "f", "true"]).unwrap();
	let found = table.filter(LookupType::Exact, vec![true, false, true]).unwrap();

	// Assert
	assert_eq!(
		table.get(id).unwrap(),
		Some(vec![SqlValue::Bool(true), SqlValue::Bool(false), SqlValue::Bool(true)])
	);
	assert_eq!(found.ids, vec![id]);
}

/// Test the generic path without going through the registry
#[rstest]
fn test_array_of_custom_codec() {
	// Arrange
	let field = array_of(BooleanCodec).unwrap();

	// Act
	let error = field.clean(vec![SqlValue::Bool(true), SqlValue::from("maybe")]).unwrap_err();

	// Assert
	let validation = error.as_validation().unwrap();
	assert_eq!(validation.index, Some(1));
	assert_eq!(validation.code, "invalid");
}

/// Test that unregistered and nested element types are refused
#[rstest]
#[case(FieldType::Boolean)]
#[case(FieldType::Custom("MoneyField".to_string()))]
#[case(FieldType::Array(Box::new(FieldType::Integer)))]
fn test_derive_refused(#[case] element: FieldType) {
	// Arrange
	let registry = ArrayFieldRegistry::new();

	// Act
	let error = registry.derive(&element).unwrap_err();

	// Assert
	assert!(matches!(error, ArrayFieldError::Configuration(_)));
}
