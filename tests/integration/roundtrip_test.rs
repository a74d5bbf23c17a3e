//! Integration tests for storing and reading array values
//!
//! Each scenario runs against every built-in element type through the
//! in-memory table.

use crate::fixtures::{MemoryTable, dates, floats, ints, names, postgres, table_for};
use reinhardt_dbarray::{DatabaseConfig, FieldType, LookupType, SqlValue};
use rstest::rstest;

fn table(element: FieldType, connection: DatabaseConfig) -> MemoryTable {
	table_for(&element, connection)
}

/// Test that a created row reads back the same array
#[rstest]
#[case::integers(FieldType::Integer, ints())]
#[case::floats(FieldType::Double, floats())]
#[case::chars(FieldType::VarChar(10), names())]
#[case::texts(FieldType::Text, names())]
#[case::dates(FieldType::Date, dates())]
fn test_create_get(
	postgres: DatabaseConfig,
	#[case] element: FieldType,
	#[case] arr: Vec<SqlValue>,
) {
	// Arrange
	let mut table = table(element, postgres);

	// Act
	let id = table.create(arr.clone()).unwrap();

	// Assert
	assert_eq!(table.get(id).unwrap(), Some(arr));
}

/// Test that an exact lookup finds the created row
#[rstest]
#[case::integers(FieldType::Integer, ints())]
#[case::floats(FieldType::Double, floats())]
#[case::chars(FieldType::VarChar(10), names())]
#[case::texts(FieldType::Text, names())]
#[case::dates(FieldType::Date, dates())]
fn test_create_lookup(
	postgres: DatabaseConfig,
	#[case] element: FieldType,
	#[case] arr: Vec<SqlValue>,
) {
	// Arrange
	let mut table = table(element, postgres);
	let id = table.create(arr.clone()).unwrap();

	// Act
	let result = table.filter(LookupType::Exact, arr).unwrap();

	// Assert
	assert_eq!(result.ids, vec![id]);
}

/// Test saving the first half of the array on an existing row
#[rstest]
#[case::integers(FieldType::Integer, ints())]
#[case::floats(FieldType::Double, floats())]
#[case::chars(FieldType::VarChar(10), names())]
#[case::texts(FieldType::Text, names())]
#[case::dates(FieldType::Date, dates())]
fn test_create_save_get(
	postgres: DatabaseConfig,
	#[case] element: FieldType,
	#[case] arr: Vec<SqlValue>,
) {
	// Arrange
	let mut table = table(element, postgres);
	let id = table.create(arr.clone()).unwrap();
	let halved = arr[..arr.len() / 2].to_vec();

	// Act
	table.save(id, halved.clone()).unwrap();

	// Assert
	assert_eq!(table.get(id).unwrap(), Some(halved));
}

/// Test updating a row to the reversed array
#[rstest]
#[case::integers(FieldType::Integer, ints())]
#[case::floats(FieldType::Double, floats())]
#[case::chars(FieldType::VarChar(10), names())]
#[case::texts(FieldType::Text, names())]
#[case::dates(FieldType::Date, dates())]
fn test_create_update_get(
	postgres: DatabaseConfig,
	#[case] element: FieldType,
	#[case] arr: Vec<SqlValue>,
) {
	// Arrange
	let mut table = table(element, postgres);
	let id = table.create(arr.clone()).unwrap();
	let reversed: Vec<SqlValue> = arr.iter().rev().cloned().collect();

	// Act
	table.update(&[id], reversed.clone()).unwrap();

	// Assert
	assert_eq!(table.get(id).unwrap(), Some(reversed));
}

/// Test updating the rows selected by a lookup
#[rstest]
#[case::integers(FieldType::Integer, ints())]
#[case::floats(FieldType::Double, floats())]
#[case::chars(FieldType::VarChar(10), names())]
#[case::texts(FieldType::Text, names())]
#[case::dates(FieldType::Date, dates())]
fn test_create_lookup_update_get(
	postgres: DatabaseConfig,
	#[case] element: FieldType,
	#[case] arr: Vec<SqlValue>,
) {
	// Arrange
	let mut table = table(element, postgres);
	let id = table.create(arr.clone()).unwrap();
	let other = table.create(Vec::<SqlValue>::new()).unwrap();
	let halved = arr[..arr.len() / 2].to_vec();

	// Act
	let selected = table.filter(LookupType::Exact, arr).unwrap().ids;
	table.update(&selected, halved.clone()).unwrap();

	// Assert
	assert_eq!(selected, vec![id]);
	assert_eq!(table.get(id).unwrap(), Some(halved));
	assert_eq!(table.get(other).unwrap(), Some(vec![]));
}

/// Test that a row without a value reads back as NULL and matches isnull
#[rstest]
#[case::integers(FieldType::Integer, ints())]
#[case::floats(FieldType::Double, floats())]
#[case::chars(FieldType::VarChar(10), names())]
#[case::texts(FieldType::Text, names())]
#[case::dates(FieldType::Date, dates())]
fn test_null(postgres: DatabaseConfig, #[case] element: FieldType, #[case] arr: Vec<SqlValue>) {
	// Arrange
	let mut table = table(element, postgres);
	let null_id = table.create_empty();
	let filled_id = table.create(arr).unwrap();

	// Act
	let is_null = table.filter(LookupType::IsNull, true).unwrap();
	let not_null = table.filter(LookupType::IsNull, false).unwrap();

	// Assert
	assert_eq!(table.get(null_id).unwrap(), None);
	assert_eq!(is_null.ids, vec![null_id]);
	assert_eq!(is_null.sql, r#""arr" IS NULL"#);
	assert_eq!(not_null.ids, vec![filled_id]);
}

/// Test that a scalar where an array is expected is rejected
#[rstest]
#[case::integers(FieldType::Integer, ints())]
#[case::floats(FieldType::Double, floats())]
#[case::dates(FieldType::Date, dates())]
#[case::texts(FieldType::Text, names())]
fn test_noniterable(
	postgres: DatabaseConfig,
	#[case] element: FieldType,
	#[case] arr: Vec<SqlValue>,
) {
	// Arrange
	let mut table = table(element, postgres);
	let scalar = arr[0].clone();

	// Act
	let error = table.create(scalar).unwrap_err();

	// Assert
	let validation = error.as_validation().expect("Expected a validation error");
	assert_eq!(validation.code, "not_iterable");
	assert_eq!(table.count(), 0);
}

/// Test that a bare string is stored as a one-element char array
#[rstest]
fn test_string_is_coerced_to_array(postgres: DatabaseConfig) {
	// Arrange
	let mut table = table(FieldType::VarChar(10), postgres);

	// Act
	let id = table.create("Adrian").unwrap();

	// Assert
	assert_eq!(table.get(id).unwrap(), Some(vec![SqlValue::from("Adrian")]));
}

/// Test that driver-level strings are converted to dates on save
#[rstest]
fn test_date_strings_are_stored_as_dates(postgres: DatabaseConfig) {
	// Arrange
	let mut table = table(FieldType::Date, postgres);

	// Act
	let id = table
		.create(vec!["1910-01-23", "1953-05-16", "2005-07-12", "2010-12-22"])
		.unwrap();

	// Assert
	assert_eq!(table.get(id).unwrap(), Some(dates()));
}

/// Test that an element failing conversion aborts the insert
#[rstest]
fn test_bad_element_reports_index(postgres: DatabaseConfig) {
	// Arrange
	let mut table = table(FieldType::Integer, postgres);

	// Act
	let error = table
		.create(vec![SqlValue::Int(1), SqlValue::from("two")])
		.unwrap_err();

	// Assert
	assert_eq!(error.as_validation().unwrap().index, Some(1));
	assert_eq!(table.count(), 0);
}

/// Test that inserting through a non-PostgreSQL connection fails
#[rstest]
fn test_sqlite_connection_rejected() {
	// Arrange
	let mut table = table(FieldType::Integer, DatabaseConfig::sqlite(":memory:"));

	// Act
	let error = table.create(ints()).unwrap_err();

	// Assert
	assert!(error.is_configuration());
}
