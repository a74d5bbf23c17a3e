//! Integration tests for lookups on array columns

use crate::fixtures::{dates, floats, ints, names, postgres, table_for};
use reinhardt_dbarray::{DatabaseConfig, FieldType, LookupType, SqlValue};
use rstest::rstest;

/// Test the SQL rendered for an exact lookup on each element type
#[rstest]
#[case::integers(FieldType::Integer, ints(), r#""arr" = $1"#)]
#[case::floats(FieldType::Double, floats(), r#""arr" = $1::DOUBLE PRECISION[]"#)]
#[case::chars(FieldType::VarChar(10), names(), r#""arr" = $1::VARCHAR(10)[]"#)]
#[case::texts(FieldType::Text, names(), r#""arr" = $1"#)]
#[case::dates(FieldType::Date, dates(), r#""arr" = $1::DATE[]"#)]
fn test_exact_lookup_sql(
	postgres: DatabaseConfig,
	#[case] element: FieldType,
	#[case] arr: Vec<SqlValue>,
	#[case] expected_sql: &str,
) {
	// Arrange
	let table = table_for(&element, postgres);

	// Act
	let result = table.filter(LookupType::Exact, arr.clone()).unwrap();

	// Assert
	assert_eq!(result.sql, expected_sql);
	assert_eq!(result.params, vec![SqlValue::Array(arr)]);
}

/// Test containment operators against stored rows
#[rstest]
#[case(LookupType::Contains, vec![4, 7], r#""arr" @> $1"#, vec![1])]
#[case(LookupType::Contains, vec![4, 5], r#""arr" @> $1"#, vec![])]
#[case(LookupType::ContainedBy, vec![1, 2, 4, 7, 9], r#""arr" <@ $1"#, vec![1, 2])]
#[case(LookupType::Overlap, vec![5, 9], r#""arr" && $1"#, vec![2])]
fn test_containment_lookups(
	postgres: DatabaseConfig,
	#[case] lookup_type: LookupType,
	#[case] operand: Vec<i64>,
	#[case] expected_sql: &str,
	#[case] expected_ids: Vec<i64>,
) {
	// Arrange
	let mut table = table_for(&FieldType::Integer, postgres);
	table.create(ints()).unwrap();
	table.create(vec![9i64]).unwrap();
	table.create_empty();

	// Act
	let result = table.filter(lookup_type, operand).unwrap();

	// Assert
	assert_eq!(result.sql, expected_sql);
	assert_eq!(result.ids, expected_ids);
}

/// Test that a char lookup with a bare string is cast and matches
#[rstest]
fn test_char_contains_single_name(postgres: DatabaseConfig) {
	// Arrange
	let mut table = table_for(&FieldType::VarChar(10), postgres);
	let id = table.create(names()).unwrap();

	// Act
	let result = table.filter(LookupType::Contains, "Wilson").unwrap();

	// Assert
	assert_eq!(result.sql, r#""arr" @> $1::VARCHAR(10)[]"#);
	assert_eq!(result.params, vec![SqlValue::from(vec!["Wilson"])]);
	assert_eq!(result.ids, vec![id]);
}

/// Test that float lookups accept integer input and still cast
#[rstest]
fn test_float_lookup_converts_integers(postgres: DatabaseConfig) {
	// Arrange
	let mut table = table_for(&FieldType::Double, postgres);
	let id = table.create(vec![6.0, 9.0]).unwrap();

	// Act
	let result = table.filter(LookupType::Exact, vec![6i64, 9]).unwrap();

	// Assert
	assert_eq!(result.params, vec![SqlValue::from(vec![6.0, 9.0])]);
	assert_eq!(result.ids, vec![id]);
}

/// Test parsing lookup names from filter keywords
#[rstest]
#[case("arr__exact", LookupType::Exact)]
#[case("arr__contained_by", LookupType::ContainedBy)]
#[case("arr__isnull", LookupType::IsNull)]
fn test_lookup_from_keyword(#[case] keyword: &str, #[case] expected: LookupType) {
	// Arrange
	let (_, name) = keyword.split_once("__").unwrap();

	// Act
	let lookup_type: LookupType = name.parse().unwrap();

	// Assert
	assert_eq!(lookup_type, expected);
}

/// Test that an isnull lookup with a non-boolean is rejected
#[rstest]
fn test_isnull_requires_boolean(postgres: DatabaseConfig) {
	// Arrange
	let table = table_for(&FieldType::Date, postgres);

	// Act
	let error = table.filter(LookupType::IsNull, "yes").unwrap_err();

	// Assert
	assert!(error.is_validation());
}

/// Test that lookups are refused on a MySQL connection
#[rstest]
fn test_mysql_lookup_rejected() {
	// Arrange
	let connection = DatabaseConfig::mysql("db", "root", "root", "localhost", 3306);
	let table = table_for(&FieldType::Integer, connection);

	// Act
	let error = table.filter(LookupType::Exact, ints()).unwrap_err();

	// Assert
	assert!(error.is_configuration());
}
