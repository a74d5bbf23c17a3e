//! Integration tests for backend selection from settings files

use crate::fixtures::{SETTINGS_TOML, settings};
use reinhardt_dbarray::{DatabaseSettings, DatabaseType, IntegerArrayField};
use rstest::rstest;

/// Test that the default database from the settings file passes the gate
#[rstest]
fn test_default_database_is_postgres(settings: DatabaseSettings) {
	// Arrange
	let field = IntegerArrayField::default();

	// Act
	let default = settings.default_database().unwrap();

	// Assert
	assert_eq!(default.database_type(), Some(DatabaseType::Postgres));
	assert_eq!(default.name, "dbarray_test");
	assert_eq!(field.db_type(default).unwrap(), "INTEGER[]");
}

/// Test that a secondary SQLite alias is refused by the gate
#[rstest]
fn test_sqlite_alias_is_refused() {
	// Arrange
	let source = format!(
		"{}\n[databases.cache]\nengine = \"reinhardt.db.backends.sqlite3\"\nname = \":memory:\"\n",
		SETTINGS_TOML
	);
	let settings = DatabaseSettings::from_toml_str(&source).unwrap();

	// Act
	let error = IntegerArrayField::default()
		.db_type(settings.get("cache").unwrap())
		.unwrap_err();

	// Assert
	assert!(error.is_configuration());
	assert!(error.to_string().contains("PostgreSQL"));
}

/// Test that a settings file without a default database is reported
#[rstest]
fn test_missing_default() {
	// Arrange
	let settings = DatabaseSettings::from_toml_str(
		"[databases.replica]\nengine = \"postgis\"\nname = \"geo\"\n",
	)
	.unwrap();

	// Act
	let error = settings.default_database().unwrap_err();

	// Assert
	assert!(error.is_configuration());
	assert_eq!(
		settings.get("replica").unwrap().database_type(),
		Some(DatabaseType::Postgres)
	);
}
