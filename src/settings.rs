//! Database configuration for settings
//!
//! This module provides the `DatabaseConfig` struct read by the backend gate,
//! and `DatabaseSettings`, the `DATABASES` table of a settings file.

use crate::backends::DatabaseType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Database configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
	/// Database engine/backend
	pub engine: String,

	/// Database name or path
	pub name: String,

	/// Database user (if applicable)
	#[serde(default)]
	pub user: Option<String>,

	/// Database password (if applicable)
	#[serde(default)]
	pub password: Option<String>,

	/// Database host (if applicable)
	#[serde(default)]
	pub host: Option<String>,

	/// Database port (if applicable)
	#[serde(default)]
	pub port: Option<u16>,

	/// Additional options
	#[serde(default)]
	pub options: HashMap<String, String>,
}

impl DatabaseConfig {
	/// Create a SQLite database configuration
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::DatabaseConfig;
	///
	/// let db = DatabaseConfig::sqlite("myapp.db");
	///
	/// assert_eq!(db.engine, "reinhardt.db.backends.sqlite3");
	/// assert_eq!(db.name, "myapp.db");
	/// assert!(db.user.is_none());
	/// ```
	pub fn sqlite(name: impl Into<String>) -> Self {
		Self {
			engine: "reinhardt.db.backends.sqlite3".to_string(),
			name: name.into(),
			user: None,
			password: None,
			host: None,
			port: None,
			options: HashMap::new(),
		}
	}

	/// Create a PostgreSQL database configuration
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::DatabaseConfig;
	///
	/// let db = DatabaseConfig::postgresql("mydb", "admin", "password123", "localhost", 5432);
	///
	/// assert_eq!(db.engine, "reinhardt.db.backends.postgresql");
	/// assert_eq!(db.port, Some(5432));
	/// ```
	pub fn postgresql(
		name: impl Into<String>,
		user: impl Into<String>,
		password: impl Into<String>,
		host: impl Into<String>,
		port: u16,
	) -> Self {
		Self {
			engine: "reinhardt.db.backends.postgresql".to_string(),
			name: name.into(),
			user: Some(user.into()),
			password: Some(password.into()),
			host: Some(host.into()),
			port: Some(port),
			options: HashMap::new(),
		}
	}

	/// Create a MySQL database configuration
	pub fn mysql(
		name: impl Into<String>,
		user: impl Into<String>,
		password: impl Into<String>,
		host: impl Into<String>,
		port: u16,
	) -> Self {
		Self {
			engine: "reinhardt.db.backends.mysql".to_string(),
			name: name.into(),
			user: Some(user.into()),
			password: Some(password.into()),
			host: Some(host.into()),
			port: Some(port),
			options: HashMap::new(),
		}
	}

	/// Resolve the backend family from the engine string
	///
	/// Handles both short names (e.g. "postgres") and full backend paths
	/// (e.g. "reinhardt.db.backends.postgresql"). PostGIS engines count as
	/// PostgreSQL.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::{DatabaseConfig, DatabaseType};
	///
	/// let db = DatabaseConfig::postgresql("gis", "u", "p", "localhost", 5432);
	/// assert_eq!(db.database_type(), Some(DatabaseType::Postgres));
	///
	/// let mut db = DatabaseConfig::sqlite("db.sqlite3");
	/// assert_eq!(db.database_type(), Some(DatabaseType::Sqlite));
	///
	/// db.engine = "oracle".to_string();
	/// assert_eq!(db.database_type(), None);
	/// ```
	pub fn database_type(&self) -> Option<DatabaseType> {
		let engine = self.engine.to_ascii_lowercase();
		if engine.contains("postgres") || engine.contains("postgis") {
			Some(DatabaseType::Postgres)
		} else if engine.contains("sqlite") {
			Some(DatabaseType::Sqlite)
		} else if engine.contains("mysql") {
			Some(DatabaseType::Mysql)
		} else {
			None
		}
	}
}

/// The `DATABASES` section of a settings file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
	#[serde(default)]
	pub databases: HashMap<String, DatabaseConfig>,
}

impl DatabaseSettings {
	/// Alias of the connection used when none is named
	pub const DEFAULT_ALIAS: &'static str = "default";

	/// Create settings with a single `default` database
	pub fn with_default(config: DatabaseConfig) -> Self {
		let mut databases = HashMap::new();
		databases.insert(Self::DEFAULT_ALIAS.to_string(), config);
		Self { databases }
	}

	/// Parse settings from a TOML document
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::settings::DatabaseSettings;
	///
	/// let settings = DatabaseSettings::from_toml_str(r#"
	///     [databases.default]
	///     engine = "reinhardt.db.backends.postgresql"
	///     name = "dbarray"
	///     host = "localhost"
	/// "#).unwrap();
	///
	/// assert_eq!(settings.default_database().unwrap().name, "dbarray");
	/// ```
	#[cfg(feature = "settings")]
	pub fn from_toml_str(source: &str) -> crate::error::Result<Self> {
		toml::from_str(source).map_err(|e| {
			crate::error::ArrayFieldError::configuration(format!(
				"Invalid database settings: {}",
				e
			))
		})
	}

	/// Get a database configuration by alias
	pub fn get(&self, alias: &str) -> Option<&DatabaseConfig> {
		self.databases.get(alias)
	}

	/// The `default` database configuration
	pub fn default_database(&self) -> crate::error::Result<&DatabaseConfig> {
		self.get(Self::DEFAULT_ALIAS).ok_or_else(|| {
			crate::error::ArrayFieldError::configuration(
				"No 'default' database is configured",
			)
		})
	}
}
