//! Backend identity checks
//!
//! Native array columns exist only on PostgreSQL. Every entry point that
//! produces SQL or driver values calls [`require_postgres`] first.

use crate::error::{ArrayFieldError, Result};
use crate::settings::DatabaseConfig;
use serde::{Deserialize, Serialize};

/// Database type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseType {
	Postgres,
	Sqlite,
	Mysql,
}

impl DatabaseType {
	/// Check if this database type has native one-dimensional array columns
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_dbarray::DatabaseType;
	///
	/// assert!(DatabaseType::Postgres.supports_native_arrays());
	/// assert!(!DatabaseType::Sqlite.supports_native_arrays());
	/// assert!(!DatabaseType::Mysql.supports_native_arrays());
	/// ```
	pub fn supports_native_arrays(&self) -> bool {
		matches!(self, DatabaseType::Postgres)
	}
}

/// Fail unless the connection's engine is PostgreSQL
///
/// # Examples
///
/// ```
/// use reinhardt_dbarray::{DatabaseConfig, backends::require_postgres};
///
/// let pg = DatabaseConfig::postgresql("db", "u", "p", "localhost", 5432);
/// assert!(require_postgres(&pg).is_ok());
///
/// let sqlite = DatabaseConfig::sqlite("db.sqlite3");
/// assert!(require_postgres(&sqlite).unwrap_err().is_configuration());
/// ```
pub fn require_postgres(connection: &DatabaseConfig) -> Result<()> {
	match connection.database_type() {
		Some(db_type) if db_type.supports_native_arrays() => Ok(()),
		_ => {
			tracing::warn!(
				engine = %connection.engine,
				"rejecting array field on backend without native arrays"
			);
			Err(ArrayFieldError::configuration(format!(
				"Array fields are currently implemented only for PostgreSQL (engine: {})",
				connection.engine
			)))
		}
	}
}
