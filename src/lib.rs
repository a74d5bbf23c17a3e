//! # Reinhardt DB Array
//!
//! PostgreSQL array columns for Reinhardt models.
//!
//! An [`ArrayField`] wraps a scalar element codec (integer, float, char, text,
//! date, or your own [`codec::ElementCodec`]) and lifts it to one-dimensional
//! arrays: the column type gains a `[]` suffix, every element is converted and
//! validated by the codec, and lookups cast their parameter when PostgreSQL
//! cannot infer the element type on its own.
//!
//! ## Features
//!
//! - **Typed fields**: `IntegerArrayField`, `FloatArrayField`,
//!   `CharArrayField`, `TextArrayField`, `DateArrayField`
//! - **Custom elements**: `array_of(codec)` for any codec
//! - **Runtime derivation**: [`ArrayFieldRegistry`] builds fields from a
//!   [`FieldType`] descriptor
//! - **Lookups**: `exact`, `contains`, `contained_by`, `overlap`, `isnull`
//!
//! ## Feature Flags
//!
//! - `settings` (default) - load [`settings::DatabaseSettings`] from TOML
//!
//! ## Quick Example
//!
//! ```
//! use reinhardt_dbarray::prelude::*;
//!
//! let pg = DatabaseConfig::postgresql("app", "user", "pass", "localhost", 5432);
//! let scores = FloatArrayField::default().with_name("scores");
//!
//! // Schema
//! assert_eq!(scores.db_type(&pg).unwrap(), "DOUBLE PRECISION[]");
//!
//! // Saving and loading
//! let stored = scores.get_db_prep_value(vec![3.5, 6.0], &pg, false).unwrap();
//! let loaded = scores.parse_inbound(stored).unwrap();
//! assert_eq!(loaded, Some(vec![SqlValue::Float(3.5), SqlValue::Float(6.0)]));
//!
//! // Filtering
//! let operand = scores
//!     .get_db_prep_lookup(LookupType::Exact, vec![3.5, 6.0], &pg, false)
//!     .unwrap();
//! let (sql, params) = ArrayLookup::new("scores", LookupType::Exact, operand)
//!     .to_sql(1)
//!     .unwrap();
//! assert_eq!(sql, r#""scores" = $1::DOUBLE PRECISION[]"#);
//! assert_eq!(params.len(), 1);
//! ```
//!
//! Only PostgreSQL is supported; schema, save and lookup entry points fail
//! with [`ArrayFieldError::Configuration`] on any other backend.

pub mod array_field;
pub mod backends;
pub mod codec;
pub mod error;
pub mod fields;
pub mod lookup;
pub mod registry;
pub mod settings;
pub mod validators;
pub mod value;

pub use array_field::{
	ArrayField, CharArrayField, DateArrayField, DynArrayField, FloatArrayField,
	IntegerArrayField, TextArrayField, array_of,
};
pub use backends::DatabaseType;
pub use error::{ArrayFieldError, Result, ValidationError};
pub use fields::{FieldDeconstruction, FieldKwarg, FieldType, FieldTypeName};
pub use lookup::{ArrayLookup, CastExpression, LookupOperand, LookupType};
pub use registry::{ArrayFieldRegistry, CodecFactory, global_registry};
pub use settings::{DatabaseConfig, DatabaseSettings};
pub use value::SqlValue;

/// Re-export commonly used types
pub mod prelude {
	pub use crate::array_field::{
		ArrayField, CharArrayField, DateArrayField, FloatArrayField, IntegerArrayField,
		TextArrayField, array_of,
	};
	pub use crate::codec::{CharCodec, DateCodec, ElementCodec, FloatCodec, IntegerCodec, TextCodec};
	pub use crate::error::{ArrayFieldError, ValidationError};
	pub use crate::lookup::{ArrayLookup, LookupOperand, LookupType};
	pub use crate::registry::global_registry;
	pub use crate::settings::DatabaseConfig;
	pub use crate::value::SqlValue;
}
