//! Generic table/schema abstraction.
//!
//! An [`AttributeSet`] declares a table's typed columns and keys, a
//! [`Table`] binds that declaration to a name and an [`Extractor`], and the
//! generated DDL/DML text is derived entirely from the declaration — any
//! change to an attribute set changes the persisted schema on the next
//! initialization.

mod attributes;
mod table;
mod value;

pub use attributes::{AttributeSet, ForeignKey, SchemaError};
pub use table::{Extractor, Table};
pub use value::{Row, SqlValue};
