//! Declarative column and key specification for one table.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::SqlValue;

/// Schema definition and statement-building errors.
///
/// Construction-time variants indicate a defective table declaration and are
/// never recovered from; the per-call variants are raised before any SQL text
/// is assembled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("primary keys and foreign keys need to be a subset of attributes: {0}")]
    KeyNotDeclared(String),

    #[error("duplicate attribute name: {0}")]
    DuplicateAttribute(String),

    #[error("argument contains columns not part of the table: {0}")]
    UnknownColumn(String),

    #[error("number of values given does not match number of keys: expected {expected}, got {given}")]
    KeyCountMismatch { expected: usize, given: usize },

    #[error("number of values given does not match number of columns: expected {expected}, got {given}")]
    ColumnCountMismatch { expected: usize, given: usize },
}

/// A foreign-key reference from one declared column to another table's column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub column: String,
    pub references_table: String,
    pub references_column: String,
}

/// Ordered column declarations plus primary/foreign key sets for one table.
///
/// Declaration order is significant: DDL generation, insert placeholders and
/// extracted row tuples all follow it. Equality is structural so schema
/// definitions can be compared as data in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet {
    attributes: Vec<(String, String)>,
    primary_keys: Vec<String>,
    foreign_keys: Vec<ForeignKey>,
}

impl AttributeSet {
    /// Creates a validated attribute set.
    ///
    /// `attributes` are `(name, declared type)` pairs in column order;
    /// `foreign_keys` are `(column, referenced table, referenced column)`
    /// triples. Every key name must be a declared attribute and attribute
    /// names must be unique, otherwise the schema definition itself is
    /// defective and construction fails.
    pub fn new(
        attributes: &[(&str, &str)],
        primary_keys: &[&str],
        foreign_keys: &[(&str, &str, &str)],
    ) -> Result<Self, SchemaError> {
        for (index, (name, _)) in attributes.iter().enumerate() {
            if attributes[..index].iter().any(|(other, _)| other == name) {
                return Err(SchemaError::DuplicateAttribute((*name).to_string()));
            }
        }
        let declared = |name: &str| attributes.iter().any(|(attr, _)| *attr == name);
        for key in primary_keys {
            if !declared(key) {
                return Err(SchemaError::KeyNotDeclared((*key).to_string()));
            }
        }
        for (column, _, _) in foreign_keys {
            if !declared(column) {
                return Err(SchemaError::KeyNotDeclared((*column).to_string()));
            }
        }

        Ok(Self {
            attributes: attributes
                .iter()
                .map(|(name, sql_type)| ((*name).to_string(), (*sql_type).to_string()))
                .collect(),
            primary_keys: primary_keys.iter().map(|key| (*key).to_string()).collect(),
            foreign_keys: foreign_keys
                .iter()
                .map(|(column, table, referenced)| ForeignKey {
                    column: (*column).to_string(),
                    references_table: (*table).to_string(),
                    references_column: (*referenced).to_string(),
                })
                .collect(),
        })
    }

    /// Column names in declaration order.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Declared type strings (including nullability) in declaration order.
    pub fn attribute_types(&self) -> Vec<&str> {
        self.attributes.iter().map(|(_, sql_type)| sql_type.as_str()).collect()
    }

    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
    }

    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.iter().any(|(attr, _)| attr == name)
    }

    /// Renders `col = value` assignments for the given columns.
    ///
    /// Every column must be declared; fails before producing any SQL text.
    pub(crate) fn match_columns(
        &self,
        assignments: &[(&str, SqlValue)],
        delimiter: &str,
    ) -> Result<String, SchemaError> {
        for (column, _) in assignments {
            if !self.contains(column) {
                return Err(SchemaError::UnknownColumn((*column).to_string()));
            }
        }
        Ok(assignments
            .iter()
            .map(|(column, value)| format!("{} = {}", column, value))
            .collect::<Vec<_>>()
            .join(delimiter))
    }

    /// Renders `pk = value` conditions, binding values to the primary-key
    /// columns positionally.
    pub(crate) fn match_primary_keys(
        &self,
        values: &[SqlValue],
        delimiter: &str,
    ) -> Result<String, SchemaError> {
        if values.len() != self.primary_keys.len() {
            return Err(SchemaError::KeyCountMismatch {
                expected: self.primary_keys.len(),
                given: values.len(),
            });
        }
        Ok(self
            .primary_keys
            .iter()
            .zip(values)
            .map(|(key, value)| format!("{} = {}", key, value))
            .collect::<Vec<_>>()
            .join(delimiter))
    }
}

impl fmt::Display for AttributeSet {
    /// The parenthesized column/key list used verbatim in `CREATE TABLE`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .attributes
            .iter()
            .map(|(name, sql_type)| format!("{} {}", name, sql_type))
            .collect();
        if !self.primary_keys.is_empty() {
            parts.push(format!("PRIMARY KEY ({})", self.primary_keys.join(", ")));
        }
        for key in &self.foreign_keys {
            parts.push(format!(
                "FOREIGN KEY ({}) REFERENCES {} ({})",
                key.column, key.references_table, key.references_column
            ));
        }
        write!(f, "({})", parts.join(", "))
    }
}
