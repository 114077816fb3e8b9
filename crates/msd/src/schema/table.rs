//! Table descriptors: one name + attribute set + extractor per table.

use crate::model::{Document, Structure};
use crate::sequence::PolymerSequence;

use super::{AttributeSet, Row, SchemaError, SqlValue};

/// Capability interface for per-table extraction.
///
/// One implementation exists per registered table; plain functions with the
/// matching signature implement it automatically, so extractors stay
/// swappable and independently testable.
pub trait Extractor: Send + Sync {
    /// Produces the table's row tuples for one entry. Output tuples follow
    /// the owning table's attribute order exactly.
    fn extract(
        &self,
        structure: &Structure,
        document: &Document,
        sequence: &PolymerSequence,
    ) -> Vec<Row>;
}

impl<F> Extractor for F
where
    F: Fn(&Structure, &Document, &PolymerSequence) -> Vec<Row> + Send + Sync,
{
    fn extract(
        &self,
        structure: &Structure,
        document: &Document,
        sequence: &PolymerSequence,
    ) -> Vec<Row> {
        self(structure, document, sequence)
    }
}

/// Binds a table name, its attribute set and its extractor, and generates
/// the table's DDL/DML statement text.
pub struct Table {
    name: String,
    attributes: AttributeSet,
    extractor: Box<dyn Extractor>,
}

impl Table {
    pub fn new(
        name: impl Into<String>,
        attributes: AttributeSet,
        extractor: impl Extractor + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            attributes,
            extractor: Box::new(extractor),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Idempotent DDL for this table; safe to execute on every process start.
    pub fn create_table(&self) -> String {
        format!("CREATE TABLE IF NOT EXISTS {} {}", self.name, self.attributes)
    }

    /// The parenthesized column list in declaration order.
    pub fn attributes_string(&self) -> String {
        format!("({})", self.attributes.attribute_names().join(", "))
    }

    /// `SELECT` statement over the given columns, or `*` when `None`.
    pub fn retrieve(&self, columns: Option<&[&str]>) -> String {
        let columns = match columns {
            Some(names) => names.join(", "),
            None => "*".to_string(),
        };
        format!("SELECT {} FROM {}", columns, self.name)
    }

    /// Delegates to the bound extractor without transformation.
    pub fn extract_data(
        &self,
        structure: &Structure,
        document: &Document,
        sequence: &PolymerSequence,
    ) -> Vec<Row> {
        self.extractor.extract(structure, document, sequence)
    }

    /// Parameterized insert with one placeholder per attribute.
    ///
    /// The row itself is bound by the execution layer; the statement text
    /// never contains literal values. The row's arity must match the
    /// declared attribute count.
    pub fn insert_row(&self, row: &[SqlValue]) -> Result<String, SchemaError> {
        if row.len() != self.attributes.len() {
            return Err(SchemaError::ColumnCountMismatch {
                expected: self.attributes.len(),
                given: row.len(),
            });
        }
        let placeholders = vec!["?"; row.len()].join(", ");
        Ok(format!("INSERT INTO {} VALUES({})", self.name, placeholders))
    }

    /// `UPDATE` statement assigning the given columns, keyed positionally on
    /// the primary-key columns.
    ///
    /// Validates, in order: every assigned column is declared, then the key
    /// value count matches the declared primary-key count.
    pub fn update_row(
        &self,
        assignments: &[(&str, SqlValue)],
        primary_key_values: &[SqlValue],
    ) -> Result<String, SchemaError> {
        let set_clause = self.attributes.match_columns(assignments, ", ")?;
        let where_clause = self.attributes.match_primary_keys(primary_key_values, " AND ")?;
        Ok(format!("UPDATE {} SET {} WHERE {}", self.name, set_clause, where_clause))
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}
