//! MSD — Macromolecular Structure Database
//!
//! Extracts normalized relational facts (chains, subchains, secondary
//! structure, sequences) from parsed macromolecular structure records and
//! loads them into a relational schema for later querying.
//!
//! # Overview
//!
//! - **Schema abstraction**: declarative [`schema::AttributeSet`]s and
//!   [`schema::Table`] descriptors generate all DDL/DML text.
//! - **Sequence index**: [`sequence::PolymerSequence`] maps chain positions
//!   to one-letter monomer codes, built once per entry.
//! - **Extraction**: one pure function per table in [`extract`], consuming a
//!   parsed structure, its annotation document and the sequence index.
//! - **Registry**: [`registry::table_schemas`] fixes the table order so that
//!   referenced tables are always created and loaded first.
//! - **Load driver**: [`db`] manages the SQLite pool and generic
//!   insert/retrieve; [`commands`] reconciles whole entries.
//!
//! The structure and annotation parsers are external collaborators: this
//! crate consumes their output via the plain data types in [`model`].
//!
//! # Example
//!
//! ```no_run
//! use msd::db::{create_pool, init_database, DbConfig};
//! use msd::model::{Document, Structure};
//! use msd::sequence::PolymerSequence;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = create_pool(&DbConfig::from_env()?).await?;
//!     init_database(&pool).await?;
//!
//!     let structure = Structure::default(); // from the external parser
//!     let document = Document::new();
//!     let sequence = PolymerSequence::new(&document);
//!     msd::commands::check_entry(&pool, &structure, &document, &sequence).await?;
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod db;
pub mod extract;
pub mod logging;
pub mod model;
pub mod registry;
pub mod schema;
pub mod sequence;

pub use db::{create_pool, DbConfig, DbError, DbResult};
pub use registry::table_schemas;
pub use schema::{AttributeSet, Row, SchemaError, SqlValue, Table};
pub use sequence::{MonomerCodes, PolymerSequence};
