//! The fixed, ordered registry of table descriptors.
//!
//! Registry order encodes foreign-key dependency: referenced tables precede
//! referencing tables (main → experimental/entities → chains → subchains →
//! secondary structure). Schema creation walks this order; retrieval does
//! not depend on it.

use crate::extract;
use crate::schema::{AttributeSet, Table};

const ENTRY_ID: (&str, &str) = ("entry_id", "VARCHAR(5) NOT NULL");
const CHAIN_ID: (&str, &str) = ("chain_id", "VARCHAR(5) NOT NULL");
const SHEET_ID: (&str, &str) = ("sheet_id", "VARCHAR(5) NOT NULL");
const START_POSITION: (&str, &str) = ("start_position", "INT");
const END_POSITION: (&str, &str) = ("end_position", "INT");
const LENGTH: (&str, &str) = ("length", "INT");

const ENTRY_FK: (&str, &str, &str) = ("entry_id", "main", "entry_id");
const CHAIN_FK: (&str, &str, &str) = ("chain_id", "chains", "chain_id");

/// Every registered table, in creation/insertion order.
///
/// The declarations are static data; a defect in them is a programming
/// error, so construction failures abort immediately.
pub fn table_schemas() -> Vec<Table> {
    vec![
        main_table(),
        experimental_table(),
        entity_table(),
        chain_table(),
        subchain_table(),
        helix_table(),
        sheet_table(),
        strand_table(),
        coil_table(),
    ]
}

fn main_table() -> Table {
    let attributes = AttributeSet::new(
        &[
            ENTRY_ID,
            ("complex_type", "VARCHAR(25) NOT NULL"),
            ("structure_title", "VARCHAR"),
            ("source_organism", "VARCHAR(200)"),
            ("revision_date", "VARCHAR(10)"),
            ("chains", "VARCHAR"),
            ("space_group", "VARCHAR(20)"),
            ("z_value", "INT"),
            ("a", "FLOAT"),
            ("b", "FLOAT"),
            ("c", "FLOAT"),
            ("alpha", "FLOAT"),
            ("beta", "FLOAT"),
            ("gamma", "FLOAT"),
        ],
        &["entry_id"],
        &[],
    )
    .expect("main table schema");
    Table::new("main", attributes, extract::main_rows)
}

fn experimental_table() -> Table {
    let attributes = AttributeSet::new(
        &[
            ENTRY_ID,
            ("matthews_coefficient", "FLOAT"),
            ("percent_solvent_content", "FLOAT"),
            ("crystal_growth_method", "VARCHAR"),
            ("crystal_growth_procedure", "VARCHAR"),
            ("crystal_growth_apparatus", "VARCHAR"),
            ("crystal_growth_atmosphere", "VARCHAR"),
            ("crystal_growth_ph", "FLOAT"),
            ("crystal_growth_temperature", "FLOAT"),
        ],
        &["entry_id"],
        &[ENTRY_FK],
    )
    .expect("experimental table schema");
    Table::new("experimental", attributes, extract::experimental_rows)
}

fn entity_table() -> Table {
    let attributes = AttributeSet::new(
        &[
            ENTRY_ID,
            ("entity_id", "VARCHAR(5) NOT NULL"),
            ("entity_name", "VARCHAR(200)"),
            ("entity_type", "VARCHAR(25)"),
            ("polymer_type", "VARCHAR(25)"),
            ("subchains", "VARCHAR"),
        ],
        &["entry_id", "entity_id"],
        &[ENTRY_FK],
    )
    .expect("entities table schema");
    Table::new("entities", attributes, extract::entity_rows)
}

fn chain_table() -> Table {
    let attributes = AttributeSet::new(
        &[
            ENTRY_ID,
            CHAIN_ID,
            ("subchains", "VARCHAR"),
            ("polymer_type", "INT"),
            ("annotated_chain_sequence", "VARCHAR"),
            ("unannotated_chain_sequence", "VARCHAR"),
            START_POSITION,
            END_POSITION,
            LENGTH,
        ],
        &["entry_id", "chain_id"],
        &[ENTRY_FK],
    )
    .expect("chains table schema");
    Table::new("chains", attributes, extract::chain_rows)
}

fn subchain_table() -> Table {
    let attributes = AttributeSet::new(
        &[
            ENTRY_ID,
            ("entity_id", "VARCHAR(5) NOT NULL"),
            ("subchain_id", "VARCHAR(5) NOT NULL"),
            CHAIN_ID,
            ("annotated_subchain_sequence", "VARCHAR"),
            ("unannotated_subchain_sequence", "VARCHAR"),
            START_POSITION,
            END_POSITION,
            LENGTH,
        ],
        &["entry_id", "subchain_id"],
        &[
            ENTRY_FK,
            ("entity_id", "entities", "entity_id"),
            CHAIN_FK,
        ],
    )
    .expect("subchains table schema");
    Table::new("subchains", attributes, extract::subchain_rows)
}

fn helix_table() -> Table {
    let attributes = AttributeSet::new(
        &[
            ENTRY_ID,
            ("helix_id", "INT NOT NULL"),
            CHAIN_ID,
            ("helix_sequence", "VARCHAR"),
            START_POSITION,
            END_POSITION,
            LENGTH,
        ],
        &["entry_id", "helix_id"],
        &[ENTRY_FK, CHAIN_FK],
    )
    .expect("helices table schema");
    Table::new("helices", attributes, extract::helix_rows)
}

fn sheet_table() -> Table {
    let attributes = AttributeSet::new(
        &[
            ENTRY_ID,
            SHEET_ID,
            ("number_strands", "INT"),
            ("sense_sequence", "VARCHAR"),
        ],
        &["entry_id", "sheet_id"],
        &[ENTRY_FK],
    )
    .expect("sheets table schema");
    Table::new("sheets", attributes, extract::sheet_rows)
}

fn strand_table() -> Table {
    let attributes = AttributeSet::new(
        &[
            ENTRY_ID,
            SHEET_ID,
            ("strand_id", "VARCHAR(5) NOT NULL"),
            CHAIN_ID,
            ("strand_sequence", "VARCHAR"),
            START_POSITION,
            END_POSITION,
            LENGTH,
        ],
        &["entry_id", "sheet_id", "strand_id"],
        &[
            ENTRY_FK,
            ("sheet_id", "sheets", "sheet_id"),
            CHAIN_FK,
        ],
    )
    .expect("strands table schema");
    Table::new("strands", attributes, extract::strand_rows)
}

fn coil_table() -> Table {
    let attributes = AttributeSet::new(
        &[
            ENTRY_ID,
            ("coil_id", "INT NOT NULL"),
            CHAIN_ID,
            ("polymer_type", "INT"),
            ("annotated_coil_sequence", "VARCHAR"),
            ("unannotated_coil_sequence", "VARCHAR"),
            START_POSITION,
            END_POSITION,
            LENGTH,
        ],
        &["entry_id", "coil_id"],
        &[ENTRY_FK, CHAIN_FK],
    )
    .expect("coils table schema");
    Table::new("coils", attributes, extract::coil_rows)
}
