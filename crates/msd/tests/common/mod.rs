#![allow(dead_code)]

//! Shared fixtures: one small, fully consistent entry and an in-memory pool.

use std::collections::HashMap;

use msd::db::DbConfig;
use msd::model::{
    AtomAddress, Block, Chain, Document, Entity, EntityKind, Helix, Model, PolymerKind, Residue,
    Sheet, Strand, Structure, UnitCell,
};
use sqlx::sqlite::SqlitePool;

pub const ENTRY_ID: &str = "1A00";

/// Eleven-residue peptide chain A, translating to `ARNDCQEGHIX`.
pub const MONOMERS: [&str; 11] = [
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE", "UNK",
];

pub async fn memory_pool() -> SqlitePool {
    let config = DbConfig { url: "sqlite::memory:".to_string(), ..DbConfig::default() };
    msd::db::create_pool(&config).await.expect("in-memory pool")
}

/// A structure with one peptide chain, one helix (positions 2-4) and one
/// single-strand sheet (positions 6-8).
pub fn sample_structure() -> Structure {
    let mut info = HashMap::new();
    info.insert("_entry.id".to_string(), ENTRY_ID.to_string());
    info.insert("_struct.title".to_string(), "TEST STRUCTURE".to_string());
    info.insert("_cell.Z_PDB".to_string(), "4".to_string());

    let chain = Chain {
        name: "A".to_string(),
        residues: MONOMERS
            .iter()
            .enumerate()
            .map(|(index, monomer)| Residue {
                name: monomer.to_string(),
                subchain: "A1".to_string(),
                label_seq: index as i32 + 1,
                seq_num: index as i32 + 1,
                icode: None,
            })
            .collect(),
    };

    Structure {
        name: ENTRY_ID.to_string(),
        info,
        cell: UnitCell { a: 50.0, b: 60.0, c: 70.0, alpha: 90.0, beta: 90.0, gamma: 90.0 },
        spacegroup_hm: "P 21 21 21".to_string(),
        entities: vec![Entity {
            name: "1".to_string(),
            kind: EntityKind::Polymer,
            polymer_kind: PolymerKind::PeptideL,
            subchains: vec!["A1".to_string()],
        }],
        model: Model { chains: vec![chain] },
        helices: vec![Helix {
            start: AtomAddress::new("A", 2),
            end: AtomAddress::new("A", 4),
            length: 3,
        }],
        sheets: vec![Sheet {
            name: "S1".to_string(),
            strands: vec![Strand {
                name: "1".to_string(),
                start: AtomAddress::new("A", 6),
                end: AtomAddress::new("A", 8),
                sense: 1,
            }],
        }],
    }
}

pub fn sample_document() -> Document {
    sample_document_with_revisions(&["2000-01-01", "2000-06-15"])
}

pub fn sample_document_with_revisions(revision_dates: &[&str]) -> Document {
    let mut block = Block::new(ENTRY_ID);
    block.set_loop("_pdbx_poly_seq_scheme.pdb_strand_id", vec!["A"; 11]);
    block.set_loop("_pdbx_poly_seq_scheme.entity_id", vec!["1"; 11]);
    block.set_loop(
        "_pdbx_poly_seq_scheme.seq_id",
        (1..=11).map(|id| id.to_string()),
    );
    block.set_loop("_pdbx_poly_seq_scheme.mon_id", MONOMERS);
    block.set_loop("_pdbx_poly_seq_scheme.pdb_mon_id", MONOMERS);
    block.set_loop("_pdbx_poly_seq_scheme.hetero", vec!["n"; 11]);

    block.set_loop("_entity.pdbx_description", ["'alpha subunit'"]);
    block.set_value("_entity_src_gen.pdbx_gene_src_scientific_name", "'Homo sapiens'");
    block.set_loop(
        "_pdbx_audit_revision_history.revision_date",
        revision_dates.iter().copied(),
    );

    block.set_value("_exptl_crystal.density_Matthews", "2.3");
    block.set_value("_exptl_crystal.density_percent_sol", "46.7");
    block.set_value("_exptl_crystal_grow.method", "'VAPOR DIFFUSION'");
    block.set_value("_exptl_crystal_grow.pdbx_details", "'pH 7.0, PEG 4000'");
    block.set_value("_exptl_crystal_grow.apparatus", "'hanging drop'");
    block.set_value("_exptl_crystal_grow.atmosphere", "air");
    block.set_value("_exptl_crystal_grow.pH", "7.0");
    block.set_value("_exptl_crystal_grow.temp", "290");

    Document::from_block(block)
}
