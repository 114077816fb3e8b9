//! Per-table extraction functions.
//!
//! One pure function per registered table, each mapping (structure,
//! annotation document, sequence index) to row tuples in the table's
//! attribute order. Malformed or missing data in a single unit (a chain, a
//! span, an annotation tag) degrades to null/empty values for that unit
//! only; extraction never fails an entry outright.
//!
//! Sequence positions are always the primary (label) sequence ids, which are
//! strictly increasing along a chain. Author ids can repeat with differing
//! insertion codes and are only used to resolve secondary-structure record
//! endpoints.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{Block, Document, EntityKind, PolymerKind, Residue, ResidueSpan, Sheet, Structure};
use crate::row;
use crate::schema::{Row, SqlValue};
use crate::sequence::{resolve_addresses, PolymerSequence};

/// Classification of a whole entry by the combination of polymer entity
/// types it contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplexType {
    Other,
    SingleProtein,
    NucleicAcid,
    ProteinNA,
    Saccharide,
    ProteinSaccharide,
    SaccharideNA,
    ProteinSaccharideNA,
    Proteinmer,
    ComplexProtein,
}

impl ComplexType {
    pub fn name(&self) -> &'static str {
        match self {
            ComplexType::Other => "Other",
            ComplexType::SingleProtein => "SingleProtein",
            ComplexType::NucleicAcid => "NucleicAcid",
            ComplexType::ProteinNA => "ProteinNA",
            ComplexType::Saccharide => "Saccharide",
            ComplexType::ProteinSaccharide => "ProteinSaccharide",
            ComplexType::SaccharideNA => "SaccharideNA",
            ComplexType::ProteinSaccharideNA => "ProteinSaccharideNA",
            ComplexType::Proteinmer => "Proteinmer",
            ComplexType::ComplexProtein => "ComplexProtein",
        }
    }

    /// Maps a peptide/nucleic-acid/saccharide composition bitmask to the
    /// base classification.
    fn from_composition(mask: u8) -> Self {
        match mask {
            0b001 => ComplexType::SingleProtein,
            0b010 => ComplexType::NucleicAcid,
            0b011 => ComplexType::ProteinNA,
            0b100 => ComplexType::Saccharide,
            0b101 => ComplexType::ProteinSaccharide,
            0b110 => ComplexType::SaccharideNA,
            0b111 => ComplexType::ProteinSaccharideNA,
            _ => ComplexType::Other,
        }
    }
}

const HAS_PEPTIDE: u8 = 0b001;
const HAS_NUCLEIC_ACID: u8 = 0b010;
const HAS_SACCHARIDE: u8 = 0b100;

/// Classifies the entry from the set of entity polymer types present.
///
/// A function of the set only; entity order and multiplicity matter solely
/// for the protein refinements (a single peptide entity spread over several
/// subchains is a proteinmer, several peptide entities a complex protein).
pub fn complex_type(structure: &Structure) -> ComplexType {
    let mut mask = 0u8;
    let mut peptide_entities = 0usize;
    let mut peptide_subchains = 0usize;

    for entity in &structure.entities {
        match entity.kind {
            EntityKind::Unknown => return ComplexType::Other,
            EntityKind::Branched => mask |= HAS_SACCHARIDE,
            EntityKind::Polymer => match entity.polymer_kind {
                PolymerKind::Other | PolymerKind::Unknown | PolymerKind::CyclicPseudoPeptide => {
                    return ComplexType::Other;
                }
                kind if kind.is_nucleic_acid() => mask |= HAS_NUCLEIC_ACID,
                kind if kind.is_saccharide() => mask |= HAS_SACCHARIDE,
                _ => {
                    mask |= HAS_PEPTIDE;
                    peptide_entities += 1;
                    peptide_subchains = entity.subchains.len();
                }
            },
            EntityKind::NonPolymer | EntityKind::Water => {}
        }
    }

    let pending = ComplexType::from_composition(mask);
    if pending == ComplexType::SingleProtein {
        if peptide_entities > 1 {
            return ComplexType::ComplexProtein;
        }
        if peptide_subchains > 1 {
            return ComplexType::Proteinmer;
        }
    }
    pending
}

/// Series of parallel/antiparallel bonds between a sheet's strands.
pub fn sense_sequence(sheet: &Sheet) -> String {
    sheet
        .strands
        .iter()
        .filter_map(|strand| match strand.sense {
            1 => Some('P'),
            -1 => Some('A'),
            _ => None,
        })
        .collect()
}

/// Latest entry revision date recorded in the annotation document.
pub(crate) fn latest_revision_date(block: &Block) -> Option<&str> {
    let dates = block.find_loop("_pdbx_audit_revision_history.revision_date");
    if let Some(last) = dates.last() {
        return Some(last.as_str());
    }
    block.find_value("_pdbx_audit_revision_history.revision_date")
}

/// Normalizes an annotation string: strips surrounding quotes and maps the
/// CIF null markers to the empty string.
fn annotation_string(value: &str) -> String {
    if value == "?" || value == "." {
        return String::new();
    }
    value.trim_matches('\'').to_string()
}

/// Text-valued annotation tag; absent tags yield `''`.
fn annotation_text(block: &Block, tag: &str) -> SqlValue {
    SqlValue::Text(block.find_value(tag).map(annotation_string).unwrap_or_default())
}

/// Numeric annotation tag; absent or unparseable values yield null.
fn annotation_real(block: &Block, tag: &str) -> SqlValue {
    block
        .find_value(tag)
        .and_then(|value| value.parse::<f64>().ok())
        .map(SqlValue::Real)
        .unwrap_or(SqlValue::Null)
}

/// `main` table: one row per entry.
pub fn main_rows(structure: &Structure, document: &Document, _sequence: &PolymerSequence) -> Vec<Row> {
    let Some(block) = document.sole_block() else {
        return Vec::new();
    };
    let entry_id = structure.entry_id().unwrap_or_default();
    let title = structure.title().unwrap_or_default();
    let source_organism = block
        .find_value("_entity_src_gen.pdbx_gene_src_scientific_name")
        .map(annotation_string)
        .unwrap_or_default();
    let revision_date: SqlValue = latest_revision_date(block).into();
    let chain_names = structure
        .model
        .chains
        .iter()
        .map(|chain| chain.name.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let z_value: SqlValue = structure.z_value().into();
    let cell = &structure.cell;

    vec![row![
        entry_id,
        complex_type(structure).name(),
        title,
        source_organism,
        revision_date,
        chain_names,
        structure.spacegroup_hm.as_str(),
        z_value,
        cell.a,
        cell.b,
        cell.c,
        cell.alpha,
        cell.beta,
        cell.gamma,
    ]]
}

/// `experimental` table: crystal-growth annotations, one row per entry.
pub fn experimental_rows(
    structure: &Structure,
    document: &Document,
    _sequence: &PolymerSequence,
) -> Vec<Row> {
    let Some(block) = document.sole_block() else {
        return Vec::new();
    };
    let entry_id = structure.entry_id().unwrap_or_default();

    vec![row![
        entry_id,
        annotation_real(block, "_exptl_crystal.density_Matthews"),
        annotation_real(block, "_exptl_crystal.density_percent_sol"),
        annotation_text(block, "_exptl_crystal_grow.method"),
        annotation_text(block, "_exptl_crystal_grow.pdbx_details"),
        annotation_text(block, "_exptl_crystal_grow.apparatus"),
        annotation_text(block, "_exptl_crystal_grow.atmosphere"),
        annotation_real(block, "_exptl_crystal_grow.pH"),
        annotation_real(block, "_exptl_crystal_grow.temp"),
    ]]
}

/// `entities` table: one row per deposited entity.
pub fn entity_rows(
    structure: &Structure,
    document: &Document,
    _sequence: &PolymerSequence,
) -> Vec<Row> {
    let Some(block) = document.sole_block() else {
        return Vec::new();
    };
    let entry_id = structure.entry_id().unwrap_or_default();
    let names = block.find_loop("_entity.pdbx_description");
    let single_name = if names.is_empty() {
        block.find_value("_entity.pdbx_description")
    } else {
        None
    };

    structure
        .entities
        .iter()
        .enumerate()
        .map(|(index, entity)| {
            let name = names
                .get(index)
                .map(String::as_str)
                .or(if index == 0 { single_name } else { None })
                .map(annotation_string)
                .unwrap_or_default();
            row![
                entry_id,
                entity.name.as_str(),
                name,
                entity.kind.name(),
                entity.polymer_kind.name(),
                entity.subchains.join(" "),
            ]
        })
        .collect()
}

/// `chains` table: one row per chain of the model.
///
/// A chain without polymer residues keeps its row, with null start/end
/// positions and length zero.
pub fn chain_rows(
    structure: &Structure,
    _document: &Document,
    sequence: &PolymerSequence,
) -> Vec<Row> {
    let entry_id = structure.entry_id().unwrap_or_default();

    structure
        .model
        .chains
        .iter()
        .map(|chain| {
            let polymer = structure.polymer(chain);
            let subchain_ids = chain
                .subchain_spans()
                .iter()
                .filter_map(|span| span.subchain_id())
                .collect::<Vec<_>>()
                .join(" ");
            let annotated = polymer.one_letter_sequence(sequence.codes());
            let unannotated = sequence.get_chain_sequence(&chain.name).to_string();
            let (start_position, end_position): (SqlValue, SqlValue) = if polymer.is_empty() {
                (SqlValue::Null, SqlValue::Null)
            } else {
                let start = sequence
                    .get_chain_start_position(&chain.name)
                    .or_else(|| polymer.first().map(|residue| residue.label_seq));
                let end = sequence
                    .get_chain_end_position(&chain.name)
                    .or_else(|| polymer.last().map(|residue| residue.label_seq));
                (start.into(), end.into())
            };

            row![
                entry_id,
                chain.name.as_str(),
                subchain_ids,
                structure.chain_polymer_kind(chain).code(),
                annotated,
                unannotated,
                start_position,
                end_position,
                polymer.length(),
            ]
        })
        .collect()
}

/// `subchains` table: one row per non-empty subchain of each peptide entity.
pub fn subchain_rows(
    structure: &Structure,
    _document: &Document,
    sequence: &PolymerSequence,
) -> Vec<Row> {
    let entry_id = structure.entry_id().unwrap_or_default();
    let mut rows = Vec::new();

    for entity in &structure.entities {
        if !entity.polymer_kind.is_peptide() {
            continue;
        }
        for subchain_name in &entity.subchains {
            let span = structure.model.subchain(subchain_name);
            let (Some(first), Some(last)) = (span.first(), span.last()) else {
                continue;
            };
            let Some(parent) = structure.model.parent_chain_of_subchain(subchain_name) else {
                continue;
            };
            let annotated = span.one_letter_sequence(sequence.codes());
            let (unannotated, _) =
                sequence.get_chain_subsequence(&parent.name, first.label_seq, last.label_seq);
            rows.push(row![
                entry_id,
                entity.name.as_str(),
                subchain_name.as_str(),
                parent.name.as_str(),
                annotated,
                unannotated,
                first.label_seq,
                last.label_seq,
                span.length(),
            ]);
        }
    }
    rows
}

/// `helices` table: one row per helix record, numbered from 1.
///
/// A helix spanning two chains carries both chain names space-joined and a
/// null sequence.
pub fn helix_rows(
    structure: &Structure,
    _document: &Document,
    sequence: &PolymerSequence,
) -> Vec<Row> {
    let entry_id = structure.entry_id().unwrap_or_default();
    let mut rows = Vec::new();

    for (index, helix) in structure.helices.iter().enumerate() {
        let Some(start_chain) = structure.model.find_chain(&helix.start.chain_name) else {
            continue;
        };
        let Some(end_chain) = structure.model.find_chain(&helix.end.chain_name) else {
            continue;
        };
        let start_position: SqlValue = start_chain
            .find_residue(helix.start.seq_num, helix.start.icode)
            .map(|residue| residue.label_seq)
            .into();
        let end_position: SqlValue = end_chain
            .find_residue(helix.end.seq_num, helix.end.icode)
            .map(|residue| residue.label_seq)
            .into();
        let helix_sequence: SqlValue = sequence.get_helix_sequence(helix, structure).into();
        let chain_id = if start_chain.name != end_chain.name {
            format!("{} {}", start_chain.name, end_chain.name)
        } else {
            start_chain.name.clone()
        };

        rows.push(row![
            entry_id,
            (index + 1) as i64,
            chain_id,
            helix_sequence,
            start_position,
            end_position,
            helix.length,
        ]);
    }
    rows
}

/// `sheets` table: one row per sheet record.
pub fn sheet_rows(
    structure: &Structure,
    _document: &Document,
    _sequence: &PolymerSequence,
) -> Vec<Row> {
    let entry_id = structure.entry_id().unwrap_or_default();

    structure
        .sheets
        .iter()
        .map(|sheet| {
            row![
                entry_id,
                sheet.name.as_str(),
                sheet.strands.len() as i64,
                sense_sequence(sheet),
            ]
        })
        .collect()
}

/// `strands` table: one row per strand of every sheet.
pub fn strand_rows(
    structure: &Structure,
    _document: &Document,
    sequence: &PolymerSequence,
) -> Vec<Row> {
    let entry_id = structure.entry_id().unwrap_or_default();
    let mut rows = Vec::new();

    for sheet in &structure.sheets {
        for strand in &sheet.strands {
            let Some(start_chain) = structure.model.find_chain(&strand.start.chain_name) else {
                continue;
            };
            let Some(end_chain) = structure.model.find_chain(&strand.end.chain_name) else {
                continue;
            };
            let start_position: SqlValue = start_chain
                .find_residue(strand.start.seq_num, strand.start.icode)
                .map(|residue| residue.label_seq)
                .into();
            let end_position: SqlValue = end_chain
                .find_residue(strand.end.seq_num, strand.end.icode)
                .map(|residue| residue.label_seq)
                .into();
            let (strand_sequence, span_length): (SqlValue, SqlValue) =
                match sequence.get_strand_sequence(strand, structure) {
                    Some((code, length)) => (code.into(), length.into()),
                    None => (SqlValue::Null, SqlValue::Null),
                };

            rows.push(row![
                entry_id,
                sheet.name.as_str(),
                strand.name.as_str(),
                start_chain.name.as_str(),
                strand_sequence,
                start_position,
                end_position,
                span_length,
            ]);
        }
    }
    rows
}

/// `coils` table: per chain, the maximal polymer runs not claimed by any
/// helix or strand record, numbered sequentially across the entry.
pub fn coil_rows(
    structure: &Structure,
    _document: &Document,
    sequence: &PolymerSequence,
) -> Vec<Row> {
    let entry_id = structure.entry_id().unwrap_or_default();

    let mut claimed: HashMap<&str, Vec<(i32, i32)>> = HashMap::new();
    for helix in &structure.helices {
        if let Some((chain, start, end)) = resolve_addresses(structure, helix) {
            claimed.entry(chain).or_default().push((start.min(end), start.max(end)));
        }
    }
    for sheet in &structure.sheets {
        for strand in &sheet.strands {
            if let Some((chain, start, end)) = resolve_addresses(structure, strand) {
                claimed.entry(chain).or_default().push((start.min(end), start.max(end)));
            }
        }
    }

    let mut rows = Vec::new();
    let mut coil_id: i64 = 0;
    for chain in &structure.model.chains {
        let polymer = structure.polymer(chain);
        if polymer.is_empty() {
            continue;
        }
        let spans = claimed.get(chain.name.as_str());
        let kind_code = structure.chain_polymer_kind(chain).code();

        let mut runs: Vec<Vec<&Residue>> = Vec::new();
        let mut current: Vec<&Residue> = Vec::new();
        for residue in polymer.residues().iter().copied() {
            let taken = spans.is_some_and(|spans| {
                spans.iter().any(|&(low, high)| (low..=high).contains(&residue.label_seq))
            });
            if taken {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            } else {
                current.push(residue);
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }

        for run in runs {
            let span = ResidueSpan::new(run);
            let (Some(first), Some(last)) = (span.first(), span.last()) else {
                continue;
            };
            coil_id += 1;
            let annotated = span.one_letter_sequence(sequence.codes());
            let (unannotated, _) =
                sequence.get_chain_subsequence(&chain.name, first.label_seq, last.label_seq);
            rows.push(row![
                entry_id,
                coil_id,
                chain.name.as_str(),
                kind_code,
                annotated,
                unannotated,
                first.label_seq,
                last.label_seq,
                span.length(),
            ]);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AtomAddress, Chain, Entity, Helix, Model, Strand, UnitCell};

    fn entity(kind: EntityKind, polymer_kind: PolymerKind, subchains: &[&str]) -> Entity {
        Entity {
            name: "1".to_string(),
            kind,
            polymer_kind,
            subchains: subchains.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn residue(name: &str, subchain: &str, label_seq: i32) -> Residue {
        Residue {
            name: name.to_string(),
            subchain: subchain.to_string(),
            label_seq,
            seq_num: label_seq,
            icode: None,
        }
    }

    fn indexed_chain(name: &str, subchain: &str) -> Chain {
        let monomers = [
            "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE", "UNK",
        ];
        Chain {
            name: name.to_string(),
            residues: monomers
                .iter()
                .enumerate()
                .map(|(index, monomer)| residue(monomer, subchain, index as i32 + 1))
                .collect(),
        }
    }

    fn base_structure() -> Structure {
        let mut info = HashMap::new();
        info.insert("_entry.id".to_string(), "1A00".to_string());
        info.insert("_struct.title".to_string(), "mock_title".to_string());
        info.insert("_cell.Z_PDB".to_string(), "1".to_string());
        Structure {
            name: "mock_name".to_string(),
            info,
            cell: UnitCell { a: 1.0, b: 1.0, c: 1.0, alpha: 90.0, beta: 90.0, gamma: 90.0 },
            spacegroup_hm: "P 1".to_string(),
            ..Structure::default()
        }
    }

    fn peptide_structure() -> Structure {
        let mut structure = base_structure();
        structure.entities =
            vec![entity(EntityKind::Polymer, PolymerKind::PeptideL, &["A1"])];
        structure.model = Model { chains: vec![indexed_chain("A", "A1")] };
        structure
    }

    fn scheme_document() -> Document {
        let mut block = Block::new("1A00");
        let monomers = [
            "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE", "UNK",
        ];
        block.set_loop("_pdbx_poly_seq_scheme.pdb_strand_id", vec!["A"; 11]);
        block.set_loop("_pdbx_poly_seq_scheme.entity_id", vec!["1"; 11]);
        block.set_loop(
            "_pdbx_poly_seq_scheme.seq_id",
            (1..=11).map(|id| id.to_string()),
        );
        block.set_loop("_pdbx_poly_seq_scheme.mon_id", monomers);
        block.set_loop("_pdbx_poly_seq_scheme.pdb_mon_id", monomers);
        block.set_loop("_pdbx_poly_seq_scheme.hetero", vec!["n"; 11]);
        Document::from_block(block)
    }

    fn empty_sequence() -> PolymerSequence {
        PolymerSequence::new(&Document::from_block(Block::new("empty")))
    }

    #[test]
    fn test_sense_sequence() {
        let sheet = Sheet {
            name: "A".to_string(),
            strands: vec![
                Strand { sense: 1, ..Strand::default() },
                Strand { sense: -1, ..Strand::default() },
                Strand { sense: 0, ..Strand::default() },
            ],
        };
        assert_eq!(sense_sequence(&sheet), "PA");
    }

    #[test]
    fn test_complex_type_classification() {
        let cases: Vec<(ComplexType, Vec<Entity>)> = vec![
            (ComplexType::Other, vec![entity(EntityKind::Unknown, PolymerKind::Unknown, &[])]),
            (
                ComplexType::NucleicAcid,
                vec![
                    entity(EntityKind::Polymer, PolymerKind::Dna, &[]),
                    entity(EntityKind::Polymer, PolymerKind::Rna, &[]),
                    entity(EntityKind::Polymer, PolymerKind::DnaRnaHybrid, &[]),
                    entity(EntityKind::Polymer, PolymerKind::Pna, &[]),
                ],
            ),
            (
                ComplexType::Saccharide,
                vec![
                    entity(EntityKind::Branched, PolymerKind::Unknown, &[]),
                    entity(EntityKind::Polymer, PolymerKind::SaccharideD, &[]),
                    entity(EntityKind::Polymer, PolymerKind::SaccharideL, &[]),
                ],
            ),
            (
                ComplexType::SingleProtein,
                vec![entity(EntityKind::Polymer, PolymerKind::PeptideL, &["A"])],
            ),
            (
                ComplexType::Proteinmer,
                vec![entity(EntityKind::Polymer, PolymerKind::PeptideL, &["A", "B"])],
            ),
            (
                ComplexType::ComplexProtein,
                vec![
                    entity(EntityKind::Polymer, PolymerKind::PeptideD, &[]),
                    entity(EntityKind::Polymer, PolymerKind::PeptideL, &[]),
                ],
            ),
            (
                ComplexType::ProteinNA,
                vec![
                    entity(EntityKind::Polymer, PolymerKind::PeptideD, &[]),
                    entity(EntityKind::Polymer, PolymerKind::Dna, &[]),
                ],
            ),
            (
                ComplexType::ProteinSaccharide,
                vec![
                    entity(EntityKind::Polymer, PolymerKind::PeptideD, &[]),
                    entity(EntityKind::Polymer, PolymerKind::SaccharideD, &[]),
                ],
            ),
            (
                ComplexType::SaccharideNA,
                vec![
                    entity(EntityKind::Polymer, PolymerKind::SaccharideD, &[]),
                    entity(EntityKind::Polymer, PolymerKind::Dna, &[]),
                ],
            ),
            (
                ComplexType::ProteinSaccharideNA,
                vec![
                    entity(EntityKind::Polymer, PolymerKind::PeptideD, &[]),
                    entity(EntityKind::Polymer, PolymerKind::SaccharideD, &[]),
                    entity(EntityKind::Polymer, PolymerKind::Dna, &[]),
                ],
            ),
        ];

        for (expected, entities) in cases {
            let structure = Structure { entities, ..Structure::default() };
            assert_eq!(complex_type(&structure), expected, "composition for {:?}", expected);
        }
    }

    #[test]
    fn test_complex_type_ignores_water_and_ligands() {
        let structure = Structure {
            entities: vec![
                entity(EntityKind::Polymer, PolymerKind::PeptideL, &["A"]),
                entity(EntityKind::NonPolymer, PolymerKind::Unknown, &[]),
                entity(EntityKind::Water, PolymerKind::Unknown, &[]),
            ],
            ..Structure::default()
        };
        assert_eq!(complex_type(&structure), ComplexType::SingleProtein);
    }

    #[test]
    fn test_main_rows() {
        let mut structure = base_structure();
        structure.entities = vec![entity(EntityKind::Polymer, PolymerKind::Dna, &[])];
        structure.model = Model { chains: vec![Chain::new("A"), Chain::new("B")] };

        let mut block = Block::new("1A00");
        block.set_value("_entity_src_gen.pdbx_gene_src_scientific_name", "'mock_org'");
        block.set_loop(
            "_pdbx_audit_revision_history.revision_date",
            ["2000-01-01", "2000-06-15"],
        );
        let document = Document::from_block(block);

        let rows = main_rows(&structure, &document, &empty_sequence());
        assert_eq!(
            rows,
            vec![row![
                "1A00",
                "NucleicAcid",
                "mock_title",
                "mock_org",
                "2000-06-15",
                "A B",
                "P 1",
                1,
                1.0,
                1.0,
                1.0,
                90.0,
                90.0,
                90.0,
            ]]
        );
    }

    #[test]
    fn test_main_rows_missing_annotations() {
        let mut structure = base_structure();
        structure.info.remove("_cell.Z_PDB");
        let document = Document::from_block(Block::new("1A00"));

        let rows = main_rows(&structure, &document, &empty_sequence());
        let row = &rows[0];
        // source organism degrades to '', revision date and Z value to null
        assert_eq!(row[3], SqlValue::Text(String::new()));
        assert_eq!(row[4], SqlValue::Null);
        assert_eq!(row[7], SqlValue::Null);
    }

    #[test]
    fn test_main_rows_without_sole_block() {
        let structure = base_structure();
        assert!(main_rows(&structure, &Document::new(), &empty_sequence()).is_empty());
    }

    #[test]
    fn test_experimental_rows() {
        let structure = base_structure();
        let mut block = Block::new("1A00");
        block.set_value("_exptl_crystal.density_Matthews", "1.0");
        block.set_value("_exptl_crystal.density_percent_sol", "1.0");
        block.set_value("_exptl_crystal_grow.method", "'mock_growth_method'");
        block.set_value("_exptl_crystal_grow.pdbx_details", "mock_growth_proc");
        block.set_value("_exptl_crystal_grow.apparatus", "mock_growth_apparatus");
        block.set_value("_exptl_crystal_grow.atmosphere", "mock_growth_atmosphere");
        block.set_value("_exptl_crystal_grow.pH", "7.0");
        block.set_value("_exptl_crystal_grow.temp", "200.0");
        let document = Document::from_block(block);

        let rows = experimental_rows(&structure, &document, &empty_sequence());
        assert_eq!(
            rows,
            vec![row![
                "1A00",
                1.0,
                1.0,
                "mock_growth_method",
                "mock_growth_proc",
                "mock_growth_apparatus",
                "mock_growth_atmosphere",
                7.0,
                200.0,
            ]]
        );
    }

    #[test]
    fn test_experimental_rows_missing_annotations() {
        let structure = base_structure();
        let document = Document::from_block(Block::new("1A00"));

        let rows = experimental_rows(&structure, &document, &empty_sequence());
        assert_eq!(
            rows,
            vec![row![
                "1A00",
                SqlValue::Null,
                SqlValue::Null,
                "",
                "",
                "",
                "",
                SqlValue::Null,
                SqlValue::Null,
            ]]
        );
    }

    #[test]
    fn test_entity_rows() {
        let mut structure = base_structure();
        structure.entities = vec![
            entity(EntityKind::Polymer, PolymerKind::PeptideD, &["A"]),
            entity(EntityKind::NonPolymer, PolymerKind::Unknown, &[]),
            entity(EntityKind::Polymer, PolymerKind::PeptideD, &["A", "B"]),
        ];
        let mut block = Block::new("1A00");
        block.set_loop(
            "_entity.pdbx_description",
            ["mock_entity_one", "'mock_entity_two'", "?"],
        );
        let document = Document::from_block(block);

        let rows = entity_rows(&structure, &document, &empty_sequence());
        assert_eq!(
            rows,
            vec![
                row!["1A00", "1", "mock_entity_one", "Polymer", "PeptideD", "A"],
                row!["1A00", "1", "mock_entity_two", "NonPolymer", "Unknown", ""],
                row!["1A00", "1", "", "Polymer", "PeptideD", "A B"],
            ]
        );
    }

    #[test]
    fn test_entity_rows_single_value_fallback() {
        let mut structure = base_structure();
        structure.entities = vec![entity(EntityKind::Polymer, PolymerKind::PeptideD, &["A", "B"])];
        let mut block = Block::new("1A00");
        block.set_value("_entity.pdbx_description", "'mock_entity'");
        let document = Document::from_block(block);

        let rows = entity_rows(&structure, &document, &empty_sequence());
        assert_eq!(rows, vec![row!["1A00", "1", "mock_entity", "Polymer", "PeptideD", "A B"]]);
    }

    #[test]
    fn test_chain_rows() {
        let structure = peptide_structure();
        let sequence = PolymerSequence::new(&scheme_document());

        let rows = chain_rows(&structure, &Document::new(), &sequence);
        assert_eq!(
            rows,
            vec![row![
                "1A00",
                "A",
                "A1",
                PolymerKind::PeptideL.code(),
                "ARNDCQEGHIX",
                "ARNDCQEGHIX",
                1,
                11,
                11,
            ]]
        );
    }

    #[test]
    fn test_chain_rows_without_polymer() {
        let mut structure = base_structure();
        structure.entities = vec![Entity {
            name: "1".to_string(),
            kind: EntityKind::Water,
            polymer_kind: PolymerKind::Unknown,
            subchains: vec!["W1".to_string()],
        }];
        structure.model = Model {
            chains: vec![Chain {
                name: "A".to_string(),
                residues: vec![residue("HOH", "W1", 1)],
            }],
        };

        let rows = chain_rows(&structure, &Document::new(), &empty_sequence());
        assert_eq!(
            rows,
            vec![row![
                "1A00",
                "A",
                "W1",
                0,
                "",
                "",
                SqlValue::Null,
                SqlValue::Null,
                0,
            ]]
        );
    }

    #[test]
    fn test_subchain_rows() {
        let structure = peptide_structure();
        let sequence = PolymerSequence::new(&scheme_document());

        let rows = subchain_rows(&structure, &Document::new(), &sequence);
        assert_eq!(
            rows,
            vec![row![
                "1A00",
                "1",
                "A1",
                "A",
                "ARNDCQEGHIX",
                "ARNDCQEGHIX",
                1,
                11,
                11,
            ]]
        );
    }

    #[test]
    fn test_subchain_rows_skips_empty_subchain() {
        let mut structure = peptide_structure();
        structure.entities[0].subchains.push("B1".to_string());

        let rows = subchain_rows(&structure, &Document::new(), &empty_sequence());
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_helix_rows() {
        let mut structure = peptide_structure();
        structure.helices = vec![Helix {
            start: AtomAddress::new("A", 2),
            end: AtomAddress::new("A", 4),
            length: 3,
        }];
        let sequence = PolymerSequence::new(&scheme_document());

        let rows = helix_rows(&structure, &Document::new(), &sequence);
        assert_eq!(rows, vec![row!["1A00", 1, "A", "RND", 2, 4, 3]]);
    }

    #[test]
    fn test_helix_rows_across_chains() {
        let mut structure = peptide_structure();
        structure.model.chains.push(indexed_chain("B", "B1"));
        structure.helices = vec![Helix {
            start: AtomAddress::new("A", 1),
            end: AtomAddress::new("B", 11),
            length: 11,
        }];
        let sequence = PolymerSequence::new(&scheme_document());

        let rows = helix_rows(&structure, &Document::new(), &sequence);
        assert_eq!(rows, vec![row!["1A00", 1, "A B", SqlValue::Null, 1, 11, 11]]);
    }

    #[test]
    fn test_sheet_rows() {
        let mut structure = peptide_structure();
        structure.sheets = vec![Sheet {
            name: "S1".to_string(),
            strands: vec![Strand {
                name: "1".to_string(),
                start: AtomAddress::new("A", 6),
                end: AtomAddress::new("A", 8),
                sense: 1,
            }],
        }];

        let rows = sheet_rows(&structure, &Document::new(), &empty_sequence());
        assert_eq!(rows, vec![row!["1A00", "S1", 1, "P"]]);
    }

    #[test]
    fn test_strand_rows() {
        let mut structure = peptide_structure();
        structure.sheets = vec![Sheet {
            name: "S1".to_string(),
            strands: vec![Strand {
                name: "1".to_string(),
                start: AtomAddress::new("A", 6),
                end: AtomAddress::new("A", 8),
                sense: 1,
            }],
        }];
        let sequence = PolymerSequence::new(&scheme_document());

        let rows = strand_rows(&structure, &Document::new(), &sequence);
        assert_eq!(rows, vec![row!["1A00", "S1", "1", "A", "QEG", 6, 8, 3]]);
    }

    #[test]
    fn test_coil_rows() {
        let mut structure = peptide_structure();
        structure.helices = vec![Helix {
            start: AtomAddress::new("A", 2),
            end: AtomAddress::new("A", 4),
            length: 3,
        }];
        structure.sheets = vec![Sheet {
            name: "S1".to_string(),
            strands: vec![Strand {
                name: "1".to_string(),
                start: AtomAddress::new("A", 6),
                end: AtomAddress::new("A", 8),
                sense: 1,
            }],
        }];
        let sequence = PolymerSequence::new(&scheme_document());

        let rows = coil_rows(&structure, &Document::new(), &sequence);
        assert_eq!(
            rows,
            vec![
                row!["1A00", 1, "A", 1, "A", "A", 1, 1, 1],
                row!["1A00", 2, "A", 1, "C", "C", 5, 5, 1],
                row!["1A00", 3, "A", 1, "HIX", "HIX", 9, 11, 3],
            ]
        );
    }

    #[test]
    fn test_coil_rows_without_secondary_structure() {
        let structure = peptide_structure();
        let sequence = PolymerSequence::new(&scheme_document());

        let rows = coil_rows(&structure, &Document::new(), &sequence);
        assert_eq!(
            rows,
            vec![row!["1A00", 1, "A", 1, "ARNDCQEGHIX", "ARNDCQEGHIX", 1, 11, 11]]
        );
    }
}
