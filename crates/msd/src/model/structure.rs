//! Parsed structure records.
//!
//! Plain data mirroring the hierarchy an external structure parser yields:
//! entities, one model of chains of residues, annotated secondary-structure
//! records, unit cell and header info. File-format parsing itself lives
//! outside this crate; constructors take the already-parsed data.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::sequence::MonomerCodes;

/// Entity classification of a deposited molecule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    #[default]
    Unknown,
    Polymer,
    NonPolymer,
    Branched,
    Water,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Unknown => "Unknown",
            EntityKind::Polymer => "Polymer",
            EntityKind::NonPolymer => "NonPolymer",
            EntityKind::Branched => "Branched",
            EntityKind::Water => "Water",
        }
    }
}

/// Polymer classification of a polymer entity.
///
/// The discriminants double as the numeric codes stored in the `chains` and
/// `coils` tables; `Unknown` is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolymerKind {
    #[default]
    Unknown = 0,
    PeptideL = 1,
    PeptideD = 2,
    Dna = 3,
    Rna = 4,
    DnaRnaHybrid = 5,
    SaccharideD = 6,
    SaccharideL = 7,
    Pna = 8,
    CyclicPseudoPeptide = 9,
    Other = 10,
}

impl PolymerKind {
    pub fn name(&self) -> &'static str {
        match self {
            PolymerKind::Unknown => "Unknown",
            PolymerKind::PeptideL => "PeptideL",
            PolymerKind::PeptideD => "PeptideD",
            PolymerKind::Dna => "Dna",
            PolymerKind::Rna => "Rna",
            PolymerKind::DnaRnaHybrid => "DnaRnaHybrid",
            PolymerKind::SaccharideD => "SaccharideD",
            PolymerKind::SaccharideL => "SaccharideL",
            PolymerKind::Pna => "Pna",
            PolymerKind::CyclicPseudoPeptide => "CyclicPseudoPeptide",
            PolymerKind::Other => "Other",
        }
    }

    /// Numeric code persisted in the `chains`/`coils` polymer-type columns.
    pub fn code(&self) -> i64 {
        *self as i64
    }

    pub fn is_peptide(&self) -> bool {
        matches!(self, PolymerKind::PeptideL | PolymerKind::PeptideD)
    }

    pub fn is_nucleic_acid(&self) -> bool {
        matches!(
            self,
            PolymerKind::Dna | PolymerKind::Rna | PolymerKind::DnaRnaHybrid | PolymerKind::Pna
        )
    }

    pub fn is_saccharide(&self) -> bool {
        matches!(self, PolymerKind::SaccharideD | PolymerKind::SaccharideL)
    }
}

/// One deposited entity and the subchains it contributes to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub kind: EntityKind,
    pub polymer_kind: PolymerKind,
    pub subchains: Vec<String>,
}

/// Crystallographic unit cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitCell {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Default for UnitCell {
    fn default() -> Self {
        Self { a: 1.0, b: 1.0, c: 1.0, alpha: 90.0, beta: 90.0, gamma: 90.0 }
    }
}

/// Author-facing address of a residue: chain label plus author sequence
/// number and insertion code. Secondary-structure records use these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomAddress {
    pub chain_name: String,
    pub seq_num: i32,
    pub icode: Option<char>,
}

impl AtomAddress {
    pub fn new(chain_name: impl Into<String>, seq_num: i32) -> Self {
        Self { chain_name: chain_name.into(), seq_num, icode: None }
    }
}

/// One residue of a chain.
///
/// `label_seq` is the primary sequence position (strictly increasing along a
/// polymer); `seq_num`/`icode` carry the author numbering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Residue {
    pub name: String,
    pub subchain: String,
    pub label_seq: i32,
    pub seq_num: i32,
    pub icode: Option<char>,
}

/// A borrowed, ordered run of residues (a whole polymer, one subchain, or a
/// secondary-structure span).
#[derive(Debug, Clone)]
pub struct ResidueSpan<'a> {
    residues: Vec<&'a Residue>,
}

impl<'a> ResidueSpan<'a> {
    pub fn new(residues: Vec<&'a Residue>) -> Self {
        Self { residues }
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn residues(&self) -> &[&'a Residue] {
        &self.residues
    }

    pub fn first(&self) -> Option<&'a Residue> {
        self.residues.first().copied()
    }

    pub fn last(&self) -> Option<&'a Residue> {
        self.residues.last().copied()
    }

    pub fn subchain_id(&self) -> Option<&'a str> {
        self.first().map(|residue| residue.subchain.as_str())
    }

    /// Number of residues, counting a set of microheterogeneous residues
    /// (same label position) once.
    pub fn length(&self) -> i64 {
        self.distinct().count() as i64
    }

    /// One-letter code of the span, one symbol per distinct label position.
    pub fn one_letter_sequence(&self, codes: &MonomerCodes) -> String {
        self.distinct().map(|residue| codes.translate(&residue.name)).collect()
    }

    fn distinct(&self) -> impl Iterator<Item = &'a Residue> + '_ {
        let mut last_label = None;
        self.residues.iter().copied().filter(move |residue| {
            if last_label == Some(residue.label_seq) {
                false
            } else {
                last_label = Some(residue.label_seq);
                true
            }
        })
    }
}

/// One chain of the structural model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    pub name: String,
    pub residues: Vec<Residue>,
}

impl Chain {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), residues: Vec::new() }
    }

    /// Consecutive residues grouped by subchain id, in model order.
    pub fn subchain_spans(&self) -> Vec<ResidueSpan<'_>> {
        let mut spans: Vec<Vec<&Residue>> = Vec::new();
        for residue in &self.residues {
            match spans.last_mut() {
                Some(span) if span.last().is_some_and(|r| r.subchain == residue.subchain) => {
                    span.push(residue);
                }
                _ => spans.push(vec![residue]),
            }
        }
        spans.into_iter().map(ResidueSpan::new).collect()
    }

    /// Residue lookup by author numbering.
    pub fn find_residue(&self, seq_num: i32, icode: Option<char>) -> Option<&Residue> {
        self.residues
            .iter()
            .find(|residue| residue.seq_num == seq_num && residue.icode == icode)
    }
}

/// The structural model: the chains of the first (and only) model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub chains: Vec<Chain>,
}

impl Model {
    pub fn find_chain(&self, name: &str) -> Option<&Chain> {
        self.chains.iter().find(|chain| chain.name == name)
    }

    /// All residues belonging to the named subchain.
    pub fn subchain(&self, name: &str) -> ResidueSpan<'_> {
        ResidueSpan::new(
            self.chains
                .iter()
                .flat_map(|chain| chain.residues.iter())
                .filter(|residue| residue.subchain == name)
                .collect(),
        )
    }

    /// The chain that carries the named subchain.
    pub fn parent_chain_of_subchain(&self, name: &str) -> Option<&Chain> {
        self.chains
            .iter()
            .find(|chain| chain.residues.iter().any(|residue| residue.subchain == name))
    }
}

/// A helix record from the structure annotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Helix {
    pub start: AtomAddress,
    pub end: AtomAddress,
    pub length: i64,
}

/// One strand of a beta sheet. `sense` is 1 (parallel), -1 (antiparallel)
/// or 0 (first strand).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Strand {
    pub name: String,
    pub start: AtomAddress,
    pub end: AtomAddress,
    pub sense: i32,
}

/// A beta sheet and its strands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub strands: Vec<Strand>,
}

/// One parsed structure record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub name: String,
    /// Header key/value pairs (`_entry.id`, `_struct.title`, `_cell.Z_PDB`).
    pub info: HashMap<String, String>,
    pub cell: UnitCell,
    pub spacegroup_hm: String,
    pub entities: Vec<Entity>,
    pub model: Model,
    pub helices: Vec<Helix>,
    pub sheets: Vec<Sheet>,
}

impl Structure {
    pub fn entry_id(&self) -> Option<&str> {
        self.info.get("_entry.id").map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.info.get("_struct.title").map(String::as_str)
    }

    pub fn z_value(&self) -> Option<i64> {
        self.info.get("_cell.Z_PDB").and_then(|value| value.parse().ok())
    }

    /// The entity owning the named subchain, if any.
    pub fn entity_of_subchain(&self, subchain: &str) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|entity| entity.subchains.iter().any(|name| name == subchain))
    }

    /// The chain's polymer residues: those whose subchain belongs to a
    /// polymer entity. Empty for purely non-polymer chains.
    pub fn polymer<'a>(&'a self, chain: &'a Chain) -> ResidueSpan<'a> {
        ResidueSpan::new(
            chain
                .residues
                .iter()
                .filter(|residue| {
                    self.entity_of_subchain(&residue.subchain)
                        .is_some_and(|entity| entity.kind == EntityKind::Polymer)
                })
                .collect(),
        )
    }

    /// Polymer classification of the chain, `Unknown` when the chain has no
    /// polymer residues.
    pub fn chain_polymer_kind(&self, chain: &Chain) -> PolymerKind {
        chain
            .residues
            .iter()
            .filter_map(|residue| self.entity_of_subchain(&residue.subchain))
            .find(|entity| entity.kind == EntityKind::Polymer)
            .map(|entity| entity.polymer_kind)
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize Structure to JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residue(name: &str, subchain: &str, label_seq: i32) -> Residue {
        Residue {
            name: name.to_string(),
            subchain: subchain.to_string(),
            label_seq,
            seq_num: label_seq,
            icode: None,
        }
    }

    fn two_subchain_structure() -> Structure {
        let chain = Chain {
            name: "A".to_string(),
            residues: vec![
                residue("ALA", "A1", 1),
                residue("ARG", "A1", 2),
                residue("HOH", "A2", 3),
            ],
        };
        Structure {
            entities: vec![
                Entity {
                    name: "1".to_string(),
                    kind: EntityKind::Polymer,
                    polymer_kind: PolymerKind::PeptideL,
                    subchains: vec!["A1".to_string()],
                },
                Entity {
                    name: "2".to_string(),
                    kind: EntityKind::Water,
                    polymer_kind: PolymerKind::Unknown,
                    subchains: vec!["A2".to_string()],
                },
            ],
            model: Model { chains: vec![chain] },
            ..Structure::default()
        }
    }

    #[test]
    fn test_subchain_spans_group_consecutive_residues() {
        let structure = two_subchain_structure();
        let spans = structure.model.chains[0].subchain_spans();

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].subchain_id(), Some("A1"));
        assert_eq!(spans[0].residues().len(), 2);
        assert_eq!(spans[1].subchain_id(), Some("A2"));
    }

    #[test]
    fn test_polymer_excludes_non_polymer_residues() {
        let structure = two_subchain_structure();
        let polymer = structure.polymer(&structure.model.chains[0]);

        assert_eq!(polymer.length(), 2);
        assert_eq!(polymer.first().map(|r| r.label_seq), Some(1));
        assert_eq!(polymer.last().map(|r| r.label_seq), Some(2));
    }

    #[test]
    fn test_span_length_counts_microheterogeneity_once() {
        let residues = vec![
            residue("ALA", "A1", 1),
            residue("ARG", "A1", 2),
            residue("ASN", "A1", 2),
            residue("ASP", "A1", 3),
        ];
        let span = ResidueSpan::new(residues.iter().collect());

        assert_eq!(span.length(), 3);
        assert_eq!(span.one_letter_sequence(&MonomerCodes::default()), "ARD");
    }

    #[test]
    fn test_chain_polymer_kind() {
        let structure = two_subchain_structure();
        let chain = &structure.model.chains[0];
        assert_eq!(structure.chain_polymer_kind(chain), PolymerKind::PeptideL);

        let empty_chain = Chain::new("Z");
        assert_eq!(structure.chain_polymer_kind(&empty_chain), PolymerKind::Unknown);
    }

    #[test]
    fn test_find_residue_by_author_numbering() {
        let structure = two_subchain_structure();
        let chain = &structure.model.chains[0];

        assert_eq!(chain.find_residue(2, None).map(|r| r.label_seq), Some(2));
        assert!(chain.find_residue(9, None).is_none());
    }

    #[test]
    fn test_parent_chain_of_subchain() {
        let structure = two_subchain_structure();
        let parent = structure.model.parent_chain_of_subchain("A2");
        assert_eq!(parent.map(|chain| chain.name.as_str()), Some("A"));
        assert!(structure.model.parent_chain_of_subchain("B1").is_none());
    }

    #[test]
    fn test_polymer_kind_codes() {
        assert_eq!(PolymerKind::Unknown.code(), 0);
        assert_eq!(PolymerKind::PeptideL.code(), 1);
        assert_eq!(PolymerKind::Other.code(), 10);
        assert!(PolymerKind::PeptideD.is_peptide());
        assert!(PolymerKind::Pna.is_nucleic_acid());
        assert!(PolymerKind::SaccharideL.is_saccharide());
    }

    #[test]
    fn test_to_json() {
        let structure = two_subchain_structure();
        let json = structure.to_json().unwrap();
        assert!(json.contains("\"PeptideL\""));
    }
}
