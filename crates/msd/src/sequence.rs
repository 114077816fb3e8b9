//! Per-chain polymer sequence index derived from the annotation document.
//!
//! Built once per entry before extraction starts, read-only afterwards.
//! Every extractor cross-references spans against this index to obtain
//! one-letter sequences and sequence positions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{Document, Helix, Strand, Structure};

/// Symbol emitted for monomer codes missing from the translation table.
pub const UNKNOWN_RESIDUE: char = 'X';

/// Tags of the per-chain sequence scheme loop in the annotation document.
const CHAIN_TAG: &str = "_pdbx_poly_seq_scheme.pdb_strand_id";
const ENTITY_TAG: &str = "_pdbx_poly_seq_scheme.entity_id";
const SEQ_ID_TAG: &str = "_pdbx_poly_seq_scheme.seq_id";
const MON_ID_TAG: &str = "_pdbx_poly_seq_scheme.mon_id";
const PDB_MON_ID_TAG: &str = "_pdbx_poly_seq_scheme.pdb_mon_id";
const HETERO_TAG: &str = "_pdbx_poly_seq_scheme.hetero";

/// One row of the sequence scheme: a monomer at a sequence position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monomer {
    pub chain: String,
    pub entity_id: i32,
    pub seq_id: i32,
    /// Standard monomer code from the depositor sequence.
    pub mon_id: String,
    /// Observed monomer code, possibly a heteroatom variant.
    pub pdb_mon_id: String,
    pub hetero: bool,
}

/// Immutable three-letter (or analogous) to one-letter code translation
/// table.
///
/// Explicitly constructed and owned by each [`PolymerSequence`] rather than
/// held as ambient global state, so tests can inject reduced tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonomerCodes {
    map: HashMap<String, char>,
}

impl MonomerCodes {
    /// The standard table: the twenty amino acids plus deoxyribo- and
    /// ribonucleotide codes.
    pub fn standard() -> Self {
        const CODES: &[(&str, char)] = &[
            ("ALA", 'A'),
            ("ARG", 'R'),
            ("ASN", 'N'),
            ("ASP", 'D'),
            ("CYS", 'C'),
            ("GLN", 'Q'),
            ("GLU", 'E'),
            ("GLY", 'G'),
            ("HIS", 'H'),
            ("ILE", 'I'),
            ("LEU", 'L'),
            ("LYS", 'K'),
            ("MET", 'M'),
            ("PHE", 'F'),
            ("PRO", 'P'),
            ("SER", 'S'),
            ("THR", 'T'),
            ("TRP", 'W'),
            ("TYR", 'Y'),
            ("VAL", 'V'),
            ("DA", 'A'),
            ("DC", 'C'),
            ("DG", 'G'),
            ("DT", 'T'),
            ("A", 'A'),
            ("C", 'C'),
            ("G", 'G'),
            ("U", 'U'),
        ];
        Self::from_pairs(CODES)
    }

    pub fn from_pairs(pairs: &[(&str, char)]) -> Self {
        Self {
            map: pairs
                .iter()
                .map(|(code, letter)| ((*code).to_string(), *letter))
                .collect(),
        }
    }

    /// Translates one monomer code; unrecognized codes map to
    /// [`UNKNOWN_RESIDUE`], never an error.
    pub fn translate(&self, code: &str) -> char {
        self.map.get(code).copied().unwrap_or(UNKNOWN_RESIDUE)
    }

    /// Translates a whole ordered sequence of codes, preserving order.
    pub fn translate_sequence<'a, I>(&self, codes: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        codes.into_iter().map(|code| self.translate(code)).collect()
    }
}

impl Default for MonomerCodes {
    fn default() -> Self {
        Self::standard()
    }
}

/// Per-chain start/end lookups into the global one-letter sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolymerSequence {
    monomers: Vec<Monomer>,
    chain_start_indices: HashMap<String, usize>,
    chain_end_indices: HashMap<String, usize>,
    one_letter_code: String,
    codes: MonomerCodes,
}

impl PolymerSequence {
    /// Builds the index from the document's sequence scheme loop using the
    /// standard code table.
    pub fn new(document: &Document) -> Self {
        Self::with_codes(document, MonomerCodes::standard())
    }

    /// Builds the index with an injected code table.
    pub fn with_codes(document: &Document, codes: MonomerCodes) -> Self {
        let mut monomers = read_sequence_scheme(document);
        collapse_heterogeneities(&mut monomers);

        let mut chain_start_indices = HashMap::new();
        let mut chain_end_indices = HashMap::new();
        let mut last_chain: Option<String> = None;
        for (index, monomer) in monomers.iter().enumerate() {
            if last_chain.as_deref() != Some(monomer.chain.as_str()) {
                if let Some(previous) = last_chain.take() {
                    chain_end_indices.insert(previous, index - 1);
                }
                chain_start_indices.insert(monomer.chain.clone(), index);
                last_chain = Some(monomer.chain.clone());
            }
        }
        if let Some(previous) = last_chain {
            chain_end_indices.insert(previous, monomers.len() - 1);
        }

        let one_letter_code =
            codes.translate_sequence(monomers.iter().map(|monomer| monomer.mon_id.as_str()));

        Self {
            monomers,
            chain_start_indices,
            chain_end_indices,
            one_letter_code,
            codes,
        }
    }

    pub fn codes(&self) -> &MonomerCodes {
        &self.codes
    }

    pub fn monomers(&self) -> &[Monomer] {
        &self.monomers
    }

    /// The concatenated one-letter code of every indexed chain.
    pub fn one_letter_code(&self) -> &str {
        &self.one_letter_code
    }

    /// The chain's full one-letter sequence, or `""` for a chain without
    /// complete index bounds (unknown chain, or no polymer entries).
    pub fn get_chain_sequence(&self, chain: &str) -> &str {
        let (Some(&start), Some(&end)) = (
            self.chain_start_indices.get(chain),
            self.chain_end_indices.get(chain),
        ) else {
            return "";
        };
        self.one_letter_code.get(start..=end).unwrap_or("")
    }

    /// Sequence position of the chain's first indexed monomer.
    pub fn get_chain_start_position(&self, chain: &str) -> Option<i32> {
        let index = *self.chain_start_indices.get(chain)?;
        self.monomers.get(index).map(|monomer| monomer.seq_id)
    }

    /// Sequence position of the chain's last indexed monomer.
    pub fn get_chain_end_position(&self, chain: &str) -> Option<i32> {
        let index = *self.chain_end_indices.get(chain)?;
        self.monomers.get(index).map(|monomer| monomer.seq_id)
    }

    /// One-letter subsequence between two sequence positions of a chain,
    /// with its signed length.
    ///
    /// A descending span (end position before start position) yields the
    /// reversed subsequence and a negative length. Unknown chains or
    /// positions yield `("", 0)`.
    pub fn get_chain_subsequence(&self, chain: &str, start_id: i32, end_id: i32) -> (String, i64) {
        let (Some(&chain_start), Some(&chain_end)) = (
            self.chain_start_indices.get(chain),
            self.chain_end_indices.get(chain),
        ) else {
            return (String::new(), 0);
        };
        let (Some(start), Some(end)) = (
            self.position_of(chain_start, chain_end, start_id),
            self.position_of(chain_start, chain_end, end_id),
        ) else {
            return (String::new(), 0);
        };

        if end >= start {
            let sequence = self.one_letter_code.get(start..=end).unwrap_or("").to_string();
            (sequence, (end - start + 1) as i64)
        } else {
            let sequence: String = self
                .one_letter_code
                .get(end..=start)
                .unwrap_or("")
                .chars()
                .rev()
                .collect();
            (sequence, end as i64 - start as i64 - 1)
        }
    }

    /// One-letter sequence of a helix span. `None` when the record crosses
    /// chains or its endpoints cannot be resolved.
    pub fn get_helix_sequence(&self, helix: &Helix, structure: &Structure) -> Option<String> {
        let (chain, start_pos, end_pos) = resolve_addresses(structure, helix)?;
        Some(self.get_chain_subsequence(chain, start_pos, end_pos).0)
    }

    /// One-letter sequence and signed length of a strand span. `None` when
    /// the record crosses chains or its endpoints cannot be resolved.
    pub fn get_strand_sequence(
        &self,
        strand: &Strand,
        structure: &Structure,
    ) -> Option<(String, i64)> {
        let (chain, start_pos, end_pos) = resolve_addresses(structure, strand)?;
        Some(self.get_chain_subsequence(chain, start_pos, end_pos))
    }

    /// Index of the monomer with the given sequence position, searched
    /// within `[left, right]`. Positions are strictly increasing along a
    /// chain, so a binary search with an interpolation step suffices.
    fn position_of(&self, left: usize, right: usize, target: i32) -> Option<usize> {
        if right >= self.monomers.len() {
            return None;
        }
        let mut left = left;
        let mut right = right;
        while left <= right {
            let centre = (left + right) / 2;
            let centre_label = self.monomers[centre].seq_id;
            if centre_label == target {
                return Some(centre);
            }
            let guess = (centre as i64 + i64::from(target - centre_label))
                .clamp(left as i64, right as i64) as usize;
            if self.monomers[guess].seq_id == target {
                return Some(guess);
            }
            if target < centre_label {
                if centre == 0 {
                    return None;
                }
                right = centre - 1;
            } else {
                left = centre + 1;
            }
        }
        None
    }
}

/// A secondary-structure record addressed by author-facing endpoints.
pub(crate) trait AddressedSpan {
    fn start(&self) -> &crate::model::AtomAddress;
    fn end(&self) -> &crate::model::AtomAddress;
}

impl AddressedSpan for Helix {
    fn start(&self) -> &crate::model::AtomAddress {
        &self.start
    }
    fn end(&self) -> &crate::model::AtomAddress {
        &self.end
    }
}

impl AddressedSpan for Strand {
    fn start(&self) -> &crate::model::AtomAddress {
        &self.start
    }
    fn end(&self) -> &crate::model::AtomAddress {
        &self.end
    }
}

/// Resolves a record's author addresses to (chain name, start, end) label
/// positions. `None` for cross-chain records or unresolvable endpoints.
pub(crate) fn resolve_addresses<'a, S: AddressedSpan>(
    structure: &'a Structure,
    span: &S,
) -> Option<(&'a str, i32, i32)> {
    let start_chain = structure.model.find_chain(&span.start().chain_name)?;
    let end_chain = structure.model.find_chain(&span.end().chain_name)?;
    if start_chain.name != end_chain.name {
        return None;
    }
    let start_pos = start_chain
        .find_residue(span.start().seq_num, span.start().icode)?
        .label_seq;
    let end_pos = end_chain
        .find_residue(span.end().seq_num, span.end().icode)?
        .label_seq;
    Some((start_chain.name.as_str(), start_pos, end_pos))
}

/// Reads the sequence scheme loop into monomers, skipping rows whose
/// sequence position does not parse.
fn read_sequence_scheme(document: &Document) -> Vec<Monomer> {
    let Some(block) = document.sole_block() else {
        return Vec::new();
    };
    let chains = block.find_loop(CHAIN_TAG);
    let entities = block.find_loop(ENTITY_TAG);
    let seq_ids = block.find_loop(SEQ_ID_TAG);
    let mon_ids = block.find_loop(MON_ID_TAG);
    let pdb_mon_ids = block.find_loop(PDB_MON_ID_TAG);
    let heteros = block.find_loop(HETERO_TAG);

    let rows = chains.len().min(seq_ids.len()).min(mon_ids.len());
    let mut monomers = Vec::with_capacity(rows);
    for index in 0..rows {
        let Ok(seq_id) = seq_ids[index].parse() else {
            continue;
        };
        monomers.push(Monomer {
            chain: chains[index].clone(),
            entity_id: entities
                .get(index)
                .and_then(|value| value.parse().ok())
                .unwrap_or(0),
            seq_id,
            mon_id: mon_ids[index].clone(),
            pdb_mon_id: pdb_mon_ids.get(index).cloned().unwrap_or_default(),
            hetero: heteros.get(index).map(|flag| flag == "y").unwrap_or(false),
        });
    }
    monomers
}

/// Collapses runs of heterogeneous monomers at the same position of the same
/// chain down to their first entry.
fn collapse_heterogeneities(monomers: &mut Vec<Monomer>) {
    let mut index = 0;
    while index < monomers.len() {
        if monomers[index].hetero {
            while index + 1 < monomers.len()
                && monomers[index + 1].chain == monomers[index].chain
                && monomers[index + 1].seq_id == monomers[index].seq_id
            {
                monomers.remove(index + 1);
            }
        }
        index += 1;
    }
}
