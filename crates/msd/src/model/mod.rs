//! Boundary types fed to the extraction layer.
//!
//! Extraction consumes exactly two external-collaborator objects — a parsed
//! structure and a parsed annotation document — plus the sequence index
//! derived from the latter. These modules define that boundary as plain
//! data; the parsers producing it are out of scope.

mod document;
mod structure;

pub use document::{Block, Document};
pub use structure::{
    AtomAddress, Chain, Entity, EntityKind, Helix, Model, PolymerKind, Residue, ResidueSpan,
    Sheet, Strand, Structure, UnitCell,
};
