//! Read-only facade over a parsed annotation document.
//!
//! The upstream format parser is an external collaborator; this module only
//! models what extraction needs from its output: named blocks supporting
//! single-value and loop lookups by tag.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One data block of an annotation document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    name: String,
    values: HashMap<String, String>,
    loops: HashMap<String, Vec<String>>,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
            loops: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_value(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        self.values.insert(tag.into(), value.into());
    }

    pub fn set_loop<I, S>(&mut self, tag: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.loops
            .insert(tag.into(), values.into_iter().map(Into::into).collect());
    }

    /// Single value for a tag, `None` when the tag is absent.
    pub fn find_value(&self, tag: &str) -> Option<&str> {
        self.values.get(tag).map(String::as_str)
    }

    /// Loop column for a tag; an absent tag yields an empty slice.
    pub fn find_loop(&self, tag: &str) -> &[String] {
        self.loops.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// A parsed annotation document: an ordered list of blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_block(block: Block) -> Self {
        Self { blocks: vec![block] }
    }

    pub fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// The single data block, or `None` when the document holds zero or
    /// several blocks.
    pub fn sole_block(&self) -> Option<&Block> {
        match self.blocks.as_slice() {
            [block] => Some(block),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_value() {
        let mut block = Block::new("1A00");
        block.set_value("_entry.id", "1A00");

        assert_eq!(block.find_value("_entry.id"), Some("1A00"));
        assert_eq!(block.find_value("_missing.tag"), None);
    }

    #[test]
    fn test_find_loop() {
        let mut block = Block::new("1A00");
        block.set_loop("_pdbx_poly_seq_scheme.mon_id", ["ALA", "ARG"]);

        assert_eq!(
            block.find_loop("_pdbx_poly_seq_scheme.mon_id"),
            &["ALA".to_string(), "ARG".to_string()]
        );
        assert!(block.find_loop("_missing.tag").is_empty());
    }

    #[test]
    fn test_sole_block() {
        let document = Document::from_block(Block::new("only"));
        assert_eq!(document.sole_block().map(Block::name), Some("only"));
    }

    #[test]
    fn test_sole_block_rejects_zero_or_several() {
        assert!(Document::new().sole_block().is_none());

        let mut document = Document::new();
        document.push_block(Block::new("one"));
        document.push_block(Block::new("two"));
        assert!(document.sole_block().is_none());
    }
}
