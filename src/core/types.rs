// src/core/types.rs
use crate::core::error::{AlphabetError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An opaque key naming a letter across alphabets, independent of its glyph.
/// e.g. "alpha", "digamma", or "A" for the modern Latin tables.
pub type LetterId = String;

/// A named, ordered alphabet. Identifiers may repeat (historical reuse of a
/// letter for a reform step), so lookups always resolve to the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlphabetTable {
    pub name: String,
    order: Vec<LetterId>,
}

impl AlphabetTable {
    pub fn new(name: impl Into<String>, order: Vec<LetterId>) -> Result<Self> {
        let name = name.into();
        if order.is_empty() {
            return Err(AlphabetError::EmptyAlphabet { name });
        }
        Ok(Self { name, order })
    }

    /// Convenience constructor for tables written inline.
    pub fn from_letters(name: impl Into<String>, letters: &[&str]) -> Result<Self> {
        Self::new(name, letters.iter().map(|s| s.to_string()).collect())
    }

    pub fn order(&self) -> &[LetterId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false for a constructed table; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 1-based position of the first occurrence of `letter`.
    pub fn position(&self, letter: &str) -> Option<usize> {
        self.order.iter().position(|l| l == letter).map(|i| i + 1)
    }

    /// The identifier at a 1-based position.
    pub fn letter_at(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|i| self.order.get(i))
            .map(String::as_str)
    }
}

/// Letter identifier to display glyph for one script family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMapping {
    pub name: String,
    glyphs: BTreeMap<LetterId, String>,
}

impl SymbolMapping {
    pub fn new(name: impl Into<String>, glyphs: BTreeMap<LetterId, String>) -> Self {
        Self { name: name.into(), glyphs }
    }

    pub fn from_pairs(name: impl Into<String>, pairs: &[(&str, &str)]) -> Self {
        let glyphs = pairs
            .iter()
            .map(|(letter, glyph)| (letter.to_string(), glyph.to_string()))
            .collect();
        Self::new(name, glyphs)
    }

    pub fn get(&self, letter: &str) -> Option<&str> {
        self.glyphs.get(letter).map(String::as_str)
    }

    /// Looks up a glyph, failing with `GlyphLookup` when the entry is missing.
    pub fn glyph(&self, letter: &str) -> Result<&str> {
        self.get(letter).ok_or_else(|| AlphabetError::GlyphLookup {
            letter: letter.to_string(),
            mapping: self.name.clone(),
        })
    }
}

/// Resolves the label drawn for a letter. Without a mapping the identifier
/// is already the glyph.
pub fn display_glyph<'a>(letter: &'a str, mapping: Option<&'a SymbolMapping>) -> Result<&'a str> {
    match mapping {
        Some(mapping) => mapping.glyph(letter),
        None => Ok(letter),
    }
}

/// The (source rank, target rank) correspondence for one shared letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionPair {
    pub source: usize,
    pub target: usize,
    /// The shared identifier this pair was produced for.
    pub letter: LetterId,
}

impl PositionPair {
    pub fn new(source: usize, target: usize, letter: impl Into<LetterId>) -> Self {
        Self { source, target, letter: letter.into() }
    }

    pub fn xy(&self) -> (usize, usize) {
        (self.source, self.target)
    }
}

/// Ordinary least squares fit of target position on source position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,
}

impl RegressionResult {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Spearman rank correlation with its two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub statistic: f64,
    pub p_value: f64,
}
