// File: src/catalog.rs
//! Built-in alphabet tables and symbol mappings.
//!
//! The data lives in `data/catalog.json`, embedded at compile time and
//! parsed once on first use.

use crate::core::error::{AlphabetError, Result};
use crate::core::types::{AlphabetTable, LetterId, SymbolMapping};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::debug;

const CATALOG_JSON: &str = include_str!("../data/catalog.json");

pub const ARCHAIC_GREEK: &str = "archaic_greek";
pub const ETRUSCAN: &str = "etruscan";
pub const LEPONTIC: &str = "lepontic";
pub const PROTO_FUTHARK: &str = "proto_futhark";
pub const FUTHARK: &str = "futhark";
pub const ROMAN: &str = "roman";
pub const MODERN: &str = "modern";
pub const MODERN_LATIN: &str = "modern_latin";
pub const MODERN_LATIN_SHUFFLED: &str = "modern_latin_shuffled";

// Greek uses plain M and Q for san and qoppa; the real glyphs render
// double-wide and overrun neighbouring labels.
pub const GREEK_MAP: &str = "greek";
pub const LATIN_MAP: &str = "latin";
pub const FUTHARK_MAP: &str = "futhark";

#[derive(Deserialize)]
struct RawTable {
    name: String,
    order: Vec<LetterId>,
}

#[derive(Deserialize)]
struct RawCatalog {
    tables: BTreeMap<String, RawTable>,
    #[serde(default)]
    mappings: BTreeMap<String, BTreeMap<LetterId, String>>,
}

/// A keyed collection of alphabet tables and symbol mappings.
#[derive(Debug, Clone)]
pub struct Catalog {
    tables: BTreeMap<String, AlphabetTable>,
    mappings: BTreeMap<String, SymbolMapping>,
}

impl Catalog {
    /// Parses a catalog document. Tables with an empty ordering are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        let tables = raw
            .tables
            .into_iter()
            .map(|(key, t)| Ok((key, AlphabetTable::new(t.name, t.order)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        let mappings = raw
            .mappings
            .into_iter()
            .map(|(key, glyphs)| {
                let mapping = SymbolMapping::new(key.clone(), glyphs);
                (key, mapping)
            })
            .collect();
        Ok(Self { tables, mappings })
    }

    pub fn table(&self, key: &str) -> Result<&AlphabetTable> {
        self.tables
            .get(key)
            .ok_or_else(|| AlphabetError::UnknownTable(key.to_string()))
    }

    pub fn mapping(&self, key: &str) -> Result<&SymbolMapping> {
        self.mappings
            .get(key)
            .ok_or_else(|| AlphabetError::UnknownMapping(key.to_string()))
    }

    pub fn table_keys(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn mapping_keys(&self) -> impl Iterator<Item = &str> {
        self.mappings.keys().map(String::as_str)
    }
}

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

/// The catalog compiled into the binary.
pub fn builtin() -> Result<&'static Catalog> {
    if let Some(catalog) = BUILTIN.get() {
        return Ok(catalog);
    }
    let catalog = Catalog::from_json(CATALOG_JSON)?;
    debug!(
        tables = catalog.tables.len(),
        mappings = catalog.mappings.len(),
        "Loaded built-in alphabet catalog"
    );
    Ok(BUILTIN.get_or_init(|| catalog))
}

/// Looks up a built-in table by key.
pub fn table(key: &str) -> Result<&'static AlphabetTable> {
    builtin()?.table(key)
}

/// Looks up a built-in symbol mapping by key.
pub fn mapping(key: &str) -> Result<&'static SymbolMapping> {
    builtin()?.mapping(key)
}
