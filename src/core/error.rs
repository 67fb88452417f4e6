// src/core/error.rs
use thiserror::Error;

/// Which coordinate of the position pairs was degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Source,
    Target,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Source => f.write_str("source"),
            Axis::Target => f.write_str("target"),
        }
    }
}

/// Errors from aligning, fitting, or rendering an alphabet comparison.
#[derive(Debug, Error)]
pub enum AlphabetError {
    /// The two orderings have no letter identifier in common.
    #[error("'{source_name}' and '{target_name}' share no letter identifiers")]
    EmptyAlignment {
        source_name: String,
        target_name: String,
    },

    /// Regression and rank correlation need at least two points.
    #[error("need at least 2 aligned pairs, found {found}")]
    InsufficientData { found: usize },

    /// Source and target coordinate slices differ in length.
    #[error("{source_len} source positions but {target_len} target positions")]
    LengthMismatch { source_len: usize, target_len: usize },

    /// A symbol mapping has no glyph for a letter that appears in the pairs.
    #[error("mapping '{mapping}' has no glyph for letter '{letter}'")]
    GlyphLookup { letter: String, mapping: String },

    /// Every value on one axis is identical, so the slope or rank
    /// correlation is undefined.
    #[error("all {axis} positions are identical")]
    ConstantInput { axis: Axis },

    #[error("alphabet '{name}' has no letters")]
    EmptyAlphabet { name: String },

    #[error("no alphabet table named '{0}'")]
    UnknownTable(String),

    #[error("no symbol mapping named '{0}'")]
    UnknownMapping(String),

    #[error("malformed alphabet catalog: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("render failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AlphabetError>;
