// File: src/comparison.rs
use crate::catalog::{
    self, ARCHAIC_GREEK, FUTHARK, FUTHARK_MAP, GREEK_MAP, MODERN, MODERN_LATIN,
    MODERN_LATIN_SHUFFLED, PROTO_FUTHARK,
};
use crate::core::aligner::{align_checked, unmatched};
use crate::core::error::Result;
use crate::core::stats::fit;
use crate::core::types::{AlphabetTable, CorrelationResult, PositionPair, RegressionResult, SymbolMapping};
use crate::render::{RenderOutput, RenderTarget, Renderer};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// One source/target pairing, plus how its glyphs are drawn and where the
/// figure goes.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub source: AlphabetTable,
    pub target: AlphabetTable,
    pub mapping: Option<SymbolMapping>,
    pub output: RenderTarget,
}

/// The numbers derived for one comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub source: String,
    pub target: String,
    pub pairs: Vec<PositionPair>,
    /// Source letters with no counterpart in the target.
    pub unmatched: Vec<String>,
    pub regression: RegressionResult,
    pub correlation: CorrelationResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub summary: ComparisonSummary,
    pub output: RenderOutput,
}

impl Comparison {
    pub fn new(
        source: AlphabetTable,
        target: AlphabetTable,
        mapping: Option<SymbolMapping>,
        output: RenderTarget,
    ) -> Self {
        Self { source, target, mapping, output }
    }

    /// Builds a comparison from built-in catalog keys.
    pub fn from_catalog(
        source: &str,
        target: &str,
        mapping: Option<&str>,
        output: RenderTarget,
    ) -> Result<Self> {
        let mapping = mapping.map(catalog::mapping).transpose()?.cloned();
        Ok(Self::new(
            catalog::table(source)?.clone(),
            catalog::table(target)?.clone(),
            mapping,
            output,
        ))
    }

    /// Aligns and fits without drawing anything.
    pub fn analyze(&self) -> Result<ComparisonSummary> {
        let pairs = align_checked(&self.source, &self.target)?;
        let (regression, correlation) = fit(&pairs)?;
        let unmatched = unmatched(self.source.order(), self.target.order())
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        if !unmatched.is_empty() {
            debug!(source = %self.source.name, target = %self.target.name, ?unmatched, "Dropped letters missing from target");
        }
        Ok(ComparisonSummary {
            source: self.source.name.clone(),
            target: self.target.name.clone(),
            pairs,
            unmatched,
            regression,
            correlation,
        })
    }

    /// Aligns, fits, and renders the comparison.
    pub fn run(&self, renderer: &Renderer) -> Result<ComparisonReport> {
        let summary = self.analyze()?;
        info!(
            source = %summary.source,
            target = %summary.target,
            pairs = summary.pairs.len(),
            rho = summary.correlation.statistic,
            p = summary.correlation.p_value,
            "Fitted comparison"
        );
        let output = renderer.render(
            &self.source,
            &self.target,
            &summary.pairs,
            &summary.regression,
            &summary.correlation,
            self.mapping.as_ref(),
            &self.output,
        )?;
        Ok(ComparisonReport { summary, output })
    }
}

/// The three comparisons the binary draws, writing into `out_dir`.
pub fn builtin_comparisons(out_dir: impl Into<PathBuf>) -> Result<Vec<Comparison>> {
    let out_dir = out_dir.into();
    let png = |name: &str| RenderTarget::Png(out_dir.join(name));
    Ok(vec![
        Comparison::from_catalog(MODERN_LATIN, MODERN_LATIN_SHUFFLED, None, png("modern_v_modern_shuffled.png"))?,
        Comparison::from_catalog(FUTHARK, PROTO_FUTHARK, Some(FUTHARK_MAP), png("futhark_v_proto_futhark.png"))?,
        Comparison::from_catalog(MODERN, ARCHAIC_GREEK, Some(GREEK_MAP), png("modern_v_archaic_greek.png"))?,
    ])
}
