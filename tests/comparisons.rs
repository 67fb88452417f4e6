use alphabet_corr::catalog::{self, ARCHAIC_GREEK, GREEK_MAP, ROMAN};
use alphabet_corr::core::aligner::align;
use alphabet_corr::core::stats::fit;
use alphabet_corr::core::types::{AlphabetTable, PositionPair, SymbolMapping};
use alphabet_corr::{AlphabetError, Comparison, RenderOutput, RenderTarget, Renderer};

fn table(name: &str, letters: &[&str]) -> AlphabetTable {
    AlphabetTable::from_letters(name, letters).unwrap()
}

#[test]
fn rotated_alphabet_end_to_end() {
    let source = table("Source", &["alpha", "beta", "gamma"]);
    let target = table("Target", &["gamma", "alpha", "beta"]);
    let pairs = align(source.order(), target.order());
    let xy: Vec<_> = pairs.iter().map(PositionPair::xy).collect();
    assert_eq!(xy, vec![(1, 2), (2, 3), (3, 1)]);

    let (_, rho) = fit(&pairs).unwrap();
    assert!((rho.statistic + 0.5).abs() < 1e-12);
    assert!(rho.p_value > 0.0 && rho.p_value <= 1.0);
}

#[test]
fn missing_glyph_writes_no_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.png");
    let comparison = Comparison::new(
        table("Source", &["alpha", "beta", "gamma"]),
        table("Target", &["alpha", "beta", "gamma"]),
        Some(SymbolMapping::from_pairs("greek", &[("alpha", "Α")])),
        RenderTarget::Png(path.clone()),
    );

    let err = comparison.run(&Renderer::default()).unwrap_err();
    assert!(matches!(err, AlphabetError::GlyphLookup { ref letter, .. } if letter == "beta"));
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn disjoint_alphabets_write_no_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.png");
    let comparison = Comparison::new(
        table("Latin", &["A", "B", "C"]),
        catalog::table(ARCHAIC_GREEK).unwrap().clone(),
        None,
        RenderTarget::Png(path.clone()),
    );

    let err = comparison.run(&Renderer::default()).unwrap_err();
    assert!(matches!(err, AlphabetError::EmptyAlignment { .. }));
    assert!(err.to_string().contains("Latin"));
    assert!(!path.exists());
}

#[test]
fn roman_mediation_against_archaic_greek() {
    let comparison = Comparison::from_catalog(ROMAN, ARCHAIC_GREEK, Some(GREEK_MAP), RenderTarget::Svg).unwrap();
    let summary = comparison.analyze().unwrap();
    // Roman order keeps the Greek sequence, minus the letters it dropped.
    assert!(summary.pairs.windows(2).all(|w| w[0].target < w[1].target));
    assert_eq!(summary.correlation.statistic, 1.0);
    assert_eq!(summary.correlation.p_value, 0.0);
    assert!(summary.unmatched.is_empty());
}

#[test]
fn summary_serializes_to_json() {
    let comparison = Comparison::new(
        table("Left", &["a", "b", "c"]),
        table("Right", &["c", "b", "a"]),
        None,
        RenderTarget::Svg,
    );
    let summary = comparison.analyze().unwrap();
    let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["source"], "Left");
    assert_eq!(json["pairs"].as_array().unwrap().len(), 3);
    assert_eq!(json["correlation"]["statistic"], -1.0);
}

fn rotated_comparison(output: RenderTarget) -> Comparison {
    Comparison::new(
        table("Source", &["alpha", "beta", "gamma"]),
        table("Target", &["gamma", "alpha", "beta"]),
        Some(SymbolMapping::from_pairs(
            "greek",
            &[("alpha", "Α"), ("beta", "Β"), ("gamma", "Γ")],
        )),
        output,
    )
}

#[test]
fn png_render_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rotated.png");
    std::fs::write(&path, b"stale").unwrap();

    let report = rotated_comparison(RenderTarget::Png(path.clone()))
        .run(&Renderer::default())
        .unwrap();
    assert_eq!(report.output, RenderOutput::File(path.clone()));

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.len() > 8);
    assert_eq!(&bytes[..4], b"\x89PNG");
    // The temporary file was moved into place, not left beside it.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn svg_render_returns_document_with_legend() {
    let report = rotated_comparison(RenderTarget::Svg)
        .run(&Renderer::default())
        .unwrap();
    match report.output {
        RenderOutput::Svg(document) => {
            assert!(document.contains("<svg"));
            assert!(document.contains("ρ=-0.5,p=0.67"));
        }
        other => panic!("expected an SVG document, got {other:?}"),
    }
}
