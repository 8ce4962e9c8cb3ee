use rvdc::{
    compare, AlignedPair, CompareConfig, ComparisonError, DiffSpan, SpanKind,
};

#[test]
fn full_pipeline_executes_with_defaults() -> Result<(), ComparisonError> {
    let original = "The quick brown fox jumps over the lazy dog.\n\nA second paragraph sits here.";
    let rewritten =
        "The quick brown fox leaps over the lazy dog.\n\nA second paragraph still sits here.";

    let report = compare(original, rewritten, &CompareConfig::default())?;

    assert_eq!(report.pairs.len(), 2);
    assert_eq!(report.stats.matched_pairs, 2);
    assert_eq!(report.stats.paragraphs_original, 2);
    assert_eq!(report.stats.paragraphs_rewritten, 2);
    assert!(!report.original_sha256.is_empty());
    assert_ne!(report.original_sha256, report.rewritten_sha256);

    Ok(())
}

#[test]
fn reworded_sentence_produces_exact_spans() {
    // A one-word insertion splits into three spans with the trailing space
    // attached to the inserted word.
    let original = "The cat sat.\n\nIt was happy.";
    let rewritten = "The cat sat.\n\nIt was very happy.";

    let report = compare(original, rewritten, &CompareConfig::default()).expect("compare succeeds");

    assert_eq!(report.pairs.len(), 2);
    assert_eq!(
        report.pairs[0].spans,
        vec![DiffSpan::new(SpanKind::Equal, "The cat sat.")]
    );
    assert_eq!(
        report.pairs[1].spans,
        vec![
            DiffSpan::new(SpanKind::Equal, "It was "),
            DiffSpan::new(SpanKind::Insert, "very "),
            DiffSpan::new(SpanKind::Equal, "happy."),
        ]
    );
}

#[test]
fn reordered_paragraphs_keep_totality() {
    let original = "Para A.\n\nPara B.";
    let rewritten = "Para B.\n\nPara A.";

    let report = compare(original, rewritten, &CompareConfig::default()).expect("compare succeeds");

    // Every paragraph of both documents appears exactly once, in source
    // order per side; the aligner never produces a crossing match.
    let consumed_original: Vec<&str> = report
        .pairs
        .iter()
        .filter_map(|p| p.pair.original())
        .collect();
    let consumed_rewritten: Vec<&str> = report
        .pairs
        .iter()
        .filter_map(|p| p.pair.rewritten())
        .collect();
    assert_eq!(consumed_original, vec!["Para A.", "Para B."]);
    assert_eq!(consumed_rewritten, vec!["Para B.", "Para A."]);
}

#[test]
fn empty_original_yields_pure_insertion() {
    let report = compare("", "New content.", &CompareConfig::default()).expect("compare succeeds");

    assert_eq!(report.pairs.len(), 1);
    assert!(matches!(
        &report.pairs[0].pair,
        AlignedPair::AddedRewritten { rewritten } if rewritten == "New content."
    ));
    assert_eq!(
        report.pairs[0].spans,
        vec![DiffSpan::new(SpanKind::Insert, "New content.")]
    );
    assert_eq!(report.stats.added_paragraphs, 1);
    assert_eq!(report.stats.paragraphs_original, 0);
}

#[test]
fn both_documents_empty_yield_empty_report() {
    let report = compare("", "", &CompareConfig::default()).expect("compare succeeds");
    assert!(report.pairs.is_empty());
    assert_eq!(report.stats, Default::default());
}

#[test]
fn inserted_and_removed_paragraphs_are_counted() {
    let original = "Shared intro paragraph.\n\nDoomed unrelated filler text.";
    let rewritten = "Shared intro paragraph.\n\nCompletely different new material.";

    let report = compare(original, rewritten, &CompareConfig::default()).expect("compare succeeds");

    assert_eq!(report.stats.matched_pairs, 1);
    assert_eq!(report.stats.removed_paragraphs, 1);
    assert_eq!(report.stats.added_paragraphs, 1);
    assert_eq!(report.pairs.len(), 3);
}

#[test]
fn parallel_pipeline_matches_sequential() {
    let original =
        "Alpha paragraph with words.\n\nBeta paragraph follows.\n\nGamma closes the document.";
    let rewritten =
        "Alpha paragraph with extra words.\n\nBeta paragraph still follows.\n\nDelta closes the document now.";

    let sequential =
        compare(original, rewritten, &CompareConfig::default()).expect("sequential compare");
    let parallel = compare(
        original,
        rewritten,
        &CompareConfig {
            use_parallel: true,
            ..CompareConfig::default()
        },
    )
    .expect("parallel compare");

    assert_eq!(sequential, parallel);
}
