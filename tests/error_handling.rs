use rvdc::{
    align, compare, compare_bytes, diff, AlignConfig, AlignError, CompareConfig, ComparisonError,
    DiffConfig, DiffError,
};

#[test]
fn invalid_utf8_original_is_rejected() {
    let result = compare_bytes(&[0xf0, 0x28, 0x8c, 0x28], b"fine text", &CompareConfig::default());
    assert!(matches!(
        result,
        Err(ComparisonError::InvalidUtf8(detail)) if detail.contains("original")
    ));
}

#[test]
fn invalid_utf8_rewritten_is_rejected() {
    let result = compare_bytes(b"fine text", &[0xff], &CompareConfig::default());
    assert!(matches!(
        result,
        Err(ComparisonError::InvalidUtf8(detail)) if detail.contains("rewritten")
    ));
}

#[test]
fn valid_utf8_bytes_pass_through() {
    let report = compare_bytes(
        "caf\u{e9} original".as_bytes(),
        "caf\u{e9} rewritten".as_bytes(),
        &CompareConfig::default(),
    )
    .expect("compare succeeds");
    assert_eq!(report.pairs.len(), 1);
}

#[test]
fn oversized_document_is_rejected_before_splitting() {
    let cfg = CompareConfig {
        max_document_bytes: Some(64),
        ..CompareConfig::default()
    };
    let big = "word ".repeat(100);

    let result = compare(&big, "small", &cfg);
    assert!(matches!(
        result,
        Err(ComparisonError::DocumentTooLarge { len: 500, limit: 64 })
    ));
}

#[test]
fn paragraph_ceiling_bubbles_up_through_compare() {
    let cfg = CompareConfig {
        align: AlignConfig {
            max_paragraphs: Some(1),
            ..AlignConfig::default()
        },
        ..CompareConfig::default()
    };

    let result = compare("one\n\ntwo", "one", &cfg);
    assert!(matches!(
        result,
        Err(ComparisonError::Align(AlignError::TooManyParagraphs {
            count: 2,
            limit: 1
        }))
    ));
}

#[test]
fn token_ceiling_bubbles_up_through_compare() {
    let cfg = CompareConfig {
        diff: DiffConfig {
            max_tokens: Some(2),
            ..DiffConfig::default()
        },
        ..CompareConfig::default()
    };

    // Both sides match as paragraphs, then the pair exceeds the token limit.
    let result = compare("three word sentence", "three word sentences", &cfg);
    assert!(matches!(
        result,
        Err(ComparisonError::Diff(DiffError::TooManyTokens { count: 5, limit: 2 }))
    ));
}

#[test]
fn zero_config_versions_are_rejected() {
    let align_cfg = AlignConfig {
        version: 0,
        ..AlignConfig::default()
    };
    assert!(matches!(
        align("a", "b", &align_cfg),
        Err(AlignError::InvalidConfig(_))
    ));

    let diff_cfg = DiffConfig {
        version: 0,
        ..DiffConfig::default()
    };
    assert!(matches!(
        diff("a", "b", &diff_cfg),
        Err(DiffError::InvalidConfig(_))
    ));

    let compare_cfg = CompareConfig {
        version: 0,
        ..CompareConfig::default()
    };
    assert!(matches!(
        compare("a", "b", &compare_cfg),
        Err(ComparisonError::InvalidConfig(_))
    ));
}

#[test]
fn well_formed_inputs_never_fail() {
    // Total-function guarantee: any valid UTF-8, including empties and
    // whitespace soup, compares without error under default limits.
    let cases = [
        ("", ""),
        ("", "content"),
        ("content", ""),
        ("   \n\t\n  ", "   "),
        ("a\n\n\n\nb", "a\n\nb"),
        ("\u{1f600}\n\n\u{4e16}\u{754c}", "\u{4e16}\u{754c}"),
    ];
    for (original, rewritten) in cases {
        compare(original, rewritten, &CompareConfig::default())
            .unwrap_or_else(|err| panic!("compare({original:?}, {rewritten:?}) failed: {err}"));
    }
}
