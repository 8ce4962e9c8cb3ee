//! Token-level diff engine for aligned paragraph pairs.
//!
//! Given one original paragraph and its rewritten counterpart, this crate
//! computes a minimal edit script over whitespace-preserving tokens and folds
//! it into coalesced spans ready for rendering:
//!
//! - **Tokenization** comes from `rvd_text`: maximal alternating runs of
//!   whitespace and non-whitespace characters, compared as atomic units by
//!   exact string equality.
//! - **Edit script**: a longest-common-subsequence dynamic program over the
//!   two token sequences. When multiple minimal paths exist, the backtrack
//!   emits delete runs before insert runs at the same edit-graph position, so
//!   substitutions always render as old-then-new.
//! - **Coalescing**: adjacent same-kind operations are merged into one
//!   [`DiffSpan`] as a fold over the edit script, never as a post-pass.
//!
//! The spans reconstruct both inputs exactly: concatenating Equal + Delete
//! text yields the original paragraph, Equal + Insert yields the rewritten
//! one, and no span is ever empty. Identical inputs collapse to a single
//! Equal span; fully disjoint inputs produce one Delete span followed by one
//! Insert span.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rvd_text::{tokenize, Token};

/// Configuration for the token diff engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffConfig {
    /// Semantic version of the diff configuration.
    pub version: u32,
    /// Per-side token ceiling; the LCS table is O(n·m), so paragraph pairs
    /// beyond this size fail fast instead of degrading.
    pub max_tokens: Option<usize>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            version: 1,
            max_tokens: Some(5_000),
        }
    }
}

impl DiffConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), DiffError> {
        if self.version == 0 {
            return Err(DiffError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if self.max_tokens == Some(0) {
            return Err(DiffError::InvalidConfig(
                "max_tokens must be >= 1 when set".into(),
            ));
        }
        Ok(())
    }
}

/// Kind of a coalesced diff span.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Equal,
    Insert,
    Delete,
}

/// A coalesced run of same-kind token operations. `text` is never empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffSpan {
    pub kind: SpanKind,
    pub text: String,
}

impl DiffSpan {
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Errors produced by the diff layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiffError {
    #[error("invalid diff config: {0}")]
    InvalidConfig(String),

    #[error("token count {count} exceeds configured limit {limit}")]
    TooManyTokens { count: usize, limit: usize },
}

/// Compute the coalesced diff spans between two paragraph strings.
pub fn diff(
    original: &str,
    rewritten: &str,
    cfg: &DiffConfig,
) -> Result<Vec<DiffSpan>, DiffError> {
    cfg.validate()?;

    let original_tokens = tokenize(original);
    let rewritten_tokens = tokenize(rewritten);

    if let Some(limit) = cfg.max_tokens {
        let count = original_tokens.len().max(rewritten_tokens.len());
        if count > limit {
            return Err(DiffError::TooManyTokens { count, limit });
        }
    }

    Ok(coalesce(edit_script(&original_tokens, &rewritten_tokens)))
}

/// Per-token edit script over two token sequences.
///
/// Classic LCS table walk, O(n·m) time and space in token counts. The
/// backward walk prefers the insert arm on ties so that, after reversal,
/// delete runs precede insert runs at each divergence point.
fn edit_script<'a>(original: &'a [Token], rewritten: &'a [Token]) -> Vec<(SpanKind, &'a str)> {
    let n = original.len();
    let m = rewritten.len();

    if n == 0 {
        return rewritten
            .iter()
            .map(|t| (SpanKind::Insert, t.text.as_str()))
            .collect();
    }
    if m == 0 {
        return original
            .iter()
            .map(|t| (SpanKind::Delete, t.text.as_str()))
            .collect();
    }

    let width = m + 1;
    let mut lcs = vec![0u32; (n + 1) * width];
    for i in 1..=n {
        for j in 1..=m {
            lcs[i * width + j] = if original[i - 1].text == rewritten[j - 1].text {
                lcs[(i - 1) * width + (j - 1)] + 1
            } else {
                lcs[(i - 1) * width + j].max(lcs[i * width + (j - 1)])
            };
        }
    }

    let mut ops = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && original[i - 1].text == rewritten[j - 1].text {
            ops.push((SpanKind::Equal, original[i - 1].text.as_str()));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || lcs[i * width + (j - 1)] >= lcs[(i - 1) * width + j]) {
            ops.push((SpanKind::Insert, rewritten[j - 1].text.as_str()));
            j -= 1;
        } else {
            ops.push((SpanKind::Delete, original[i - 1].text.as_str()));
            i -= 1;
        }
    }
    ops.reverse();
    ops
}

/// Fold adjacent same-kind operations into coalesced spans.
fn coalesce(ops: Vec<(SpanKind, &str)>) -> Vec<DiffSpan> {
    let mut spans: Vec<DiffSpan> = Vec::new();
    for (kind, text) in ops {
        if text.is_empty() {
            continue;
        }
        match spans.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(text),
            _ => spans.push(DiffSpan::new(kind, text)),
        }
    }
    spans
}

/// Reassemble one side of a paragraph from its spans.
///
/// `Equal` + `Delete` spans rebuild the original text; `Equal` + `Insert`
/// spans rebuild the rewritten text. Exposed for callers and property tests.
pub fn reconstruct(spans: &[DiffSpan], side: SpanKind) -> String {
    debug_assert!(side != SpanKind::Equal, "side must be Insert or Delete");
    spans
        .iter()
        .filter(|span| span.kind == SpanKind::Equal || span.kind == side)
        .map(|span| span.text.as_str())
        .collect()
}

// -----------------------------
// Unit tests
// -----------------------------
