//! Paragraph alignment for revision comparison.
//!
//! Rewriting changes wording but usually preserves paragraph granularity and
//! rough order, so strict equality is useless for pairing paragraphs between
//! an original document and its rewritten form. This crate scores paragraph
//! pairs with a cheap lexical-overlap metric and runs an order-preserving
//! sequence alignment (Needleman–Wunsch style) over the two paragraph lists:
//!
//! - **Similarity**: token-set Jaccard over case-folded word tokens, hashed
//!   with seeded xxh3. Deterministic, symmetric in formula, and much cheaper
//!   than a token-level diff.
//! - **Alignment**: a dynamic program with three transitions per cell:
//!   match, skip-original, skip-rewritten. A match is only admissible when
//!   the pair's similarity clears `min_match_similarity`; below that, the gap
//!   penalty makes skipping win and unrelated paragraphs degrade to
//!   independent removed/added pairs. Ties break toward match, then toward
//!   skip-original.
//!
//! The output is an ordered list of [`AlignedPair`] values. Every paragraph
//! of both documents appears in exactly one pair, the aligner never reorders
//! paragraphs to improve the score, and identical inputs always produce
//! identical output.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64_with_seed;

use rvd_text::{split_paragraphs, word_tokens, Paragraph};

/// Configuration for paragraph alignment.
/// Everything is runtime-configurable (no feature flags).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlignConfig {
    /// Semantic version of the alignment configuration.
    pub version: u32,
    /// Score subtracted for leaving a paragraph unmatched on either side.
    pub gap_penalty: f64,
    /// Minimum Jaccard similarity for a match transition to be admissible.
    pub min_match_similarity: f64,
    /// Seed for deterministic token hashing.
    pub seed: u64,
    /// Per-document paragraph ceiling; alignment is O(n·m) in paragraph
    /// counts, so pathological inputs fail fast instead of degrading.
    pub max_paragraphs: Option<usize>,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gap_penalty: 0.4,
            min_match_similarity: 0.3,
            seed: 0xD1FF_5EED_D1FF_5EED,
            max_paragraphs: Some(2_000),
        }
    }
}

impl AlignConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), AlignError> {
        if self.version == 0 {
            return Err(AlignError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if !self.gap_penalty.is_finite() || self.gap_penalty < 0.0 {
            return Err(AlignError::InvalidConfig(
                "gap_penalty must be finite and >= 0.0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_match_similarity) {
            return Err(AlignError::InvalidConfig(
                "min_match_similarity must be between 0.0 and 1.0".into(),
            ));
        }
        if self.max_paragraphs == Some(0) {
            return Err(AlignError::InvalidConfig(
                "max_paragraphs must be >= 1 when set".into(),
            ));
        }
        Ok(())
    }
}

/// One unit of alignment output. A pair never has both sides absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlignedPair {
    /// Paragraphs paired by the DP; `similarity` is the Jaccard score that
    /// admitted the match.
    Matched {
        original: String,
        rewritten: String,
        similarity: f64,
    },
    /// Original paragraph with no counterpart (gap on the rewritten side).
    RemovedOriginal { original: String },
    /// Rewritten paragraph with no counterpart (gap on the original side).
    AddedRewritten { rewritten: String },
}

impl AlignedPair {
    /// Original-side text, if this pair consumes an original paragraph.
    pub fn original(&self) -> Option<&str> {
        match self {
            AlignedPair::Matched { original, .. }
            | AlignedPair::RemovedOriginal { original } => Some(original.as_str()),
            AlignedPair::AddedRewritten { .. } => None,
        }
    }

    /// Rewritten-side text, if this pair consumes a rewritten paragraph.
    pub fn rewritten(&self) -> Option<&str> {
        match self {
            AlignedPair::Matched { rewritten, .. }
            | AlignedPair::AddedRewritten { rewritten } => Some(rewritten.as_str()),
            AlignedPair::RemovedOriginal { .. } => None,
        }
    }
}

/// Errors produced by the alignment layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlignError {
    #[error("invalid align config: {0}")]
    InvalidConfig(String),

    #[error("paragraph count {count} exceeds configured limit {limit}")]
    TooManyParagraphs { count: usize, limit: usize },
}

/// Split both documents into paragraphs and align them.
///
/// Empty inputs are fine: two empty documents yield an empty list; one empty
/// side yields a pure run of removed or added pairs.
pub fn align(
    original: &str,
    rewritten: &str,
    cfg: &AlignConfig,
) -> Result<Vec<AlignedPair>, AlignError> {
    cfg.validate()?;

    let original_paragraphs = split_paragraphs(original);
    let rewritten_paragraphs = split_paragraphs(rewritten);

    if let Some(limit) = cfg.max_paragraphs {
        let count = original_paragraphs.len().max(rewritten_paragraphs.len());
        if count > limit {
            return Err(AlignError::TooManyParagraphs { count, limit });
        }
    }

    Ok(align_paragraphs(
        &original_paragraphs,
        &rewritten_paragraphs,
        cfg,
    ))
}

/// Lexical-overlap similarity between two paragraphs, in [0.0, 1.0].
///
/// Token-set Jaccard over case-folded word tokens hashed with xxh3. Symmetric
/// in formula and deterministic for a fixed seed.
pub fn similarity(a: &str, b: &str, cfg: &AlignConfig) -> f64 {
    jaccard(&token_hash_set(a, cfg.seed), &token_hash_set(b, cfg.seed))
}

/// Hash the case-folded word tokens of `text` into a sorted, deduplicated set.
fn token_hash_set(text: &str, seed: u64) -> Vec<u64> {
    let mut hashes: Vec<u64> = word_tokens(text)
        .map(|word| xxh3_64_with_seed(word.to_lowercase().as_bytes(), seed))
        .collect();
    hashes.sort_unstable();
    hashes.dedup();
    hashes
}

/// Jaccard similarity of two sorted, deduplicated hash sets.
fn jaccard(a: &[u64], b: &[u64]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut intersection = 0usize;
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                intersection += 1;
                i += 1;
                j += 1;
            }
        }
    }

    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// DP transition recorded per cell for backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Match,
    SkipOriginal,
    SkipRewritten,
}

/// Align two pre-split paragraph sequences.
///
/// O(n·m) time and space in paragraph counts. Token hash sets are computed
/// once per paragraph, so each DP cell costs a linear merge over two sorted
/// sets rather than a re-tokenization.
pub fn align_paragraphs(
    original: &[Paragraph],
    rewritten: &[Paragraph],
    cfg: &AlignConfig,
) -> Vec<AlignedPair> {
    let n = original.len();
    let m = rewritten.len();
    if n == 0 && m == 0 {
        return Vec::new();
    }

    let original_sets: Vec<Vec<u64>> = original
        .iter()
        .map(|p| token_hash_set(&p.text, cfg.seed))
        .collect();
    let rewritten_sets: Vec<Vec<u64>> = rewritten
        .iter()
        .map(|p| token_hash_set(&p.text, cfg.seed))
        .collect();

    let width = m + 1;
    let mut score = vec![0.0f64; (n + 1) * width];
    let mut step = vec![Step::SkipOriginal; (n + 1) * width];

    for i in 1..=n {
        score[i * width] = -(i as f64) * cfg.gap_penalty;
        step[i * width] = Step::SkipOriginal;
    }
    for j in 1..=m {
        score[j] = -(j as f64) * cfg.gap_penalty;
        step[j] = Step::SkipRewritten;
    }

    for i in 1..=n {
        for j in 1..=m {
            let sim = jaccard(&original_sets[i - 1], &rewritten_sets[j - 1]);
            let match_score = if sim >= cfg.min_match_similarity {
                score[(i - 1) * width + (j - 1)] + sim
            } else {
                f64::NEG_INFINITY
            };
            let skip_original = score[(i - 1) * width + j] - cfg.gap_penalty;
            let skip_rewritten = score[i * width + (j - 1)] - cfg.gap_penalty;

            // Ties break toward match, then skip-original, for a stable path.
            let (best, chosen) = if match_score >= skip_original && match_score >= skip_rewritten {
                (match_score, Step::Match)
            } else if skip_original >= skip_rewritten {
                (skip_original, Step::SkipOriginal)
            } else {
                (skip_rewritten, Step::SkipRewritten)
            };
            score[i * width + j] = best;
            step[i * width + j] = chosen;
        }
    }

    let mut pairs = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        let chosen = if i == 0 {
            Step::SkipRewritten
        } else if j == 0 {
            Step::SkipOriginal
        } else {
            step[i * width + j]
        };
        match chosen {
            Step::Match => {
                pairs.push(AlignedPair::Matched {
                    original: original[i - 1].text.clone(),
                    rewritten: rewritten[j - 1].text.clone(),
                    similarity: jaccard(&original_sets[i - 1], &rewritten_sets[j - 1]),
                });
                i -= 1;
                j -= 1;
            }
            Step::SkipOriginal => {
                pairs.push(AlignedPair::RemovedOriginal {
                    original: original[i - 1].text.clone(),
                });
                i -= 1;
            }
            Step::SkipRewritten => {
                pairs.push(AlignedPair::AddedRewritten {
                    rewritten: rewritten[j - 1].text.clone(),
                });
                j -= 1;
            }
        }
    }
    pairs.reverse();
    pairs
}

// -----------------------------
// Unit tests
// -----------------------------
