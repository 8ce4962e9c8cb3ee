//! Workspace umbrella crate for Revision Diff Core (RVDC).
//!
//! This crate stitches together paragraph alignment and token-level diffing
//! so callers can compare an original document against its rewritten form
//! with a single API entry point. [`compare`] splits both documents into
//! paragraphs, aligns them, and computes coalesced diff spans for every
//! aligned pair; the resulting [`ComparisonReport`] is render-ready for a web
//! caller and serde-serializable end to end.

pub use rvd_align::{
    align, align_paragraphs, similarity, AlignConfig, AlignError, AlignedPair,
};
pub use rvd_diff::{diff, reconstruct, DiffConfig, DiffError, DiffSpan, SpanKind};
pub use rvd_text::{split_paragraphs, tokenize, word_tokens, Paragraph, Token, TokenKind};

pub mod config;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};
use tracing::{info, warn, Level};

/// Errors that can occur while running a comparison through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonError {
    Align(AlignError),
    Diff(DiffError),
    InvalidUtf8(String),
    DocumentTooLarge { len: usize, limit: usize },
    InvalidConfig(String),
}

impl fmt::Display for ComparisonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonError::Align(err) => write!(f, "alignment failure: {err}"),
            ComparisonError::Diff(err) => write!(f, "diff failure: {err}"),
            ComparisonError::InvalidUtf8(detail) => {
                write!(f, "document is not valid utf-8: {detail}")
            }
            ComparisonError::DocumentTooLarge { len, limit } => {
                write!(f, "document of {len} bytes exceeds configured limit {limit}")
            }
            ComparisonError::InvalidConfig(detail) => {
                write!(f, "invalid compare config: {detail}")
            }
        }
    }
}

impl Error for ComparisonError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ComparisonError::Align(err) => Some(err),
            ComparisonError::Diff(err) => Some(err),
            ComparisonError::InvalidUtf8(_)
            | ComparisonError::DocumentTooLarge { .. }
            | ComparisonError::InvalidConfig(_) => None,
        }
    }
}

impl From<AlignError> for ComparisonError {
    fn from(value: AlignError) -> Self {
        ComparisonError::Align(value)
    }
}

impl From<DiffError> for ComparisonError {
    fn from(value: DiffError) -> Self {
        ComparisonError::Diff(value)
    }
}

/// Metrics observer for comparison stages.
pub trait ComparisonMetrics: Send + Sync {
    fn record_align(&self, latency: Duration, result: Result<(), AlignError>);
    fn record_diff(&self, latency: Duration, result: Result<(), DiffError>);
}

/// Install or clear the global comparison metrics recorder.
pub fn set_comparison_metrics(recorder: Option<Arc<dyn ComparisonMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock.write().expect("comparison metrics lock poisoned");
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn ComparisonMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn ComparisonMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn ComparisonMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn ComparisonMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_align(self, result: Result<(), AlignError>) {
        self.recorder.record_align(self.start.elapsed(), result);
    }

    fn record_diff(self, result: Result<(), DiffError>) {
        self.recorder.record_diff(self.start.elapsed(), result);
    }
}

/// Configuration for a full document comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompareConfig {
    /// Semantic version of the compare configuration.
    pub version: u32,
    /// Alignment stage configuration.
    pub align: AlignConfig,
    /// Diff stage configuration.
    pub diff: DiffConfig,
    /// Per-document byte ceiling applied before any splitting.
    pub max_document_bytes: Option<usize>,
    /// Fan per-pair token diffs across rayon workers. Output is identical to
    /// the sequential path; only wall-clock changes.
    pub use_parallel: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            version: 1,
            align: AlignConfig::default(),
            diff: DiffConfig::default(),
            max_document_bytes: Some(10 * 1024 * 1024), // 10MB
            use_parallel: false,
        }
    }
}

impl CompareConfig {
    /// Validate the configuration, including both stage configs.
    pub fn validate(&self) -> Result<(), ComparisonError> {
        if self.version == 0 {
            return Err(ComparisonError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if self.max_document_bytes == Some(0) {
            return Err(ComparisonError::InvalidConfig(
                "max_document_bytes must be >= 1 when set".into(),
            ));
        }
        self.align.validate()?;
        self.diff.validate()?;
        Ok(())
    }
}

/// One aligned paragraph pair with its rendered diff spans.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParagraphDiff {
    pub pair: AlignedPair,
    pub spans: Vec<DiffSpan>,
}

/// Summary counts over a comparison.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComparisonStats {
    pub paragraphs_original: usize,
    pub paragraphs_rewritten: usize,
    pub matched_pairs: usize,
    pub removed_paragraphs: usize,
    pub added_paragraphs: usize,
}

impl ComparisonStats {
    fn from_pairs(pairs: &[ParagraphDiff]) -> Self {
        let mut stats = Self::default();
        for diff in pairs {
            match &diff.pair {
                AlignedPair::Matched { .. } => {
                    stats.matched_pairs += 1;
                    stats.paragraphs_original += 1;
                    stats.paragraphs_rewritten += 1;
                }
                AlignedPair::RemovedOriginal { .. } => {
                    stats.removed_paragraphs += 1;
                    stats.paragraphs_original += 1;
                }
                AlignedPair::AddedRewritten { .. } => {
                    stats.added_paragraphs += 1;
                    stats.paragraphs_rewritten += 1;
                }
            }
        }
        stats
    }
}

/// Complete output of one comparison call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonReport {
    /// Aligned pairs with per-pair diff spans, in document order.
    pub pairs: Vec<ParagraphDiff>,
    /// SHA-256 of the original document, hex-encoded.
    pub original_sha256: String,
    /// SHA-256 of the rewritten document, hex-encoded.
    pub rewritten_sha256: String,
    /// Summary counts.
    pub stats: ComparisonStats,
}

/// Hashes a document with SHA-256 and returns the hex digest.
pub fn hash_document(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare two documents end-to-end: split, align, and diff every matched
/// pair. One-sided pairs become a single whole-paragraph Insert or Delete
/// span without invoking the diff engine.
pub fn compare(
    original: &str,
    rewritten: &str,
    cfg: &CompareConfig,
) -> Result<ComparisonReport, ComparisonError> {
    let start = Instant::now();
    cfg.validate()?;

    if let Some(limit) = cfg.max_document_bytes {
        let len = original.len().max(rewritten.len());
        if len > limit {
            return Err(ComparisonError::DocumentTooLarge { len, limit });
        }
    }

    let span = tracing::span!(
        Level::INFO,
        "rvdc.compare",
        original_bytes = original.len(),
        rewritten_bytes = rewritten.len()
    );
    let _guard = span.enter();

    let mut align_metrics = MetricsSpan::start();
    let aligned = match rvd_align::align(original, rewritten, &cfg.align) {
        Ok(pairs) => {
            if let Some(span) = align_metrics.take() {
                span.record_align(Ok(()));
            }
            pairs
        }
        Err(err) => {
            if let Some(span) = align_metrics.take() {
                span.record_align(Err(err.clone()));
            }
            warn!(error = %err, "compare_failure");
            return Err(ComparisonError::Align(err));
        }
    };

    let mut diff_metrics = MetricsSpan::start();
    let diffed: Result<Vec<ParagraphDiff>, DiffError> = if cfg.use_parallel {
        aligned
            .into_par_iter()
            .map(|pair| diff_pair(pair, &cfg.diff))
            .collect()
    } else {
        aligned
            .into_iter()
            .map(|pair| diff_pair(pair, &cfg.diff))
            .collect()
    };
    let pairs = match diffed {
        Ok(pairs) => {
            if let Some(span) = diff_metrics.take() {
                span.record_diff(Ok(()));
            }
            pairs
        }
        Err(err) => {
            if let Some(span) = diff_metrics.take() {
                span.record_diff(Err(err.clone()));
            }
            warn!(error = %err, "compare_failure");
            return Err(ComparisonError::Diff(err));
        }
    };

    let stats = ComparisonStats::from_pairs(&pairs);
    let report = ComparisonReport {
        pairs,
        original_sha256: hash_document(original),
        rewritten_sha256: hash_document(rewritten),
        stats,
    };
    info!(
        pairs = report.pairs.len(),
        matched = report.stats.matched_pairs,
        removed = report.stats.removed_paragraphs,
        added = report.stats.added_paragraphs,
        elapsed_micros = start.elapsed().as_micros() as u64,
        "compare_success"
    );
    Ok(report)
}

/// Byte-level entry point for callers holding undecoded payloads.
///
/// Invalid UTF-8 fails fast with [`ComparisonError::InvalidUtf8`]; the engine
/// never substitutes or drops characters, since lossy decoding would break
/// the reconstruction invariants downstream.
pub fn compare_bytes(
    original: &[u8],
    rewritten: &[u8],
    cfg: &CompareConfig,
) -> Result<ComparisonReport, ComparisonError> {
    let original = std::str::from_utf8(original)
        .map_err(|err| ComparisonError::InvalidUtf8(format!("original document: {err}")))?;
    let rewritten = std::str::from_utf8(rewritten)
        .map_err(|err| ComparisonError::InvalidUtf8(format!("rewritten document: {err}")))?;
    compare(original, rewritten, cfg)
}

fn diff_pair(pair: AlignedPair, cfg: &DiffConfig) -> Result<ParagraphDiff, DiffError> {
    let spans = match &pair {
        AlignedPair::Matched {
            original,
            rewritten,
            ..
        } => rvd_diff::diff(original, rewritten, cfg)?,
        AlignedPair::RemovedOriginal { original } => {
            vec![DiffSpan::new(SpanKind::Delete, original.clone())]
        }
        AlignedPair::AddedRewritten { rewritten } => {
            vec![DiffSpan::new(SpanKind::Insert, rewritten.clone())]
        }
    };
    Ok(ParagraphDiff { pair, spans })
}
