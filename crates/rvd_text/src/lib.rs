//! Shared text utilities for the revision diff pipeline.
//!
//! Two consumers sit on top of this crate: the paragraph aligner, which needs
//! documents cut into ordered paragraphs, and the token diff engine, which
//! needs a paragraph cut into tokens it can reconstruct exactly.
//!
//! - **Paragraph segmentation**: a document is split on runs of blank
//!   (whitespace-only) lines; each segment is trimmed and empty segments are
//!   dropped. Byte offsets of the trimmed text in the source document are
//!   preserved so callers can map paragraphs back to their origin.
//! - **Tokenization**: a paragraph is split into maximal alternating runs of
//!   whitespace and non-whitespace characters. Whitespace runs are
//!   first-class tokens, never collapsed or dropped, so concatenating all
//!   token texts in order reproduces the input byte-for-byte. This is what
//!   the diff engine's reconstruction invariant rests on.
//!
//! Both operations are total functions over `&str`: no configuration, no
//! error path, no state.

use serde::{Deserialize, Serialize};

/// A trimmed, non-empty paragraph with its byte offsets in the source text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub start: usize, // byte offset (inclusive) of the trimmed text
    pub end: usize,   // byte offset (exclusive)
}

impl AsRef<str> for Paragraph {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Token classification: a run of non-whitespace or a run of whitespace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Word,
    Whitespace,
}

/// A token with its UTF-8 byte offsets in the paragraph text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub start: usize, // byte offset (inclusive)
    pub end: usize,   // byte offset (exclusive)
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Split a document into ordered paragraphs.
///
/// Boundaries are runs of one or more blank lines. Each segment is trimmed of
/// leading and trailing whitespace; segments that are empty after trimming are
/// dropped. Paragraph order is the order of first appearance in the source.
pub fn split_paragraphs(text: &str) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    // Current segment as [start, end) byte offsets over non-blank lines.
    let mut segment: Option<(usize, usize)> = None;
    let mut offset = 0usize;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        if line.trim().is_empty() {
            flush_segment(&mut paragraphs, text, segment.take());
        } else {
            let line_end = line_start + line.len();
            segment = match segment {
                Some((start, _)) => Some((start, line_end)),
                None => Some((line_start, line_end)),
            };
        }
    }
    flush_segment(&mut paragraphs, text, segment);

    paragraphs
}

fn flush_segment(paragraphs: &mut Vec<Paragraph>, text: &str, segment: Option<(usize, usize)>) {
    let Some((seg_start, seg_end)) = segment else {
        return;
    };
    let slice = &text[seg_start..seg_end];
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return;
    }
    let start = seg_start + (slice.len() - slice.trim_start().len());
    let end = start + trimmed.len();
    paragraphs.push(Paragraph {
        text: trimmed.to_string(),
        start,
        end,
    });
}

/// Tokenize text into maximal alternating Word / Whitespace runs.
///
/// Concatenating the `text` of all tokens in order reproduces the input
/// exactly; no character is normalized, substituted, or dropped.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut run_start = 0usize;
    let mut run_kind: Option<TokenKind> = None;

    for (idx, ch) in text.char_indices() {
        let kind = kind_of(ch);
        match run_kind {
            Some(current) if current == kind => {}
            Some(current) => {
                tokens.push(Token {
                    text: text[run_start..idx].to_string(),
                    kind: current,
                    start: run_start,
                    end: idx,
                });
                run_start = idx;
                run_kind = Some(kind);
            }
            None => {
                run_start = idx;
                run_kind = Some(kind);
            }
        }
    }

    if let Some(kind) = run_kind {
        tokens.push(Token {
            text: text[run_start..].to_string(),
            kind,
            start: run_start,
            end: text.len(),
        });
    }

    tokens
}

fn kind_of(ch: char) -> TokenKind {
    if ch.is_whitespace() {
        TokenKind::Whitespace
    } else {
        TokenKind::Word
    }
}

/// Iterate the word tokens of a text without allocating.
///
/// Used by the aligner's similarity scorer, which only needs word content,
/// not offsets or whitespace runs.
pub fn word_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

// -----------------------------
// Unit tests
// -----------------------------
