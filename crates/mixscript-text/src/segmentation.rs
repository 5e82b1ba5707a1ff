//! Boundary segmentation with neutral inheritance.
//!
//! # Algorithm
//!
//! A single left-to-right scan. At each position the character's
//! [`CharCategory`] is computed (script tables in priority order, then
//! whitespace, then the catch-all) and the maximal run of that category is
//! consumed:
//!
//! - **Script runs** are tagged with their script and become the current
//!   context.
//! - **Neutral runs** (whitespace and everything else) take the current
//!   context. Adjacent whitespace and punctuation runs coalesce into one
//!   segment since they resolve to the same tag anyway.
//!
//! The context starts as [`ScriptTag::Neutral`] and there is no lookahead:
//! `"... text"` keeps its leading `"... "` tagged `Neutral`.
//!
//! Every byte of the input lands in exactly one segment, in order, so
//! concatenating the segment texts reproduces the input.
//!
//! # Example
//!
//! ```
//! use mixscript_text::{ScriptTag, segment};
//!
//! let segs = segment("Hello, សួស្តី!");
//! let pairs: Vec<(&str, ScriptTag)> = segs.iter().map(|s| (s.text, s.script)).collect();
//! assert_eq!(
//!     pairs,
//!     [
//!         ("Hello", ScriptTag::Latin),
//!         (", ", ScriptTag::Latin),
//!         ("សួស្តី", ScriptTag::Khmer),
//!         ("!", ScriptTag::Khmer),
//!     ]
//! );
//! ```

use std::iter::FusedIterator;
use std::ops::Range;

use crate::error::{Result, TextError};
use crate::script::{CharCategory, ScriptTag, char_category};

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// A maximal, non-empty slice of the input with one script tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment<'a> {
    /// The slice of the source text.
    pub text: &'a str,
    /// Start byte offset in the source text.
    pub start: usize,
    /// Script tag, inherited from context for neutral runs.
    pub script: ScriptTag,
}

impl Segment<'_> {
    /// End byte offset (exclusive) in the source text.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Byte range of this segment in the source text.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Byte length of the segment.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always `false` for segments produced by the segmenter.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Segments iterator
// ---------------------------------------------------------------------------

/// Lazy segmenter over a borrowed string.
///
/// Created by [`segments`]. Yields the same sequence [`segment`] collects.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    pos: usize,
    context: ScriptTag,
}

impl<'a> Segments<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            context: ScriptTag::Neutral,
        }
    }

    /// The script context a neutral run would inherit right now.
    pub fn context(&self) -> ScriptTag {
        self.context
    }
}

/// Byte length of the longest prefix of `s` whose characters satisfy `pred`.
fn run_len(s: &str, pred: impl Fn(CharCategory) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, c)| !pred(char_category(c)))
        .map_or(s.len(), |(i, _)| i)
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let rest = &self.text[self.pos..];
        let first = rest.chars().next()?;

        let (len, script) = match char_category(first) {
            CharCategory::Script(tag) => {
                self.context = tag;
                (run_len(rest, |cat| cat == CharCategory::Script(tag)), tag)
            }
            CharCategory::Whitespace | CharCategory::Other => {
                (run_len(rest, CharCategory::is_neutral), self.context)
            }
        };

        let start = self.pos;
        self.pos += len;
        Some(Segment {
            text: &self.text[start..self.pos],
            start,
            script,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.text.len() - self.pos;
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for Segments<'_> {}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Iterate the segments of `text` lazily.
pub fn segments(text: &str) -> Segments<'_> {
    Segments::new(text)
}

/// Split `text` into script-tagged segments.
///
/// Returns an empty vec for empty input.
pub fn segment(text: &str) -> Vec<Segment<'_>> {
    let _span = tracing::trace_span!("mixscript.segment", len = text.len()).entered();
    let out: Vec<Segment<'_>> = segments(text).collect();
    tracing::trace!(segment_count = out.len(), "segmented");
    out
}

/// Validate `bytes` as UTF-8, then segment.
///
/// Fails with [`TextError::InvalidInput`] when the bytes are not UTF-8.
pub fn segment_bytes(bytes: &[u8]) -> Result<Vec<Segment<'_>>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| TextError::invalid_input(format!("input is not valid UTF-8: {e}")))?;
    Ok(segment(text))
}
