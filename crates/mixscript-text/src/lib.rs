#![forbid(unsafe_code)]

//! Script detection and boundary segmentation for mixed-script text.
//!
//! # Role in mixscript
//! `mixscript-text` decides *where* one writing system ends and the next
//! begins. It knows nothing about fonts or colors: it turns a string into
//! an ordered list of [`Segment`]s, each tagged with a [`ScriptTag`], and
//! `mixscript-style` decides how each tag should look.
//!
//! # This crate provides
//! - [`ScriptTag`], the closed set of scripts the pipeline styles
//!   (Khmer, Thai, Lao, Myanmar, Vietnamese, Latin) plus `Neutral`.
//! - [`ranges`], the static code-point tables behind every membership test.
//! - [`classify`] for whole-run classification with fixed priority order.
//! - [`segment`] / [`segments`] for lossless, single-pass segmentation where
//!   whitespace and punctuation inherit the preceding script.
//!
//! # Example
//!
//! ```
//! use mixscript_text::{ScriptTag, segment};
//!
//! let segs = segment("Hello, សួស្តី!");
//! let tags: Vec<ScriptTag> = segs.iter().map(|s| s.script).collect();
//! assert_eq!(
//!     tags,
//!     [ScriptTag::Latin, ScriptTag::Latin, ScriptTag::Khmer, ScriptTag::Khmer]
//! );
//! ```

/// Error type for malformed input.
pub mod error;
/// Static code-point range tables.
pub mod ranges;
/// Script tags and the run classifier.
pub mod script;
/// Boundary segmentation with neutral inheritance.
pub mod segmentation;

pub use error::{Result, TextError};
pub use ranges::CharRange;
pub use script::{
    CharCategory, ScriptTag, char_category, char_script, classify, contains_script,
    detect_scripts, try_classify,
};
pub use segmentation::{Segment, Segments, segment, segment_bytes, segments};
