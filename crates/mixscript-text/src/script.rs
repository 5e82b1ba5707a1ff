//! Script tags and the run classifier.
//!
//! The classifier answers one question: *which script does this run of
//! text belong to?* It does so by testing each script's range table in a
//! fixed priority order and returning the first script with **any**
//! matching character:
//!
//! 1. Khmer
//! 2. Thai
//! 3. Lao
//! 4. Myanmar
//! 5. Vietnamese (diacritic letters only)
//! 6. Latin (ASCII letters and digits)
//!
//! Nothing matched means [`ScriptTag::Neutral`]. The policy is "first hit
//! by priority", not a majority vote: `"aខ"` is Khmer even though half of
//! it is Latin. Callers that segment first (see [`crate::segmentation`])
//! never hand mixed runs to the classifier, so the policy only matters for
//! direct `classify` calls on arbitrary text.
//!
//! # Example
//!
//! ```
//! use mixscript_text::{ScriptTag, classify};
//!
//! assert_eq!(classify("chao"), ScriptTag::Latin);
//! assert_eq!(classify("chào"), ScriptTag::Vietnamese);
//! assert_eq!(classify("aខ"), ScriptTag::Khmer);
//! assert_eq!(classify("..."), ScriptTag::Neutral);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TextError};
use crate::ranges::{self, CharRange, table_contains};

// ---------------------------------------------------------------------------
// ScriptTag
// ---------------------------------------------------------------------------

/// The writing systems the styling pipeline distinguishes.
///
/// `Neutral` marks whitespace, punctuation and symbols that carry no script
/// of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[repr(u8)]
pub enum ScriptTag {
    /// Khmer (Cambodian).
    Khmer = 0,
    /// Thai.
    Thai,
    /// Lao.
    Lao,
    /// Myanmar (Burmese).
    Myanmar,
    /// Vietnamese, detected through its diacritic letters.
    Vietnamese,
    /// ASCII Latin letters and digits.
    Latin,
    /// No script of its own.
    Neutral,
}

impl ScriptTag {
    /// Script tags in classifier priority order.
    pub const SCRIPTS: [ScriptTag; 6] = [
        ScriptTag::Khmer,
        ScriptTag::Thai,
        ScriptTag::Lao,
        ScriptTag::Myanmar,
        ScriptTag::Vietnamese,
        ScriptTag::Latin,
    ];

    /// Every tag, `Neutral` last.
    pub const ALL: [ScriptTag; 7] = [
        ScriptTag::Khmer,
        ScriptTag::Thai,
        ScriptTag::Lao,
        ScriptTag::Myanmar,
        ScriptTag::Vietnamese,
        ScriptTag::Latin,
        ScriptTag::Neutral,
    ];

    /// Lowercase name, as used in configuration files.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            ScriptTag::Khmer => "khmer",
            ScriptTag::Thai => "thai",
            ScriptTag::Lao => "lao",
            ScriptTag::Myanmar => "myanmar",
            ScriptTag::Vietnamese => "vietnamese",
            ScriptTag::Latin => "latin",
            ScriptTag::Neutral => "neutral",
        }
    }

    /// Position of this tag in [`ScriptTag::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this is the script-less tag.
    #[inline]
    pub const fn is_neutral(self) -> bool {
        matches!(self, ScriptTag::Neutral)
    }

    /// The code-point table for this script. Empty for `Neutral`.
    #[inline]
    pub fn ranges(self) -> &'static [CharRange] {
        match self {
            ScriptTag::Khmer => ranges::KHMER,
            ScriptTag::Thai => ranges::THAI,
            ScriptTag::Lao => ranges::LAO,
            ScriptTag::Myanmar => ranges::MYANMAR,
            ScriptTag::Vietnamese => ranges::VIETNAMESE,
            ScriptTag::Latin => ranges::LATIN,
            ScriptTag::Neutral => &[],
        }
    }

    /// Whether `c` belongs to this script's table.
    #[inline]
    pub fn contains(self, c: char) -> bool {
        table_contains(self.ranges(), c)
    }
}

impl fmt::Display for ScriptTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScriptTag {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        ScriptTag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| TextError::UnknownScript(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Character categories
// ---------------------------------------------------------------------------

/// Category of a single character, in segmenter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharCategory {
    /// Belongs to one of the six script tables.
    Script(ScriptTag),
    /// Unicode `White_Space`.
    Whitespace,
    /// Everything else: punctuation, symbols, unsupported scripts.
    Other,
}

impl CharCategory {
    /// Whether this category inherits the script of the preceding run.
    #[inline]
    pub const fn is_neutral(self) -> bool {
        !matches!(self, CharCategory::Script(_))
    }
}

/// Categorize one character: script tables in priority order, then
/// whitespace, then the catch-all.
#[inline]
pub fn char_category(c: char) -> CharCategory {
    for tag in ScriptTag::SCRIPTS {
        if tag.contains(c) {
            return CharCategory::Script(tag);
        }
    }
    if c.is_whitespace() {
        CharCategory::Whitespace
    } else {
        CharCategory::Other
    }
}

/// The script of a single character, or `Neutral`.
#[inline]
pub fn char_script(c: char) -> ScriptTag {
    match char_category(c) {
        CharCategory::Script(tag) => tag,
        CharCategory::Whitespace | CharCategory::Other => ScriptTag::Neutral,
    }
}

// ---------------------------------------------------------------------------
// Run classification
// ---------------------------------------------------------------------------

/// Classify a run of text by priority-ordered "any match".
///
/// Returns `Neutral` for empty input or text with no script characters.
pub fn classify(text: &str) -> ScriptTag {
    ScriptTag::SCRIPTS
        .into_iter()
        .find(|tag| text.chars().any(|c| tag.contains(c)))
        .unwrap_or(ScriptTag::Neutral)
}

/// Like [`classify`], but rejects empty input.
pub fn try_classify(text: &str) -> Result<ScriptTag> {
    if text.is_empty() {
        return Err(TextError::invalid_input("cannot classify an empty run"));
    }
    Ok(classify(text))
}

/// Distinct scripts present in `text`, in priority order.
///
/// Never contains `Neutral`.
pub fn detect_scripts(text: &str) -> Vec<ScriptTag> {
    let mut seen = [false; ScriptTag::SCRIPTS.len()];
    for c in text.chars() {
        if let CharCategory::Script(tag) = char_category(c) {
            seen[tag.index()] = true;
        }
    }
    ScriptTag::SCRIPTS
        .into_iter()
        .filter(|tag| seen[tag.index()])
        .collect()
}

/// Whether any character of `text` belongs to `tag`.
///
/// For `Neutral` this asks whether any character has no script.
pub fn contains_script(text: &str, tag: ScriptTag) -> bool {
    if tag.is_neutral() {
        text.chars().any(|c| char_category(c).is_neutral())
    } else {
        text.chars().any(|c| tag.contains(c))
    }
}
