//! Static code-point range tables.
//!
//! Each script owns a sorted, non-overlapping slice of inclusive
//! [`CharRange`]s. Membership is a binary search, so a lookup costs
//! `O(log n)` in the table size and never allocates. The tables are plain
//! `static` data and can be shared across threads freely.

use std::cmp::Ordering;

/// An inclusive range of Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharRange {
    /// First code point in the range.
    pub start: u32,
    /// Last code point in the range (inclusive).
    pub end: u32,
}

impl CharRange {
    /// Create a range covering `start..=end`.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a range covering a single code point.
    #[inline]
    pub const fn single(cp: u32) -> Self {
        Self { start: cp, end: cp }
    }

    /// Whether `c` falls inside this range.
    #[inline]
    pub const fn contains(self, c: char) -> bool {
        let cp = c as u32;
        self.start <= cp && cp <= self.end
    }
}

/// Binary-search `table` for `c`.
///
/// `table` must be sorted by `start` and free of overlaps, which holds for
/// every table in this module.
#[inline]
pub fn table_contains(table: &[CharRange], c: char) -> bool {
    let cp = c as u32;
    table
        .binary_search_by(|r| {
            if r.end < cp {
                Ordering::Less
            } else if r.start > cp {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
        .is_ok()
}

/// Khmer (U+1780..U+17FF) and Khmer Symbols (U+19E0..U+19FF).
pub static KHMER: &[CharRange] = &[
    CharRange::new(0x1780, 0x17FF),
    CharRange::new(0x19E0, 0x19FF),
];

/// Thai block.
pub static THAI: &[CharRange] = &[CharRange::new(0x0E00, 0x0E7F)];

/// Lao block.
pub static LAO: &[CharRange] = &[CharRange::new(0x0E80, 0x0EFF)];

/// Myanmar, Myanmar Extended-B and Myanmar Extended-A.
pub static MYANMAR: &[CharRange] = &[
    CharRange::new(0x1000, 0x109F),
    CharRange::new(0xA9E0, 0xA9FF),
    CharRange::new(0xAA60, 0xAA7F),
];

/// Letters and marks that only Vietnamese orthography produces in practice.
///
/// Plain ASCII is absent: `chao` is Latin, `chào` is Vietnamese. The
/// combining tone marks cover NFD input.
///
/// Those five marks are generic combining marks, so any decomposed text that
/// uses them is tagged Vietnamese at the mark: `"cafe\u{0301}"` segments as
/// `"cafe"` (Latin) followed by `"\u{0301}"` (Vietnamese), splitting the mark
/// from its base letter. Hosts that style runs independently should
/// normalize to NFC first.
pub static VIETNAMESE: &[CharRange] = &[
    CharRange::new(0x00C0, 0x00C3), // À Á Â Ã
    CharRange::new(0x00C8, 0x00CA), // È É Ê
    CharRange::new(0x00CC, 0x00CD), // Ì Í
    CharRange::new(0x00D2, 0x00D5), // Ò Ó Ô Õ
    CharRange::new(0x00D9, 0x00DA), // Ù Ú
    CharRange::single(0x00DD),      // Ý
    CharRange::new(0x00E0, 0x00E3), // à á â ã
    CharRange::new(0x00E8, 0x00EA), // è é ê
    CharRange::new(0x00EC, 0x00ED), // ì í
    CharRange::new(0x00F2, 0x00F5), // ò ó ô õ
    CharRange::new(0x00F9, 0x00FA), // ù ú
    CharRange::single(0x00FD),      // ý
    CharRange::new(0x0102, 0x0103), // Ă ă
    CharRange::new(0x0110, 0x0111), // Đ đ
    CharRange::new(0x0128, 0x0129), // Ĩ ĩ
    CharRange::new(0x0168, 0x0169), // Ũ ũ
    CharRange::new(0x01A0, 0x01A1), // Ơ ơ
    CharRange::new(0x01AF, 0x01B0), // Ư ư
    CharRange::new(0x0300, 0x0301), // combining grave, acute
    CharRange::single(0x0303),      // combining tilde
    CharRange::single(0x0309),      // combining hook above
    CharRange::single(0x0323),      // combining dot below
    CharRange::new(0x1EA0, 0x1EF9), // Latin Extended Additional, Vietnamese part
];

/// ASCII digits and letters.
pub static LATIN: &[CharRange] = &[
    CharRange::new(0x0030, 0x0039),
    CharRange::new(0x0041, 0x005A),
    CharRange::new(0x0061, 0x007A),
];
