//! Property-based invariant tests for classification and segmentation.
//!
//! 1. Segment texts concatenate back to the input.
//! 2. Segments are contiguous, non-empty and cover every byte.
//! 3. Script segments carry the classifier's verdict for their text.
//! 4. Neutral segments inherit the nearest preceding script segment.
//! 5. No two neutral segments are adjacent.
//! 6. Classification is deterministic and a single script run classifies
//!    as that script.
//! 7. Invalid UTF-8 is rejected, valid UTF-8 matches `segment`.

use mixscript_text::{CharCategory, ScriptTag, char_category, classify, segment, segment_bytes};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

/// Characters drawn from every category the segmenter distinguishes.
fn arb_mixed_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range('\u{1780}', '\u{17FF}'),
        prop::char::range('\u{0E01}', '\u{0E5B}'),
        prop::char::range('\u{0E81}', '\u{0EDF}'),
        prop::char::range('\u{1000}', '\u{109F}'),
        prop::char::range('\u{1EA0}', '\u{1EF9}'),
        prop::sample::select(vec!['à', 'đ', 'ơ', 'ư', 'Ă']),
        prop::char::range('a', 'z'),
        prop::char::range('0', '9'),
        prop::sample::select(vec![' ', '\t', '\n', '\u{00A0}']),
        prop::sample::select(vec!['.', ',', '!', '?', '-', '…', '€', '一', 'ß']),
    ]
}

fn arb_mixed_text(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(arb_mixed_char(), 0..max_len).prop_map(|v| v.into_iter().collect())
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Reconstruction and totality
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn segments_reconstruct_input(text in arb_mixed_text(64)) {
        let rebuilt: String = segment(&text).iter().map(|s| s.text).collect();
        prop_assert_eq!(rebuilt, text);
    }

    #[test]
    fn segments_reconstruct_arbitrary_unicode(text in any::<String>()) {
        let rebuilt: String = segment(&text).iter().map(|s| s.text).collect();
        prop_assert_eq!(rebuilt, text);
    }

    #[test]
    fn segments_cover_every_byte(text in arb_mixed_text(64)) {
        let segs = segment(&text);
        let mut cursor = 0;
        for s in &segs {
            prop_assert!(!s.text.is_empty());
            prop_assert_eq!(s.start, cursor);
            prop_assert_eq!(&text[s.range()], s.text);
            cursor = s.end();
        }
        prop_assert_eq!(cursor, text.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3–5. Tagging rules
// ═════════════════════════════════════════════════════════════════════════

fn is_script_run(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| !char_category(c).is_neutral())
}

proptest! {
    #[test]
    fn script_segments_agree_with_classifier(text in arb_mixed_text(64)) {
        for s in segment(&text) {
            if is_script_run(s.text) {
                prop_assert_eq!(classify(s.text), s.script);
                let CharCategory::Script(tag) = char_category(s.text.chars().next().unwrap()) else {
                    unreachable!()
                };
                prop_assert!(s.text.chars().all(|c| char_category(c) == CharCategory::Script(tag)));
            }
        }
    }

    #[test]
    fn neutral_segments_inherit_preceding_script(text in arb_mixed_text(64)) {
        let mut context = ScriptTag::Neutral;
        for s in segment(&text) {
            if is_script_run(s.text) {
                context = s.script;
            } else {
                prop_assert_eq!(s.script, context);
                prop_assert!(s.text.chars().all(|c| char_category(c).is_neutral()));
            }
        }
    }

    #[test]
    fn neutral_segments_never_adjacent(text in arb_mixed_text(64)) {
        let segs = segment(&text);
        for w in segs.windows(2) {
            prop_assert!(is_script_run(w[0].text) || is_script_run(w[1].text));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Classifier
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn classify_deterministic(text in arb_mixed_text(32)) {
        prop_assert_eq!(classify(&text), classify(&text));
    }

    #[test]
    fn khmer_anywhere_wins(prefix in arb_mixed_text(16), suffix in arb_mixed_text(16)) {
        let text = format!("{prefix}\u{1780}{suffix}");
        prop_assert_eq!(classify(&text), ScriptTag::Khmer);
    }

    #[test]
    fn plain_ascii_words_are_latin(word in "[a-zA-Z0-9]{1,20}") {
        prop_assert_eq!(classify(&word), ScriptTag::Latin);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Byte entry point
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn segment_bytes_matches_str_or_rejects(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        match std::str::from_utf8(&bytes) {
            Ok(text) => prop_assert_eq!(segment_bytes(&bytes).unwrap(), segment(text)),
            Err(_) => prop_assert!(segment_bytes(&bytes).is_err()),
        }
    }
}
