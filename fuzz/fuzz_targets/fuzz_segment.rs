#![no_main]

use libfuzzer_sys::fuzz_target;
use mixscript_text::{ScriptTag, classify, segment, segments};

fuzz_target!(|text: &str| {
    if text.len() > 4096 {
        return;
    }

    let segs = segment(text);

    // Lossless and contiguous.
    let mut cursor = 0;
    for s in &segs {
        assert!(!s.text.is_empty(), "empty segment");
        assert_eq!(s.start, cursor, "gap or overlap at {cursor}");
        assert_eq!(&text[s.range()], s.text);
        cursor = s.end();
    }
    assert_eq!(cursor, text.len(), "segments must cover the input");

    // Script segments agree with the classifier.
    for s in &segs {
        let verdict = classify(s.text);
        if verdict != ScriptTag::Neutral {
            assert_eq!(verdict, s.script, "segment {:?}", s.text);
        }
    }

    // Lazy iteration yields the same list.
    assert!(segments(text).eq(segs.iter().copied()));
});
