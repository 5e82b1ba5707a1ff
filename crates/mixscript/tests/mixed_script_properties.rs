//! End-to-end behaviour of the segment-then-resolve pipeline.
//!
//! 1. Reconstruction and totality over styled runs.
//! 2. Classifier priority and Vietnamese narrowness.
//! 3. Neutral inheritance and the leading-neutral default.
//! 4. Resolver precedence, registry defaults, neutral-as-latin.
//! 5. Idempotence.
//! 6. Tracing: the `mixscript.style_runs` span records the run count.

use std::sync::{Arc, Mutex};

use mixscript::prelude::*;
use mixscript::{classify, resolve, segment};
use proptest::prelude::*;

// ═════════════════════════════════════════════════════════════════════════
// 1. Reconstruction and totality
// ═════════════════════════════════════════════════════════════════════════

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            prop::char::range('\u{1780}', '\u{17FF}'),
            prop::char::range('\u{0E01}', '\u{0E3A}'),
            prop::char::range('\u{0E81}', '\u{0EAE}'),
            prop::char::range('\u{1000}', '\u{1049}'),
            prop::sample::select(vec!['ạ', 'ế', 'ư', 'đ', 'ò']),
            prop::char::range('A', 'z'),
            prop::sample::select(vec![' ', ',', '!', '…', '\n']),
        ],
        0..48,
    )
    .prop_map(|v| v.into_iter().collect())
}

proptest! {
    #[test]
    fn styled_runs_reconstruct_and_cover(text in arb_text()) {
        let runs = style_runs(&text, &StyleProperties::new(), &ScriptOverrides::new());
        let mut cursor = 0;
        let mut rebuilt = String::new();
        for run in &runs {
            prop_assert!(!run.text.is_empty());
            prop_assert_eq!(run.start, cursor);
            cursor = run.end();
            rebuilt.push_str(run.text);
        }
        prop_assert_eq!(cursor, text.len());
        prop_assert_eq!(rebuilt, text);
    }

    #[test]
    fn every_run_has_a_family(text in arb_text()) {
        for run in style_runs(&text, &StyleProperties::new(), &ScriptOverrides::new()) {
            prop_assert!(!run.style.font_family.is_empty());
            prop_assert!(!run.style.font_family_fallback.is_empty());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Classification
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn priority_beats_majority() {
    assert_eq!(classify("a\u{1781}"), ScriptTag::Khmer);
    assert_eq!(classify("aaaaaaaa\u{1781}"), ScriptTag::Khmer);
}

#[test]
fn vietnamese_needs_a_diacritic() {
    assert_eq!(classify("chao"), ScriptTag::Latin);
    assert_eq!(classify("chào"), ScriptTag::Vietnamese);
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Neutral handling
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn neutral_runs_inherit_preceding_script() {
    let segs: Vec<(&str, ScriptTag)> = segment("Hello, សួស្តី!")
        .iter()
        .map(|s| (s.text, s.script))
        .collect();
    assert_eq!(
        segs,
        [
            ("Hello", ScriptTag::Latin),
            (", ", ScriptTag::Latin),
            ("សួស្តី", ScriptTag::Khmer),
            ("!", ScriptTag::Khmer),
        ]
    );
}

#[test]
fn leading_neutral_is_not_corrected() {
    let segs = segment("... text");
    assert_eq!(segs[0].text, "... ");
    assert_eq!(segs[0].script, ScriptTag::Neutral);
    assert_eq!(segs[1].script, ScriptTag::Latin);
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Resolution
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn override_falls_through_then_wins() {
    let base = StyleProperties::new().font_size(16.0);

    let unset = ScriptOverrides::new().with(ScriptTag::Khmer, ScriptStyle::new());
    assert_eq!(resolve(ScriptTag::Khmer, &base, &unset).font_size, Some(16.0));

    let set = ScriptOverrides::new()
        .with(ScriptTag::Khmer, StyleProperties::new().font_size(20.0));
    assert_eq!(resolve(ScriptTag::Khmer, &base, &set).font_size, Some(20.0));
}

#[test]
fn registry_defaults_fill_family_and_chain() {
    let registry = ScriptRegistry::builtin();
    for tag in ScriptTag::ALL {
        let style = resolve(tag, &StyleProperties::new(), &ScriptOverrides::new());
        let lookup = if tag == ScriptTag::Neutral { ScriptTag::Latin } else { tag };
        assert_eq!(style.font_family, registry.default_family(lookup), "{tag}");
        assert_eq!(style.font_family_fallback, registry.fallback_chain(lookup), "{tag}");
    }
}

#[test]
fn neutral_reads_latin_slot() {
    let overrides = ScriptOverrides::new().with(
        ScriptTag::Latin,
        ScriptStyle::new().font_family("Source Sans 3"),
    );
    let runs = style_runs("¿ hola", &StyleProperties::new(), &overrides);
    assert_eq!(runs[0].script, ScriptTag::Neutral);
    assert_eq!(runs[0].style.font_family, "Source Sans 3");
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Idempotence
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn resolve_twice_is_identical() {
    let base = StyleProperties::new().font_size(15.0).color(Rgba::BLUE);
    let overrides = ScriptOverrides::new()
        .with(ScriptTag::Myanmar, StyleProperties::new().height(2.0));
    for tag in ScriptTag::ALL {
        assert_eq!(resolve(tag, &base, &overrides), resolve(tag, &base, &overrides));
    }

    let styler = MixedScriptText::new().base(base).overrides(overrides);
    let text = "မင်္ဂလာပါ and Xin chào";
    assert_eq!(styler.runs(text), styler.runs(text));
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Tracing
// ═════════════════════════════════════════════════════════════════════════

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Default, Clone)]
struct SpanCapture {
    names: Vec<String>,
    run_counts: Vec<u64>,
}

struct RunCountVisitor<'a>(&'a mut Vec<u64>);

impl Visit for RunCountVisitor<'_> {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "run_count" {
            self.0.push(value);
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
}

struct CaptureLayer(Arc<Mutex<SpanCapture>>);

impl<S> Layer<S> for CaptureLayer
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        let mut capture = self.0.lock().expect("capture lock");
        capture.names.push(attrs.metadata().name().to_string());
    }

    fn on_record(&self, _id: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
        let mut capture = self.0.lock().expect("capture lock");
        values.record(&mut RunCountVisitor(&mut capture.run_counts));
    }
}

#[test]
fn style_runs_span_records_run_count() {
    let capture = Arc::new(Mutex::new(SpanCapture::default()));
    let subscriber = tracing_subscriber::registry().with(CaptureLayer(Arc::clone(&capture)));
    let _guard = tracing::subscriber::set_default(subscriber);

    let runs = style_runs("Hello, សួស្តី!", &StyleProperties::new(), &ScriptOverrides::new());

    let capture = capture.lock().expect("capture lock").clone();
    assert!(
        capture.names.iter().any(|n| n == "mixscript.style_runs"),
        "spans: {:?}",
        capture.names
    );
    assert!(capture.names.iter().any(|n| n == "mixscript.segment"));
    assert_eq!(capture.run_counts, [runs.len() as u64]);
}
