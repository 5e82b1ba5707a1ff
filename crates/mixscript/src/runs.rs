//! Segment-then-resolve in one pass.

use mixscript_style::{
    ResolutionCache, ResolvedStyle, ScriptOverrides, ScriptRegistry, StyleProperties,
    StyleResolver, styling_tag,
};
use mixscript_text::{ScriptTag, Segment, segment, segment_bytes};

use crate::Result;

/// One boundary-delimited run and the style it renders with.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun<'a> {
    /// Slice of the input; never empty.
    pub text: &'a str,
    /// Byte offset of `text` in the input.
    pub start: usize,
    pub script: ScriptTag,
    pub style: ResolvedStyle,
}

impl StyledRun<'_> {
    /// Byte offset one past the end of `text`.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Styles resolved at most once per tag during a single call.
struct TagMemo {
    slots: [Option<ResolvedStyle>; ScriptTag::SCRIPTS.len()],
}

impl TagMemo {
    fn new() -> Self {
        Self {
            slots: Default::default(),
        }
    }

    fn get_or_resolve(
        &mut self,
        tag: ScriptTag,
        resolve: impl FnOnce(ScriptTag) -> ResolvedStyle,
    ) -> ResolvedStyle {
        let tag = styling_tag(tag);
        self.slots[tag.index()]
            .get_or_insert_with(|| resolve(tag))
            .clone()
    }
}

fn attach<'a>(
    segments: Vec<Segment<'a>>,
    mut style_of: impl FnMut(ScriptTag) -> ResolvedStyle,
) -> Vec<StyledRun<'a>> {
    let span = tracing::debug_span!(
        "mixscript.style_runs",
        run_count = tracing::field::Empty
    );
    let _enter = span.enter();
    let runs: Vec<StyledRun<'a>> = segments
        .into_iter()
        .map(|seg| StyledRun {
            text: seg.text,
            start: seg.start,
            script: seg.script,
            style: style_of(seg.script),
        })
        .collect();
    span.record("run_count", runs.len());
    runs
}

/// Mixed-script text styling: a base style, per-script layers and a font
/// registry, applied to any string.
///
/// ```
/// use mixscript::prelude::*;
///
/// let styler = MixedScriptText::new()
///     .base(StyleProperties::new().font_size(16.0))
///     .script(ScriptTag::Khmer, ScriptStyle::new().with(|p| p.height(1.8)));
///
/// let runs = styler.runs("Hello, សួស្តី!");
/// assert_eq!(runs.len(), 4);
/// assert_eq!(runs[2].style.font_family, "Kantumruy Pro");
/// assert_eq!(runs[2].style.height, Some(1.8));
/// assert_eq!(runs[0].style.height, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MixedScriptText {
    base: StyleProperties,
    overrides: ScriptOverrides,
    registry: ScriptRegistry,
}

impl MixedScriptText {
    /// Empty base, no layers, built-in registry.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn base(mut self, base: StyleProperties) -> Self {
        self.base = base;
        self
    }

    #[must_use]
    pub fn overrides(mut self, overrides: ScriptOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Set the layer for one script.
    #[must_use]
    pub fn script(
        mut self,
        tag: ScriptTag,
        style: impl Into<mixscript_style::ScriptStyle>,
    ) -> Self {
        self.overrides.insert(tag, style);
        self
    }

    #[must_use]
    pub fn registry(mut self, registry: ScriptRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Build from a loaded theme.
    #[cfg(feature = "config")]
    pub fn from_theme(theme: &mixscript_style::ThemeConfig) -> Result<Self> {
        Ok(Self {
            base: theme.base().clone(),
            overrides: theme.overrides()?,
            registry: theme.registry()?,
        })
    }

    pub fn base_style(&self) -> &StyleProperties {
        &self.base
    }

    pub fn script_overrides(&self) -> &ScriptOverrides {
        &self.overrides
    }

    pub fn font_registry(&self) -> &ScriptRegistry {
        &self.registry
    }

    /// Resolved style for a single tag.
    pub fn style_for(&self, tag: ScriptTag) -> ResolvedStyle {
        StyleResolver::new(&self.registry).resolve(tag, &self.base, &self.overrides)
    }

    /// Segment `text` and resolve every segment.
    pub fn runs<'a>(&self, text: &'a str) -> Vec<StyledRun<'a>> {
        let resolver = StyleResolver::new(&self.registry);
        let mut memo = TagMemo::new();
        attach(segment(text), |tag| {
            memo.get_or_resolve(tag, |t| resolver.resolve(t, &self.base, &self.overrides))
        })
    }

    /// As [`runs`](Self::runs), validating UTF-8 first.
    pub fn runs_bytes<'a>(&self, bytes: &'a [u8]) -> Result<Vec<StyledRun<'a>>> {
        let segments = segment_bytes(bytes)?;
        let resolver = StyleResolver::new(&self.registry);
        let mut memo = TagMemo::new();
        Ok(attach(segments, |tag| {
            memo.get_or_resolve(tag, |t| resolver.resolve(t, &self.base, &self.overrides))
        }))
    }

    /// A resolution cache bound to this styler's registry.
    pub fn cache(&self, capacity: usize) -> ResolutionCache<'_> {
        ResolutionCache::new(&self.registry, capacity)
    }

    /// As [`runs`](Self::runs), resolving through a long-lived cache.
    ///
    /// Styles come from the cache's registry; build the cache with
    /// [`cache`](Self::cache) to keep them consistent.
    pub fn runs_cached<'a>(
        &self,
        cache: &mut ResolutionCache<'_>,
        text: &'a str,
    ) -> Vec<StyledRun<'a>> {
        attach(segment(text), |tag| {
            cache.resolve(tag, &self.base, &self.overrides)
        })
    }
}

/// Segment `text` and resolve each segment against the built-in registry.
pub fn style_runs<'a>(
    text: &'a str,
    base: &StyleProperties,
    overrides: &ScriptOverrides,
) -> Vec<StyledRun<'a>> {
    let resolver = StyleResolver::default();
    let mut memo = TagMemo::new();
    attach(segment(text), |tag| {
        memo.get_or_resolve(tag, |t| resolver.resolve(t, base, overrides))
    })
}
