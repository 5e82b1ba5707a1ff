//! Per-script style layers.
//!
//! A [`ScriptStyle`] is one script's override layer: a family name plus a
//! [`StyleProperties`] body. [`ScriptOverrides`] holds at most one layer per
//! script tag in a fixed slot table, replacing a long list of per-script
//! parameters with a single tagged lookup.

use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};

use mixscript_text::ScriptTag;
use rustc_hash::FxHasher;

use crate::properties::StyleProperties;
use crate::resolve::styling_tag;

// ---------------------------------------------------------------------------
// ScriptStyle
// ---------------------------------------------------------------------------

/// One script's override layer.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ScriptStyle {
    /// Family to use for this script instead of the registry default.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub font_family: Option<String>,
    /// Attributes layered over the base style.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub properties: StyleProperties,
}

impl ScriptStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font family.
    #[must_use]
    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Replace the attribute body.
    #[must_use]
    pub fn properties(mut self, properties: StyleProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Edit the attribute body in place, builder style.
    ///
    /// ```
    /// use mixscript_style::ScriptStyle;
    ///
    /// let khmer = ScriptStyle::new()
    ///     .font_family("Battambang")
    ///     .with(|p| p.font_size(18.0).height(1.6));
    /// assert_eq!(khmer.properties.font_size, Some(18.0));
    /// ```
    #[must_use]
    pub fn with(mut self, f: impl FnOnce(StyleProperties) -> StyleProperties) -> Self {
        self.properties = f(self.properties);
        self
    }

    /// Field-wise cascade: `over` wins wherever it is set.
    ///
    /// ```
    /// use mixscript_style::ScriptStyle;
    ///
    /// let latin = ScriptStyle::new().font_family("IBM Plex Sans").with(|p| p.font_size(18.0));
    /// let patched = latin.patch(&ScriptStyle::new().with(|p| p.font_size(12.0)));
    /// assert_eq!(patched.font_family.as_deref(), Some("IBM Plex Sans"));
    /// assert_eq!(patched.properties.font_size, Some(12.0));
    /// ```
    #[must_use]
    pub fn patch(&self, over: &ScriptStyle) -> ScriptStyle {
        ScriptStyle {
            font_family: over.font_family.clone().or_else(|| self.font_family.clone()),
            properties: self.properties.patch(&over.properties),
        }
    }

    /// Digest of the family and every attribute.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.font_family.hash(&mut hasher);
        self.properties.hash_into(&mut hasher);
        hasher.finish()
    }
}

impl From<StyleProperties> for ScriptStyle {
    fn from(properties: StyleProperties) -> Self {
        Self {
            font_family: None,
            properties,
        }
    }
}

// ---------------------------------------------------------------------------
// ScriptOverrides
// ---------------------------------------------------------------------------

const SLOTS: usize = ScriptTag::SCRIPTS.len();

/// Slot index for a tag. `Neutral` shares Latin's slot: script-less text is
/// styled like Latin.
#[inline]
fn slot(tag: ScriptTag) -> usize {
    styling_tag(tag).index()
}

/// At most one [`ScriptStyle`] per script.
///
/// Behaves like a map keyed by [`ScriptTag`]. `Neutral` is an alias for the
/// Latin slot on every operation.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        from = "BTreeMap<ScriptTag, ScriptStyle>",
        into = "BTreeMap<ScriptTag, ScriptStyle>"
    )
)]
pub struct ScriptOverrides {
    slots: [Option<ScriptStyle>; SLOTS],
}

impl ScriptOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, tag: ScriptTag, style: impl Into<ScriptStyle>) -> Self {
        self.insert(tag, style);
        self
    }

    /// Set the layer for `tag`, returning the previous one.
    pub fn insert(&mut self, tag: ScriptTag, style: impl Into<ScriptStyle>) -> Option<ScriptStyle> {
        self.slots[slot(tag)].replace(style.into())
    }

    /// Remove and return the layer for `tag`.
    pub fn remove(&mut self, tag: ScriptTag) -> Option<ScriptStyle> {
        self.slots[slot(tag)].take()
    }

    /// The layer for `tag`, if any.
    #[inline]
    pub fn get(&self, tag: ScriptTag) -> Option<&ScriptStyle> {
        self.slots[slot(tag)].as_ref()
    }

    pub fn get_mut(&mut self, tag: ScriptTag) -> Option<&mut ScriptStyle> {
        self.slots[slot(tag)].as_mut()
    }

    pub fn contains(&self, tag: ScriptTag) -> bool {
        self.get(tag).is_some()
    }

    /// Number of scripts with a layer.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Layers in script priority order. Never yields `Neutral`.
    pub fn iter(&self) -> impl Iterator<Item = (ScriptTag, &ScriptStyle)> + '_ {
        ScriptTag::SCRIPTS
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(tag, s)| s.as_ref().map(|s| (tag, s)))
    }
}

/// Later pairs are patched over earlier ones that share a slot, so a
/// `Neutral` layer refines a `Latin` layer instead of discarding it.
impl FromIterator<(ScriptTag, ScriptStyle)> for ScriptOverrides {
    fn from_iter<I: IntoIterator<Item = (ScriptTag, ScriptStyle)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (tag, style) in iter {
            let entry = &mut out.slots[slot(tag)];
            *entry = Some(match entry.take() {
                Some(prev) => prev.patch(&style),
                None => style,
            });
        }
        out
    }
}

impl<S: std::hash::BuildHasher> From<HashMap<ScriptTag, ScriptStyle, S>> for ScriptOverrides {
    fn from(map: HashMap<ScriptTag, ScriptStyle, S>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<ScriptTag, ScriptStyle>> for ScriptOverrides {
    fn from(map: BTreeMap<ScriptTag, ScriptStyle>) -> Self {
        map.into_iter().collect()
    }
}

impl From<ScriptOverrides> for BTreeMap<ScriptTag, ScriptStyle> {
    fn from(overrides: ScriptOverrides) -> Self {
        ScriptTag::SCRIPTS
            .into_iter()
            .zip(overrides.slots)
            .filter_map(|(tag, s)| s.map(|s| (tag, s)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut o = ScriptOverrides::new();
        assert!(o.is_empty());
        assert!(o.insert(ScriptTag::Thai, ScriptStyle::new().font_family("Sarabun")).is_none());
        assert_eq!(
            o.get(ScriptTag::Thai).and_then(|s| s.font_family.as_deref()),
            Some("Sarabun")
        );
        let prev = o.insert(ScriptTag::Thai, ScriptStyle::new());
        assert_eq!(prev.and_then(|s| s.font_family), Some("Sarabun".into()));
        assert!(o.remove(ScriptTag::Thai).is_some());
        assert!(!o.contains(ScriptTag::Thai));
    }

    #[test]
    fn neutral_aliases_latin_slot() {
        let o = ScriptOverrides::new().with(ScriptTag::Latin, ScriptStyle::new().font_family("Inter"));
        assert_eq!(o.get(ScriptTag::Neutral), o.get(ScriptTag::Latin));

        let mut o = ScriptOverrides::new();
        o.insert(ScriptTag::Neutral, StyleProperties::new().font_size(9.0));
        assert!(o.contains(ScriptTag::Latin));
        assert_eq!(o.len(), 1);
    }

    #[test]
    fn iter_in_priority_order() {
        let o = ScriptOverrides::new()
            .with(ScriptTag::Latin, ScriptStyle::new())
            .with(ScriptTag::Khmer, ScriptStyle::new())
            .with(ScriptTag::Lao, ScriptStyle::new());
        let tags: Vec<ScriptTag> = o.iter().map(|(t, _)| t).collect();
        assert_eq!(tags, [ScriptTag::Khmer, ScriptTag::Lao, ScriptTag::Latin]);
        assert_eq!(o.len(), 3);
    }

    #[test]
    fn from_hash_map() {
        let mut map = HashMap::new();
        map.insert(ScriptTag::Myanmar, ScriptStyle::new().font_family("Padauk"));
        let o = ScriptOverrides::from(map);
        assert!(o.contains(ScriptTag::Myanmar));
        assert_eq!(o.len(), 1);
    }

    #[test]
    fn btree_round_trip() {
        let o = ScriptOverrides::new()
            .with(ScriptTag::Vietnamese, ScriptStyle::new().font_family("Be Vietnam Pro"));
        let map: BTreeMap<ScriptTag, ScriptStyle> = o.clone().into();
        assert_eq!(ScriptOverrides::from(map), o);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut o = ScriptOverrides::new().with(ScriptTag::Khmer, ScriptStyle::new());
        if let Some(s) = o.get_mut(ScriptTag::Khmer) {
            s.properties.font_size = Some(20.0);
        }
        assert_eq!(
            o.get(ScriptTag::Khmer).and_then(|s| s.properties.font_size),
            Some(20.0)
        );
    }

    #[test]
    fn collect_patches_neutral_over_latin() {
        let latin = ScriptStyle::new()
            .font_family("IBM Plex Sans")
            .with(|p| p.font_size(18.0));
        let neutral = ScriptStyle::from(StyleProperties::new().font_size(12.0));

        let o: ScriptOverrides = [(ScriptTag::Latin, latin.clone()), (ScriptTag::Neutral, neutral)]
            .into_iter()
            .collect();
        let merged = o.get(ScriptTag::Latin).expect("latin layer");
        assert_eq!(merged.font_family.as_deref(), Some("IBM Plex Sans"));
        assert_eq!(merged.properties.font_size, Some(12.0));
        assert_eq!(o.len(), 1);

        let mut map = BTreeMap::new();
        map.insert(ScriptTag::Latin, latin);
        map.insert(ScriptTag::Neutral, ScriptStyle::new().with(|p| p.font_size(12.0)));
        assert_eq!(ScriptOverrides::from(map), o);
    }

    #[test]
    fn patch_keeps_base_family_when_unset() {
        let base = ScriptStyle::new().font_family("Inter").with(|p| p.height(1.4));
        assert_eq!(base.patch(&ScriptStyle::new()), base);
        let over = ScriptStyle::new().font_family("Roboto");
        assert_eq!(base.patch(&over).font_family.as_deref(), Some("Roboto"));
        assert_eq!(base.patch(&over).properties.height, Some(1.4));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trip_uses_script_names() {
        let o = ScriptOverrides::new()
            .with(
                ScriptTag::Khmer,
                ScriptStyle::new().font_family("Battambang").with(|p| p.height(1.8)),
            )
            .with(ScriptTag::Vietnamese, StyleProperties::new().font_size(15.0));

        let json = serde_json::to_string(&o).expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("json");
        assert_eq!(value["khmer"]["font_family"], "Battambang");
        assert_eq!(value["vietnamese"]["font_size"], 15.0);
        assert!(value.get("latin").is_none(), "{json}");

        let back: ScriptOverrides = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, o);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_neutral_key_patches_latin() {
        let json = r#"{
            "latin": { "font_family": "IBM Plex Sans", "font_size": 18.0 },
            "neutral": { "font_size": 12.0 }
        }"#;
        let o: ScriptOverrides = serde_json::from_str(json).expect("deserialize");
        let latin = o.get(ScriptTag::Latin).expect("latin layer");
        assert_eq!(latin.font_family.as_deref(), Some("IBM Plex Sans"));
        assert_eq!(latin.properties.font_size, Some(12.0));
    }

    #[test]
    fn script_style_fingerprint_covers_family() {
        let a = ScriptStyle::new().font_family("A");
        let b = ScriptStyle::new().font_family("B");
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint(), a.clone().fingerprint());
    }
}
