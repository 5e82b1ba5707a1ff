//! Script default registry: one default family and a fallback chain per tag.
//!
//! This is configuration data, not logic. The built-in table is published
//! once through [`ScriptRegistry::builtin`] and never mutated; custom
//! registries are built with [`ScriptRegistry::builder`] or layered from a
//! theme file (see the `config` feature).

use std::sync::LazyLock;

use mixscript_text::ScriptTag;

use crate::resolve::styling_tag;

/// Font defaults for one script.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontDefaults {
    /// Family requested first.
    pub family: String,
    /// Families tried in order when `family` lacks a glyph.
    pub fallback: Vec<String>,
}

impl FontDefaults {
    pub fn new<I, S>(family: impl Into<String>, fallback: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            family: family.into(),
            fallback: fallback.into_iter().map(Into::into).collect(),
        }
    }
}

/// Every [`ScriptTag`] mapped to its [`FontDefaults`].
///
/// Total by construction: there is no way to build a registry with a
/// missing tag. `Neutral` has no entry of its own; it reads and writes the
/// Latin entry, matching how it resolves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScriptRegistry {
    entries: [FontDefaults; ScriptTag::SCRIPTS.len()],
}

#[inline]
fn slot(tag: ScriptTag) -> usize {
    styling_tag(tag).index()
}

static BUILTIN: LazyLock<ScriptRegistry> = LazyLock::new(ScriptRegistry::builtin_entries);

impl ScriptRegistry {
    /// The shared built-in registry.
    pub fn builtin() -> &'static ScriptRegistry {
        &BUILTIN
    }

    fn builtin_entries() -> ScriptRegistry {
        ScriptRegistry {
            entries: [
                FontDefaults::new("Kantumruy Pro", ["Noto Sans Khmer", "Khmer OS"]),
                FontDefaults::new("Noto Sans Thai", ["Sarabun", "Tahoma"]),
                FontDefaults::new("Noto Sans Lao", ["Phetsarath OT", "Saysettha OT"]),
                FontDefaults::new("Noto Sans Myanmar", ["Padauk", "Myanmar Text"]),
                FontDefaults::new("Be Vietnam Pro", ["Noto Sans", "Roboto"]),
                FontDefaults::new("Inter", ["Roboto", "Noto Sans"]),
            ],
        }
    }

    /// Start from the built-in table and replace entries.
    pub fn builder() -> ScriptRegistryBuilder {
        ScriptRegistryBuilder {
            registry: Self::builtin().clone(),
        }
    }

    /// Defaults for `tag`.
    #[inline]
    pub fn get(&self, tag: ScriptTag) -> &FontDefaults {
        &self.entries[slot(tag)]
    }

    /// Default family for `tag`.
    #[inline]
    pub fn default_family(&self, tag: ScriptTag) -> &str {
        &self.get(tag).family
    }

    /// Ordered fallback families for `tag`.
    #[inline]
    pub fn fallback_chain(&self, tag: ScriptTag) -> &[String] {
        &self.get(tag).fallback
    }

    /// All entries in [`ScriptTag::SCRIPTS`] order. Never yields `Neutral`.
    pub fn iter(&self) -> impl Iterator<Item = (ScriptTag, &FontDefaults)> + '_ {
        ScriptTag::SCRIPTS.into_iter().zip(self.entries.iter())
    }

    /// Problems that would leave a resolved style without a usable family.
    ///
    /// Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (tag, entry) in self.iter() {
            if entry.family.trim().is_empty() {
                errors.push(format!("fonts.{tag}.family must not be empty"));
            }
            if entry.fallback.is_empty() {
                errors.push(format!("fonts.{tag}.fallback must list at least one family"));
            }
            if entry.fallback.iter().any(|f| f.trim().is_empty()) {
                errors.push(format!("fonts.{tag}.fallback contains an empty family name"));
            }
        }
        errors
    }
}

impl Default for ScriptRegistry {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

/// Builder for a [`ScriptRegistry`] seeded with the built-in table.
#[derive(Debug, Clone)]
#[must_use]
pub struct ScriptRegistryBuilder {
    registry: ScriptRegistry,
}

impl ScriptRegistryBuilder {
    /// Replace the whole entry for `tag`. `Neutral` edits the Latin entry.
    pub fn entry(mut self, tag: ScriptTag, defaults: FontDefaults) -> Self {
        self.registry.entries[slot(tag)] = defaults;
        self
    }

    /// Replace only the default family for `tag`.
    pub fn family(mut self, tag: ScriptTag, family: impl Into<String>) -> Self {
        self.registry.entries[slot(tag)].family = family.into();
        self
    }

    /// Replace only the fallback chain for `tag`.
    pub fn fallback<I, S>(mut self, tag: ScriptTag, fallback: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registry.entries[slot(tag)].fallback =
            fallback.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> ScriptRegistry {
        self.registry
    }
}

impl From<ScriptRegistry> for ScriptRegistryBuilder {
    /// Continue editing an existing registry.
    fn from(registry: ScriptRegistry) -> Self {
        Self { registry }
    }
}
