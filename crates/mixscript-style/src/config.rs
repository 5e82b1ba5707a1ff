//! Font registries and style themes as data.
//!
//! A [`ThemeConfig`] captures everything the resolver consumes (base
//! style, per-script layers and font defaults) so it can be loaded from
//! TOML or JSON at startup instead of being assembled in code.
//!
//! # Loading
//!
//! ```toml
//! # theme.toml
//! [base]
//! font_size = 16.0
//! color = "#1a1a1aff"
//!
//! [scripts.khmer]
//! font_family = "Battambang"
//! height = 1.8
//!
//! [fonts.thai]
//! family = "Sarabun"
//! fallback = ["Noto Sans Thai", "Tahoma"]
//! ```
//!
//! ```rust,ignore
//! let theme = ThemeConfig::from_toml_file("theme.toml")?;
//! let registry = theme.registry()?;
//! let overrides = theme.overrides()?;
//! ```
//!
//! Every section is optional. Missing sections leave the built-in registry
//! and an empty override table in place.

use std::collections::BTreeMap;
use std::path::Path;

use mixscript_text::ScriptTag;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::overrides::{ScriptOverrides, ScriptStyle};
use crate::properties::StyleProperties;
use crate::registry::{ScriptRegistry, ScriptRegistryBuilder};
use crate::resolve::styling_tag;

// ---------------------------------------------------------------------------
// RegistryConfig
// ---------------------------------------------------------------------------

/// Partial font defaults for one script; unset fields keep the built-in
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontEntryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Vec<String>>,
}

/// Font entries keyed by script name (`"khmer"`, `"thai"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistryConfig {
    pub fonts: BTreeMap<String, FontEntryConfig>,
}

fn parse_tag(key: &str) -> Result<ScriptTag> {
    key.parse()
        .map_err(|_| ConfigError::UnknownScript(key.to_owned()))
}

/// Flag keys that land in the same slot, such as `neutral` next to `latin`.
fn check_aliases<'a>(
    section: &str,
    keys: impl IntoIterator<Item = &'a String>,
    errors: &mut Vec<String>,
) {
    let mut seen: [Option<&str>; ScriptTag::SCRIPTS.len()] = [None; ScriptTag::SCRIPTS.len()];
    for key in keys {
        let Ok(tag) = key.parse::<ScriptTag>() else {
            continue;
        };
        let slot = &mut seen[styling_tag(tag).index()];
        if let Some(first) = *slot {
            errors.push(format!("{section}.{key} aliases {section}.{first}; set only one"));
        } else {
            *slot = Some(key.as_str());
        }
    }
}

impl RegistryConfig {
    /// Problems with the entries; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (key, entry) in &self.fonts {
            if key.parse::<ScriptTag>().is_err() {
                errors.push(format!("fonts.{key}: unknown script"));
            }
            if let Some(family) = &entry.family
                && family.trim().is_empty()
            {
                errors.push(format!("fonts.{key}.family must not be empty"));
            }
            if let Some(fallback) = &entry.fallback {
                if fallback.is_empty() {
                    errors.push(format!("fonts.{key}.fallback must list at least one family"));
                }
                if fallback.iter().any(|f| f.trim().is_empty()) {
                    errors.push(format!("fonts.{key}.fallback contains an empty family name"));
                }
            }
        }
        check_aliases("fonts", self.fonts.keys(), &mut errors);
        errors
    }

    /// Layer the entries over `base`.
    pub fn apply(&self, base: &ScriptRegistry) -> Result<ScriptRegistry> {
        let mut builder = ScriptRegistryBuilder::from(base.clone());
        for (key, entry) in &self.fonts {
            let tag = parse_tag(key)?;
            if let Some(family) = &entry.family {
                tracing::debug!(script = %tag, family = %family, "registry.family_override");
                builder = builder.family(tag, family.clone());
            }
            if let Some(fallback) = &entry.fallback {
                tracing::debug!(script = %tag, len = fallback.len(), "registry.fallback_override");
                builder = builder.fallback(tag, fallback.iter().cloned());
            }
        }
        let registry = builder.build();
        let errors = registry.validate();
        if errors.is_empty() {
            Ok(registry)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// ThemeConfig
// ---------------------------------------------------------------------------

/// Base style, per-script layers and font defaults in one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Style applied to every segment.
    pub base: StyleProperties,
    /// Per-script layers keyed by script name. `neutral` aliases `latin`.
    pub scripts: BTreeMap<String, ScriptStyle>,
    /// Font defaults layered over the built-in registry.
    pub fonts: RegistryConfig,
}

impl ThemeConfig {
    /// Load from a TOML string and validate.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let theme: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        theme.checked()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "theme.load_toml");
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let theme: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        theme.checked()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "theme.load_json");
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    fn checked(self) -> Result<Self> {
        let errors = self.validate();
        if errors.is_empty() {
            tracing::debug!(
                scripts = self.scripts.len(),
                fonts = self.fonts.fonts.len(),
                "theme.loaded"
            );
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Collect every problem in the document; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_size("base", &self.base, &mut errors);
        for (key, style) in &self.scripts {
            if key.parse::<ScriptTag>().is_err() {
                errors.push(format!("scripts.{key}: unknown script"));
            }
            if let Some(family) = &style.font_family
                && family.trim().is_empty()
            {
                errors.push(format!("scripts.{key}.font_family must not be empty"));
            }
            if let Some(fallback) = &style.properties.font_family_fallback {
                if fallback.is_empty() {
                    errors.push(format!(
                        "scripts.{key}.font_family_fallback must list at least one family"
                    ));
                }
                if fallback.iter().any(|f| f.trim().is_empty()) {
                    errors.push(format!(
                        "scripts.{key}.font_family_fallback contains an empty family name"
                    ));
                }
            }
            check_size(&format!("scripts.{key}"), &style.properties, &mut errors);
        }
        check_aliases("scripts", self.scripts.keys(), &mut errors);
        errors.extend(self.fonts.validate());
        errors
    }

    /// The base style.
    pub fn base(&self) -> &StyleProperties {
        &self.base
    }

    /// The built-in registry with `fonts` layered over it.
    pub fn registry(&self) -> Result<ScriptRegistry> {
        self.fonts.apply(ScriptRegistry::builtin())
    }

    /// The per-script layers as an override table.
    ///
    /// Keys sharing a slot are patched in key order; [`validate`](Self::validate)
    /// rejects such documents at load time.
    pub fn overrides(&self) -> Result<ScriptOverrides> {
        self.scripts
            .iter()
            .map(|(key, style)| {
                let tag = parse_tag(key)?;
                tracing::debug!(script = %tag, "theme.script_layer");
                Ok((tag, style.clone()))
            })
            .collect::<Result<Vec<_>>>()
            .map(ScriptOverrides::from_iter)
    }
}

fn check_size(path: &str, props: &StyleProperties, errors: &mut Vec<String>) {
    if let Some(size) = props.font_size
        && !(size > 0.0 && size.is_finite())
    {
        errors.push(format!("{path}.font_size must be > 0, got {size}"));
    }
}
