//! Style resolution: base layer + script layer + registry defaults.
//!
//! For a segment tagged `tag`:
//!
//! | Attribute               | Precedence                                        |
//! |-------------------------|---------------------------------------------------|
//! | every ordinary field    | `override ?? base` (unset stays `None`)           |
//! | `font_family`           | `override.font_family ?? registry.family(tag)`    |
//! | `font_family_fallback`  | `override.fallback ?? registry.fallback(tag)`     |
//! | `inherit`               | `override ?? base ?? true`                        |
//!
//! `Neutral` resolves exactly like `Latin`: it reads the Latin override slot
//! and the Latin registry entry.
//!
//! The base layer never contributes a family or a fallback chain; those only
//! come from a script layer or the registry.
//!
//! # Example
//!
//! ```
//! use mixscript_style::{ScriptOverrides, ScriptStyle, StyleProperties, resolve};
//! use mixscript_text::ScriptTag;
//!
//! let base = StyleProperties::new().font_size(16.0);
//! let overrides = ScriptOverrides::new()
//!     .with(ScriptTag::Khmer, ScriptStyle::new().with(|p| p.height(1.8)));
//!
//! let khmer = resolve(ScriptTag::Khmer, &base, &overrides);
//! assert_eq!(khmer.font_size, Some(16.0));
//! assert_eq!(khmer.height, Some(1.8));
//! assert_eq!(khmer.font_family, "Kantumruy Pro");
//! ```

use mixscript_text::ScriptTag;

use crate::color::{PaintId, Rgba};
use crate::overrides::{ScriptOverrides, ScriptStyle};
use crate::properties::{
    DecorationStyle, FontFeature, FontStyle, FontVariation, FontWeight, Shadow, StyleProperties,
    TextBaseline, TextDecoration,
};
use crate::registry::ScriptRegistry;

/// The fully concrete style handed to a rendering surface.
///
/// Attributes no layer set stay `None` and fall to the surface's own
/// defaults; family, fallback chain and `inherit` are always present.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedStyle {
    pub font_family: String,
    pub font_family_fallback: Vec<String>,
    pub inherit: bool,
    pub font_size: Option<f32>,
    pub color: Option<Rgba>,
    pub background_color: Option<Rgba>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub letter_spacing: Option<f32>,
    pub word_spacing: Option<f32>,
    pub text_baseline: Option<TextBaseline>,
    pub height: Option<f32>,
    pub locale: Option<String>,
    pub foreground: Option<PaintId>,
    pub background: Option<PaintId>,
    pub shadows: Option<Vec<Shadow>>,
    pub font_features: Option<Vec<FontFeature>>,
    pub font_variations: Option<Vec<FontVariation>>,
    pub decoration: Option<TextDecoration>,
    pub decoration_color: Option<Rgba>,
    pub decoration_style: Option<DecorationStyle>,
    pub decoration_thickness: Option<f32>,
    pub debug_label: Option<String>,
}

impl ResolvedStyle {
    /// Family followed by its fallback chain, in lookup order.
    pub fn families(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.font_family.as_str())
            .chain(self.font_family_fallback.iter().map(String::as_str))
    }
}

/// The tag whose override slot and registry entry style `tag`.
#[inline]
pub fn styling_tag(tag: ScriptTag) -> ScriptTag {
    match tag {
        ScriptTag::Neutral => ScriptTag::Latin,
        other => other,
    }
}

/// Resolver bound to a font registry.
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'r> {
    registry: &'r ScriptRegistry,
}

impl Default for StyleResolver<'static> {
    fn default() -> Self {
        Self::new(ScriptRegistry::builtin())
    }
}

impl<'r> StyleResolver<'r> {
    pub fn new(registry: &'r ScriptRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r ScriptRegistry {
        self.registry
    }

    /// Resolve one tag against a base style and the override table.
    pub fn resolve(
        &self,
        tag: ScriptTag,
        base: &StyleProperties,
        overrides: &ScriptOverrides,
    ) -> ResolvedStyle {
        let tag = styling_tag(tag);
        self.resolve_layer(tag, base, overrides.get(tag))
    }

    /// Resolve with an explicit (possibly absent) script layer.
    pub fn resolve_layer(
        &self,
        tag: ScriptTag,
        base: &StyleProperties,
        layer: Option<&ScriptStyle>,
    ) -> ResolvedStyle {
        let tag = styling_tag(tag);
        let defaults = self.registry.get(tag);

        let (family, fallback, merged) = match layer {
            Some(layer) => (
                layer.font_family.clone(),
                layer.properties.font_family_fallback.clone(),
                base.patch(&layer.properties),
            ),
            None => (None, None, base.clone()),
        };

        let font_family = family.unwrap_or_else(|| defaults.family.clone());
        let font_family_fallback = fallback.unwrap_or_else(|| defaults.fallback.clone());
        tracing::trace!(
            script = %tag,
            has_layer = layer.is_some(),
            family = %font_family,
            "style.resolve"
        );

        let StyleProperties {
            font_size,
            color,
            background_color,
            font_weight,
            font_style,
            letter_spacing,
            word_spacing,
            text_baseline,
            height,
            locale,
            foreground,
            background,
            shadows,
            font_features,
            font_variations,
            decoration,
            decoration_color,
            decoration_style,
            decoration_thickness,
            font_family_fallback: _,
            debug_label,
            inherit,
        } = merged;

        ResolvedStyle {
            font_family,
            font_family_fallback,
            inherit: inherit.unwrap_or(true),
            font_size,
            color,
            background_color,
            font_weight,
            font_style,
            letter_spacing,
            word_spacing,
            text_baseline,
            height,
            locale,
            foreground,
            background,
            shadows,
            font_features,
            font_variations,
            decoration,
            decoration_color,
            decoration_style,
            decoration_thickness,
            debug_label,
        }
    }
}

/// Resolve against the built-in registry.
pub fn resolve(
    tag: ScriptTag,
    base: &StyleProperties,
    overrides: &ScriptOverrides,
) -> ResolvedStyle {
    StyleResolver::default().resolve(tag, base, overrides)
}

/// Resolve against a custom registry.
pub fn resolve_with(
    registry: &ScriptRegistry,
    tag: ScriptTag,
    base: &StyleProperties,
    overrides: &ScriptOverrides,
) -> ResolvedStyle {
    StyleResolver::new(registry).resolve(tag, base, overrides)
}
