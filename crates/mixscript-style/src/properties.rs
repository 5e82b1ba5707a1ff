//! Optional-field style records with CSS-like cascading.
//!
//! [`StyleProperties`] is the base layer and the body of every per-script
//! layer. Each field is independently optional: `None` means "defer to the
//! next layer", so layering two records is a field-by-field `or`
//! ([`StyleProperties::patch`]).
//!
//! # Example
//!
//! ```
//! use mixscript_style::{FontWeight, Rgba, StyleProperties};
//!
//! let base = StyleProperties::new().font_size(16.0).color(Rgba::BLACK);
//! let emphasis = StyleProperties::new().font_weight(FontWeight::BOLD).color(Rgba::RED);
//!
//! let merged = base.patch(&emphasis);
//! assert_eq!(merged.font_size, Some(16.0)); // from base
//! assert_eq!(merged.color, Some(Rgba::RED)); // overridden
//! ```

use std::hash::{Hash, Hasher};

use bitflags::bitflags;
use rustc_hash::FxHasher;

use crate::color::{PaintId, Rgba};

// ---------------------------------------------------------------------------
// Attribute value types
// ---------------------------------------------------------------------------

/// Numeric font weight on the usual 100..=900 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const THIN: FontWeight = FontWeight(100);
    pub const LIGHT: FontWeight = FontWeight(300);
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const SEMI_BOLD: FontWeight = FontWeight(600);
    pub const BOLD: FontWeight = FontWeight(700);
    pub const BLACK: FontWeight = FontWeight(900);
}

/// Glyph slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum FontStyle {
    Normal,
    Italic,
}

/// Which baseline aligns runs of different scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TextBaseline {
    Alphabetic,
    Ideographic,
}

bitflags! {
    /// Decoration lines; combinable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(
        feature = "serde",
        derive(serde::Serialize, serde::Deserialize),
        serde(transparent)
    )]
    pub struct TextDecoration: u8 {
        const UNDERLINE    = 0b0001;
        const OVERLINE     = 0b0010;
        const LINE_THROUGH = 0b0100;
    }
}

/// How decoration lines are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DecorationStyle {
    Solid,
    Double,
    Dotted,
    Dashed,
    Wavy,
}

/// A drop shadow under the glyphs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shadow {
    pub color: Rgba,
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur_radius: f32,
}

impl Shadow {
    pub fn new(color: Rgba, offset_x: f32, offset_y: f32, blur_radius: f32) -> Self {
        Self {
            color,
            offset_x,
            offset_y,
            blur_radius,
        }
    }
}

/// An OpenType feature setting, e.g. `("liga", 0)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontFeature {
    pub tag: String,
    pub value: u32,
}

impl FontFeature {
    pub fn new(tag: impl Into<String>, value: u32) -> Self {
        Self {
            tag: tag.into(),
            value,
        }
    }

    /// Feature switched on (`value = 1`).
    pub fn enable(tag: impl Into<String>) -> Self {
        Self::new(tag, 1)
    }

    /// Feature switched off (`value = 0`).
    pub fn disable(tag: impl Into<String>) -> Self {
        Self::new(tag, 0)
    }
}

/// A variable-font axis position, e.g. `("wght", 450.0)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontVariation {
    pub axis: String,
    pub value: f32,
}

impl FontVariation {
    pub fn new(axis: impl Into<String>, value: f32) -> Self {
        Self {
            axis: axis.into(),
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// StyleProperties
// ---------------------------------------------------------------------------

/// Presentational attributes, every one optional.
///
/// `font_family_fallback` is carried here so a per-script layer can name
/// its own chain; the resolver never reads it from the base layer.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct StyleProperties {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub font_size: Option<f32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub color: Option<Rgba>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub background_color: Option<Rgba>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub font_weight: Option<FontWeight>,
    /// Slant.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub font_style: Option<FontStyle>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub letter_spacing: Option<f32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub word_spacing: Option<f32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub text_baseline: Option<TextBaseline>,
    /// Line height as a multiple of the font size.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub height: Option<f32>,
    /// BCP 47 language tag, e.g. `km-KH`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub locale: Option<String>,
    /// Host paint for the glyphs; takes precedence over `color` on the surface.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub foreground: Option<PaintId>,
    /// Host paint behind the glyphs; takes precedence over `background_color`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub background: Option<PaintId>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub shadows: Option<Vec<Shadow>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub font_features: Option<Vec<FontFeature>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub font_variations: Option<Vec<FontVariation>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub decoration: Option<TextDecoration>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub decoration_color: Option<Rgba>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub decoration_style: Option<DecorationStyle>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub decoration_thickness: Option<f32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub font_family_fallback: Option<Vec<String>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub debug_label: Option<String>,
    /// Whether unset attributes inherit from an enclosing style on the surface.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub inherit: Option<bool>,
}

macro_rules! setters {
    ($($(#[$meta:meta])* $name:ident: $ty:ty;)*) => {
        $(
            $(#[$meta])*
            #[must_use]
            pub fn $name(mut self, value: $ty) -> Self {
                self.$name = Some(value);
                self
            }
        )*
    };
}

#[inline]
fn pick<T: Clone>(over: &Option<T>, base: &Option<T>) -> Option<T> {
    over.as_ref().or(base.as_ref()).cloned()
}

impl StyleProperties {
    /// An empty record: every attribute defers.
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        font_size: f32;
        color: Rgba;
        background_color: Rgba;
        font_weight: FontWeight;
        /// Set the slant.
        font_style: FontStyle;
        letter_spacing: f32;
        word_spacing: f32;
        text_baseline: TextBaseline;
        /// Set the line height multiplier.
        height: f32;
        foreground: PaintId;
        background: PaintId;
        shadows: Vec<Shadow>;
        font_features: Vec<FontFeature>;
        font_variations: Vec<FontVariation>;
        decoration: TextDecoration;
        decoration_color: Rgba;
        decoration_style: DecorationStyle;
        decoration_thickness: f32;
        inherit: bool;
    }

    /// Set the BCP 47 locale.
    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    #[must_use]
    pub fn debug_label(mut self, label: impl Into<String>) -> Self {
        self.debug_label = Some(label.into());
        self
    }

    /// Set the fallback family chain.
    #[must_use]
    pub fn font_family_fallback<I, S>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.font_family_fallback = Some(families.into_iter().map(Into::into).collect());
        self
    }

    /// Whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Layer `over` on top of `self`: every attribute `over` sets wins,
    /// every attribute it leaves `None` keeps `self`'s value.
    #[must_use]
    pub fn patch(&self, over: &StyleProperties) -> StyleProperties {
        StyleProperties {
            font_size: over.font_size.or(self.font_size),
            color: over.color.or(self.color),
            background_color: over.background_color.or(self.background_color),
            font_weight: over.font_weight.or(self.font_weight),
            font_style: over.font_style.or(self.font_style),
            letter_spacing: over.letter_spacing.or(self.letter_spacing),
            word_spacing: over.word_spacing.or(self.word_spacing),
            text_baseline: over.text_baseline.or(self.text_baseline),
            height: over.height.or(self.height),
            locale: pick(&over.locale, &self.locale),
            foreground: over.foreground.or(self.foreground),
            background: over.background.or(self.background),
            shadows: pick(&over.shadows, &self.shadows),
            font_features: pick(&over.font_features, &self.font_features),
            font_variations: pick(&over.font_variations, &self.font_variations),
            decoration: over.decoration.or(self.decoration),
            decoration_color: over.decoration_color.or(self.decoration_color),
            decoration_style: over.decoration_style.or(self.decoration_style),
            decoration_thickness: over.decoration_thickness.or(self.decoration_thickness),
            font_family_fallback: pick(&over.font_family_fallback, &self.font_family_fallback),
            debug_label: pick(&over.debug_label, &self.debug_label),
            inherit: over.inherit.or(self.inherit),
        }
    }

    /// Deterministic 64-bit digest of every attribute.
    ///
    /// Floats contribute their bit patterns, so `0.0` and `-0.0` differ.
    /// Used as a cache key component; equal digests do not prove equality.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash_into(&mut hasher);
        hasher.finish()
    }

    pub(crate) fn hash_into<H: Hasher>(&self, h: &mut H) {
        fn bits(v: Option<f32>) -> Option<u32> {
            v.map(f32::to_bits)
        }

        bits(self.font_size).hash(h);
        self.color.hash(h);
        self.background_color.hash(h);
        self.font_weight.hash(h);
        self.font_style.hash(h);
        bits(self.letter_spacing).hash(h);
        bits(self.word_spacing).hash(h);
        self.text_baseline.hash(h);
        bits(self.height).hash(h);
        self.locale.hash(h);
        self.foreground.hash(h);
        self.background.hash(h);
        self.shadows.as_ref().map(Vec::len).hash(h);
        for s in self.shadows.iter().flatten() {
            s.color.hash(h);
            s.offset_x.to_bits().hash(h);
            s.offset_y.to_bits().hash(h);
            s.blur_radius.to_bits().hash(h);
        }
        self.font_features.hash(h);
        self.font_variations.as_ref().map(Vec::len).hash(h);
        for v in self.font_variations.iter().flatten() {
            v.axis.hash(h);
            v.value.to_bits().hash(h);
        }
        self.decoration.hash(h);
        self.decoration_color.hash(h);
        self.decoration_style.hash(h);
        bits(self.decoration_thickness).hash(h);
        self.font_family_fallback.hash(h);
        self.debug_label.hash(h);
        self.inherit.hash(h);
    }
}
