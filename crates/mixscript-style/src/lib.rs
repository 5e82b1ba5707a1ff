#![forbid(unsafe_code)]

//! Per-script typography for mixed-script text.
//!
//! # Role in mixscript
//! `mixscript-text` tags each run of a string with a [`ScriptTag`]; this
//! crate decides how each tag looks. A base [`StyleProperties`] applies to
//! everything, a [`ScriptOverrides`] table layers one [`ScriptStyle`] per
//! script on top, and the [`ScriptRegistry`] fills in the font family and
//! fallback chain nobody set explicitly.
//!
//! # This crate provides
//! - [`StyleProperties`], an optional-field record with a `patch` cascade.
//! - [`ScriptOverrides`], at most one layer per script.
//! - [`ScriptRegistry`], default families and fallback chains per script.
//! - [`resolve`] / [`StyleResolver`] producing a concrete [`ResolvedStyle`].
//! - [`ResolutionCache`], an LRU in front of the resolver.
//! - Theme and registry loading from TOML/JSON (feature `config`).
//!
//! # Example
//!
//! ```
//! use mixscript_style::{ScriptOverrides, ScriptStyle, StyleProperties, resolve};
//! use mixscript_text::ScriptTag;
//!
//! let base = StyleProperties::new().font_size(16.0);
//! let overrides = ScriptOverrides::new()
//!     .with(ScriptTag::Thai, ScriptStyle::new().font_family("Sarabun"));
//!
//! assert_eq!(resolve(ScriptTag::Thai, &base, &overrides).font_family, "Sarabun");
//! assert_eq!(resolve(ScriptTag::Lao, &base, &overrides).font_family, "Noto Sans Lao");
//! ```

/// LRU cache in front of the resolver.
pub mod cache;
/// Color and paint handle types.
pub mod color;
/// Registry and theme loading.
#[cfg(feature = "config")]
pub mod config;
/// Configuration errors.
pub mod error;
/// Per-script override layers.
pub mod overrides;
/// Optional-field style records.
pub mod properties;
/// Script default font registry.
pub mod registry;
/// Layer resolution.
pub mod resolve;

pub use cache::{DEFAULT_CAPACITY, ResolutionCache, ResolutionCacheStats};
pub use color::{PaintId, ParseColorError, Rgba};
#[cfg(feature = "config")]
pub use config::{FontEntryConfig, RegistryConfig, ThemeConfig};
pub use error::{ConfigError, Result};
pub use overrides::{ScriptOverrides, ScriptStyle};
pub use properties::{
    DecorationStyle, FontFeature, FontStyle, FontVariation, FontWeight, Shadow, StyleProperties,
    TextBaseline, TextDecoration,
};
pub use registry::{FontDefaults, ScriptRegistry, ScriptRegistryBuilder};
pub use resolve::{ResolvedStyle, StyleResolver, resolve, resolve_with, styling_tag};

pub use mixscript_text::ScriptTag;
