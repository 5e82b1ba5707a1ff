#![forbid(unsafe_code)]

//! mixscript public facade crate.
//!
//! Splits a string at script boundaries (Khmer, Thai, Lao, Myanmar,
//! Vietnamese, Latin) and attaches the per-script style each run should
//! render with. Shaping, font loading and layout stay with the rendering
//! surface; this crate only hands it `(text, style)` pairs.
//!
//! ```
//! use mixscript::prelude::*;
//!
//! let runs = style_runs("Hi ສະບາຍດີ สวัสดี", &StyleProperties::new(), &ScriptOverrides::new());
//! let families: Vec<&str> = runs.iter().map(|r| r.style.font_family.as_str()).collect();
//! assert_eq!(
//!     families,
//!     ["Inter", "Inter", "Noto Sans Lao", "Noto Sans Lao", "Noto Sans Thai"]
//! );
//! ```

/// Segment-then-resolve pipeline.
pub mod runs;

pub use runs::{MixedScriptText, StyledRun, style_runs};

// --- Text re-exports -------------------------------------------------------

pub use mixscript_text::{
    ScriptTag, Segment, TextError, classify, detect_scripts, segment, segment_bytes, segments,
};

// --- Style re-exports ------------------------------------------------------

pub use mixscript_style::{
    ConfigError, FontDefaults, FontWeight, ResolutionCache, ResolvedStyle, Rgba, ScriptOverrides,
    ScriptRegistry, ScriptStyle, StyleProperties, StyleResolver, resolve, resolve_with,
};
#[cfg(feature = "config")]
pub use mixscript_style::ThemeConfig;

// --- Errors ---------------------------------------------------------------

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input was not valid text.
    #[error(transparent)]
    Text(#[from] TextError),
    /// A theme or registry could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Standard result type for mixscript APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, MixedScriptText, ResolvedStyle, Result, Rgba, ScriptOverrides, ScriptRegistry,
        ScriptStyle, ScriptTag, StyleProperties, StyledRun, style_runs,
    };

    pub use crate::{style, text};
}

pub use mixscript_style as style;
pub use mixscript_text as text;
