//! Button style resolution for ButtonKit.
//!
//! This crate turns a button's configuration into the concrete values it is
//! drawn with:
//!
//! - **Config**: an immutable snapshot of flags and optional overrides
//! - **Settings**: global defaults, loadable from TOML
//! - **Resolution**: ordered decision tables producing an [`Appearance`]
//! - **Color**: HSB-based contrast colors for legible text
//!
//! # Example
//!
//! ```
//! use buttonkit_style::prelude::*;
//!
//! let resolver = StyleResolver::default();
//! let config = ButtonConfig::new(160.0).with_style(ButtonStyle::Border);
//! let appearance = resolver.resolve(&config, None);
//!
//! assert_eq!(appearance.fill_color, Color::CLEAR);
//! assert_eq!(appearance.border_color, appearance.text_color);
//! assert_eq!(appearance.size, Size::new(160.0, 50.0));
//! ```

pub mod appearance;
pub mod color;
pub mod config;
pub mod font;
pub mod geometry;
pub mod resolve;
pub mod settings;

mod error;

pub use appearance::Appearance;
pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::appearance::{
        Appearance, ButtonLayout, ImagePlacement, LabelPlacement, Placements, Resizing, Shadow,
        TextAlign,
    };
    pub use crate::color::Color;
    pub use crate::config::{ButtonConfig, ButtonSize, ButtonStyle, StyleKind, sentinel};
    pub use crate::font::{FontSpec, FontWeight};
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::resolve::{StyleResolver, resolve};
    pub use crate::settings::ButtonSettings;
}
