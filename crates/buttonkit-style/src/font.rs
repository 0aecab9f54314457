//! Font selection.
//!
//! Fonts are described, not loaded: the rendering layer maps a [`FontSpec`]
//! onto whatever font system it uses.

use serde::{Deserialize, Serialize};

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Regular,
    Medium,
    Semibold,
    #[default]
    Bold,
}

/// A system font at a point size and weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size: f32,
    #[serde(default)]
    pub weight: FontWeight,
}

impl FontSpec {
    /// Create a font spec.
    pub const fn new(size: f32, weight: FontWeight) -> Self {
        Self { size, weight }
    }

    /// A bold system font.
    pub const fn bold(size: f32) -> Self {
        Self::new(size, FontWeight::Bold)
    }
}
