//! The resolved, ready-to-apply look of one button.

use crate::color::Color;
use crate::config::StyleKind;
use crate::font::FontSpec;
use crate::geometry::{Rect, Size};
use crate::resolve::layout;

/// How the button's content is arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLayout {
    /// The title label alone, centered.
    Regular,
    /// Title on top, detail text underneath.
    DetailCenter,
    /// Title on the left, detail text on the right.
    DetailRight,
    /// A circle with an icon in the middle.
    Circle,
    /// A rectangle with an icon centered or on the right.
    Icon,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Which edges and dimensions follow the parent when it resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resizing {
    pub flexible_width: bool,
    pub flexible_height: bool,
    pub flexible_left_margin: bool,
    pub flexible_right_margin: bool,
    pub flexible_top_margin: bool,
    pub flexible_bottom_margin: bool,
}

impl Resizing {
    /// Stretch with the parent in both dimensions.
    pub const FILL: Self = Self {
        flexible_width: true,
        flexible_height: true,
        flexible_left_margin: false,
        flexible_right_margin: false,
        flexible_top_margin: false,
        flexible_bottom_margin: false,
    };

    /// Keep the size, stay centered.
    pub const CENTER: Self = Self {
        flexible_width: false,
        flexible_height: false,
        flexible_left_margin: true,
        flexible_right_margin: true,
        flexible_top_margin: true,
        flexible_bottom_margin: true,
    };

    /// Keep the size, stay pinned to the right edge and vertically centered.
    pub const PIN_RIGHT: Self = Self {
        flexible_right_margin: false,
        ..Self::CENTER
    };

    /// Same as `self` with a flexible left margin.
    pub const fn with_flexible_left(self) -> Self {
        Self {
            flexible_left_margin: true,
            ..self
        }
    }

    /// Same as `self` with a flexible right margin.
    pub const fn with_flexible_right(self) -> Self {
        Self {
            flexible_right_margin: true,
            ..self
        }
    }
}

/// Placement of a text label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub frame: Rect,
    pub alignment: TextAlign,
    pub resizing: Resizing,
    pub hidden: bool,
}

/// Placement of the icon image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub frame: Rect,
    pub resizing: Resizing,
    pub hidden: bool,
}

/// Placement of every subview for one bounds size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placements {
    pub label: LabelPlacement,
    pub detail: LabelPlacement,
    pub image: ImagePlacement,
}

/// Shadow behind the button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Zero unless the button is filled.
    pub opacity: f32,
    pub color: Color,
    pub offset: Size,
    pub radius: f32,
}

/// The inputs frame computation needs, captured at resolution time so frames
/// can be recomputed for any bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutGeometry {
    pub layout: ButtonLayout,
    pub edge_padding: f32,
    pub small: bool,
    pub centered: bool,
    /// Configured or default icon size, before the small-size reduction.
    pub icon_size: Size,
    pub label_hidden: bool,
    pub detail_hidden: bool,
    pub image_hidden: bool,
}

/// Resolved visual properties of one button.
///
/// Never mutated: a new value replaces the old one whenever the config
/// changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub style: StyleKind,
    pub destructive: bool,
    pub layout: ButtonLayout,
    /// Natural frame size: configured width and the size's fixed height.
    pub size: Size,

    pub fill_color: Color,
    pub text_color: Color,
    pub border_color: Color,
    pub border_width: f32,
    pub corner_radius: f32,
    pub edge_padding: f32,

    pub font: FontSpec,
    pub detail_font: FontSpec,

    pub geometry: LayoutGeometry,
    /// Placements for [`size`](Self::size).
    pub placements: Placements,
    pub shadow: Shadow,

    /// The backdrop the button was resolved against, if any.
    pub backdrop: Option<Color>,
}

impl Appearance {
    /// Bounds at the natural size.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }

    /// Placements for a caller-chosen bounds size.
    pub fn placements_for(&self, bounds: Size) -> Placements {
        layout::placements(&self.geometry, Rect::from_size(bounds))
    }

    pub fn is_label_hidden(&self) -> bool {
        self.geometry.label_hidden
    }

    pub fn is_detail_hidden(&self) -> bool {
        self.geometry.detail_hidden
    }

    pub fn is_image_hidden(&self) -> bool {
        self.geometry.image_hidden
    }
}
