//! The style-affecting inputs of one button.

use crate::color::Color;
use crate::geometry::Size;

/// The four construction-time button styles.
///
/// `Destructive` is not a fill mode of its own: it sets the destructive flag,
/// which then overrides colors on top of whichever of the other three applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonStyle {
    /// Solid background color.
    #[default]
    Filled,
    /// Border around the edges, no background. Text matches the border.
    Border,
    /// No background or border, only text.
    Plain,
    /// An action that destroys data or similar.
    Destructive,
}

/// The style a resolved button is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Filled,
    Border,
    Plain,
}

/// The two fixed button heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    #[default]
    Regular,
    Small,
}

/// Turn a sentinel float (negative means "not set") into an option.
///
/// ```
/// use buttonkit_style::config::sentinel;
/// assert_eq!(sentinel(-1.0), None);
/// assert_eq!(sentinel(0.0), Some(0.0));
/// ```
pub fn sentinel(value: f32) -> Option<f32> {
    (value >= 0.0).then_some(value)
}

/// An immutable snapshot of everything that affects a button's appearance.
///
/// Configs are replaced whole; the `with_*` methods return a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonConfig {
    pub destructive: bool,
    pub small: bool,
    pub bordered: bool,
    pub plain: bool,
    /// Center icons, and stack detail text under the title.
    pub centered: bool,
    pub circle: bool,

    /// Frame width; the diameter for circle buttons.
    pub width: f32,

    pub color: Option<Color>,
    pub text_color: Option<Color>,
    pub border_color: Option<Color>,
    pub border_width: Option<f32>,
    pub corner_radius: Option<f32>,
    pub edge_padding: Option<f32>,
    pub icon_size: Option<Size>,

    pub has_icon: bool,
    pub has_detail_text: bool,

    pub shadow_opacity: f32,
    pub shadow_color: Color,
    pub shadow_offset: Size,
    pub shadow_radius: f32,

    /// Scale and color animations on tap.
    pub feedback_enabled: bool,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            destructive: false,
            small: false,
            bordered: false,
            plain: false,
            centered: false,
            circle: false,
            width: 0.0,
            color: None,
            text_color: None,
            border_color: None,
            border_width: None,
            corner_radius: None,
            edge_padding: None,
            icon_size: None,
            has_icon: false,
            has_detail_text: false,
            shadow_opacity: 0.0,
            shadow_color: Color::BLACK,
            shadow_offset: Size::new(0.0, 4.0),
            shadow_radius: 8.0,
            feedback_enabled: true,
        }
    }
}

impl ButtonConfig {
    /// A config for a button of the given width.
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// A circle config. The diameter also seeds the corner radius.
    pub fn circle(diameter: f32) -> Self {
        Self {
            circle: true,
            centered: true,
            corner_radius: Some(diameter / 2.0),
            ..Self::new(diameter)
        }
    }

    /// The fill mode, ignoring the destructive flag: bordered > plain > filled.
    pub fn style_kind(&self) -> StyleKind {
        if self.bordered {
            StyleKind::Border
        } else if self.plain {
            StyleKind::Plain
        } else {
            StyleKind::Filled
        }
    }

    pub fn size(&self) -> ButtonSize {
        if self.small {
            ButtonSize::Small
        } else {
            ButtonSize::Regular
        }
    }

    /// Apply a construction-time style. Flags are only ever switched on.
    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        match style {
            ButtonStyle::Filled => {}
            ButtonStyle::Border => self.bordered = true,
            ButtonStyle::Plain => self.plain = true,
            ButtonStyle::Destructive => self.destructive = true,
        }
        self
    }

    pub fn with_size(mut self, size: ButtonSize) -> Self {
        self.small = size == ButtonSize::Small;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_destructive(mut self, destructive: bool) -> Self {
        self.destructive = destructive;
        self
    }

    pub fn with_bordered(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }

    pub fn with_plain(mut self, plain: bool) -> Self {
        self.plain = plain;
        self
    }

    pub fn with_centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    pub fn with_circle(mut self, circle: bool) -> Self {
        self.circle = circle;
        self
    }

    pub fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    pub fn with_text_color(mut self, color: Option<Color>) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_border_color(mut self, color: Option<Color>) -> Self {
        self.border_color = color;
        self
    }

    pub fn with_border_width(mut self, width: Option<f32>) -> Self {
        self.border_width = width;
        self
    }

    pub fn with_corner_radius(mut self, radius: Option<f32>) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_edge_padding(mut self, padding: Option<f32>) -> Self {
        self.edge_padding = padding;
        self
    }

    pub fn with_icon_size(mut self, size: Option<Size>) -> Self {
        self.icon_size = size;
        self
    }

    pub fn with_icon(mut self, has_icon: bool) -> Self {
        self.has_icon = has_icon;
        self
    }

    pub fn with_detail_text(mut self, has_detail_text: bool) -> Self {
        self.has_detail_text = has_detail_text;
        self
    }

    pub fn with_shadow(mut self, opacity: f32, color: Color, offset: Size, radius: f32) -> Self {
        self.shadow_opacity = opacity;
        self.shadow_color = color;
        self.shadow_offset = offset;
        self.shadow_radius = radius;
        self
    }

    pub fn with_feedback(mut self, enabled: bool) -> Self {
        self.feedback_enabled = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_flags_precedence() {
        let config = ButtonConfig::new(100.0).with_plain(true).with_bordered(true);
        assert_eq!(config.style_kind(), StyleKind::Border);
        assert_eq!(ButtonConfig::new(1.0).with_plain(true).style_kind(), StyleKind::Plain);
        assert_eq!(ButtonConfig::new(1.0).style_kind(), StyleKind::Filled);
    }

    #[test]
    fn destructive_style_only_sets_flag() {
        let config = ButtonConfig::new(100.0).with_style(ButtonStyle::Destructive);
        assert!(config.destructive);
        assert_eq!(config.style_kind(), StyleKind::Filled);
    }

    #[test]
    fn circle_defaults() {
        let config = ButtonConfig::circle(60.0);
        assert!(config.circle && config.centered && !config.has_icon);
        assert_eq!(config.width, 60.0);
        assert_eq!(config.corner_radius, Some(30.0));
    }

    #[test]
    fn sentinel_conversion() {
        assert_eq!(sentinel(-0.5), None);
        assert_eq!(sentinel(12.0), Some(12.0));
    }
}
