//! Style resolution: config + settings + backdrop to [`Appearance`].

use std::sync::Arc;

use buttonkit_core::PerfSpan;
use buttonkit_core::logging::targets;

use crate::appearance::{Appearance, ButtonLayout, LayoutGeometry, Shadow};
use crate::color::Color;
use crate::config::{ButtonConfig, StyleKind};
use crate::geometry::{Rect, Size};
use crate::resolve::layout;
use crate::resolve::rules::{
    BORDER_COLOR, CORNER_RADIUS, DETAIL_FONT, Derived, FILL_COLOR, Facts, LAYOUT, TEXT_COLOR,
};
use crate::settings::{self, ButtonSettings};

const TARGET: &str = targets::RESOLVE;

/// Resolves button configs against one set of defaults.
///
/// Holds a settings snapshot so callers don't pass it on every call. The
/// free function [`resolve`] is the same computation without the wrapper.
#[derive(Debug, Clone)]
pub struct StyleResolver {
    settings: Arc<ButtonSettings>,
}

impl StyleResolver {
    /// Create a resolver over the given settings.
    pub fn new(settings: Arc<ButtonSettings>) -> Self {
        Self { settings }
    }

    /// Create a resolver over a snapshot of the global settings.
    pub fn from_global() -> Self {
        Self::new(settings::global())
    }

    /// The settings this resolver uses.
    pub fn settings(&self) -> &Arc<ButtonSettings> {
        &self.settings
    }

    /// Swap the settings for later resolutions.
    pub fn set_settings(&mut self, settings: Arc<ButtonSettings>) {
        self.settings = settings;
    }

    /// Resolve one config.
    pub fn resolve(&self, config: &ButtonConfig, backdrop: Option<Color>) -> Appearance {
        resolve(config, &self.settings, backdrop)
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new(Arc::new(ButtonSettings::default()))
    }
}

/// Resolve a config into its appearance.
///
/// Pure and deterministic: equal inputs always give equal output.
pub fn resolve(
    config: &ButtonConfig,
    settings: &ButtonSettings,
    backdrop: Option<Color>,
) -> Appearance {
    let _span = PerfSpan::new("resolve");

    let facts = Facts::new(config, settings, backdrop);
    let (layout, layout_rule) = LAYOUT.decide(&facts);
    let (text_color, text_rule) = TEXT_COLOR.decide(&facts);
    let (fill_color, fill_rule) = FILL_COLOR.decide(&facts);

    let derived = Derived {
        facts,
        layout,
        text_color,
    };
    let (border_color, border_rule) = BORDER_COLOR.decide(&derived);
    let (corner_radius, radius_rule) = CORNER_RADIUS.decide(&derived);
    let detail_font = DETAIL_FONT.evaluate(&derived);

    tracing::trace!(
        target: TARGET,
        layout = layout_rule,
        text_color = text_rule,
        fill_color = fill_rule,
        border_color = border_rule,
        corner_radius = radius_rule,
        "decision rules applied"
    );

    let Derived { facts, .. } = derived;
    let style = facts.style;

    let edge_padding = config
        .edge_padding
        .filter(|p| *p >= 0.0)
        .unwrap_or(settings.default_edge_padding);
    let border_width = config
        .border_width
        .filter(|w| *w > 0.0)
        .unwrap_or(settings.default_border_width);

    let height = match layout {
        ButtonLayout::Circle => config.width,
        _ if config.small => settings.small_height,
        _ => settings.regular_height,
    };
    let size = Size::new(config.width, height);

    let geometry = LayoutGeometry {
        layout,
        edge_padding,
        small: config.small,
        centered: config.centered,
        icon_size: config.icon_size.unwrap_or(settings.default_icon_size),
        label_hidden: matches!(layout, ButtonLayout::Circle | ButtonLayout::Icon),
        detail_hidden: layout == ButtonLayout::Circle || !facts.detail_visible(),
        image_hidden: !config.has_icon,
    };
    let placements = layout::placements(&geometry, Rect::from_size(size));

    let shadow = Shadow {
        opacity: if style == StyleKind::Filled {
            config.shadow_opacity
        } else {
            0.0
        },
        color: config.shadow_color,
        offset: config.shadow_offset,
        radius: config.shadow_radius,
    };

    let font = if config.small {
        settings.small_font
    } else {
        settings.regular_font
    };

    Appearance {
        style,
        destructive: config.destructive,
        layout,
        size,
        fill_color,
        text_color,
        border_color,
        border_width,
        corner_radius,
        edge_padding,
        font,
        detail_font,
        geometry,
        placements,
        shadow,
        backdrop: facts.backdrop,
    }
}

/// The rule that decided each precedence-sensitive property, for debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub layout: &'static str,
    pub text_color: &'static str,
    pub fill_color: &'static str,
    pub border_color: &'static str,
    pub corner_radius: &'static str,
    pub detail_font: &'static str,
}

/// Name the rule behind each decided property.
pub fn explain(
    config: &ButtonConfig,
    settings: &ButtonSettings,
    backdrop: Option<Color>,
) -> Explanation {
    let facts = Facts::new(config, settings, backdrop);
    let (layout, layout_rule) = LAYOUT.decide(&facts);
    let (text_color, text_rule) = TEXT_COLOR.decide(&facts);
    let fill_rule = FILL_COLOR.decide(&facts).1;
    let derived = Derived {
        facts,
        layout,
        text_color,
    };

    Explanation {
        layout: layout_rule,
        text_color: text_rule,
        fill_color: fill_rule,
        border_color: BORDER_COLOR.decide(&derived).1,
        corner_radius: CORNER_RADIUS.decide(&derived).1,
        detail_font: DETAIL_FONT.decide(&derived).1,
    }
}
