//! Ordered decision tables for every precedence-sensitive property.
//!
//! Each table is a list of named rules evaluated top to bottom; the first
//! rule that produces a value wins, and `otherwise` covers the rest. Keeping
//! precedence as data makes every resolved value traceable to one rule name.

use crate::appearance::ButtonLayout;
use crate::color::Color;
use crate::config::{ButtonConfig, StyleKind};
use crate::font::FontSpec;
use crate::settings::ButtonSettings;

/// The flat set of facts the first-stage tables decide on.
#[derive(Debug, Clone)]
pub struct Facts {
    pub style: StyleKind,
    pub destructive: bool,
    pub small: bool,
    pub centered: bool,
    pub circle: bool,
    pub width: f32,
    pub has_icon: bool,
    pub has_detail_text: bool,
    pub color: Option<Color>,
    pub text_color: Option<Color>,
    pub border_color: Option<Color>,
    pub corner_radius: Option<f32>,
    /// Opaque backdrop, if the host supplied one.
    pub backdrop: Option<Color>,
    pub settings: ButtonSettings,
}

impl Facts {
    pub fn new(config: &ButtonConfig, settings: &ButtonSettings, backdrop: Option<Color>) -> Self {
        Self {
            style: config.style_kind(),
            destructive: config.destructive,
            small: config.small,
            centered: config.centered,
            circle: config.circle,
            width: config.width,
            has_icon: config.has_icon,
            has_detail_text: config.has_detail_text,
            color: config.color,
            text_color: config.text_color,
            border_color: config.border_color,
            corner_radius: config.corner_radius,
            backdrop: backdrop.filter(|c| !c.is_clear()),
            settings: settings.clone(),
        }
    }

    /// Border and plain buttons share their color rules.
    pub fn is_outline(&self) -> bool {
        matches!(self.style, StyleKind::Border | StyleKind::Plain)
    }

    /// Detail text shows only when set and not displaced by an icon.
    pub fn detail_visible(&self) -> bool {
        self.has_detail_text && !self.has_icon
    }
}

/// Facts plus the values decided in the first stage.
#[derive(Debug, Clone)]
pub struct Derived {
    pub facts: Facts,
    pub layout: ButtonLayout,
    pub text_color: Color,
}

/// One named rule.
pub struct Rule<I: 'static, T: 'static> {
    pub name: &'static str,
    pub pick: fn(&I) -> Option<T>,
}

impl<I: 'static, T: 'static> Rule<I, T> {
    pub const fn new(name: &'static str, pick: fn(&I) -> Option<T>) -> Self {
        Self { name, pick }
    }
}

/// An ordered rule list with a total fallback.
pub struct DecisionTable<I: 'static, T: 'static> {
    pub name: &'static str,
    pub rules: &'static [Rule<I, T>],
    pub otherwise: fn(&I) -> T,
}

impl<I: 'static, T: 'static> DecisionTable<I, T> {
    /// Evaluate the table, returning the value and the name of the rule that
    /// produced it.
    pub fn decide(&self, input: &I) -> (T, &'static str) {
        self.rules
            .iter()
            .find_map(|rule| (rule.pick)(input).map(|value| (value, rule.name)))
            .unwrap_or_else(|| ((self.otherwise)(input), "otherwise"))
    }

    /// Evaluate the table, discarding the rule name.
    pub fn evaluate(&self, input: &I) -> T {
        self.decide(input).0
    }

    /// Names of the rules in evaluation order.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name)
    }
}

// Layout: circle > icon > detail+centered > detail > regular.

fn layout_circle(f: &Facts) -> Option<ButtonLayout> {
    f.circle.then_some(ButtonLayout::Circle)
}

fn layout_icon(f: &Facts) -> Option<ButtonLayout> {
    f.has_icon.then_some(ButtonLayout::Icon)
}

fn layout_detail_center(f: &Facts) -> Option<ButtonLayout> {
    (f.detail_visible() && f.centered).then_some(ButtonLayout::DetailCenter)
}

fn layout_detail_right(f: &Facts) -> Option<ButtonLayout> {
    f.detail_visible().then_some(ButtonLayout::DetailRight)
}

pub static LAYOUT: DecisionTable<Facts, ButtonLayout> = DecisionTable {
    name: "layout",
    rules: &[
        Rule::new("circle", layout_circle),
        Rule::new("icon", layout_icon),
        Rule::new("detail-center", layout_detail_center),
        Rule::new("detail-right", layout_detail_right),
    ],
    otherwise: |_| ButtonLayout::Regular,
};

fn text_destructive_outline(f: &Facts) -> Option<Color> {
    (f.destructive && f.is_outline()).then_some(f.settings.destructive_color)
}

fn text_destructive_filled(f: &Facts) -> Option<Color> {
    f.destructive.then_some(f.settings.destructive_text_color)
}

fn text_outline_explicit(f: &Facts) -> Option<Color> {
    f.text_color.filter(|_| f.is_outline())
}

fn text_outline_color(f: &Facts) -> Option<Color> {
    f.color.filter(|_| f.is_outline())
}

fn text_outline_backdrop(f: &Facts) -> Option<Color> {
    if f.is_outline() && f.settings.contrast_against_backdrop {
        f.backdrop.map(|b| b.contrast(1.0))
    } else {
        None
    }
}

fn text_outline_default(f: &Facts) -> Option<Color> {
    f.is_outline().then_some(f.settings.default_color)
}

fn text_filled_explicit(f: &Facts) -> Option<Color> {
    f.text_color
}

fn text_settings_default(f: &Facts) -> Option<Color> {
    f.settings.default_text_color
}

fn text_color_contrast(f: &Facts) -> Option<Color> {
    f.color.map(|c| c.contrast(1.0))
}

pub static TEXT_COLOR: DecisionTable<Facts, Color> = DecisionTable {
    name: "text-color",
    rules: &[
        Rule::new("destructive-outline", text_destructive_outline),
        Rule::new("destructive-filled", text_destructive_filled),
        Rule::new("outline-text-color", text_outline_explicit),
        Rule::new("outline-color", text_outline_color),
        Rule::new("outline-backdrop-contrast", text_outline_backdrop),
        Rule::new("outline-default", text_outline_default),
        Rule::new("text-color", text_filled_explicit),
        Rule::new("default-text-color", text_settings_default),
        Rule::new("color-contrast", text_color_contrast),
    ],
    otherwise: |f| f.settings.default_color.contrast(1.0),
};

fn fill_outline(f: &Facts) -> Option<Color> {
    f.is_outline().then_some(Color::CLEAR)
}

fn fill_destructive(f: &Facts) -> Option<Color> {
    f.destructive.then_some(f.settings.destructive_color)
}

fn fill_color(f: &Facts) -> Option<Color> {
    f.color
}

pub static FILL_COLOR: DecisionTable<Facts, Color> = DecisionTable {
    name: "fill-color",
    rules: &[
        Rule::new("outline-clear", fill_outline),
        Rule::new("destructive", fill_destructive),
        Rule::new("color", fill_color),
    ],
    otherwise: |f| f.settings.default_color,
};

fn border_not_bordered(d: &Derived) -> Option<Color> {
    (d.facts.style != StyleKind::Border).then_some(Color::CLEAR)
}

fn border_destructive(d: &Derived) -> Option<Color> {
    d.facts
        .destructive
        .then_some(d.facts.settings.destructive_color)
}

fn border_explicit(d: &Derived) -> Option<Color> {
    d.facts.border_color
}

pub static BORDER_COLOR: DecisionTable<Derived, Color> = DecisionTable {
    name: "border-color",
    rules: &[
        Rule::new("not-bordered", border_not_bordered),
        Rule::new("destructive", border_destructive),
        Rule::new("border-color", border_explicit),
    ],
    otherwise: |d| d.text_color,
};

fn radius_circle(d: &Derived) -> Option<f32> {
    (d.layout == ButtonLayout::Circle).then_some(d.facts.width / 2.0)
}

/// Negative radii count as unset.
fn radius_explicit(d: &Derived) -> Option<f32> {
    d.facts.corner_radius.filter(|r| *r >= 0.0)
}

fn radius_small(d: &Derived) -> Option<f32> {
    d.facts
        .small
        .then_some(d.facts.settings.small_corner_radius)
}

pub static CORNER_RADIUS: DecisionTable<Derived, f32> = DecisionTable {
    name: "corner-radius",
    rules: &[
        Rule::new("circle", radius_circle),
        Rule::new("corner-radius", radius_explicit),
        Rule::new("small", radius_small),
    ],
    otherwise: |d| d.facts.settings.regular_corner_radius,
};

fn detail_font_small_centered(d: &Derived) -> Option<FontSpec> {
    (d.facts.small && d.layout == ButtonLayout::DetailCenter)
        .then_some(d.facts.settings.small_centered_detail_font)
}

fn detail_font_centered(d: &Derived) -> Option<FontSpec> {
    (d.layout == ButtonLayout::DetailCenter)
        .then_some(d.facts.settings.regular_centered_detail_font)
}

fn detail_font_small(d: &Derived) -> Option<FontSpec> {
    d.facts
        .small
        .then_some(d.facts.settings.small_detail_font)
}

pub static DETAIL_FONT: DecisionTable<Derived, FontSpec> = DecisionTable {
    name: "detail-font",
    rules: &[
        Rule::new("small-centered", detail_font_small_centered),
        Rule::new("centered", detail_font_centered),
        Rule::new("small", detail_font_small),
    ],
    otherwise: |d| d.facts.settings.regular_detail_font,
};
