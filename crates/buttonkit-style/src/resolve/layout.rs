//! Subview frames for each layout.

use crate::appearance::{
    ButtonLayout, ImagePlacement, LabelPlacement, LayoutGeometry, Placements, Resizing, TextAlign,
};
use crate::geometry::{Rect, Size};

/// Icons in small buttons are drawn at this fraction of their size.
pub const SMALL_ICON_SCALE: f32 = 0.8;

/// Share of the height given to the title in the centered detail layout.
const CENTER_TITLE_HEIGHT: f32 = 0.7;
/// Where the detail label starts in the centered detail layout.
const CENTER_DETAIL_TOP: f32 = 0.36;
const CENTER_DETAIL_HEIGHT: f32 = 0.64;

/// Compute every placement for `bounds`.
pub fn placements(geometry: &LayoutGeometry, bounds: Rect) -> Placements {
    Placements {
        label: label(geometry, bounds),
        detail: detail(geometry, bounds),
        image: image(geometry, bounds),
    }
}

fn label(g: &LayoutGeometry, bounds: Rect) -> LabelPlacement {
    let p = g.edge_padding;
    let (frame, alignment, resizing) = match g.layout {
        ButtonLayout::Icon | ButtonLayout::DetailRight => (
            Rect::new(p, 0.0, bounds.mid_x(), bounds.height()),
            TextAlign::Left,
            Resizing::FILL.with_flexible_right(),
        ),
        ButtonLayout::DetailCenter => (
            Rect::new(
                p,
                0.0,
                bounds.width() - p * 2.0,
                bounds.height() * CENTER_TITLE_HEIGHT,
            ),
            TextAlign::Center,
            Resizing::FILL,
        ),
        ButtonLayout::Regular | ButtonLayout::Circle => {
            (bounds.inset_by(p, 0.0), TextAlign::Center, Resizing::FILL)
        }
    };

    LabelPlacement {
        frame,
        alignment,
        resizing,
        hidden: g.label_hidden,
    }
}

fn detail(g: &LayoutGeometry, bounds: Rect) -> LabelPlacement {
    let p = g.edge_padding;
    if g.layout == ButtonLayout::DetailCenter {
        return LabelPlacement {
            frame: Rect::new(
                p,
                bounds.height() * CENTER_DETAIL_TOP,
                bounds.width() - p * 2.0,
                bounds.height() * CENTER_DETAIL_HEIGHT,
            ),
            alignment: TextAlign::Center,
            resizing: Resizing::FILL,
            hidden: g.detail_hidden,
        };
    }

    let padding = if g.small { p / 1.5 } else { p };
    LabelPlacement {
        frame: Rect::new(
            bounds.mid_x(),
            0.0,
            bounds.mid_x() - padding,
            bounds.height(),
        ),
        alignment: TextAlign::Right,
        resizing: Resizing::FILL.with_flexible_left(),
        hidden: g.detail_hidden,
    }
}

/// The icon's drawn size.
pub fn icon_size(g: &LayoutGeometry) -> Size {
    if g.small {
        g.icon_size.scaled(SMALL_ICON_SCALE)
    } else {
        g.icon_size
    }
}

fn image(g: &LayoutGeometry, bounds: Rect) -> ImagePlacement {
    let size = icon_size(g);
    let (frame, resizing) = if g.centered {
        (Rect::from_center(bounds.center(), size), Resizing::CENTER)
    } else {
        let padding = if g.small {
            g.edge_padding / 2.0
        } else {
            g.edge_padding
        };
        (
            Rect::new(
                bounds.width() - size.width - padding,
                (bounds.height() - size.height) / 2.0,
                size.width,
                size.height,
            ),
            Resizing::PIN_RIGHT,
        )
    };

    ImagePlacement {
        frame,
        resizing,
        hidden: g.image_hidden,
    }
}
