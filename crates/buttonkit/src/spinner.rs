//! The three-dot busy indicator.

use std::sync::Arc;
use std::time::Duration;

use buttonkit_core::logging::targets;
use buttonkit_core::{Clock, Dispatcher, SystemClock};
use buttonkit_style::appearance::Resizing;
use buttonkit_style::color::Color;
use buttonkit_style::config::ButtonSize;
use buttonkit_style::geometry::{Point, Rect, Size};

use crate::animation::{
    AnimatedValue, AnimationRequest, AnimationRunner, AnimationTarget, Easing, Scale,
};

/// Side length of the spinner's square frame.
pub const SPINNER_SIDE: f32 = 20.0;
/// Delay between consecutive dots starting to pulse.
pub const DOT_STAGGER: Duration = Duration::from_millis(200);
/// One direction of a dot's pulse.
pub const DOT_PULSE: Duration = Duration::from_millis(600);
/// Dot scale at the bottom of a pulse.
pub const DOT_MIN_SCALE: f32 = 0.5;

pub const DOT_COUNT: usize = 3;

/// One spinner dot, in spinner coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub center: Point,
    pub diameter: f32,
    /// Model scale; the runner animates between this and 1.0 while pulsing.
    pub scale: f32,
    pub color: Color,
    pub resizing: Resizing,
}

impl Dot {
    pub fn frame(&self) -> Rect {
        Rect::from_center(self.center, Size::new(self.diameter, self.diameter))
    }
}

fn dot_diameter(size: ButtonSize) -> f32 {
    match size {
        ButtonSize::Regular => 7.0,
        ButtonSize::Small => 5.0,
    }
}

/// Three dots that pulse one after another while a button is busy.
///
/// The outer dots sit just outside the 20×20 frame, so the spinner must not
/// be clipped. Each dot starts pulsing from its own one-shot timer; call
/// [`advance`](Self::advance) to let due timers fire.
pub struct Spinner {
    frame: Rect,
    size: ButtonSize,
    color: Color,
    dots: [Dot; DOT_COUNT],
    animating: bool,
    /// Pending dot starts, keyed by dot index.
    starts: Dispatcher<usize>,
}

impl Spinner {
    /// A hidden spinner on the system clock.
    pub fn new(size: ButtonSize, color: Color) -> Self {
        Self::with_clock(size, color, Arc::new(SystemClock))
    }

    /// A hidden spinner on a specific clock.
    pub fn with_clock(size: ButtonSize, color: Color, clock: Arc<dyn Clock>) -> Self {
        let frame = Rect::from_size(Size::new(SPINNER_SIDE, SPINNER_SIDE));
        Self {
            frame,
            size,
            color,
            dots: layout_dots(frame, size, color),
            animating: false,
            starts: Dispatcher::with_clock(clock),
        }
    }

    /// The spinner's frame in button coordinates.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Center the spinner in `bounds`.
    pub fn center_in(&mut self, bounds: Rect) {
        self.frame = Rect::from_center(bounds.center(), self.frame.size);
    }

    pub fn dots(&self) -> &[Dot; DOT_COUNT] {
        &self.dots
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Recolor every dot.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        for dot in &mut self.dots {
            dot.color = color;
        }
    }

    pub fn size(&self) -> ButtonSize {
        self.size
    }

    /// Change the dot size. Takes effect on the next start.
    pub fn set_size(&mut self, size: ButtonSize) {
        if self.size == size {
            return;
        }
        self.size = size;
        if !self.animating {
            self.dots = layout_dots(self.local_bounds(), size, self.color);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Hidden whenever not animating.
    pub fn is_hidden(&self) -> bool {
        !self.animating
    }

    /// Show the spinner and start the staggered pulse.
    pub fn start(&mut self, runner: &mut dyn AnimationRunner) {
        if self.animating {
            return;
        }
        self.animating = true;

        self.dots = layout_dots(self.local_bounds(), self.size, self.color);
        for (index, dot) in self.dots.iter_mut().enumerate() {
            dot.scale = DOT_MIN_SCALE;
            self.starts.post_after(DOT_STAGGER * index as u32, index);
        }
        tracing::debug!(target: targets::SPINNER, size = ?self.size, "started");

        // The first dot has no delay.
        self.advance(runner);
    }

    /// Hide the spinner and stop every dot.
    pub fn stop(&mut self, runner: &mut dyn AnimationRunner) {
        if !self.animating {
            return;
        }
        self.animating = false;

        self.starts.clear();
        for (index, dot) in self.dots.iter_mut().enumerate() {
            runner.cancel(AnimationTarget::SpinnerDot(index));
            dot.scale = 1.0;
        }
        tracing::debug!(target: targets::SPINNER, "stopped");
    }

    /// Start pulsing every dot whose delay has elapsed. Returns how many
    /// started.
    pub fn advance(&mut self, runner: &mut dyn AnimationRunner) -> usize {
        let due = self.starts.take_due();
        for &index in &due {
            runner.animate(
                AnimationRequest::once(
                    AnimationTarget::SpinnerDot(index),
                    AnimatedValue::Scale(Scale::uniform(DOT_MIN_SCALE)),
                    AnimatedValue::Scale(Scale::IDENTITY),
                    DOT_PULSE,
                    Easing::EaseInOut,
                )
                .autoreversing(),
            );
            tracing::trace!(target: targets::SPINNER, dot = index, "pulse");
        }
        due.len()
    }

    /// Time until the next dot starts, if any are waiting.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.starts.time_until_next()
    }

    fn local_bounds(&self) -> Rect {
        Rect::from_size(self.frame.size)
    }
}

impl std::fmt::Debug for Spinner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spinner")
            .field("frame", &self.frame)
            .field("size", &self.size)
            .field("animating", &self.animating)
            .field("pending_starts", &self.starts.pending_count())
            .finish()
    }
}

fn layout_dots(bounds: Rect, size: ButtonSize, color: Color) -> [Dot; DOT_COUNT] {
    let diameter = dot_diameter(size);
    let dot = |center: Point, resizing: Resizing| Dot {
        center,
        diameter,
        scale: 1.0,
        color,
        resizing,
    };
    let pinned = Resizing {
        flexible_width: false,
        flexible_height: false,
        flexible_left_margin: false,
        flexible_right_margin: false,
        flexible_top_margin: true,
        flexible_bottom_margin: true,
    };

    [
        dot(
            Point::new(-diameter / 2.0, bounds.mid_y()),
            pinned.with_flexible_right(),
        ),
        dot(Point::new(bounds.mid_x(), bounds.mid_y()), Resizing::CENTER),
        dot(
            Point::new(bounds.max_x() + diameter / 2.0, bounds.mid_y()),
            pinned.with_flexible_left(),
        ),
    ]
}
