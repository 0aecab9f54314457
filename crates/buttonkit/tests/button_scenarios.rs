//! End-to-end button scenarios on a manual clock.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use buttonkit::button::{OVERLAY_ALPHA, RELEASE_DURATION};
use buttonkit::prelude::*;

struct Harness {
    button: Button,
    clock: ManualClock,
    animations: RecordingAnimationRunner,
    selections: Arc<AtomicUsize>,
}

impl Harness {
    fn new(config: ButtonConfig) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();

        let clock = ManualClock::new();
        let animations = RecordingAnimationRunner::new();
        let selections = Arc::new(AtomicUsize::new(0));
        let counter = selections.clone();

        let button = Button::new(config)
            .with_resolver(StyleResolver::new(Arc::new(ButtonSettings::default())))
            .with_clock(Arc::new(clock.clone()))
            .with_animation_runner(animations.clone())
            .with_text("Continue")
            .with_on_select(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        Self {
            button,
            clock,
            animations,
            selections,
        }
    }

    fn selections(&self) -> usize {
        self.selections.load(Ordering::SeqCst)
    }

    fn wait(&mut self, millis: u64) {
        self.clock.advance(Duration::from_millis(millis));
        self.button.advance();
    }
}

#[test]
fn tap_selects_once_then_stops_spinner() {
    let mut h = Harness::new(ButtonConfig::new(200.0));

    h.button.tap();
    assert_eq!(h.selections(), 1);
    assert_eq!(h.button.state(), InteractionState::Spinning);

    h.button.tap();
    assert_eq!(h.selections(), 1);
    assert_eq!(h.button.state(), InteractionState::Idle);
    assert!(h.button.visibility().label);
}

#[test]
fn finger_tap_through_gesture_source() {
    let mut h = Harness::new(ButtonConfig::new(200.0).with_style(ButtonStyle::Border));
    let mut touches = VecDeque::from([TapEvent::Down, TapEvent::Up, TapEvent::Complete]);

    assert_eq!(h.button.pump(&mut touches), 3);
    assert!(touches.is_empty());
    assert_eq!(h.selections(), 1);
    assert_eq!(h.button.transform(), Scale::IDENTITY);
    assert_eq!(
        h.animations.requests_for(AnimationTarget::Transform).len(),
        2,
        "press and release"
    );
}

#[test]
fn simulated_tap_releases_feedback_after_hold() {
    let mut h = Harness::new(ButtonConfig::new(200.0));

    h.button.simulate_tap();
    assert_eq!(h.selections(), 1);
    assert!(h.button.is_spinning());
    assert!(h.button.is_displaying_feedback());
    assert_eq!(h.button.transform(), Scale::new(0.99, 0.97));

    h.wait(99);
    assert!(h.button.is_displaying_feedback());

    h.wait(1);
    assert!(!h.button.is_displaying_feedback());
    assert_eq!(h.button.transform(), Scale::IDENTITY);
    assert_eq!(h.button.state(), InteractionState::Spinning);
    assert_eq!(h.selections(), 1, "release must not re-fire selection");
}

#[test]
fn simulated_tap_while_spinning_stops() {
    let mut h = Harness::new(ButtonConfig::new(200.0));
    h.button.simulate_tap();
    h.wait(100);

    h.button.simulate_tap();
    assert_eq!(h.button.state(), InteractionState::Idle);
    assert_eq!(h.selections(), 1);
    assert!(h.button.spinner().is_hidden());
}

#[test]
fn plain_overlay_fades_then_goes_away() {
    let mut h = Harness::new(ButtonConfig::new(200.0).with_style(ButtonStyle::Plain));

    h.button.tap_down();
    assert_eq!(h.button.state(), InteractionState::FeedbackActive);
    let overlay = *h.button.feedback_overlay().expect("overlay shown");
    assert_eq!(overlay.alpha, OVERLAY_ALPHA);
    assert_eq!(overlay.border_width, 2.0);
    assert_eq!(overlay.border_color, h.button.appearance().text_color);
    assert_eq!(overlay.corner_radius, h.button.appearance().corner_radius);
    assert_eq!(overlay.frame, h.button.appearance().bounds());

    h.button.tap_up();
    assert_eq!(h.button.state(), InteractionState::Idle);
    let fade = h
        .animations
        .running(AnimationTarget::OverlayAlpha)
        .expect("fade requested");
    assert_eq!(fade.to, AnimatedValue::Alpha(0.0));
    assert_eq!(fade.duration, RELEASE_DURATION);
    assert!(h.button.feedback_overlay().is_some_and(|o| o.fading));

    h.wait(999);
    assert!(h.button.feedback_overlay().is_some());
    h.wait(1);
    assert!(h.button.feedback_overlay().is_none());
}

#[test]
fn disabled_feedback_still_selects() {
    let mut h = Harness::new(ButtonConfig::new(200.0).with_feedback(false));
    h.button.tap_down();
    assert_eq!(h.button.state(), InteractionState::Idle);
    h.button.tap_up();
    h.button.tap();
    assert_eq!(h.selections(), 1);
    assert!(h.animations.requests_for(AnimationTarget::Transform).is_empty());
}

#[test]
fn spinner_dots_start_staggered() {
    let mut h = Harness::new(ButtonConfig::new(200.0).with_size(ButtonSize::Small));
    h.button.start_spinner();
    assert!(h.button.spinner().dots().iter().all(|d| d.diameter == 5.0));
    assert_eq!(h.button.spinner().frame(), Rect::new(90.0, 10.0, 20.0, 20.0));

    let started = |h: &Harness| {
        (0..3)
            .filter(|i| h.animations.running(AnimationTarget::SpinnerDot(*i)).is_some())
            .count()
    };
    assert_eq!(started(&h), 1);
    assert_eq!(h.button.time_until_next(), Some(Duration::from_millis(200)));
    h.wait(200);
    assert_eq!(started(&h), 2);
    h.wait(200);
    assert_eq!(started(&h), 3);

    h.button.stop_spinner();
    assert_eq!(started(&h), 0);
    assert_eq!(h.selections(), 0);
}

#[test]
fn cancel_resets_feedback() {
    let mut h = Harness::new(ButtonConfig::new(200.0));
    h.button.handle_tap_event(TapEvent::Down);
    h.button.handle_tap_event(TapEvent::Cancel);
    assert_eq!(h.button.state(), InteractionState::Idle);
    assert_eq!(h.button.transform(), Scale::IDENTITY);
    assert_eq!(h.selections(), 0);
}
