//! The styled button.
//!
//! [`Button`] ties the pieces together: it resolves its [`ButtonConfig`] into
//! an [`Appearance`], feeds tap events through the
//! [`InteractionStateMachine`], and carries out the resulting effects on its
//! spinner, its animation runner and its selection listeners.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use buttonkit::prelude::*;
//!
//! let mut button = Button::new(ButtonConfig::new(200.0).with_style(ButtonStyle::Border))
//!     .with_text("Continue");
//!
//! let taps = Arc::new(AtomicUsize::new(0));
//! let counter = taps.clone();
//! button.tapped().connect(move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! button.tap();
//! assert_eq!(taps.load(Ordering::SeqCst), 1);
//! assert!(button.is_spinning());
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use buttonkit_core::logging::targets;
use buttonkit_core::{Clock, Dispatcher, Signal, SystemClock, TimerId};
use buttonkit_style::appearance::Appearance;
use buttonkit_style::color::Color;
use buttonkit_style::config::ButtonConfig;
use buttonkit_style::geometry::Rect;
use buttonkit_style::resolve::StyleResolver;

use crate::animation::{
    AnimatedValue, AnimationRequest, AnimationRunner, AnimationTarget, Easing, NullAnimationRunner,
    Scale,
};
use crate::gesture::{GestureSource, TapEvent};
use crate::interaction::{
    Effect, FeedbackKind, InteractionContext, InteractionEvent, InteractionState,
    InteractionStateMachine,
};
use crate::selection::{SelectionBlock, SelectionDelegate};
use crate::spinner::Spinner;

/// Scale applied while a button is pressed.
pub const PRESS_SCALE: Scale = Scale::new(0.99, 0.97);
pub const PRESS_DURATION: Duration = Duration::from_millis(50);
/// Duration of every feedback release animation.
pub const RELEASE_DURATION: Duration = Duration::from_millis(1000);
pub const OVERLAY_ALPHA: f32 = 0.15;
pub const OVERLAY_BORDER_WIDTH: f32 = 2.0;

static NEXT_BUTTON_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique button identifier, passed to `tapped` listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ButtonId(u64);

impl ButtonId {
    fn next() -> Self {
        Self(NEXT_BUTTON_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Which parts of the button are currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub label: bool,
    pub detail: bool,
    pub image: bool,
    pub spinner: bool,
}

/// The translucent layer shown on plain buttons while pressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackOverlay {
    pub frame: Rect,
    pub corner_radius: f32,
    pub border_color: Color,
    pub border_width: f32,
    /// Model alpha: 0.15 while pressed, 0 once the fade-out was requested.
    pub alpha: f32,
    /// Fading out and waiting for removal.
    pub fading: bool,
}

/// Follow-up work scheduled on the button's dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonTask {
    ReleaseFeedback,
    RemoveOverlay,
}

/// A styled, tappable button with tap feedback and a busy spinner.
pub struct Button {
    id: ButtonId,

    text: String,
    detail_text: Option<String>,
    icon: Option<String>,

    config: ButtonConfig,
    backdrop: Option<Color>,
    resolver: StyleResolver,
    appearance: Appearance,

    machine: InteractionStateMachine,
    spinner: Spinner,
    runner: Box<dyn AnimationRunner>,
    tasks: Dispatcher<ButtonTask>,
    release_timer: Option<TimerId>,
    removal_timer: Option<TimerId>,

    transform: Scale,
    saved_transform: Scale,
    overlay: Option<FeedbackOverlay>,

    delegate: Option<Weak<dyn SelectionDelegate>>,
    on_select: Option<SelectionBlock>,
    tapped: Signal<ButtonId>,
}

impl Button {
    /// Create a button resolved against the global settings.
    pub fn new(config: ButtonConfig) -> Self {
        let resolver = StyleResolver::from_global();
        let appearance = resolver.resolve(&config, None);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let mut spinner = Spinner::with_clock(config.size(), appearance.text_color, clock.clone());
        spinner.center_in(appearance.bounds());

        Self {
            id: ButtonId::next(),
            text: String::new(),
            detail_text: None,
            icon: None,
            config,
            backdrop: None,
            resolver,
            appearance,
            machine: InteractionStateMachine::new(),
            spinner,
            runner: Box::new(NullAnimationRunner),
            tasks: Dispatcher::with_clock(clock),
            release_timer: None,
            removal_timer: None,
            transform: Scale::IDENTITY,
            saved_transform: Scale::IDENTITY,
            overlay: None,
            delegate: None,
            on_select: None,
            tapped: Signal::new(),
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Resolve with a specific resolver instead of the global settings.
    pub fn with_resolver(mut self, resolver: StyleResolver) -> Self {
        self.resolver = resolver;
        self.restyle();
        self
    }

    /// Play animations on the given runner.
    pub fn with_animation_runner(mut self, runner: impl AnimationRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Drive timers from the given clock.
    ///
    /// Meant for construction; anything already scheduled is dropped.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.tasks = Dispatcher::with_clock(clock.clone());
        self.release_timer = None;
        self.removal_timer = None;
        let mut spinner = Spinner::with_clock(self.config.size(), self.spinner.color(), clock);
        spinner.center_in(self.appearance.bounds());
        self.spinner = spinner;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_detail_text(mut self, detail: impl Into<String>) -> Self {
        self.set_detail_text(Some(detail.into()));
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.set_icon(Some(icon.into()));
        self
    }

    pub fn with_backdrop(mut self, backdrop: Color) -> Self {
        self.set_backdrop(Some(backdrop));
        self
    }

    pub fn with_delegate<D: SelectionDelegate + 'static>(mut self, delegate: &Arc<D>) -> Self {
        self.set_delegate(delegate);
        self
    }

    pub fn with_on_select(mut self, block: impl Fn(&Button) + Send + Sync + 'static) -> Self {
        self.set_on_select(block);
        self
    }

    // =========================================================================
    // Content & Style
    // =========================================================================

    pub fn id(&self) -> ButtonId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn detail_text(&self) -> Option<&str> {
        self.detail_text.as_deref()
    }

    /// Set or clear the detail text. Switches between detail and plain layouts.
    pub fn set_detail_text(&mut self, detail: Option<String>) {
        let has_detail_text = detail.is_some();
        self.detail_text = detail;
        if self.config.has_detail_text != has_detail_text {
            self.config = self.config.clone().with_detail_text(has_detail_text);
            self.restyle();
        }
    }

    /// Name of the icon image, resolved by the renderer.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn set_icon(&mut self, icon: Option<String>) {
        let has_icon = icon.is_some();
        self.icon = icon;
        if self.config.has_icon != has_icon {
            self.config = self.config.clone().with_icon(has_icon);
            self.restyle();
        }
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Replace the config and re-resolve.
    pub fn set_config(&mut self, config: ButtonConfig) {
        self.config = config;
        self.restyle();
    }

    /// Edit the config and re-resolve.
    ///
    /// ```
    /// use buttonkit::prelude::*;
    ///
    /// let mut button = Button::new(ButtonConfig::new(120.0));
    /// button.update_config(|c| c.with_destructive(true));
    /// assert!(button.appearance().destructive);
    /// ```
    pub fn update_config(&mut self, edit: impl FnOnce(ButtonConfig) -> ButtonConfig) {
        let config = edit(self.config.clone());
        self.set_config(config);
    }

    pub fn backdrop(&self) -> Option<Color> {
        self.backdrop
    }

    /// Set the color behind the button, used for contrast decisions.
    pub fn set_backdrop(&mut self, backdrop: Option<Color>) {
        self.backdrop = backdrop;
        self.restyle();
    }

    pub fn resolver(&self) -> &StyleResolver {
        &self.resolver
    }

    pub fn set_resolver(&mut self, resolver: StyleResolver) {
        self.resolver = resolver;
        self.restyle();
    }

    /// The current resolved appearance.
    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    fn restyle(&mut self) {
        let appearance = self.resolver.resolve(&self.config, self.backdrop);
        self.spinner.set_size(self.config.size());
        self.spinner.center_in(appearance.bounds());
        if self.spinner.is_animating() {
            self.spinner.set_color(appearance.text_color);
        }
        tracing::trace!(
            target: targets::BUTTON,
            id = self.id.0,
            layout = ?appearance.layout,
            style = ?appearance.style,
            "restyled"
        );
        self.appearance = appearance;
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Set the delegate. Held weakly.
    pub fn set_delegate<D: SelectionDelegate + 'static>(&mut self, delegate: &Arc<D>) {
        let weak: Weak<D> = Arc::downgrade(delegate);
        self.delegate = Some(weak);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// Set the selection block, replacing any previous one.
    pub fn set_on_select(&mut self, block: impl Fn(&Button) + Send + Sync + 'static) {
        self.on_select = Some(Arc::new(block));
    }

    pub fn clear_on_select(&mut self) {
        self.on_select = None;
    }

    /// Emitted on selection, after the delegate and the selection block.
    pub fn tapped(&self) -> &Signal<ButtonId> {
        &self.tapped
    }

    fn notify_selection(&self) {
        tracing::debug!(target: targets::BUTTON, id = self.id.0, "selected");

        if let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) {
            delegate.button_selected(self);
        }
        if let Some(block) = self.on_select.clone() {
            block(self);
        }
        self.tapped.emit(self.id);
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    pub fn tap_down(&mut self) {
        self.dispatch(InteractionEvent::TapDown);
    }

    pub fn tap_up(&mut self) {
        self.dispatch(InteractionEvent::TapUp);
    }

    pub fn tap_cancel(&mut self) {
        self.dispatch(InteractionEvent::TapCancel);
    }

    /// A completed tap: selects and starts the spinner, or stops the spinner
    /// if it is already running.
    pub fn tap(&mut self) {
        self.dispatch(InteractionEvent::TapComplete);
    }

    /// Act as if the user tapped: feedback, selection and spinner, with the
    /// feedback released after a short hold.
    pub fn simulate_tap(&mut self) {
        self.dispatch(InteractionEvent::SimulatedTap);
    }

    /// Enter the busy state without notifying listeners.
    pub fn start_spinner(&mut self) {
        self.dispatch(InteractionEvent::StartSpinner);
    }

    /// Leave the busy state.
    pub fn stop_spinner(&mut self) {
        self.dispatch(InteractionEvent::StopSpinner);
    }

    pub fn handle_tap_event(&mut self, event: TapEvent) {
        self.dispatch(event.into());
    }

    /// Drain a gesture source, handling events in order. Returns the number
    /// of events handled.
    pub fn pump(&mut self, source: &mut impl GestureSource) -> usize {
        let mut handled = 0;
        while let Some(event) = source.next_event() {
            self.handle_tap_event(event);
            handled += 1;
        }
        handled
    }

    /// Run everything whose time has come: feedback release, overlay removal
    /// and spinner dot starts.
    pub fn advance(&mut self) {
        for task in self.tasks.take_due() {
            match task {
                ButtonTask::ReleaseFeedback => {
                    self.release_timer = None;
                    self.dispatch(InteractionEvent::FeedbackReleaseDue);
                }
                ButtonTask::RemoveOverlay => {
                    self.removal_timer = None;
                    if self.overlay.is_some_and(|o| o.fading) {
                        self.overlay = None;
                        tracing::trace!(target: targets::BUTTON, id = self.id.0, "overlay removed");
                    }
                }
            }
        }
        self.spinner.advance(self.runner.as_mut());
    }

    /// Time until [`advance`](Self::advance) has work to do.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        match (self.tasks.time_until_next(), self.spinner.time_until_next()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn state(&self) -> InteractionState {
        self.machine.state()
    }

    pub fn is_spinning(&self) -> bool {
        self.machine.is_spinning()
    }

    pub fn is_displaying_feedback(&self) -> bool {
        self.machine.feedback().is_some()
    }

    fn dispatch(&mut self, event: InteractionEvent) {
        let ctx = InteractionContext {
            feedback_enabled: self.config.feedback_enabled,
            style: self.appearance.style,
        };
        for effect in self.machine.handle(event, &ctx) {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ShowFeedback(FeedbackKind::Scale) => self.press_scale(),
            Effect::ShowFeedback(FeedbackKind::ColorOverlay) => self.show_overlay(),
            Effect::ResetFeedback(kind) => {
                if let Some(id) = self.release_timer.take() {
                    self.tasks.cancel(id);
                }
                match kind {
                    FeedbackKind::Scale => self.release_scale(),
                    FeedbackKind::ColorOverlay => self.fade_overlay(),
                }
            }
            Effect::FireSelection => self.notify_selection(),
            Effect::StartSpinner => {
                self.spinner.set_color(self.appearance.text_color);
                self.spinner.start(self.runner.as_mut());
            }
            Effect::StopSpinner => self.spinner.stop(self.runner.as_mut()),
            Effect::ScheduleFeedbackRelease(delay) => {
                if let Some(id) = self.release_timer.take() {
                    self.tasks.cancel(id);
                }
                self.release_timer =
                    Some(self.tasks.post_after(delay, ButtonTask::ReleaseFeedback));
            }
        }
    }

    // =========================================================================
    // Feedback
    // =========================================================================

    fn press_scale(&mut self) {
        self.saved_transform = self.transform;
        let pressed = self.transform.scaled_by(PRESS_SCALE);
        self.runner.animate(AnimationRequest::once(
            AnimationTarget::Transform,
            AnimatedValue::Scale(self.transform),
            AnimatedValue::Scale(pressed),
            PRESS_DURATION,
            Easing::Linear,
        ));
        self.transform = pressed;
    }

    fn release_scale(&mut self) {
        self.runner.animate(AnimationRequest::once(
            AnimationTarget::Transform,
            AnimatedValue::Scale(self.transform),
            AnimatedValue::Scale(self.saved_transform),
            RELEASE_DURATION,
            Easing::EaseOut,
        ));
        self.transform = self.saved_transform;
    }

    fn show_overlay(&mut self) {
        if let Some(id) = self.removal_timer.take() {
            self.tasks.cancel(id);
        }
        self.runner.cancel(AnimationTarget::OverlayAlpha);
        self.overlay = Some(FeedbackOverlay {
            frame: self.appearance.bounds(),
            corner_radius: self.appearance.corner_radius,
            border_color: self.appearance.text_color,
            border_width: OVERLAY_BORDER_WIDTH,
            alpha: OVERLAY_ALPHA,
            fading: false,
        });
    }

    fn fade_overlay(&mut self) {
        let Some(overlay) = self.overlay.as_mut().filter(|o| !o.fading) else {
            return;
        };
        self.runner.animate(AnimationRequest::once(
            AnimationTarget::OverlayAlpha,
            AnimatedValue::Alpha(overlay.alpha),
            AnimatedValue::Alpha(0.0),
            RELEASE_DURATION,
            Easing::EaseOut,
        ));
        overlay.alpha = 0.0;
        overlay.fading = true;
        self.removal_timer =
            Some(self.tasks.post_after(RELEASE_DURATION, ButtonTask::RemoveOverlay));
    }

    // =========================================================================
    // Rendering State
    // =========================================================================

    /// What the renderer should show right now.
    ///
    /// Content is hidden while the spinner runs and otherwise follows the
    /// current appearance.
    pub fn visibility(&self) -> Visibility {
        let spinning = self.spinner.is_animating();
        Visibility {
            label: !spinning && !self.appearance.is_label_hidden(),
            detail: !spinning && !self.appearance.is_detail_hidden(),
            image: !spinning && !self.appearance.is_image_hidden(),
            spinner: spinning,
        }
    }

    /// Model scale transform of the whole button.
    pub fn transform(&self) -> Scale {
        self.transform
    }

    pub fn feedback_overlay(&self) -> Option<&FeedbackOverlay> {
        self.overlay.as_ref()
    }

    pub fn spinner(&self) -> &Spinner {
        &self.spinner
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("state", &self.state())
            .field("layout", &self.appearance.layout)
            .field("style", &self.appearance.style)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use buttonkit_core::ManualClock;
    use buttonkit_style::appearance::ButtonLayout;
    use buttonkit_style::config::ButtonStyle;
    use buttonkit_style::settings::ButtonSettings;
    use parking_lot::Mutex;

    use super::*;
    use crate::animation::RecordingAnimationRunner;

    fn button(config: ButtonConfig) -> (Button, ManualClock, RecordingAnimationRunner) {
        let clock = ManualClock::new();
        let recorder = RecordingAnimationRunner::new();
        let button = Button::new(config)
            .with_resolver(StyleResolver::new(Arc::new(ButtonSettings::default())))
            .with_clock(Arc::new(clock.clone()))
            .with_animation_runner(recorder.clone());
        (button, clock, recorder)
    }

    struct Recorder {
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl SelectionDelegate for Recorder {
        fn button_selected(&self, _button: &Button) {
            self.log.lock().push("delegate");
        }
    }

    #[test]
    fn listeners_fire_in_order() {
        let (mut b, _, _) = button(ButtonConfig::new(100.0));
        let log = Arc::new(Mutex::new(Vec::new()));
        let delegate = Arc::new(Recorder { log: log.clone() });
        b.set_delegate(&delegate);

        let block_log = log.clone();
        b.set_on_select(move |_| block_log.lock().push("block"));
        let signal_log = log.clone();
        b.tapped().connect(move |_| signal_log.lock().push("signal"));

        b.tap();
        assert_eq!(*log.lock(), vec!["delegate", "block", "signal"]);
    }

    #[test]
    fn dropped_delegate_is_skipped() {
        let (mut b, _, _) = button(ButtonConfig::new(100.0));
        let log = Arc::new(Mutex::new(Vec::new()));
        let delegate = Arc::new(Recorder { log: log.clone() });
        b.set_delegate(&delegate);
        drop(delegate);

        b.tap();
        assert!(log.lock().is_empty());
    }

    #[test]
    fn tapped_carries_button_id() {
        let (mut b, _, _) = button(ButtonConfig::new(100.0));
        let seen = Arc::new(Mutex::new(None));
        let slot = seen.clone();
        b.tapped().connect(move |id| *slot.lock() = Some(*id));
        b.tap();
        assert_eq!(*seen.lock(), Some(b.id()));
    }

    #[test]
    fn scale_feedback_round_trip() {
        let (mut b, _, recorder) = button(ButtonConfig::new(100.0));
        b.tap_down();
        assert_eq!(b.transform(), PRESS_SCALE);
        let press = recorder.running(AnimationTarget::Transform).unwrap();
        assert_eq!(press.duration, PRESS_DURATION);

        b.tap_up();
        assert_eq!(b.transform(), Scale::IDENTITY);
        let release = recorder.running(AnimationTarget::Transform).unwrap();
        assert_eq!(release.duration, RELEASE_DURATION);
        assert_eq!(release.easing, Easing::EaseOut);
        assert_eq!(b.state(), InteractionState::Idle);
    }

    #[test]
    fn spinner_hides_content_and_restores_from_current_appearance() {
        let (mut b, _, _) = button(ButtonConfig::new(200.0));
        b.start_spinner();
        let hidden = b.visibility();
        assert!(!hidden.label && !hidden.detail && !hidden.image && hidden.spinner);
        assert_eq!(b.spinner().color(), b.appearance().text_color);

        b.set_detail_text(Some("$4.99".into()));
        assert!(!b.visibility().detail);

        b.stop_spinner();
        let shown = b.visibility();
        assert!(shown.label && shown.detail && !shown.image && !shown.spinner);
    }

    #[test]
    fn programmatic_spinner_does_not_select() {
        let (mut b, _, _) = button(ButtonConfig::new(100.0));
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        b.set_on_select(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        b.start_spinner();
        b.stop_spinner();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn content_setters_restyle() {
        let (mut b, _, _) = button(ButtonConfig::new(200.0));
        assert_eq!(b.appearance().layout, ButtonLayout::Regular);
        b.set_detail_text(Some("detail".into()));
        assert_eq!(b.appearance().layout, ButtonLayout::DetailRight);
        b.set_icon(Some("chevron".into()));
        assert_eq!(b.appearance().layout, ButtonLayout::Icon);
        b.set_icon(None);
        b.set_detail_text(None);
        assert_eq!(b.appearance().layout, ButtonLayout::Regular);
    }

    #[test]
    fn style_change_switches_feedback_kind() {
        let (mut b, _, _) = button(ButtonConfig::new(100.0));
        b.update_config(|c| c.with_style(ButtonStyle::Plain));
        b.tap_down();
        assert!(b.feedback_overlay().is_some());
        assert_eq!(b.transform(), Scale::IDENTITY);
    }

    #[test]
    fn new_overlay_cancels_pending_removal() {
        let (mut b, clock, _) = button(ButtonConfig::new(100.0).with_plain(true));
        b.tap_down();
        b.tap_up();
        clock.advance(Duration::from_millis(500));
        b.tap_down();

        clock.advance(Duration::from_millis(600));
        b.advance();
        let overlay = b.feedback_overlay().expect("second overlay kept");
        assert!(!overlay.fading);
        assert_eq!(overlay.alpha, OVERLAY_ALPHA);
    }
}
