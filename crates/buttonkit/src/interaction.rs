//! The tap interaction state machine.
//!
//! [`InteractionStateMachine`] decides what a tap event means and returns the
//! resulting [`Effect`]s; it never touches views, timers or listeners. The
//! button executes the effects in order.
//!
//! Feedback and the busy spinner are tracked separately because a simulated
//! tap shows both at once. [`InteractionState`] reports the combination with
//! spinning taking precedence.

use std::time::Duration;

use buttonkit_core::logging::targets;
use buttonkit_style::config::StyleKind;

use crate::gesture::TapEvent;

/// How long a simulated tap holds its feedback.
pub const SIMULATED_TAP_HOLD: Duration = Duration::from_millis(100);

/// Visual tap feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    /// Shrink the button slightly.
    Scale,
    /// Lay a translucent overlay on top of the button.
    ColorOverlay,
}

impl FeedbackKind {
    /// Plain buttons have no body to shrink, so they get an overlay.
    pub fn for_style(style: StyleKind) -> Self {
        match style {
            StyleKind::Plain => FeedbackKind::ColorOverlay,
            StyleKind::Filled | StyleKind::Border => FeedbackKind::Scale,
        }
    }
}

/// Reported interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    FeedbackActive,
    Spinning,
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    TapDown,
    TapUp,
    TapCancel,
    TapComplete,
    /// A programmatic tap: feedback, selection and spinner in one go.
    SimulatedTap,
    /// The hold after a simulated tap has elapsed.
    FeedbackReleaseDue,
    /// Programmatic spinner start. Never fires selection listeners.
    StartSpinner,
    /// Programmatic spinner stop.
    StopSpinner,
}

impl From<TapEvent> for InteractionEvent {
    fn from(event: TapEvent) -> Self {
        match event {
            TapEvent::Down => InteractionEvent::TapDown,
            TapEvent::Up => InteractionEvent::TapUp,
            TapEvent::Cancel => InteractionEvent::TapCancel,
            TapEvent::Complete => InteractionEvent::TapComplete,
        }
    }
}

/// Side effects for the button to carry out, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ShowFeedback(FeedbackKind),
    ResetFeedback(FeedbackKind),
    FireSelection,
    StartSpinner,
    StopSpinner,
    ScheduleFeedbackRelease(Duration),
}

/// What the state machine needs to know about the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionContext {
    pub feedback_enabled: bool,
    pub style: StyleKind,
}

/// Decides the effects of each tap event.
#[derive(Debug, Clone, Default)]
pub struct InteractionStateMachine {
    /// Feedback currently showing, with the kind chosen when it started.
    feedback: Option<FeedbackKind>,
    spinning: bool,
}

impl InteractionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        if self.spinning {
            InteractionState::Spinning
        } else if self.feedback.is_some() {
            InteractionState::FeedbackActive
        } else {
            InteractionState::Idle
        }
    }

    /// The feedback currently showing.
    pub fn feedback(&self) -> Option<FeedbackKind> {
        self.feedback
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// Apply one event and return the effects to execute.
    pub fn handle(&mut self, event: InteractionEvent, ctx: &InteractionContext) -> Vec<Effect> {
        let before = self.state();
        let mut effects = Vec::new();

        match event {
            InteractionEvent::TapDown => {
                self.show_feedback(ctx, &mut effects);
            }
            InteractionEvent::TapUp
            | InteractionEvent::TapCancel
            | InteractionEvent::FeedbackReleaseDue => self.reset_feedback(&mut effects),
            InteractionEvent::TapComplete => {
                if self.spinning {
                    self.stop_spinner(&mut effects);
                } else {
                    effects.push(Effect::FireSelection);
                    self.start_spinner(&mut effects);
                }
            }
            InteractionEvent::SimulatedTap => {
                if self.spinning {
                    self.stop_spinner(&mut effects);
                } else {
                    let showed = self.show_feedback(ctx, &mut effects);
                    effects.push(Effect::FireSelection);
                    self.start_spinner(&mut effects);
                    if showed {
                        effects.push(Effect::ScheduleFeedbackRelease(SIMULATED_TAP_HOLD));
                    }
                }
            }
            InteractionEvent::StartSpinner => self.start_spinner(&mut effects),
            InteractionEvent::StopSpinner => self.stop_spinner(&mut effects),
        }

        if effects.is_empty() {
            tracing::trace!(target: targets::INTERACTION, ?event, state = ?before, "ignored");
        } else {
            tracing::debug!(
                target: targets::INTERACTION,
                ?event,
                from = ?before,
                to = ?self.state(),
                ?effects,
                "transition"
            );
        }
        effects
    }

    fn show_feedback(&mut self, ctx: &InteractionContext, effects: &mut Vec<Effect>) -> bool {
        if !ctx.feedback_enabled || self.feedback.is_some() {
            return false;
        }
        let kind = FeedbackKind::for_style(ctx.style);
        self.feedback = Some(kind);
        effects.push(Effect::ShowFeedback(kind));
        true
    }

    fn reset_feedback(&mut self, effects: &mut Vec<Effect>) {
        if let Some(kind) = self.feedback.take() {
            effects.push(Effect::ResetFeedback(kind));
        }
    }

    fn start_spinner(&mut self, effects: &mut Vec<Effect>) {
        if !self.spinning {
            self.spinning = true;
            effects.push(Effect::StartSpinner);
        }
    }

    fn stop_spinner(&mut self, effects: &mut Vec<Effect>) {
        if self.spinning {
            self.spinning = false;
            effects.push(Effect::StopSpinner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(style: StyleKind) -> InteractionContext {
        InteractionContext {
            feedback_enabled: true,
            style,
        }
    }

    #[test]
    fn tap_down_shows_scale_once() {
        let mut machine = InteractionStateMachine::new();
        let c = ctx(StyleKind::Filled);
        assert_eq!(
            machine.handle(InteractionEvent::TapDown, &c),
            vec![Effect::ShowFeedback(FeedbackKind::Scale)]
        );
        assert_eq!(machine.state(), InteractionState::FeedbackActive);
        assert!(machine.handle(InteractionEvent::TapDown, &c).is_empty());
    }

    #[test]
    fn plain_style_uses_overlay() {
        let mut machine = InteractionStateMachine::new();
        let c = ctx(StyleKind::Plain);
        assert_eq!(
            machine.handle(InteractionEvent::TapDown, &c),
            vec![Effect::ShowFeedback(FeedbackKind::ColorOverlay)]
        );
        assert_eq!(
            machine.handle(InteractionEvent::TapUp, &c),
            vec![Effect::ResetFeedback(FeedbackKind::ColorOverlay)]
        );
        assert_eq!(machine.state(), InteractionState::Idle);
    }

    #[test]
    fn reset_uses_kind_recorded_at_tap_down() {
        let mut machine = InteractionStateMachine::new();
        machine.handle(InteractionEvent::TapDown, &ctx(StyleKind::Plain));
        assert_eq!(
            machine.handle(InteractionEvent::TapCancel, &ctx(StyleKind::Filled)),
            vec![Effect::ResetFeedback(FeedbackKind::ColorOverlay)]
        );
    }

    #[test]
    fn disabled_feedback_ignores_touches() {
        let mut machine = InteractionStateMachine::new();
        let c = InteractionContext {
            feedback_enabled: false,
            style: StyleKind::Filled,
        };
        assert!(machine.handle(InteractionEvent::TapDown, &c).is_empty());
        assert!(machine.handle(InteractionEvent::TapUp, &c).is_empty());
        assert_eq!(machine.state(), InteractionState::Idle);
    }

    #[test]
    fn complete_toggles_spinner() {
        let mut machine = InteractionStateMachine::new();
        let c = ctx(StyleKind::Filled);
        assert_eq!(
            machine.handle(InteractionEvent::TapComplete, &c),
            vec![Effect::FireSelection, Effect::StartSpinner]
        );
        assert_eq!(machine.state(), InteractionState::Spinning);
        assert_eq!(
            machine.handle(InteractionEvent::TapComplete, &c),
            vec![Effect::StopSpinner]
        );
        assert_eq!(machine.state(), InteractionState::Idle);
    }

    #[test]
    fn simulated_tap_sequence() {
        let mut machine = InteractionStateMachine::new();
        let c = ctx(StyleKind::Border);
        assert_eq!(
            machine.handle(InteractionEvent::SimulatedTap, &c),
            vec![
                Effect::ShowFeedback(FeedbackKind::Scale),
                Effect::FireSelection,
                Effect::StartSpinner,
                Effect::ScheduleFeedbackRelease(SIMULATED_TAP_HOLD),
            ]
        );
        assert_eq!(machine.state(), InteractionState::Spinning);
        assert_eq!(machine.feedback(), Some(FeedbackKind::Scale));

        assert_eq!(
            machine.handle(InteractionEvent::FeedbackReleaseDue, &c),
            vec![Effect::ResetFeedback(FeedbackKind::Scale)]
        );
        assert_eq!(machine.state(), InteractionState::Spinning);

        assert_eq!(
            machine.handle(InteractionEvent::SimulatedTap, &c),
            vec![Effect::StopSpinner]
        );
    }

    #[test]
    fn simulated_tap_without_feedback_skips_release() {
        let mut machine = InteractionStateMachine::new();
        let c = InteractionContext {
            feedback_enabled: false,
            style: StyleKind::Filled,
        };
        assert_eq!(
            machine.handle(InteractionEvent::SimulatedTap, &c),
            vec![Effect::FireSelection, Effect::StartSpinner]
        );
    }

    #[test]
    fn programmatic_spinner_is_guarded() {
        let mut machine = InteractionStateMachine::new();
        let c = ctx(StyleKind::Filled);
        assert!(machine.handle(InteractionEvent::StopSpinner, &c).is_empty());
        assert_eq!(
            machine.handle(InteractionEvent::StartSpinner, &c),
            vec![Effect::StartSpinner]
        );
        assert!(machine.handle(InteractionEvent::StartSpinner, &c).is_empty());
        assert!(machine.is_spinning());
    }

    #[test]
    fn spinning_reported_over_feedback() {
        let mut machine = InteractionStateMachine::new();
        let c = ctx(StyleKind::Filled);
        machine.handle(InteractionEvent::StartSpinner, &c);
        machine.handle(InteractionEvent::TapDown, &c);
        assert_eq!(machine.feedback(), Some(FeedbackKind::Scale));
        assert_eq!(machine.state(), InteractionState::Spinning);
    }
}
