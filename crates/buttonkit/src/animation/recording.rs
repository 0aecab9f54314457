//! A runner that records requests instead of playing them.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{AnimationRequest, AnimationRunner, AnimationTarget};

#[derive(Debug, Default)]
struct Log {
    requests: Vec<AnimationRequest>,
    cancelled: Vec<AnimationTarget>,
    running: HashMap<AnimationTarget, AnimationRequest>,
}

/// Records every request and cancellation.
///
/// Clones share one log, so a test can keep a handle while the button owns
/// the runner.
///
/// ```
/// use std::time::Duration;
/// use buttonkit::animation::*;
///
/// let recorder = RecordingAnimationRunner::new();
/// let mut runner: Box<dyn AnimationRunner> = Box::new(recorder.clone());
/// runner.animate(AnimationRequest::once(
///     AnimationTarget::OverlayAlpha,
///     AnimatedValue::Alpha(0.15),
///     AnimatedValue::Alpha(0.0),
///     Duration::from_secs(1),
///     Easing::EaseOut,
/// ));
/// assert!(recorder.running(AnimationTarget::OverlayAlpha).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingAnimationRunner {
    log: Arc<Mutex<Log>>,
}

impl RecordingAnimationRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<AnimationRequest> {
        self.log.lock().requests.clone()
    }

    /// Requests received for one target, oldest first.
    pub fn requests_for(&self, target: AnimationTarget) -> Vec<AnimationRequest> {
        self.log
            .lock()
            .requests
            .iter()
            .filter(|r| r.target == target)
            .copied()
            .collect()
    }

    /// The latest request for `target`, unless it was cancelled since.
    pub fn running(&self, target: AnimationTarget) -> Option<AnimationRequest> {
        self.log.lock().running.get(&target).copied()
    }

    /// Targets cancelled, in order.
    pub fn cancellations(&self) -> Vec<AnimationTarget> {
        self.log.lock().cancelled.clone()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        let mut log = self.log.lock();
        log.requests.clear();
        log.cancelled.clear();
        log.running.clear();
    }
}

impl AnimationRunner for RecordingAnimationRunner {
    fn animate(&mut self, request: AnimationRequest) {
        let mut log = self.log.lock();
        log.running.insert(request.target, request);
        log.requests.push(request);
    }

    fn cancel(&mut self, target: AnimationTarget) {
        let mut log = self.log.lock();
        log.running.remove(&target);
        log.cancelled.push(target);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::animation::{AnimatedValue, Easing, Scale};

    fn pulse(dot: usize) -> AnimationRequest {
        AnimationRequest::once(
            AnimationTarget::SpinnerDot(dot),
            AnimatedValue::Scale(Scale::uniform(0.5)),
            AnimatedValue::Scale(Scale::IDENTITY),
            Duration::from_millis(600),
            Easing::EaseInOut,
        )
        .autoreversing()
    }

    #[test]
    fn clones_share_the_log() {
        let recorder = RecordingAnimationRunner::new();
        let mut runner = recorder.clone();
        runner.animate(pulse(0));
        runner.animate(pulse(1));
        runner.cancel(AnimationTarget::SpinnerDot(0));

        assert_eq!(recorder.requests().len(), 2);
        assert_eq!(recorder.running(AnimationTarget::SpinnerDot(0)), None);
        assert_eq!(recorder.running(AnimationTarget::SpinnerDot(1)), Some(pulse(1)));
        assert_eq!(recorder.cancellations(), vec![AnimationTarget::SpinnerDot(0)]);
        assert_eq!(recorder.requests_for(AnimationTarget::SpinnerDot(1)).len(), 1);

        recorder.clear();
        assert!(recorder.requests().is_empty());
    }
}
