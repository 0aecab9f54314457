//! Selection listeners.

use std::sync::Arc;

use crate::button::Button;

/// Receives a callback when a button is selected.
///
/// Buttons hold their delegate weakly; keep the `Arc` alive elsewhere.
pub trait SelectionDelegate: Send + Sync {
    fn button_selected(&self, button: &Button);
}

/// Closure form of a selection listener.
pub type SelectionBlock = Arc<dyn Fn(&Button) + Send + Sync>;
