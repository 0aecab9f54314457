//! Core systems for ButtonKit.
//!
//! - **Clock & Timers**: one-shot and repeating timers over an injectable clock
//! - **Dispatcher**: delayed payload queue for event-thread follow-ups
//! - **Signals**: ordered listener lists
//! - **Logging**: `tracing` targets and helpers
//! - **Utils**: small numeric helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use buttonkit_core::{Dispatcher, ManualClock};
//!
//! let clock = ManualClock::new();
//! let mut dispatcher = Dispatcher::with_clock(Arc::new(clock.clone()));
//! dispatcher.post_after(Duration::from_millis(100), "release");
//!
//! clock.advance(Duration::from_millis(100));
//! assert_eq!(dispatcher.take_due(), vec!["release"]);
//! ```

pub mod dispatch;
mod error;
pub mod logging;
pub mod signal;
pub mod timer;
pub mod utils;

pub use dispatch::{Dispatcher, Task, background};
pub use error::{KitError, Result, SignalError, TimerError};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use timer::{Clock, ManualClock, SystemClock, TimerId, TimerKind, TimerManager};
