//! Per-frame view animations.
//!
//! An animation is a delegate the render loop calls once per frame. It
//! reads the clock sample it is handed, moves the view, and detaches
//! itself from the view once it has run its course. Updates never fail:
//! expiry and bounds rejection are state transitions, not errors.

mod fling;
mod momentum;
mod translate;

pub use fling::Fling;
pub use momentum::{BoundsPolicy, MomentumAnimation};
pub use translate::TranslateAnimation;
use web_time::Instant;

use crate::view::View;

/// Lifecycle of a single animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// Still moving the view.
    #[default]
    Running,
    /// Finished or cancelled. Terminal: a new animation must be built to
    /// move again.
    Completed,
}

/// Behavior driven by the render loop once per frame.
///
/// New animation kinds (rotation, orbit, zoom) plug in by implementing
/// this trait and being attached to a [`MapView`](crate::view::MapView).
pub trait AnimationDelegate {
    /// Advance the view to where this animation puts it at `now`.
    ///
    /// Must return within a frame budget and must be a no-op once the
    /// animation has completed.
    fn update_view(&mut self, view: &mut dyn View, now: Instant);

    /// Whether the animation is still running.
    fn is_active(&self) -> bool;

    /// Optional name for debugging/logging.
    fn name(&self) -> &'static str {
        "unnamed"
    }
}

/// Seconds from `start` to `now`; zero if `now` precedes `start`.
#[inline]
pub(crate) fn elapsed_secs(start: Instant, now: Instant) -> f64 {
    now.saturating_duration_since(start).as_secs_f64()
}
