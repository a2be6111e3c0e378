//! Linear move from the current position to a target.

use web_time::Instant;

use super::{elapsed_secs, AnimationDelegate, AnimationState};
use crate::error::AnimationError;
use crate::geometry::{lerp_position, Bounds, Position};
use crate::view::View;

/// Moves the view in a straight line to `target` over a fixed duration.
///
/// Progress is linear (no easing). When bounds are given, a frame whose
/// interpolated position falls outside them leaves the view where it is,
/// but the clock keeps running so the animation still completes on time.
#[derive(Debug, Clone)]
pub struct TranslateAnimation {
    origin: Position,
    target: Position,
    /// Seconds, always > 0.
    duration: f64,
    start_time: Instant,
    bounds: Option<Bounds>,
    state: AnimationState,
}

impl TranslateAnimation {
    /// Start moving from the view's current position now.
    pub fn new(
        view: &impl View,
        target: Position,
        duration_secs: f64,
        bounds: Option<Bounds>,
    ) -> Result<Self, AnimationError> {
        Self::with_start_time(
            view,
            target,
            duration_secs,
            bounds,
            Instant::now(),
        )
    }

    /// Start moving from the view's current position at `start_time`.
    pub fn with_start_time(
        view: &impl View,
        target: Position,
        duration_secs: f64,
        bounds: Option<Bounds>,
        start_time: Instant,
    ) -> Result<Self, AnimationError> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(AnimationError::invalid(format!(
                "translate duration must be positive, got {duration_secs}"
            )));
        }
        if !target.is_finite() {
            return Err(AnimationError::invalid(format!(
                "translate target is not finite: {target}"
            )));
        }
        let origin = view.position();
        log::debug!(
            "translate {origin} -> {target} over {duration_secs:.3}s{}",
            if bounds.is_some() { " (bounded)" } else { "" }
        );
        Ok(Self {
            origin,
            target,
            duration: duration_secs,
            start_time,
            bounds,
            state: AnimationState::Running,
        })
    }

    /// Position captured when the animation started.
    #[must_use]
    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Where the animation ends.
    #[must_use]
    pub fn target(&self) -> Position {
        self.target
    }

    /// Run length in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Normalized progress in `[0, 1]` at `now`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f64 {
        (elapsed_secs(self.start_time, now) / self.duration).min(1.0)
    }

    /// Unconstrained interpolated position at `now`.
    #[must_use]
    pub fn position_at(&self, now: Instant) -> Position {
        lerp_position(self.origin, self.target, self.progress(now))
    }
}

impl AnimationDelegate for TranslateAnimation {
    fn update_view(&mut self, view: &mut dyn View, now: Instant) {
        if self.state == AnimationState::Completed {
            return;
        }

        let mut elapsed = elapsed_secs(self.start_time, now);
        if elapsed >= self.duration {
            elapsed = self.duration;
            self.state = AnimationState::Completed;
            view.cancel_animation();
            log::debug!("translate to {} complete", self.target);
        }

        let pos =
            lerp_position(self.origin, self.target, elapsed / self.duration);

        if let Some(bounds) = &self.bounds {
            if !bounds.contains_frame(pos.truncate(), view.frame_size()) {
                log::trace!("translate frame at {pos} out of bounds, holding");
                return;
            }
        }

        view.set_position(pos);
    }

    fn is_active(&self) -> bool {
        self.state == AnimationState::Running
    }

    fn name(&self) -> &'static str {
        "translate"
    }
}
